// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effective-configuration resolution.
//!
//! [`resolve`] is the single merge step of the scope engine: given the
//! ancestor's [`EffectiveConfig`] and a scope's explicit [`ProviderConfig`],
//! it produces the effective configuration visible inside that scope.
//! Chaining the step from the library default down a provider tree yields
//! the configuration any descendant observes.
//!
//! Resolution is a pure function: no I/O, no shared mutable state, and
//! resolving the same pair twice yields observationally equal results. Each
//! call returns a *fresh* record, so reference identity
//! ([`EffectiveConfig::ptr_eq`]) doubles as the change token memoized
//! consumers compare against.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use canopy_token::{
    AlgorithmError, DeriveError, MissingTokenError, MissingTokenHandling, TokenSet, compute_hash,
    derive, derive_component, schema,
};

use crate::component::Component;
use crate::locale::Locale;
use crate::overrides::OverrideMap;
use crate::prefix::{DEFAULT_ICON_PREFIX, PrefixResolver};
use crate::record::{
    ContainerResolver, Csp, Direction, PopupOverflow, ProviderConfig, WaveConfig, WarningConfig,
};
use crate::theme::CssVar;

/// Error produced by [`resolve`].
///
/// Only theme derivation can fail; every other channel degrades silently to
/// inherited values. A failure is surfaced synchronously, never retried, and
/// leaves previously committed effective configurations untouched (they are
/// immutable records already held by consumers).
#[derive(Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A mapping algorithm failed while deriving tokens.
    Algorithm {
        /// The component whose chain failed, or `None` for the global chain.
        component: Option<Component>,
        /// The underlying failure.
        error: AlgorithmError,
    },
    /// A derived set was incomplete under strict handling.
    MissingToken {
        /// The component whose derivation was incomplete, or `None` for the
        /// global derivation.
        component: Option<Component>,
        /// The underlying failure.
        error: MissingTokenError,
    },
}

impl ResolveError {
    fn from_derive(component: Option<Component>, error: DeriveError) -> Self {
        match error {
            DeriveError::Algorithm(error) => Self::Algorithm { component, error },
            DeriveError::MissingToken(error) => Self::MissingToken { component, error },
        }
    }
}

impl fmt::Debug for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Algorithm { component, error } => f
                .debug_struct("Algorithm")
                .field("component", component)
                .field("error", error)
                .finish(),
            Self::MissingToken { component, error } => f
                .debug_struct("MissingToken")
                .field("component", component)
                .field("error", error)
                .finish(),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Algorithm {
                component: Some(component),
                error,
            } => write!(f, "resolving {component} theme: {error}"),
            Self::Algorithm {
                component: None,
                error,
            } => write!(f, "resolving theme: {error}"),
            Self::MissingToken {
                component: Some(component),
                error,
            } => write!(f, "resolving {component} theme: {error}"),
            Self::MissingToken {
                component: None,
                error,
            } => write!(f, "resolving theme: {error}"),
        }
    }
}

impl core::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Algorithm { error, .. } => Some(error),
            Self::MissingToken { error, .. } => Some(error),
        }
    }
}

/// The resolved theme a subtree observes.
///
/// Produced by [`resolve`]; immutable. The token sets are the output of the
/// derivation pipeline with every explicit override applied. `hashed` and
/// `css_var` only steer how consumers *use* the tokens; they never feed
/// back into derivation.
#[derive(Clone, Debug)]
pub struct ResolvedTheme {
    tokens: TokenSet,
    /// Sorted by `Component`.
    components: Vec<(Component, TokenSet)>,
    hash: String,
    hashed: bool,
    css_var: CssVar,
}

impl ResolvedTheme {
    /// Returns the global derived token set.
    #[must_use]
    pub fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// Returns the derived token set for a component, if the theme supplied
    /// one. Components without an entry use [`ResolvedTheme::tokens`].
    #[must_use]
    pub fn component_tokens(&self, component: Component) -> Option<&TokenSet> {
        self.components
            .binary_search_by_key(&component, |(c, _)| *c)
            .ok()
            .map(|idx| &self.components[idx].1)
    }

    /// Returns the components with dedicated token sets, ordered by key.
    pub fn components(&self) -> impl Iterator<Item = (Component, &TokenSet)> + '_ {
        self.components.iter().map(|(c, t)| (*c, t))
    }

    /// Returns the content hash of the global derived set.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Returns whether consumers namespace class names by the hash.
    #[must_use]
    pub fn hashed(&self) -> bool {
        self.hashed
    }

    /// Returns the CSS variable exposure setting.
    #[must_use]
    pub fn css_var(&self) -> &CssVar {
        &self.css_var
    }
}

/// The fully resolved configuration visible at a point in the tree.
///
/// Every field is filled: by an ancestor provider, or by the library
/// default. The record is immutable and cheap to clone (`Rc`-backed); a new
/// resolution always produces a new identity, so [`EffectiveConfig::ptr_eq`]
/// is the change signal for memoized consumers.
#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    inner: Rc<EffectiveData>,
}

#[derive(Debug)]
struct EffectiveData {
    prefix_resolver: PrefixResolver,
    icon_prefix: String,
    direction: Direction,
    locale: Locale,
    theme: ResolvedTheme,
    overrides: OverrideMap,
    virtual_scroll: bool,
    popup_match_select_width: bool,
    popup_overflow: PopupOverflow,
    popup_container: Option<ContainerResolver>,
    target_container: Option<ContainerResolver>,
    csp: Option<Csp>,
    wave: WaveConfig,
    button_auto_insert_space: bool,
    warning: WarningConfig,
}

impl EffectiveConfig {
    /// Returns the library's default configuration.
    ///
    /// This is the process-wide default store: a hardcoded record with the
    /// seed theme derived through the identity chain. It is read-only and
    /// every call returns a structurally identical record.
    #[must_use]
    pub fn library_default() -> Self {
        let tokens = schema::seed();
        let hash = compute_hash(&tokens, None);
        Self {
            inner: Rc::new(EffectiveData {
                prefix_resolver: PrefixResolver::default(),
                icon_prefix: String::from(DEFAULT_ICON_PREFIX),
                direction: Direction::Ltr,
                locale: Locale::english(),
                theme: ResolvedTheme {
                    tokens,
                    components: Vec::new(),
                    hash,
                    hashed: true,
                    css_var: CssVar::Off,
                },
                overrides: OverrideMap::empty(),
                virtual_scroll: true,
                popup_match_select_width: true,
                popup_overflow: PopupOverflow::Viewport,
                popup_container: None,
                target_container: None,
                csp: None,
                wave: WaveConfig::default(),
                button_auto_insert_space: true,
                warning: WarningConfig::default(),
            }),
        }
    }

    /// Returns `true` if both configurations are the same record.
    ///
    /// Resolution always allocates a fresh record, so this is the change
    /// token: a differing identity means some ancestor recommitted.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Resolves a class-name prefix via the effective resolver.
    #[must_use]
    pub fn prefix_cls(&self, suffix: Option<&str>, custom: Option<&str>) -> String {
        self.inner.prefix_resolver.resolve(suffix, custom)
    }

    /// Returns the effective prefix resolver.
    #[must_use]
    pub fn prefix_resolver(&self) -> &PrefixResolver {
        &self.inner.prefix_resolver
    }

    /// Returns the effective icon class-name prefix.
    #[must_use]
    pub fn icon_prefix(&self) -> &str {
        &self.inner.icon_prefix
    }

    /// Returns the effective text direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.inner.direction
    }

    /// Returns the effective locale (fully populated).
    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.inner.locale
    }

    /// Returns the resolved theme.
    #[must_use]
    pub fn theme(&self) -> &ResolvedTheme {
        &self.inner.theme
    }

    /// Returns the effective per-component overrides.
    #[must_use]
    pub fn overrides(&self) -> &OverrideMap {
        &self.inner.overrides
    }

    /// Returns the effective virtual-scrolling default.
    #[must_use]
    pub fn virtual_scroll(&self) -> bool {
        self.inner.virtual_scroll
    }

    /// Returns whether popups match the width of their select.
    #[must_use]
    pub fn popup_match_select_width(&self) -> bool {
        self.inner.popup_match_select_width
    }

    /// Returns the effective popup overflow policy.
    #[must_use]
    pub fn popup_overflow(&self) -> PopupOverflow {
        self.inner.popup_overflow
    }

    /// Returns the effective popup container resolver, if any.
    #[must_use]
    pub fn popup_container(&self) -> Option<&ContainerResolver> {
        self.inner.popup_container.as_ref()
    }

    /// Returns the effective scroll-target container resolver, if any.
    #[must_use]
    pub fn target_container(&self) -> Option<&ContainerResolver> {
        self.inner.target_container.as_ref()
    }

    /// Returns the effective CSP settings, if any.
    #[must_use]
    pub fn csp(&self) -> Option<&Csp> {
        self.inner.csp.as_ref()
    }

    /// Returns the effective wave settings.
    #[must_use]
    pub fn wave(&self) -> WaveConfig {
        self.inner.wave
    }

    /// Returns whether buttons auto-insert a space between CJK characters.
    #[must_use]
    pub fn button_auto_insert_space(&self) -> bool {
        self.inner.button_auto_insert_space
    }

    /// Returns the effective warning settings.
    #[must_use]
    pub fn warning(&self) -> WarningConfig {
        self.inner.warning
    }
}

/// Resolves a scope's effective configuration.
///
/// Precedence per field: the scope's explicit value, else the ancestor's
/// effective value. The ancestor already encodes the library defaults, so an
/// unset field never skips levels.
///
/// The theme channel is richer. An absent explicit theme reuses the
/// ancestor's resolved theme untouched. An explicit theme re-derives: the
/// seed is the library base seed when `inherit` is `false`, otherwise the
/// ancestor's *resolved* tokens; the explicit chain runs over the seed, the
/// explicit token override is applied, per-component entries derive from
/// that result, and the content hash is recomputed. `hashed` and `css_var`
/// fall back to the ancestor when unset.
///
/// # Errors
///
/// [`ResolveError`] when a mapping algorithm fails. The error carries the
/// component whose chain failed, or `None` for the global chain.
///
/// # Example
///
/// ```rust
/// use canopy_config::{Direction, EffectiveConfig, ProviderConfig, resolve};
///
/// let root = resolve(
///     &EffectiveConfig::library_default(),
///     &ProviderConfig::builder().direction(Direction::Rtl).build(),
/// )
/// .unwrap();
/// let child = resolve(&root, &ProviderConfig::empty()).unwrap();
///
/// // Unset fields fall through to the ancestor.
/// assert_eq!(child.direction(), Direction::Rtl);
/// // But the records are distinct identities.
/// assert!(!child.ptr_eq(&root));
/// ```
pub fn resolve(
    ancestor: &EffectiveConfig,
    explicit: &ProviderConfig,
) -> Result<EffectiveConfig, ResolveError> {
    let ancestor_data = &*ancestor.inner;

    let theme = match explicit.theme() {
        None => ancestor_data.theme.clone(),
        Some(config) => {
            let seed = if config.inherit() {
                ancestor_data.theme.tokens.clone()
            } else {
                schema::seed()
            };

            let derived = derive(&seed, config.algorithm(), MissingTokenHandling::default())
                .map_err(|e| ResolveError::from_derive(None, e))?;
            let tokens = derived.merged_with(config.tokens());

            let mut components = Vec::new();
            for (component, component_theme) in config.components() {
                let set = derive_component(
                    &tokens,
                    component_theme.tokens(),
                    component_theme.algorithm(),
                    MissingTokenHandling::default(),
                )
                .map_err(|e| ResolveError::from_derive(Some(component), e))?;
                components.push((component, set));
            }

            let hash = compute_hash(&tokens, None);
            ResolvedTheme {
                tokens,
                components,
                hash,
                hashed: config.hashed().unwrap_or(ancestor_data.theme.hashed),
                css_var: config
                    .css_var()
                    .cloned()
                    .unwrap_or_else(|| ancestor_data.theme.css_var.clone()),
            }
        }
    };

    let locale = match explicit.locale() {
        Some(locale) => locale.merged_over(&ancestor_data.locale),
        None => ancestor_data.locale.clone(),
    };

    Ok(EffectiveConfig {
        inner: Rc::new(EffectiveData {
            prefix_resolver: explicit
                .prefix_resolver()
                .cloned()
                .unwrap_or_else(|| ancestor_data.prefix_resolver.clone()),
            icon_prefix: explicit
                .icon_prefix()
                .map(String::from)
                .unwrap_or_else(|| ancestor_data.icon_prefix.clone()),
            direction: explicit.direction().unwrap_or(ancestor_data.direction),
            locale,
            theme,
            overrides: explicit.overrides().merged_over(&ancestor_data.overrides),
            virtual_scroll: explicit
                .virtual_scroll()
                .unwrap_or(ancestor_data.virtual_scroll),
            popup_match_select_width: explicit
                .popup_match_select_width()
                .unwrap_or(ancestor_data.popup_match_select_width),
            popup_overflow: explicit
                .popup_overflow()
                .unwrap_or(ancestor_data.popup_overflow),
            popup_container: explicit
                .popup_container()
                .cloned()
                .or_else(|| ancestor_data.popup_container.clone()),
            target_container: explicit
                .target_container()
                .cloned()
                .or_else(|| ancestor_data.target_container.clone()),
            csp: explicit.csp().cloned().or_else(|| ancestor_data.csp.clone()),
            wave: explicit.wave().unwrap_or(ancestor_data.wave),
            button_auto_insert_space: explicit
                .button_auto_insert_space()
                .unwrap_or(ancestor_data.button_auto_insert_space),
            warning: explicit.warning().unwrap_or(ancestor_data.warning),
        }),
    })
}
