// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme configuration records.
//!
//! [`ThemeConfig`] is the theme a provider *asks for*: a sparse token
//! override, an algorithm chain, per-component entries, and the flags
//! controlling how consumers use the result. Resolution (seeding, deriving,
//! hashing) happens in [`resolve`](crate::resolve); the record itself is
//! inert data.

use alloc::string::String;
use alloc::vec::Vec;

use canopy_token::{AlgorithmChain, MappingAlgorithm, TokenKey, TokenSet, TokenSetBuilder, TokenValue};

use crate::component::Component;

/// How resolved tokens are exposed to the styling layer.
///
/// `Off` bakes token values into generated class names; `On` exposes them as
/// named CSS variables instead. The choice is inheritable like any other
/// configuration field and never affects derivation itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CssVar {
    /// Tokens are baked into generated class names.
    #[default]
    Off,
    /// Tokens are exposed as CSS variables.
    On(CssVarOptions),
}

impl CssVar {
    /// Returns `true` if CSS variables are enabled.
    #[must_use]
    pub fn is_on(&self) -> bool {
        matches!(self, Self::On(_))
    }

    /// Returns the options, if enabled.
    #[must_use]
    pub fn options(&self) -> Option<&CssVarOptions> {
        match self {
            Self::On(options) => Some(options),
            Self::Off => None,
        }
    }
}

/// Naming options for CSS variable exposure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CssVarOptions {
    /// Variable name prefix; the root prefix is used when unset.
    pub prefix: Option<String>,
    /// Unique key for the themed subtree; the theme hash is used when unset.
    pub key: Option<String>,
}

/// Theme settings for a single component.
///
/// A component entry overrides tokens for that component only, optionally
/// re-deriving them with its own algorithm chain seeded from the global
/// derived set.
///
/// # Example
///
/// ```rust
/// use canopy_config::ComponentTheme;
/// use canopy_token::schema;
///
/// let button = ComponentTheme::new().with_token(schema::CONTROL_HEIGHT, 40.0);
/// assert_eq!(button.tokens().number(schema::CONTROL_HEIGHT), Some(40.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ComponentTheme {
    tokens: TokenSet,
    algorithm: Option<AlgorithmChain>,
}

impl ComponentTheme {
    /// Creates an empty component theme.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with one token overridden.
    #[must_use]
    pub fn with_token(mut self, key: TokenKey, value: impl Into<TokenValue>) -> Self {
        self.tokens = self
            .tokens
            .merged_with(&TokenSetBuilder::new().set(key, value).build());
        self
    }

    /// Returns a copy with the token overrides replaced wholesale.
    #[must_use]
    pub fn with_tokens(mut self, tokens: TokenSet) -> Self {
        self.tokens = tokens;
        self
    }

    /// Returns a copy with `algorithm` appended to the component's chain.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: impl MappingAlgorithm + 'static) -> Self {
        let chain = self.algorithm.take().unwrap_or_default();
        self.algorithm = Some(chain.with(algorithm));
        self
    }

    /// Returns the component's token overrides.
    #[must_use]
    pub fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// Returns the component's algorithm chain, if any.
    #[must_use]
    pub fn algorithm(&self) -> Option<&AlgorithmChain> {
        self.algorithm.as_ref()
    }
}

/// The theme a provider supplies.
///
/// Use [`ThemeConfig::builder`] to construct instances.
///
/// # Example
///
/// ```rust
/// use canopy_config::ThemeConfig;
/// use canopy_token::{DarkAlgorithm, schema};
///
/// let theme = ThemeConfig::builder()
///     .algorithm(DarkAlgorithm)
///     .token(schema::COLOR_PRIMARY, "#722ed1")
///     .build();
///
/// assert_eq!(theme.algorithm().len(), 1);
/// assert!(theme.inherit());
/// ```
#[derive(Clone, Debug)]
pub struct ThemeConfig {
    tokens: TokenSet,
    /// Sorted by `Component`.
    components: Vec<(Component, ComponentTheme)>,
    algorithm: AlgorithmChain,
    hashed: Option<bool>,
    inherit: bool,
    css_var: Option<CssVar>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            tokens: TokenSet::empty(),
            components: Vec::new(),
            algorithm: AlgorithmChain::new(),
            hashed: None,
            inherit: true,
            css_var: None,
        }
    }
}

impl ThemeConfig {
    /// Returns a builder for a new theme configuration.
    #[must_use]
    pub fn builder() -> ThemeConfigBuilder {
        ThemeConfigBuilder::default()
    }

    /// Returns the sparse token override.
    #[must_use]
    pub fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// Returns the per-component entries, ordered by component.
    pub fn components(&self) -> impl Iterator<Item = (Component, &ComponentTheme)> + '_ {
        self.components.iter().map(|(c, t)| (*c, t))
    }

    /// Returns the algorithm chain (empty means identity).
    #[must_use]
    pub fn algorithm(&self) -> &AlgorithmChain {
        &self.algorithm
    }

    /// Returns the hashed-class-names flag, if explicitly set.
    #[must_use]
    pub fn hashed(&self) -> Option<bool> {
        self.hashed
    }

    /// Returns whether this theme seeds from the ancestor's resolved tokens
    /// (`true`, the default) or from the library's base seed (`false`).
    #[must_use]
    pub fn inherit(&self) -> bool {
        self.inherit
    }

    /// Returns the CSS variable setting, if explicitly set.
    #[must_use]
    pub fn css_var(&self) -> Option<&CssVar> {
        self.css_var.as_ref()
    }
}

/// Builder for [`ThemeConfig`].
#[derive(Debug, Default)]
pub struct ThemeConfigBuilder {
    config: ThemeConfig,
}

impl ThemeConfigBuilder {
    /// Overrides one alias token.
    #[must_use]
    pub fn token(mut self, key: TokenKey, value: impl Into<TokenValue>) -> Self {
        self.config.tokens = self
            .config
            .tokens
            .merged_with(&TokenSetBuilder::new().set(key, value).build());
        self
    }

    /// Replaces the sparse token override wholesale.
    #[must_use]
    pub fn tokens(mut self, tokens: TokenSet) -> Self {
        self.config.tokens = tokens;
        self
    }

    /// Appends an algorithm to the chain.
    #[must_use]
    pub fn algorithm(mut self, algorithm: impl MappingAlgorithm + 'static) -> Self {
        self.config.algorithm.push(algorithm);
        self
    }

    /// Replaces the algorithm chain wholesale.
    #[must_use]
    pub fn algorithms(mut self, chain: AlgorithmChain) -> Self {
        self.config.algorithm = chain;
        self
    }

    /// Sets the theme for one component, replacing any previous entry.
    #[must_use]
    pub fn component(mut self, component: Component, theme: ComponentTheme) -> Self {
        match self
            .config
            .components
            .binary_search_by_key(&component, |(c, _)| *c)
        {
            Ok(idx) => self.config.components[idx].1 = theme,
            Err(idx) => self.config.components.insert(idx, (component, theme)),
        }
        self
    }

    /// Sets whether consumers namespace class names by the theme hash.
    #[must_use]
    pub fn hashed(mut self, hashed: bool) -> Self {
        self.config.hashed = Some(hashed);
        self
    }

    /// Sets whether this theme seeds from the ancestor's resolved tokens.
    #[must_use]
    pub fn inherit(mut self, inherit: bool) -> Self {
        self.config.inherit = inherit;
        self
    }

    /// Sets the CSS variable exposure.
    #[must_use]
    pub fn css_var(mut self, css_var: CssVar) -> Self {
        self.config.css_var = Some(css_var);
        self
    }

    /// Builds the theme configuration.
    #[must_use]
    pub fn build(self) -> ThemeConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::components;
    use canopy_token::{CompactAlgorithm, DarkAlgorithm, schema};

    #[test]
    fn default_theme_config() {
        let theme = ThemeConfig::default();
        assert!(theme.tokens().is_empty());
        assert!(theme.algorithm().is_empty());
        assert_eq!(theme.hashed(), None);
        assert!(theme.inherit());
        assert_eq!(theme.css_var(), None);
        assert_eq!(theme.components().count(), 0);
    }

    #[test]
    fn builder_accumulates_tokens_and_algorithms() {
        let theme = ThemeConfig::builder()
            .token(schema::COLOR_PRIMARY, "#ff0000")
            .token(schema::SPACING, 4.0)
            .algorithm(DarkAlgorithm)
            .algorithm(CompactAlgorithm)
            .build();

        assert_eq!(theme.tokens().len(), 2);
        assert_eq!(theme.algorithm().len(), 2);
    }

    #[test]
    fn builder_component_entries_sorted_and_replaced() {
        let theme = ThemeConfig::builder()
            .component(
                components::CARD,
                ComponentTheme::new().with_token(schema::BORDER_RADIUS, 2.0),
            )
            .component(
                components::BUTTON,
                ComponentTheme::new().with_token(schema::CONTROL_HEIGHT, 40.0),
            )
            .component(
                components::CARD,
                ComponentTheme::new().with_token(schema::BORDER_RADIUS, 8.0),
            )
            .build();

        let entries: alloc::vec::Vec<_> = theme.components().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, components::BUTTON);
        assert_eq!(
            entries[1].1.tokens().number(schema::BORDER_RADIUS),
            Some(8.0)
        );
    }

    #[test]
    fn css_var_flags() {
        assert!(!CssVar::Off.is_on());
        let on = CssVar::On(CssVarOptions {
            prefix: Some("brand".into()),
            key: None,
        });
        assert!(on.is_on());
        assert_eq!(on.options().unwrap().prefix.as_deref(), Some("brand"));
    }

    #[test]
    fn component_theme_algorithm_chain() {
        let theme = ComponentTheme::new()
            .with_algorithm(CompactAlgorithm)
            .with_algorithm(DarkAlgorithm);
        assert_eq!(theme.algorithm().unwrap().len(), 2);
    }
}
