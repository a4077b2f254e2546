// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Provider configuration records.
//!
//! [`ProviderConfig`] is the partial record a provider scope supplies: every
//! field optional, unset fields falling through to the nearest ancestor's
//! effective value during resolution. Records are immutable for a scope's
//! lifetime; changing a scope's configuration replaces the record wholesale.

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use crate::component::Component;
use crate::locale::Locale;
use crate::overrides::{ComponentOverride, OverrideMap, OverrideMapBuilder};
use crate::prefix::PrefixResolver;
use crate::theme::ThemeConfig;

/// Text directionality of a subtree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

impl Direction {
    /// Returns the DOM attribute value for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How popups behave when they would overflow their container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PopupOverflow {
    /// Flip/shift to stay inside the viewport.
    #[default]
    Viewport,
    /// Follow the scroll container.
    Scroll,
}

/// Content-Security-Policy settings for injected styles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Csp {
    /// Nonce attached to injected style elements.
    pub nonce: Option<String>,
}

/// Click-wave animation settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WaveConfig {
    /// Disables the wave animation entirely.
    pub disabled: bool,
}

/// Deprecation-warning settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WarningConfig {
    /// Escalates deprecation warnings in the host application.
    pub strict: bool,
}

/// A pure resolver returning the container a floating layer should mount in.
///
/// The rendering layer interprets the returned identifier; this crate only
/// carries the callable. Given the optional identifier of the triggering
/// element, the resolver returns the container's identifier.
///
/// Cloning is cheap; the underlying function is reference-counted.
#[derive(Clone)]
pub struct ContainerResolver {
    inner: Rc<dyn Fn(Option<&str>) -> String>,
}

impl ContainerResolver {
    /// Creates a resolver from a pure function of the trigger identifier.
    #[must_use]
    pub fn new(resolve: impl Fn(Option<&str>) -> String + 'static) -> Self {
        Self {
            inner: Rc::new(resolve),
        }
    }

    /// Resolves the container for an optional trigger.
    #[must_use]
    pub fn resolve(&self, trigger: Option<&str>) -> String {
        (self.inner)(trigger)
    }
}

// Manual Debug impl since the resolver function is opaque.
impl fmt::Debug for ContainerResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerResolver").finish_non_exhaustive()
    }
}

/// The partial configuration a provider scope supplies.
///
/// Every field is optional; resolution fills unset fields from the nearest
/// ancestor's effective configuration (which already encodes the library
/// defaults). Use [`ProviderConfig::builder`] to construct instances.
///
/// # Example
///
/// ```rust
/// use canopy_config::{Direction, ProviderConfig};
///
/// let config = ProviderConfig::builder()
///     .direction(Direction::Rtl)
///     .build();
///
/// assert_eq!(config.direction(), Some(Direction::Rtl));
/// assert!(config.theme().is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProviderConfig {
    prefix_resolver: Option<PrefixResolver>,
    icon_prefix: Option<String>,
    direction: Option<Direction>,
    locale: Option<Locale>,
    theme: Option<ThemeConfig>,
    overrides: OverrideMap,
    virtual_scroll: Option<bool>,
    popup_match_select_width: Option<bool>,
    popup_overflow: Option<PopupOverflow>,
    popup_container: Option<ContainerResolver>,
    target_container: Option<ContainerResolver>,
    csp: Option<Csp>,
    wave: Option<WaveConfig>,
    button_auto_insert_space: Option<bool>,
    warning: Option<WarningConfig>,
}

impl ProviderConfig {
    /// Returns an empty configuration (every field unset).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a builder for a new configuration.
    #[must_use]
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::default()
    }

    /// Returns the explicit prefix resolver, if set.
    #[must_use]
    pub fn prefix_resolver(&self) -> Option<&PrefixResolver> {
        self.prefix_resolver.as_ref()
    }

    /// Returns the explicit icon prefix, if set.
    #[must_use]
    pub fn icon_prefix(&self) -> Option<&str> {
        self.icon_prefix.as_deref()
    }

    /// Returns the explicit direction, if set.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Returns the explicit locale, if set.
    #[must_use]
    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    /// Returns the explicit theme, if set.
    #[must_use]
    pub fn theme(&self) -> Option<&ThemeConfig> {
        self.theme.as_ref()
    }

    /// Returns the per-component overrides (possibly empty).
    #[must_use]
    pub fn overrides(&self) -> &OverrideMap {
        &self.overrides
    }

    /// Returns the explicit virtual-scrolling default, if set.
    #[must_use]
    pub fn virtual_scroll(&self) -> Option<bool> {
        self.virtual_scroll
    }

    /// Returns the explicit popup-width matching flag, if set.
    #[must_use]
    pub fn popup_match_select_width(&self) -> Option<bool> {
        self.popup_match_select_width
    }

    /// Returns the explicit popup overflow policy, if set.
    #[must_use]
    pub fn popup_overflow(&self) -> Option<PopupOverflow> {
        self.popup_overflow
    }

    /// Returns the explicit popup container resolver, if set.
    #[must_use]
    pub fn popup_container(&self) -> Option<&ContainerResolver> {
        self.popup_container.as_ref()
    }

    /// Returns the explicit scroll-target container resolver, if set.
    #[must_use]
    pub fn target_container(&self) -> Option<&ContainerResolver> {
        self.target_container.as_ref()
    }

    /// Returns the explicit CSP settings, if set.
    #[must_use]
    pub fn csp(&self) -> Option<&Csp> {
        self.csp.as_ref()
    }

    /// Returns the explicit wave settings, if set.
    #[must_use]
    pub fn wave(&self) -> Option<WaveConfig> {
        self.wave
    }

    /// Returns the explicit button-spacing flag, if set.
    #[must_use]
    pub fn button_auto_insert_space(&self) -> Option<bool> {
        self.button_auto_insert_space
    }

    /// Returns the explicit warning settings, if set.
    #[must_use]
    pub fn warning(&self) -> Option<WarningConfig> {
        self.warning
    }
}

/// Builder for [`ProviderConfig`].
#[derive(Debug, Default)]
pub struct ProviderConfigBuilder {
    config: ProviderConfig,
    overrides: OverrideMapBuilder,
}

impl ProviderConfigBuilder {
    /// Sets the class-name prefix resolver.
    #[must_use]
    pub fn prefix_resolver(mut self, resolver: PrefixResolver) -> Self {
        self.config.prefix_resolver = Some(resolver);
        self
    }

    /// Sets the icon class-name prefix.
    #[must_use]
    pub fn icon_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.icon_prefix = Some(prefix.into());
        self
    }

    /// Sets the text direction.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.direction = Some(direction);
        self
    }

    /// Sets the locale bundle.
    #[must_use]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.config.locale = Some(locale);
        self
    }

    /// Sets the theme.
    #[must_use]
    pub fn theme(mut self, theme: ThemeConfig) -> Self {
        self.config.theme = Some(theme);
        self
    }

    /// Sets the override for one component.
    #[must_use]
    pub fn override_for(
        mut self,
        component: Component,
        component_override: ComponentOverride,
    ) -> Self {
        self.overrides = self.overrides.set(component, component_override);
        self
    }

    /// Replaces the per-component overrides wholesale.
    ///
    /// Later [`ProviderConfigBuilder::override_for`] calls add on top of the
    /// given map.
    #[must_use]
    pub fn overrides(mut self, overrides: OverrideMap) -> Self {
        self.overrides = OverrideMapBuilder::from_map(&overrides);
        self
    }

    /// Sets the virtual-scrolling default.
    #[must_use]
    pub fn virtual_scroll(mut self, enabled: bool) -> Self {
        self.config.virtual_scroll = Some(enabled);
        self
    }

    /// Sets whether popups match the width of their select.
    #[must_use]
    pub fn popup_match_select_width(mut self, enabled: bool) -> Self {
        self.config.popup_match_select_width = Some(enabled);
        self
    }

    /// Sets the popup overflow policy.
    #[must_use]
    pub fn popup_overflow(mut self, overflow: PopupOverflow) -> Self {
        self.config.popup_overflow = Some(overflow);
        self
    }

    /// Sets the popup container resolver.
    #[must_use]
    pub fn popup_container(mut self, resolver: ContainerResolver) -> Self {
        self.config.popup_container = Some(resolver);
        self
    }

    /// Sets the scroll-target container resolver.
    #[must_use]
    pub fn target_container(mut self, resolver: ContainerResolver) -> Self {
        self.config.target_container = Some(resolver);
        self
    }

    /// Sets the Content-Security-Policy settings.
    #[must_use]
    pub fn csp(mut self, csp: Csp) -> Self {
        self.config.csp = Some(csp);
        self
    }

    /// Sets the wave-animation settings.
    #[must_use]
    pub fn wave(mut self, wave: WaveConfig) -> Self {
        self.config.wave = Some(wave);
        self
    }

    /// Sets whether buttons auto-insert a space between CJK characters.
    #[must_use]
    pub fn button_auto_insert_space(mut self, enabled: bool) -> Self {
        self.config.button_auto_insert_space = Some(enabled);
        self
    }

    /// Sets the deprecation-warning settings.
    #[must_use]
    pub fn warning(mut self, warning: WarningConfig) -> Self {
        self.config.warning = Some(warning);
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(mut self) -> ProviderConfig {
        self.config.overrides = self.overrides.build();
        self.config
    }
}
