// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The consumption contract.
//!
//! [`ConfigConsumer`] is the read-only view every component uses to observe
//! configuration. It is a snapshot: a cheap-clone handle over the effective
//! configuration of the scope it was obtained from, with the same accessor
//! shape at any nesting depth: a component one level deep and a component
//! fifty levels deep read configuration identically.
//!
//! A consumer does not observe later commits; re-obtain one from the tree
//! after a configuration change (the host rendering system's own
//! changed-value notification decides when).

use alloc::string::String;

use canopy_token::{TokenSet, compute_hash};

use crate::component::Component;
use crate::locale::Locale;
use crate::overrides::ComponentOverride;
use crate::record::{ContainerResolver, Direction, PopupOverflow, WaveConfig, WarningConfig};
use crate::resolve::EffectiveConfig;
use crate::scope::ScopeId;
use crate::theme::CssVar;

/// Read-only configuration view handed to components.
///
/// Obtained from [`ScopeTree::consumer`](crate::ScopeTree::consumer).
///
/// # Example
///
/// ```rust
/// use canopy_config::{ProviderConfig, ScopeTree, components};
///
/// let mut tree = ScopeTree::new();
/// let scope = tree.insert(None, ProviderConfig::empty());
/// let consumer = tree.consumer(scope).unwrap();
///
/// assert_eq!(consumer.prefix_cls(Some("button"), None), "ant-button");
/// assert_eq!(consumer.icon_prefix(), "anticon");
/// assert!(consumer.component_override(components::BUTTON).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ConfigConsumer {
    scope: ScopeId,
    config: EffectiveConfig,
}

impl ConfigConsumer {
    pub(crate) fn new(scope: ScopeId, config: EffectiveConfig) -> Self {
        Self { scope, config }
    }

    /// Returns the scope this consumer reads from.
    #[must_use]
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Returns the underlying effective configuration snapshot.
    #[must_use]
    pub fn config(&self) -> &EffectiveConfig {
        &self.config
    }

    /// Resolves a class-name prefix, `get_prefix_cls` style.
    ///
    /// `custom` wins outright when given; otherwise the effective resolver
    /// combines the root prefix with `suffix`.
    #[must_use]
    pub fn prefix_cls(&self, suffix: Option<&str>, custom: Option<&str>) -> String {
        self.config.prefix_cls(suffix, custom)
    }

    /// Returns the icon class-name prefix.
    #[must_use]
    pub fn icon_prefix(&self) -> &str {
        self.config.icon_prefix()
    }

    /// Returns the text direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.config.direction()
    }

    /// Returns the resolved locale bundle.
    #[must_use]
    pub fn locale(&self) -> &Locale {
        self.config.locale()
    }

    /// Returns the global derived token set.
    #[must_use]
    pub fn tokens(&self) -> &TokenSet {
        self.config.theme().tokens()
    }

    /// Returns the token set for a component: its dedicated set when the
    /// theme supplied one, the global set otherwise.
    #[must_use]
    pub fn component_tokens(&self, component: Component) -> &TokenSet {
        self.config
            .theme()
            .component_tokens(component)
            .unwrap_or_else(|| self.config.theme().tokens())
    }

    /// Returns the theme's class-name namespace, if hashing is enabled.
    #[must_use]
    pub fn theme_hash(&self) -> Option<&str> {
        let theme = self.config.theme();
        theme.hashed().then(|| theme.hash())
    }

    /// Returns the class-name namespace for a component, if hashing is
    /// enabled.
    ///
    /// Components with a dedicated token set get their own namespace;
    /// everything else shares the global one per component name.
    #[must_use]
    pub fn component_hash(&self, component: Component) -> Option<String> {
        self.config
            .theme()
            .hashed()
            .then(|| compute_hash(self.component_tokens(component), Some(component.name())))
    }

    /// Returns the CSS variable exposure setting.
    #[must_use]
    pub fn css_var(&self) -> &CssVar {
        self.config.theme().css_var()
    }

    /// Returns the style/behavior override for a component, if any ancestor
    /// provider supplied one.
    #[must_use]
    pub fn component_override(&self, component: Component) -> Option<&ComponentOverride> {
        self.config.overrides().get(component)
    }

    /// Returns the virtual-scrolling default.
    #[must_use]
    pub fn virtual_scroll(&self) -> bool {
        self.config.virtual_scroll()
    }

    /// Returns whether popups match the width of their select.
    #[must_use]
    pub fn popup_match_select_width(&self) -> bool {
        self.config.popup_match_select_width()
    }

    /// Returns the popup overflow policy.
    #[must_use]
    pub fn popup_overflow(&self) -> PopupOverflow {
        self.config.popup_overflow()
    }

    /// Returns the popup container resolver, if configured.
    #[must_use]
    pub fn popup_container(&self) -> Option<&ContainerResolver> {
        self.config.popup_container()
    }

    /// Returns the scroll-target container resolver, if configured.
    #[must_use]
    pub fn target_container(&self) -> Option<&ContainerResolver> {
        self.config.target_container()
    }

    /// Returns the CSP nonce for injected styles, if configured.
    #[must_use]
    pub fn csp_nonce(&self) -> Option<&str> {
        self.config.csp().and_then(|csp| csp.nonce.as_deref())
    }

    /// Returns the wave-animation settings.
    #[must_use]
    pub fn wave(&self) -> WaveConfig {
        self.config.wave()
    }

    /// Returns whether buttons auto-insert a space between CJK characters.
    #[must_use]
    pub fn button_auto_insert_space(&self) -> bool {
        self.config.button_auto_insert_space()
    }

    /// Returns the deprecation-warning settings.
    #[must_use]
    pub fn warning(&self) -> WarningConfig {
        self.config.warning()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::components;
    use crate::overrides::ComponentOverride;
    use crate::record::ProviderConfig;
    use crate::scope::ScopeTree;
    use crate::theme::{ComponentTheme, ThemeConfig};
    use canopy_token::schema;

    #[test]
    fn consumer_reads_defaults() {
        let mut tree = ScopeTree::new();
        let scope = tree.insert(None, ProviderConfig::empty());
        let consumer = tree.consumer(scope).unwrap();

        assert_eq!(consumer.prefix_cls(None, None), "ant");
        assert_eq!(consumer.direction(), Direction::Ltr);
        assert!(consumer.virtual_scroll());
        assert_eq!(consumer.popup_overflow(), PopupOverflow::Viewport);
        assert!(consumer.csp_nonce().is_none());
        assert!(consumer.button_auto_insert_space());
        assert!(!consumer.wave().disabled);
        assert!(!consumer.warning().strict);
        assert_eq!(
            consumer.locale().empty_text.as_deref(),
            Some("No data")
        );
    }

    #[test]
    fn consumer_shape_is_depth_independent() {
        let mut tree = ScopeTree::new();
        let root = tree.insert(
            None,
            ProviderConfig::builder()
                .override_for(
                    components::BUTTON,
                    ComponentOverride::builder().class_name("a").build(),
                )
                .build(),
        );
        let mut deep = root;
        for _ in 0..50 {
            deep = tree.insert(Some(deep), ProviderConfig::empty());
        }

        let shallow_consumer = tree.consumer(root).unwrap();
        let deep_consumer = tree.consumer(deep).unwrap();

        // Same accessors, same observed values, at depth 1 and depth 51.
        assert_eq!(
            shallow_consumer
                .component_override(components::BUTTON)
                .unwrap()
                .class_name(),
            deep_consumer
                .component_override(components::BUTTON)
                .unwrap()
                .class_name(),
        );
        assert_eq!(shallow_consumer.theme_hash(), deep_consumer.theme_hash());
    }

    #[test]
    fn component_tokens_fall_back_to_global() {
        let mut tree = ScopeTree::new();
        let scope = tree.insert(
            None,
            ProviderConfig::builder()
                .theme(
                    ThemeConfig::builder()
                        .component(
                            components::BUTTON,
                            ComponentTheme::new().with_token(schema::CONTROL_HEIGHT, 48.0),
                        )
                        .build(),
                )
                .build(),
        );
        let consumer = tree.consumer(scope).unwrap();

        assert_eq!(
            consumer
                .component_tokens(components::BUTTON)
                .number(schema::CONTROL_HEIGHT),
            Some(48.0)
        );
        // No dedicated set for card: global values.
        assert_eq!(
            consumer
                .component_tokens(components::CARD)
                .number(schema::CONTROL_HEIGHT),
            Some(32.0)
        );
    }

    #[test]
    fn hashes_gate_on_hashed_flag() {
        let mut tree = ScopeTree::new();
        let hashed = tree.insert(None, ProviderConfig::empty());
        let unhashed = tree.insert(
            None,
            ProviderConfig::builder()
                .theme(ThemeConfig::builder().hashed(false).build())
                .build(),
        );

        let consumer = tree.consumer(hashed).unwrap();
        assert!(consumer.theme_hash().is_some());
        assert!(consumer.component_hash(components::BUTTON).is_some());
        // Component namespaces differ from the global one.
        assert_ne!(
            consumer.component_hash(components::BUTTON).as_deref(),
            consumer.theme_hash()
        );

        let consumer = tree.consumer(unhashed).unwrap();
        assert!(consumer.theme_hash().is_none());
        assert!(consumer.component_hash(components::BUTTON).is_none());
    }

    #[test]
    fn consumer_is_a_snapshot() {
        let mut tree = ScopeTree::new();
        let scope = tree.insert(None, ProviderConfig::empty());
        let consumer = tree.consumer(scope).unwrap();

        tree.set_config(
            scope,
            ProviderConfig::builder().direction(Direction::Rtl).build(),
        );

        // The old snapshot still reads the old value.
        assert_eq!(consumer.direction(), Direction::Ltr);
        // A fresh consumer observes the commit.
        assert_eq!(tree.consumer(scope).unwrap().direction(), Direction::Rtl);
    }
}
