// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component identification.
//!
//! This module provides [`Component`], the key used for per-component
//! overrides and per-component theme entries, plus the [`components`] table
//! of well-known names.

use core::fmt;

/// A component key.
///
/// Components are identified by their stable kebab-case name; the name also
/// feeds class-name generation (`get_prefix_cls`) and per-component hash
/// namespacing, so it is part of the public contract.
///
/// The [`components`] module defines constants for every component the
/// library ships. Embedders with custom components may mint their own keys.
///
/// # Example
///
/// ```rust
/// use canopy_config::{Component, components};
///
/// assert_eq!(components::BUTTON.name(), "button");
/// assert_eq!(Component::new("button"), components::BUTTON);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Component(&'static str);

impl Component {
    /// Creates a component key with the given stable name.
    #[must_use]
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Returns the component's stable name.
    #[must_use]
    #[inline]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.0).finish()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Well-known component keys.
pub mod components {
    use super::Component;

    /// Alert banners.
    pub const ALERT: Component = Component::new("alert");
    /// Avatars.
    pub const AVATAR: Component = Component::new("avatar");
    /// Badges.
    pub const BADGE: Component = Component::new("badge");
    /// Buttons.
    pub const BUTTON: Component = Component::new("button");
    /// Cards.
    pub const CARD: Component = Component::new("card");
    /// Checkboxes.
    pub const CHECKBOX: Component = Component::new("checkbox");
    /// Drawers.
    pub const DRAWER: Component = Component::new("drawer");
    /// Flex layout helper.
    pub const FLEX: Component = Component::new("flex");
    /// Forms.
    pub const FORM: Component = Component::new("form");
    /// Images with preview.
    pub const IMAGE: Component = Component::new("image");
    /// Text inputs.
    pub const INPUT: Component = Component::new("input");
    /// Menus.
    pub const MENU: Component = Component::new("menu");
    /// Modal dialogs.
    pub const MODAL: Component = Component::new("modal");
    /// Notifications.
    pub const NOTIFICATION: Component = Component::new("notification");
    /// Pagination controls.
    pub const PAGINATION: Component = Component::new("pagination");
    /// Select dropdowns.
    pub const SELECT: Component = Component::new("select");
    /// Spacing containers.
    pub const SPACE: Component = Component::new("space");
    /// Tables.
    pub const TABLE: Component = Component::new("table");
    /// Tab strips.
    pub const TABS: Component = Component::new("tabs");
    /// Tags.
    pub const TAG: Component = Component::new("tag");
    /// Guided tours.
    pub const TOUR: Component = Component::new("tour");
    /// Transfer lists.
    pub const TRANSFER: Component = Component::new("transfer");
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn component_basics() {
        let c = Component::new("button");
        assert_eq!(c.name(), "button");
        assert_eq!(c, components::BUTTON);
        assert_ne!(c, components::CARD);
    }

    #[test]
    fn component_orders_by_name() {
        assert!(components::BUTTON < components::CARD);
        assert!(components::ALERT < components::BUTTON);
    }

    #[test]
    fn component_debug_and_display() {
        assert_eq!(format!("{:?}", components::TAG), "Component(\"tag\")");
        assert_eq!(format!("{}", components::TAG), "tag");
    }
}
