// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-component overrides and their merge.
//!
//! A provider can attach a partial override record to any component: a class
//! name, inline style declarations, semantic slot classes/styles, and named
//! behavior fields (icons, feature switches). [`OverrideMap`] collects these
//! per component; [`OverrideMap::merged_over`] is the merge used when a
//! child scope's map meets its ancestor's.
//!
//! ## Merge policy
//!
//! Components merge independently: a child overriding `button` never
//! disturbs a `card` override inherited from an ancestor. Within one
//! component the merge is shallow, one level deep: a field set by the child
//! wins wholesale (an explicit empty string is a value and wins too), an
//! unset field falls through to the ancestor. There is deliberately no deep
//! merge inside [`SemanticClassNames`] or [`SemanticStyles`]; a child that
//! sets `class_names.root` replaces the ancestor's entire slot map for that
//! component. Last writer wins per component, not per nested key; tests
//! assume exactly this.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::component::Component;

/// A behavior-field value on a component override.
///
/// These are DOM/behavior props, not theme tokens: an icon name, a numeric
/// size, a feature switch.
#[derive(Clone, PartialEq)]
pub enum FieldValue {
    /// Textual field: icon names, placement strings.
    Text(String),
    /// Numeric field: sizes, counts.
    Number(f64),
    /// Boolean field: feature switches such as `show_search`.
    Flag(bool),
}

impl FieldValue {
    /// Returns the text payload, if textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the numeric payload, if numeric.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the flag payload, if boolean.
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        Self::Text(String::from(text))
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for FieldValue {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Number(number) => f.debug_tuple("Number").field(number).finish(),
            Self::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
        }
    }
}

/// Inline style declarations: CSS property name to value, one level deep.
///
/// # Example
///
/// ```rust
/// use canopy_config::StyleProps;
///
/// let style = StyleProps::new()
///     .with("margin", "8px")
///     .with("color", "red");
/// assert_eq!(style.get("margin"), Some("8px"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleProps {
    /// Sorted by property name for binary search lookup.
    decls: Vec<(&'static str, String)>,
}

impl StyleProps {
    /// Creates an empty declaration list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `property` set to `value`, replacing any previous
    /// value.
    #[must_use]
    pub fn with(mut self, property: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.decls.binary_search_by_key(&property, |(p, _)| *p) {
            Ok(idx) => self.decls[idx].1 = value,
            Err(idx) => self.decls.insert(idx, (property, value)),
        }
        self
    }

    /// Gets the value for a property, if set.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.decls
            .binary_search_by_key(&property, |(p, _)| *p)
            .ok()
            .map(|idx| self.decls[idx].1.as_str())
    }

    /// Returns the number of declarations.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// Returns `true` if there are no declarations.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Returns an iterator over the declarations, ordered by property.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.decls.iter().map(|(p, v)| (*p, v.as_str()))
    }
}

/// Semantic slot class names: slot name (`"root"`, `"header"`, …) to class.
///
/// Replaced wholesale on merge; see the module docs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SemanticClassNames {
    /// Sorted by slot name.
    slots: Vec<(&'static str, String)>,
}

impl SemanticClassNames {
    /// Creates an empty slot map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `slot` set to `class`, replacing any previous
    /// value.
    #[must_use]
    pub fn with(mut self, slot: &'static str, class: impl Into<String>) -> Self {
        let class = class.into();
        match self.slots.binary_search_by_key(&slot, |(s, _)| *s) {
            Ok(idx) => self.slots[idx].1 = class,
            Err(idx) => self.slots.insert(idx, (slot, class)),
        }
        self
    }

    /// Gets the class for a slot, if set.
    #[must_use]
    pub fn get(&self, slot: &str) -> Option<&str> {
        self.slots
            .binary_search_by_key(&slot, |(s, _)| *s)
            .ok()
            .map(|idx| self.slots[idx].1.as_str())
    }

    /// Returns `true` if no slots are set.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns an iterator over the slots, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.slots.iter().map(|(s, c)| (*s, c.as_str()))
    }
}

/// Semantic slot styles: slot name to inline declarations.
///
/// Replaced wholesale on merge; see the module docs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SemanticStyles {
    /// Sorted by slot name.
    slots: Vec<(&'static str, StyleProps)>,
}

impl SemanticStyles {
    /// Creates an empty slot map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `slot` set to `style`, replacing any previous
    /// value.
    #[must_use]
    pub fn with(mut self, slot: &'static str, style: StyleProps) -> Self {
        match self.slots.binary_search_by_key(&slot, |(s, _)| *s) {
            Ok(idx) => self.slots[idx].1 = style,
            Err(idx) => self.slots.insert(idx, (slot, style)),
        }
        self
    }

    /// Gets the style for a slot, if set.
    #[must_use]
    pub fn get(&self, slot: &str) -> Option<&StyleProps> {
        self.slots
            .binary_search_by_key(&slot, |(s, _)| *s)
            .ok()
            .map(|idx| &self.slots[idx].1)
    }

    /// Returns `true` if no slots are set.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns an iterator over the slots, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StyleProps)> + '_ {
        self.slots.iter().map(|(s, p)| (*s, p))
    }
}

/// A partial style/behavior override for one component.
///
/// Every component shares this one generic shape; component-specific fields
/// (a close icon, a search switch, a spacing size) live in the named
/// [`FieldValue`] table rather than in per-component structs, so one merge
/// routine covers every component.
///
/// Use [`ComponentOverrideBuilder`] to construct instances.
///
/// # Example
///
/// ```rust
/// use canopy_config::ComponentOverride;
///
/// let button = ComponentOverride::builder()
///     .class_name("brand-button")
///     .field("auto_focus", true)
///     .build();
///
/// assert_eq!(button.class_name(), Some("brand-button"));
/// assert_eq!(button.field("auto_focus").and_then(|f| f.as_flag()), Some(true));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentOverride {
    class_name: Option<String>,
    style: Option<StyleProps>,
    class_names: Option<SemanticClassNames>,
    styles: Option<SemanticStyles>,
    /// Sorted by field name.
    fields: Vec<(&'static str, FieldValue)>,
}

impl ComponentOverride {
    /// Returns a builder for a new override.
    #[must_use]
    pub fn builder() -> ComponentOverrideBuilder {
        ComponentOverrideBuilder::default()
    }

    /// Returns the root class name, if set.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Returns the root inline style, if set.
    #[must_use]
    pub fn style(&self) -> Option<&StyleProps> {
        self.style.as_ref()
    }

    /// Returns the semantic slot classes, if set.
    #[must_use]
    pub fn class_names(&self) -> Option<&SemanticClassNames> {
        self.class_names.as_ref()
    }

    /// Returns the semantic slot styles, if set.
    #[must_use]
    pub fn styles(&self) -> Option<&SemanticStyles> {
        self.styles.as_ref()
    }

    /// Gets a named behavior field, if set.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .binary_search_by_key(&name, |(n, _)| *n)
            .ok()
            .map(|idx| &self.fields[idx].1)
    }

    /// Returns an iterator over the behavior fields, ordered by name.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    /// Returns `true` if nothing is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_name.is_none()
            && self.style.is_none()
            && self.class_names.is_none()
            && self.styles.is_none()
            && self.fields.is_empty()
    }

    /// Returns `self` merged over `ancestor`: shallow, child wins per field.
    ///
    /// See the module docs for the exact policy.
    #[must_use]
    pub fn merged_over(&self, ancestor: &Self) -> Self {
        let mut fields = ancestor.fields.clone();
        for (name, value) in &self.fields {
            match fields.binary_search_by_key(name, |(n, _)| *n) {
                Ok(idx) => fields[idx].1 = value.clone(),
                Err(idx) => fields.insert(idx, (*name, value.clone())),
            }
        }

        Self {
            class_name: self.class_name.clone().or_else(|| ancestor.class_name.clone()),
            style: self.style.clone().or_else(|| ancestor.style.clone()),
            class_names: self
                .class_names
                .clone()
                .or_else(|| ancestor.class_names.clone()),
            styles: self.styles.clone().or_else(|| ancestor.styles.clone()),
            fields,
        }
    }
}

/// Builder for [`ComponentOverride`].
#[derive(Debug, Default)]
pub struct ComponentOverrideBuilder {
    class_name: Option<String>,
    style: Option<StyleProps>,
    class_names: Option<SemanticClassNames>,
    styles: Option<SemanticStyles>,
    fields: Vec<(&'static str, FieldValue)>,
}

impl ComponentOverrideBuilder {
    /// Sets the root class name. An empty string is a valid explicit value.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets the root inline style.
    #[must_use]
    pub fn style(mut self, style: StyleProps) -> Self {
        self.style = Some(style);
        self
    }

    /// Sets the semantic slot classes.
    #[must_use]
    pub fn class_names(mut self, class_names: SemanticClassNames) -> Self {
        self.class_names = Some(class_names);
        self
    }

    /// Sets the semantic slot styles.
    #[must_use]
    pub fn styles(mut self, styles: SemanticStyles) -> Self {
        self.styles = Some(styles);
        self
    }

    /// Sets a named behavior field.
    #[must_use]
    pub fn field(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        let value = value.into();
        match self.fields.binary_search_by_key(&name, |(n, _)| *n) {
            Ok(idx) => self.fields[idx].1 = value,
            Err(idx) => self.fields.insert(idx, (name, value)),
        }
        self
    }

    /// Builds the override.
    #[must_use]
    pub fn build(self) -> ComponentOverride {
        ComponentOverride {
            class_name: self.class_name,
            style: self.style,
            class_names: self.class_names,
            styles: self.styles,
            fields: self.fields,
        }
    }
}

/// Per-component overrides for a scope, keyed by [`Component`].
///
/// Immutable and cheap to clone. Use [`OverrideMapBuilder`] to construct
/// instances; [`OverrideMap::merged_over`] merges a child map over an
/// ancestor's per the module policy.
///
/// # Example
///
/// ```rust
/// use canopy_config::{ComponentOverride, OverrideMapBuilder, components};
///
/// let parent = OverrideMapBuilder::new()
///     .set(
///         components::BUTTON,
///         ComponentOverride::builder().class_name("a").build(),
///     )
///     .build();
/// let child = OverrideMapBuilder::new()
///     .set(
///         components::CARD,
///         ComponentOverride::builder().class_name("b").build(),
///     )
///     .build();
///
/// let merged = child.merged_over(&parent);
/// assert_eq!(merged.get(components::BUTTON).unwrap().class_name(), Some("a"));
/// assert_eq!(merged.get(components::CARD).unwrap().class_name(), Some("b"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct OverrideMap {
    inner: Rc<OverrideMapData>,
}

/// Internal storage for component overrides.
#[derive(Debug, Default)]
struct OverrideMapData {
    /// Sorted by `Component`.
    entries: Vec<(Component, ComponentOverride)>,
}

impl OverrideMap {
    /// Returns an empty map.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if no component has an override.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Returns the number of components with overrides.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Gets the override for a component, if present.
    #[must_use]
    pub fn get(&self, component: Component) -> Option<&ComponentOverride> {
        self.inner
            .entries
            .binary_search_by_key(&component, |(c, _)| *c)
            .ok()
            .map(|idx| &self.inner.entries[idx].1)
    }

    /// Returns an iterator over the entries, ordered by component.
    pub fn iter(&self) -> impl Iterator<Item = (Component, &ComponentOverride)> + '_ {
        self.inner.entries.iter().map(|(c, o)| (*c, o))
    }

    /// Returns `self` (the child scope's map) merged over `ancestor`.
    ///
    /// Components merge independently: present in only one side, copied
    /// as-is; present in both, merged shallowly with the child winning per
    /// field ([`ComponentOverride::merged_over`]). When either side is empty
    /// this is a cheap reference-counted clone of the other.
    #[must_use]
    pub fn merged_over(&self, ancestor: &Self) -> Self {
        if ancestor.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return ancestor.clone();
        }

        let anc = &ancestor.inner.entries;
        let child = &self.inner.entries;
        let mut entries = Vec::with_capacity(anc.len() + child.len());
        let (mut i, mut j) = (0, 0);

        while i < anc.len() && j < child.len() {
            if anc[i].0 < child[j].0 {
                entries.push(anc[i].clone());
                i += 1;
            } else if child[j].0 < anc[i].0 {
                entries.push(child[j].clone());
                j += 1;
            } else {
                entries.push((child[j].0, child[j].1.merged_over(&anc[i].1)));
                i += 1;
                j += 1;
            }
        }
        entries.extend(anc[i..].iter().cloned());
        entries.extend(child[j..].iter().cloned());

        Self {
            inner: Rc::new(OverrideMapData { entries }),
        }
    }

    /// Returns `true` if both maps share the same backing storage.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for OverrideMap {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner) || self.inner.entries == other.inner.entries
    }
}

/// Builder for [`OverrideMap`].
#[derive(Debug, Default)]
pub struct OverrideMapBuilder {
    entries: Vec<(Component, ComponentOverride)>,
}

impl OverrideMapBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with the entries of an existing map.
    #[must_use]
    pub fn from_map(map: &OverrideMap) -> Self {
        Self {
            entries: map.inner.entries.clone(),
        }
    }

    /// Sets the override for a component, replacing any previous entry.
    #[must_use]
    pub fn set(mut self, component: Component, component_override: ComponentOverride) -> Self {
        match self
            .entries
            .binary_search_by_key(&component, |(c, _)| *c)
        {
            Ok(idx) => self.entries[idx].1 = component_override,
            Err(idx) => self.entries.insert(idx, (component, component_override)),
        }
        self
    }

    /// Builds the map.
    #[must_use]
    pub fn build(self) -> OverrideMap {
        OverrideMap {
            inner: Rc::new(OverrideMapData {
                entries: self.entries,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::components;

    fn named(class: &str) -> ComponentOverride {
        ComponentOverride::builder().class_name(class).build()
    }

    #[test]
    fn override_empty() {
        let o = ComponentOverride::default();
        assert!(o.is_empty());
        assert_eq!(o.class_name(), None);
        assert_eq!(o.field("close_icon"), None);
    }

    #[test]
    fn override_builder_fields() {
        let o = ComponentOverride::builder()
            .class_name("x")
            .style(StyleProps::new().with("margin", "4px"))
            .field("close_icon", "close-circle")
            .field("size", 4.0)
            .build();

        assert_eq!(o.class_name(), Some("x"));
        assert_eq!(o.style().unwrap().get("margin"), Some("4px"));
        assert_eq!(
            o.field("close_icon").and_then(FieldValue::as_text),
            Some("close-circle")
        );
        assert_eq!(o.field("size").and_then(FieldValue::as_number), Some(4.0));
    }

    #[test]
    fn merge_child_field_wins() {
        let parent = ComponentOverride::builder()
            .class_name("parent")
            .field("close_icon", "close")
            .build();
        let child = ComponentOverride::builder().class_name("child").build();

        let merged = child.merged_over(&parent);
        assert_eq!(merged.class_name(), Some("child"));
        // Unset child field falls through.
        assert_eq!(
            merged.field("close_icon").and_then(FieldValue::as_text),
            Some("close")
        );
    }

    #[test]
    fn merge_empty_string_is_explicit() {
        let parent = named("parent");
        let child = named("");

        let merged = child.merged_over(&parent);
        assert_eq!(merged.class_name(), Some(""));
    }

    #[test]
    fn merge_replaces_slot_maps_wholesale() {
        let parent = ComponentOverride::builder()
            .class_names(
                SemanticClassNames::new()
                    .with("root", "p-root")
                    .with("header", "p-header"),
            )
            .build();
        let child = ComponentOverride::builder()
            .class_names(SemanticClassNames::new().with("root", "c-root"))
            .build();

        let merged = child.merged_over(&parent);
        let class_names = merged.class_names().unwrap();
        assert_eq!(class_names.get("root"), Some("c-root"));
        // Shallow policy: the parent's header slot is gone.
        assert_eq!(class_names.get("header"), None);
    }

    #[test]
    fn map_components_merge_independently() {
        let parent = OverrideMapBuilder::new()
            .set(components::BUTTON, named("a"))
            .build();
        let child = OverrideMapBuilder::new()
            .set(components::CARD, named("b"))
            .build();

        let merged = child.merged_over(&parent);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get(components::BUTTON).unwrap().class_name(), Some("a"));
        assert_eq!(merged.get(components::CARD).unwrap().class_name(), Some("b"));
    }

    #[test]
    fn map_same_component_child_wins() {
        let parent = OverrideMapBuilder::new()
            .set(components::BUTTON, named("a"))
            .build();
        let child = OverrideMapBuilder::new()
            .set(components::BUTTON, named("b"))
            .build();

        let merged = child.merged_over(&parent);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get(components::BUTTON).unwrap().class_name(), Some("b"));
    }

    #[test]
    fn map_merge_with_empty_is_cheap() {
        let parent = OverrideMapBuilder::new()
            .set(components::BUTTON, named("a"))
            .build();
        let empty = OverrideMap::empty();

        assert!(empty.merged_over(&parent).ptr_eq(&parent));
        assert!(parent.merged_over(&empty).ptr_eq(&parent));
    }

    #[test]
    fn map_merge_rightmost_wins_at_any_arity() {
        let a = OverrideMapBuilder::new()
            .set(components::BUTTON, named("a"))
            .build();
        let b = OverrideMapBuilder::new()
            .set(components::BUTTON, named("b"))
            .set(components::CARD, named("b-card"))
            .build();
        let c = OverrideMapBuilder::new()
            .set(components::BUTTON, named("c"))
            .build();

        // ((c over b) over a) == (c over (b over a)) with rightmost winning.
        let left = c.merged_over(&b).merged_over(&a);
        let right = c.merged_over(&b.merged_over(&a));

        assert_eq!(left, right);
        assert_eq!(left.get(components::BUTTON).unwrap().class_name(), Some("c"));
        assert_eq!(left.get(components::CARD).unwrap().class_name(), Some("b-card"));
    }
}
