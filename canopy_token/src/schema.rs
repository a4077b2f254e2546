// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The alias-token schema.
//!
//! The schema is a fixed, versioned enumeration of every alias token a fully
//! derived [`TokenSet`](crate::TokenSet) must populate. It is a contract
//! shared with the style-injection layer: derivation treats it as external
//! and complete, never extending or shrinking it at runtime.
//!
//! Each token has a stable wire name (used for CSS variable naming and
//! diagnostics) and a seed value. [`seed`] returns the library's base seed
//! set, the starting point for every derivation chain that does not inherit
//! an ancestor's resolved tokens.

use crate::key::TokenKey;
use crate::set::{TokenSet, TokenSetBuilder};
use crate::value::TokenValue;

/// Version of the alias-token schema.
///
/// Bumped whenever a token is added, removed, or renamed. The version is
/// folded into every content hash so differently-versioned token sets never
/// share a class-name namespace.
pub const SCHEMA_VERSION: u16 = 1;

/// Brand color.
pub const COLOR_PRIMARY: TokenKey = TokenKey::new(0);
/// Success state color.
pub const COLOR_SUCCESS: TokenKey = TokenKey::new(1);
/// Warning state color.
pub const COLOR_WARNING: TokenKey = TokenKey::new(2);
/// Error state color.
pub const COLOR_ERROR: TokenKey = TokenKey::new(3);
/// Informational color.
pub const COLOR_INFO: TokenKey = TokenKey::new(4);
/// Base text color from which text tones derive.
pub const COLOR_TEXT_BASE: TokenKey = TokenKey::new(5);
/// Default text color.
pub const COLOR_TEXT: TokenKey = TokenKey::new(6);
/// Base background color from which surface tones derive.
pub const COLOR_BG_BASE: TokenKey = TokenKey::new(7);
/// Container (surface) background color.
pub const COLOR_BG_CONTAINER: TokenKey = TokenKey::new(8);
/// Border color.
pub const COLOR_BORDER: TokenKey = TokenKey::new(9);
/// Font stack.
pub const FONT_FAMILY: TokenKey = TokenKey::new(10);
/// Base font size in pixels.
pub const FONT_SIZE: TokenKey = TokenKey::new(11);
/// Unitless line height.
pub const LINE_HEIGHT: TokenKey = TokenKey::new(12);
/// Border width in pixels.
pub const LINE_WIDTH: TokenKey = TokenKey::new(13);
/// Corner radius in pixels.
pub const BORDER_RADIUS: TokenKey = TokenKey::new(14);
/// Base spacing step in pixels.
pub const SPACING: TokenKey = TokenKey::new(15);
/// Size increment used to derive control dimensions.
pub const SIZE_STEP: TokenKey = TokenKey::new(16);
/// Standard control height in pixels.
pub const CONTROL_HEIGHT: TokenKey = TokenKey::new(17);
/// Base motion duration in seconds.
pub const MOTION_DURATION: TokenKey = TokenKey::new(18);
/// Whether motion is enabled at all.
pub const MOTION: TokenKey = TokenKey::new(19);
/// Wireframe (flat, pre-v5 style) rendering switch.
pub const WIREFRAME: TokenKey = TokenKey::new(20);

/// A single entry in the alias-token schema.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TokenDef {
    /// The token's key.
    pub key: TokenKey,
    /// The token's stable wire name.
    pub name: &'static str,
}

const fn def(key: TokenKey, name: &'static str) -> TokenDef {
    TokenDef { key, name }
}

/// Every alias token, ordered by key.
pub const ALIAS_TOKENS: &[TokenDef] = &[
    def(COLOR_PRIMARY, "colorPrimary"),
    def(COLOR_SUCCESS, "colorSuccess"),
    def(COLOR_WARNING, "colorWarning"),
    def(COLOR_ERROR, "colorError"),
    def(COLOR_INFO, "colorInfo"),
    def(COLOR_TEXT_BASE, "colorTextBase"),
    def(COLOR_TEXT, "colorText"),
    def(COLOR_BG_BASE, "colorBgBase"),
    def(COLOR_BG_CONTAINER, "colorBgContainer"),
    def(COLOR_BORDER, "colorBorder"),
    def(FONT_FAMILY, "fontFamily"),
    def(FONT_SIZE, "fontSize"),
    def(LINE_HEIGHT, "lineHeight"),
    def(LINE_WIDTH, "lineWidth"),
    def(BORDER_RADIUS, "borderRadius"),
    def(SPACING, "spacing"),
    def(SIZE_STEP, "sizeStep"),
    def(CONTROL_HEIGHT, "controlHeight"),
    def(MOTION_DURATION, "motionDuration"),
    def(MOTION, "motion"),
    def(WIREFRAME, "wireframe"),
];

/// Returns the wire name of an alias token, if the key is in the schema.
#[must_use]
pub fn name_of(key: TokenKey) -> Option<&'static str> {
    ALIAS_TOKENS
        .get(key.index() as usize)
        .filter(|d| d.key == key)
        .map(|d| d.name)
}

/// Looks up an alias token by wire name.
#[must_use]
pub fn by_name(name: &str) -> Option<TokenKey> {
    ALIAS_TOKENS
        .iter()
        .find(|d| d.name == name)
        .map(|d| d.key)
}

/// Returns the library's base seed token set.
///
/// The seed is complete with respect to [`ALIAS_TOKENS`] and is the default
/// light theme. Repeated calls return structurally equal sets.
#[must_use]
pub fn seed() -> TokenSet {
    TokenSetBuilder::new()
        .set(COLOR_PRIMARY, TokenValue::from("#1677ff"))
        .set(COLOR_SUCCESS, TokenValue::from("#52c41a"))
        .set(COLOR_WARNING, TokenValue::from("#faad14"))
        .set(COLOR_ERROR, TokenValue::from("#ff4d4f"))
        .set(COLOR_INFO, TokenValue::from("#1677ff"))
        .set(COLOR_TEXT_BASE, TokenValue::from("#000000"))
        .set(COLOR_TEXT, TokenValue::from("rgba(0, 0, 0, 0.88)"))
        .set(COLOR_BG_BASE, TokenValue::from("#ffffff"))
        .set(COLOR_BG_CONTAINER, TokenValue::from("#ffffff"))
        .set(COLOR_BORDER, TokenValue::from("#d9d9d9"))
        .set(
            FONT_FAMILY,
            TokenValue::from("system-ui, -apple-system, 'Segoe UI', sans-serif"),
        )
        .set(FONT_SIZE, TokenValue::from(14.0))
        .set(LINE_HEIGHT, TokenValue::from(1.5714))
        .set(LINE_WIDTH, TokenValue::from(1.0))
        .set(BORDER_RADIUS, TokenValue::from(6.0))
        .set(SPACING, TokenValue::from(8.0))
        .set(SIZE_STEP, TokenValue::from(4.0))
        .set(CONTROL_HEIGHT, TokenValue::from(32.0))
        .set(MOTION_DURATION, TokenValue::from(0.2))
        .set(MOTION, TokenValue::from(true))
        .set(WIREFRAME, TokenValue::from(false))
        .build()
}
