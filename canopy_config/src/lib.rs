// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Config: scoped configuration providers and effective-configuration
//! resolution.
//!
//! A component library needs one answer to "what configuration applies
//! here?" at every point of an arbitrarily deep component tree: class-name
//! prefixing, locale, direction, theme tokens, per-component style
//! overrides, and a handful of global flags. This crate supplies the data
//! model and the resolution algorithm:
//!
//! - [`ProviderConfig`]: the partial record a provider scope contributes.
//! - [`resolve`]: the single merge step producing an [`EffectiveConfig`]
//!   from an ancestor's effective configuration plus one explicit record.
//! - [`ScopeTree`]: the provider nesting structure, with lazy cached
//!   resolution down the tree and push-based invalidation when a scope's
//!   record changes.
//! - [`ConfigConsumer`]: the read-only accessor every component uses,
//!   identical in shape at any depth.
//!
//! Token derivation (seeds, algorithms, hashing) lives in [`canopy_token`];
//! this crate orchestrates it per the inheritance rules.
//!
//! ## Quick Start
//!
//! ```rust
//! use canopy_config::{
//!     ComponentOverride, Direction, ProviderConfig, ScopeTree, ThemeConfig, components,
//! };
//! use canopy_token::schema;
//!
//! let mut tree = ScopeTree::new();
//!
//! // Root provider: right-to-left, a button override.
//! let root = tree.insert(
//!     None,
//!     ProviderConfig::builder()
//!         .direction(Direction::Rtl)
//!         .override_for(
//!             components::BUTTON,
//!             ComponentOverride::builder().class_name("brand").build(),
//!         )
//!         .build(),
//! );
//!
//! // Nested provider: overrides one theme token, inherits the rest.
//! let nested = tree.insert(
//!     Some(root),
//!     ProviderConfig::builder()
//!         .theme(
//!             ThemeConfig::builder()
//!                 .token(schema::COLOR_PRIMARY, "#ff0000")
//!                 .build(),
//!         )
//!         .build(),
//! );
//!
//! let consumer = tree.consumer(nested).unwrap();
//! assert_eq!(consumer.direction(), Direction::Rtl); // inherited
//! assert_eq!(
//!     consumer.tokens().text(schema::COLOR_PRIMARY),
//!     Some("#ff0000") // overridden
//! );
//! assert_eq!(
//!     consumer
//!         .component_override(components::BUTTON)
//!         .unwrap()
//!         .class_name(),
//!     Some("brand") // inherited per component
//! );
//! ```
//!
//! ## Resolution model
//!
//! Resolution is single-threaded, synchronous, and pure: a scope's effective
//! configuration is a function of (ancestor effective configuration, own
//! explicit record) and nothing else. Sibling subtrees are independent. The
//! only process-wide shared state is the immutable default configuration
//! store ([`EffectiveConfig::library_default`]).
//!
//! Every resolution returns a fresh record identity, so
//! [`EffectiveConfig::ptr_eq`] serves as the change token for memoized
//! consumers. Effective configurations already handed out stay valid after a
//! commit; they are stale snapshots until re-read.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod component;
mod consumer;
mod locale;
mod overrides;
mod prefix;
mod record;
mod resolve;
mod scope;
mod theme;

pub use component::{Component, components};
pub use consumer::ConfigConsumer;
pub use locale::{Locale, ModalLocale, PaginationLocale};
pub use overrides::{
    ComponentOverride, ComponentOverrideBuilder, FieldValue, OverrideMap, OverrideMapBuilder,
    SemanticClassNames, SemanticStyles, StyleProps,
};
pub use prefix::{DEFAULT_ICON_PREFIX, DEFAULT_PREFIX, PrefixResolver};
pub use record::{
    ContainerResolver, Csp, Direction, PopupOverflow, ProviderConfig, ProviderConfigBuilder,
    WaveConfig, WarningConfig,
};
pub use resolve::{EffectiveConfig, ResolveError, ResolvedTheme, resolve};
pub use scope::{InvalidationRecorder, InvalidationTrace, ScopeId, ScopeTree, StaleCause};
pub use theme::{ComponentTheme, CssVar, CssVarOptions, ThemeConfig, ThemeConfigBuilder};
