// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Token: design-token schema and deterministic theme derivation.
//!
//! This crate is the token half of the canopy configuration system. It
//! defines the alias-token schema (a fixed, versioned contract with the
//! style-injection layer), the seed token set, and the derivation pipeline
//! that turns a seed plus a chain of mapping algorithms into the full token
//! set a themed subtree observes.
//!
//! ## Core Concepts
//!
//! ### Token Sets
//!
//! [`TokenSet`] is an immutable, cheaply-clonable collection of token
//! values, used both for complete derived sets and for sparse overrides.
//!
//! ```rust
//! use canopy_token::{TokenSetBuilder, schema};
//!
//! let overrides = TokenSetBuilder::new()
//!     .set(schema::COLOR_PRIMARY, "#722ed1")
//!     .build();
//!
//! let derived = schema::seed().merged_with(&overrides);
//! assert_eq!(derived.text(schema::COLOR_PRIMARY), Some("#722ed1"));
//! ```
//!
//! ### Derivation
//!
//! [`derive`] threads a seed through an [`AlgorithmChain`]: zero, one, or
//! many [`MappingAlgorithm`]s applied left-to-right. An empty chain is the
//! identity (the default theme). [`derive_component`] runs the same logic
//! scoped to one component, seeded from the global derived set.
//!
//! ```rust
//! use canopy_token::{AlgorithmChain, DarkAlgorithm, MissingTokenHandling, derive, schema};
//!
//! let dark = derive(
//!     &schema::seed(),
//!     &AlgorithmChain::of(DarkAlgorithm),
//!     MissingTokenHandling::default(),
//! )
//! .unwrap();
//! assert_eq!(dark.text(schema::COLOR_BG_BASE), Some("#000000"));
//! ```
//!
//! ### Hashing
//!
//! [`compute_hash`] produces the stable content hash used to namespace
//! generated class names per theme. Derivation determinism plus a canonical
//! encoding make identical themes share a hash and differing themes never
//! share one; see [`compute_hash`] for the exact guarantees.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod algorithm;
mod derive;
mod hash;
mod key;
pub mod schema;
mod set;
mod value;

pub use algorithm::{
    AlgorithmChain, AlgorithmError, CompactAlgorithm, DarkAlgorithm, MappingAlgorithm,
};
pub use derive::{DeriveError, MissingTokenError, MissingTokenHandling, derive, derive_component};
pub use hash::compute_hash;
pub use key::TokenKey;
pub use set::{TokenSet, TokenSetBuilder};
pub use value::TokenValue;
