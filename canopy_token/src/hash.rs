// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content hashing for resolved token sets.
//!
//! The hash namespaces generated class names (and CSS variable keys) per
//! theme, so two differently-themed subtrees never collide and two
//! identically-themed subtrees share cached styles. That reuse is only sound
//! because derivation is deterministic: identical inputs produce identical
//! sets, identical sets produce identical hashes.

use alloc::string::String;

use sha2::{Digest, Sha256};

use crate::schema;
use crate::set::TokenSet;
use crate::value::TokenValue;

/// Number of digest bytes carried into the hash string.
const HASH_BYTES: usize = 8;

/// Computes the stable content hash of a resolved token set.
///
/// The hash is a truncated SHA-256 over a canonical encoding of the sorted
/// entries plus the schema version, with `component` (if any) folded in so a
/// component-scoped set never shares a namespace with the global set it was
/// seeded from.
///
/// Properties, relied on by style caching:
///
/// - Stable: structurally equal sets hash to the same string, regardless of
///   the order tokens were inserted.
/// - Sensitive: sets differing in any field (or component name) hash to
///   different strings, collision risk aside.
///
/// # Example
///
/// ```rust
/// use canopy_token::{TokenSetBuilder, compute_hash, schema};
///
/// let a = schema::seed();
/// let b = schema::seed();
/// assert_eq!(compute_hash(&a, None), compute_hash(&b, None));
///
/// let red = a.merged_with(
///     &TokenSetBuilder::new()
///         .set(schema::COLOR_PRIMARY, "#ff0000")
///         .build(),
/// );
/// assert_ne!(compute_hash(&a, None), compute_hash(&red, None));
/// ```
#[must_use]
pub fn compute_hash(tokens: &TokenSet, component: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(schema::SCHEMA_VERSION.to_le_bytes());

    // Entries are key-sorted in storage, which makes this canonical.
    for (key, value) in tokens.iter() {
        hasher.update(key.index().to_le_bytes());
        match value {
            TokenValue::Text(text) => {
                hasher.update([0u8]);
                hasher.update((text.len() as u64).to_le_bytes());
                hasher.update(text.as_bytes());
            }
            TokenValue::Number(number) => {
                hasher.update([1u8]);
                hasher.update(number.to_bits().to_le_bytes());
            }
            TokenValue::Flag(flag) => {
                hasher.update([2u8]);
                hasher.update([u8::from(*flag)]);
            }
        }
    }

    if let Some(name) = component {
        hasher.update([0xff_u8]);
        hasher.update(name.as_bytes());
    }

    let digest = hasher.finalize();
    hex::encode(&digest[..HASH_BYTES])
}
