// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Token set storage.
//!
//! This module provides [`TokenSet`], an immutable collection of token
//! values, used both for fully derived sets and for sparse overrides.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::key::TokenKey;
use crate::value::TokenValue;

/// An immutable collection of token values keyed by [`TokenKey`].
///
/// A `TokenSet` serves two roles: the complete derived set produced by theme
/// derivation, and the sparse partial override supplied by a provider. The
/// same merge operation, [`TokenSet::merged_with`], covers both.
///
/// Token sets are immutable after creation. Use [`TokenSetBuilder`] to
/// construct them.
///
/// # Memory Layout
///
/// Internally, `TokenSet` wraps an `Rc<TokenSetData>`, making cloning cheap.
/// Entries are stored in a sorted vector for O(log n) lookup; the sorted
/// order also makes content hashing independent of insertion order.
///
/// # Example
///
/// ```rust
/// use canopy_token::{TokenSetBuilder, TokenValue, schema};
///
/// let overrides = TokenSetBuilder::new()
///     .set(schema::COLOR_PRIMARY, TokenValue::from("#ff0000"))
///     .build();
///
/// let derived = schema::seed().merged_with(&overrides);
/// assert_eq!(derived.text(schema::COLOR_PRIMARY), Some("#ff0000"));
/// // Untouched tokens keep their seed values.
/// assert_eq!(derived.number(schema::FONT_SIZE), Some(14.0));
/// ```
#[derive(Clone, Debug)]
pub struct TokenSet {
    inner: Rc<TokenSetData>,
}

/// Internal storage for token values.
#[derive(Debug, Default)]
struct TokenSetData {
    /// Sorted by `TokenKey` for binary search lookup.
    entries: Vec<(TokenKey, TokenValue)>,
}

impl TokenSet {
    /// Returns an empty token set.
    #[must_use]
    pub fn empty() -> Self {
        TokenSetBuilder::new().build()
    }

    /// Returns `true` if this set has no entries.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Returns the number of entries in this set.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Gets the value for a token, if present.
    #[must_use]
    #[inline]
    pub fn get(&self, key: TokenKey) -> Option<&TokenValue> {
        self.inner
            .entries
            .binary_search_by_key(&key, |(k, _)| *k)
            .ok()
            .map(|idx| &self.inner.entries[idx].1)
    }

    /// Gets the text payload for a token, if present and textual.
    #[must_use]
    pub fn text(&self, key: TokenKey) -> Option<&str> {
        self.get(key).and_then(TokenValue::as_text)
    }

    /// Gets the numeric payload for a token, if present and numeric.
    #[must_use]
    pub fn number(&self, key: TokenKey) -> Option<f64> {
        self.get(key).and_then(TokenValue::as_number)
    }

    /// Gets the flag payload for a token, if present and boolean.
    #[must_use]
    pub fn flag(&self, key: TokenKey) -> Option<bool> {
        self.get(key).and_then(TokenValue::as_flag)
    }

    /// Returns `true` if this set has a value for the token.
    #[must_use]
    #[inline]
    pub fn contains(&self, key: TokenKey) -> bool {
        self.inner
            .entries
            .binary_search_by_key(&key, |(k, _)| *k)
            .is_ok()
    }

    /// Returns an iterator over the keys in this set.
    pub fn keys(&self) -> impl Iterator<Item = TokenKey> + '_ {
        self.inner.entries.iter().map(|(k, _)| *k)
    }

    /// Returns an iterator over the entries in this set, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (TokenKey, &TokenValue)> + '_ {
        self.inner.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Returns a new set with `overrides` applied on top of `self`.
    ///
    /// Field-wise override: a token present in `overrides` wins; everything
    /// else keeps its value from `self`. Neither input is mutated. When
    /// `overrides` is empty this is a cheap reference-counted clone.
    #[must_use]
    pub fn merged_with(&self, overrides: &Self) -> Self {
        if overrides.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return overrides.clone();
        }

        let base = &self.inner.entries;
        let over = &overrides.inner.entries;
        let mut entries = Vec::with_capacity(base.len() + over.len());
        let (mut i, mut j) = (0, 0);

        while i < base.len() && j < over.len() {
            if base[i].0 < over[j].0 {
                entries.push(base[i].clone());
                i += 1;
            } else if over[j].0 < base[i].0 {
                entries.push(over[j].clone());
                j += 1;
            } else {
                // Override wins; drop the base entry.
                entries.push(over[j].clone());
                i += 1;
                j += 1;
            }
        }
        entries.extend(base[i..].iter().cloned());
        entries.extend(over[j..].iter().cloned());

        Self {
            inner: Rc::new(TokenSetData { entries }),
        }
    }

    /// Returns `true` if both sets share the same backing storage.
    ///
    /// Structural equality is `==`; this is the cheaper identity check.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for TokenSet {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner) || self.inner.entries == other.inner.entries
    }
}

/// Builder for constructing [`TokenSet`] instances.
///
/// # Example
///
/// ```rust
/// use canopy_token::{TokenSetBuilder, TokenValue, schema};
///
/// let set = TokenSetBuilder::new()
///     .set(schema::SPACING, TokenValue::from(4.0))
///     .set(schema::COLOR_PRIMARY, TokenValue::from("#722ed1"))
///     .build();
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.number(schema::SPACING), Some(4.0));
/// ```
#[derive(Debug, Default)]
pub struct TokenSetBuilder {
    entries: Vec<(TokenKey, TokenValue)>,
}

impl TokenSetBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a token value.
    ///
    /// If the token was already set, the value is replaced.
    #[must_use]
    pub fn set(mut self, key: TokenKey, value: impl Into<TokenValue>) -> Self {
        let value = value.into();
        match self.entries.binary_search_by_key(&key, |(k, _)| *k) {
            Ok(idx) => {
                self.entries[idx].1 = value;
            }
            Err(idx) => {
                self.entries.insert(idx, (key, value));
            }
        }
        self
    }

    /// Builds the token set.
    #[must_use]
    pub fn build(self) -> TokenSet {
        TokenSet {
            inner: Rc::new(TokenSetData {
                entries: self.entries,
            }),
        }
    }
}
