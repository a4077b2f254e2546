// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping algorithms.
//!
//! A mapping algorithm is a pure function from a seed [`TokenSet`] to a
//! derived [`TokenSet`]: dark mode, compact density, a brand transform.
//! Algorithms compose into an [`AlgorithmChain`], applied left-to-right with
//! each algorithm consuming the previous output.
//!
//! Determinism is part of the contract: the same input set must always map
//! to the same output set. The content hash of a resolved theme is reused as
//! a class-name namespace, so a non-deterministic algorithm silently breaks
//! style caching. See [`crate::hash::compute_hash`].

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use smallvec::SmallVec;

use crate::schema;
use crate::set::{TokenSet, TokenSetBuilder};
use crate::value::TokenValue;

/// Error produced by a failing mapping algorithm.
///
/// Algorithm failures surface synchronously at resolution time and are never
/// retried or downgraded; see [`crate::derive`].
#[derive(Clone, PartialEq, Eq)]
pub struct AlgorithmError {
    message: String,
}

impl AlgorithmError {
    /// Creates a new error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AlgorithmError {{ message: {:?} }}", self.message)
    }
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mapping algorithm failed: {}", self.message)
    }
}

impl core::error::Error for AlgorithmError {}

/// A pure transform from a seed token set to a derived token set.
///
/// Implementations must be deterministic and must not read anything but the
/// seed. Closures of the matching shape implement this trait directly:
///
/// ```rust
/// use canopy_token::{AlgorithmChain, AlgorithmError, TokenSet, TokenSetBuilder, schema};
///
/// let double_spacing = |seed: &TokenSet| -> Result<TokenSet, AlgorithmError> {
///     let spacing = seed.number(schema::SPACING).unwrap_or(0.0);
///     Ok(seed.merged_with(
///         &TokenSetBuilder::new()
///             .set(schema::SPACING, spacing * 2.0)
///             .build(),
///     ))
/// };
///
/// let chain = AlgorithmChain::of(double_spacing);
/// let derived = chain.run(&schema::seed()).unwrap();
/// assert_eq!(derived.number(schema::SPACING), Some(16.0));
/// ```
pub trait MappingAlgorithm {
    /// Maps `seed` to a derived token set.
    ///
    /// A complete implementation returns a set covering the full alias
    /// schema; the usual shape is `seed.merged_with(&changes)`. Failures are
    /// surfaced to the caller of the resolution that invoked the chain.
    fn map(&self, seed: &TokenSet) -> Result<TokenSet, AlgorithmError>;
}

impl<F> MappingAlgorithm for F
where
    F: Fn(&TokenSet) -> Result<TokenSet, AlgorithmError>,
{
    #[inline]
    fn map(&self, seed: &TokenSet) -> Result<TokenSet, AlgorithmError> {
        self(seed)
    }
}

/// An ordered list of mapping algorithms.
///
/// The chain applies left-to-right, threading each output into the next
/// input. An empty chain is the identity: the seed passes through unchanged,
/// which is the default visual theme.
///
/// Cloning is cheap; the algorithms themselves are reference-counted.
///
/// # Example
///
/// ```rust
/// use canopy_token::{AlgorithmChain, CompactAlgorithm, DarkAlgorithm, schema};
///
/// let chain = AlgorithmChain::of(DarkAlgorithm).with(CompactAlgorithm);
/// let derived = chain.run(&schema::seed()).unwrap();
///
/// // Dark ran first, compact consumed its output.
/// assert_eq!(derived.text(schema::COLOR_BG_BASE), Some("#000000"));
/// assert_eq!(derived.number(schema::FONT_SIZE), Some(12.0));
/// ```
#[derive(Clone, Default)]
pub struct AlgorithmChain {
    algorithms: SmallVec<[Rc<dyn MappingAlgorithm>; 2]>,
}

impl AlgorithmChain {
    /// Creates an empty (identity) chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chain containing a single algorithm.
    #[must_use]
    pub fn of(algorithm: impl MappingAlgorithm + 'static) -> Self {
        Self::new().with(algorithm)
    }

    /// Returns a chain with `algorithm` appended.
    #[must_use]
    pub fn with(mut self, algorithm: impl MappingAlgorithm + 'static) -> Self {
        self.algorithms.push(Rc::new(algorithm));
        self
    }

    /// Appends an algorithm to the chain.
    pub fn push(&mut self, algorithm: impl MappingAlgorithm + 'static) {
        self.algorithms.push(Rc::new(algorithm));
    }

    /// Returns the number of algorithms in the chain.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    /// Returns `true` if the chain is the identity.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    /// Runs the chain on `seed`, threading each output into the next input.
    ///
    /// An empty chain returns `seed` unchanged (a cheap clone). The first
    /// failing algorithm short-circuits the chain.
    pub fn run(&self, seed: &TokenSet) -> Result<TokenSet, AlgorithmError> {
        let mut current = seed.clone();
        for algorithm in &self.algorithms {
            current = algorithm.map(&current)?;
        }
        Ok(current)
    }
}

// Manual Debug impl since the algorithms themselves are opaque.
impl fmt::Debug for AlgorithmChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmChain")
            .field("len", &self.algorithms.len())
            .finish_non_exhaustive()
    }
}

/// The built-in dark transform.
///
/// Inverts the base surface and text tones; all other tokens pass through.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DarkAlgorithm;

impl MappingAlgorithm for DarkAlgorithm {
    fn map(&self, seed: &TokenSet) -> Result<TokenSet, AlgorithmError> {
        let changes = TokenSetBuilder::new()
            .set(schema::COLOR_TEXT_BASE, TokenValue::from("#ffffff"))
            .set(
                schema::COLOR_TEXT,
                TokenValue::from("rgba(255, 255, 255, 0.85)"),
            )
            .set(schema::COLOR_BG_BASE, TokenValue::from("#000000"))
            .set(schema::COLOR_BG_CONTAINER, TokenValue::from("#141414"))
            .set(schema::COLOR_BORDER, TokenValue::from("#424242"))
            .build();
        Ok(seed.merged_with(&changes))
    }
}

/// The built-in compact-density transform.
///
/// Tightens type and control metrics relative to the incoming seed; colors
/// pass through, so it composes with [`DarkAlgorithm`] in either order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CompactAlgorithm;

impl MappingAlgorithm for CompactAlgorithm {
    fn map(&self, seed: &TokenSet) -> Result<TokenSet, AlgorithmError> {
        let mut builder = TokenSetBuilder::new();
        if let Some(font_size) = seed.number(schema::FONT_SIZE) {
            builder = builder.set(schema::FONT_SIZE, font_size - 2.0);
        }
        if let Some(height) = seed.number(schema::CONTROL_HEIGHT) {
            builder = builder.set(schema::CONTROL_HEIGHT, height * 0.75);
        }
        if let Some(spacing) = seed.number(schema::SPACING) {
            builder = builder.set(schema::SPACING, spacing * 0.75);
        }
        Ok(seed.merged_with(&builder.build()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chain_is_identity() {
        let seed = schema::seed();
        let out = AlgorithmChain::new().run(&seed).unwrap();
        assert_eq!(out, seed);
    }

    #[test]
    fn chain_threads_left_to_right() {
        let plus_one = |seed: &TokenSet| -> Result<TokenSet, AlgorithmError> {
            let spacing = seed.number(schema::SPACING).unwrap_or(0.0);
            Ok(seed.merged_with(
                &TokenSetBuilder::new()
                    .set(schema::SPACING, spacing + 1.0)
                    .build(),
            ))
        };
        let double = |seed: &TokenSet| -> Result<TokenSet, AlgorithmError> {
            let spacing = seed.number(schema::SPACING).unwrap_or(0.0);
            Ok(seed.merged_with(
                &TokenSetBuilder::new()
                    .set(schema::SPACING, spacing * 2.0)
                    .build(),
            ))
        };

        // (8 + 1) * 2, not 8 * 2 + 1.
        let chain = AlgorithmChain::of(plus_one).with(double);
        let out = chain.run(&schema::seed()).unwrap();
        assert_eq!(out.number(schema::SPACING), Some(18.0));
    }

    #[test]
    fn chain_is_deterministic() {
        let chain = AlgorithmChain::of(DarkAlgorithm).with(CompactAlgorithm);
        let a = chain.run(&schema::seed()).unwrap();
        let b = chain.run(&schema::seed()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn failure_short_circuits() {
        let fail =
            |_: &TokenSet| -> Result<TokenSet, AlgorithmError> { Err(AlgorithmError::new("boom")) };
        let never_runs = |_: &TokenSet| -> Result<TokenSet, AlgorithmError> {
            panic!("second algorithm must not run")
        };

        let chain = AlgorithmChain::of(fail).with(never_runs);
        let err = chain.run(&schema::seed()).unwrap_err();
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn dark_inverts_surfaces_only() {
        let out = DarkAlgorithm.map(&schema::seed()).unwrap();
        assert_eq!(out.text(schema::COLOR_BG_BASE), Some("#000000"));
        assert_eq!(out.text(schema::COLOR_TEXT_BASE), Some("#ffffff"));
        // Brand color untouched.
        assert_eq!(out.text(schema::COLOR_PRIMARY), Some("#1677ff"));
        assert_eq!(out.len(), schema::seed().len());
    }

    #[test]
    fn compact_scales_metrics() {
        let out = CompactAlgorithm.map(&schema::seed()).unwrap();
        assert_eq!(out.number(schema::FONT_SIZE), Some(12.0));
        assert_eq!(out.number(schema::CONTROL_HEIGHT), Some(24.0));
        assert_eq!(out.number(schema::SPACING), Some(6.0));
    }

    #[test]
    fn error_display() {
        use alloc::format;
        let err = AlgorithmError::new("bad token");
        assert_eq!(format!("{err}"), "mapping algorithm failed: bad token");
    }
}
