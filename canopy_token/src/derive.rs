// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Token derivation.
//!
//! This module provides [`derive`] and [`derive_component`], the two entry
//! points that turn a seed set plus an algorithm chain into a full derived
//! token set, and the completeness policy applied to the result.

use core::fmt;

use crate::algorithm::{AlgorithmChain, AlgorithmError};
use crate::schema;
use crate::set::TokenSet;

/// How to handle a derived set that fails to populate a schema token.
///
/// An algorithm that drops a required token violates its contract. The
/// library default catches that during development with zero cost in
/// release builds, where missing tokens pass through and consumers see the
/// token as absent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum MissingTokenHandling {
    /// Panic in debug builds, pass the incomplete set through in release
    /// builds.
    #[default]
    DebugAssert,
    /// Return an error if any schema token is missing.
    Error,
    /// Accept incomplete sets (skip the completeness check entirely).
    Allow,
}

/// Error returned when a derived token set is missing a schema token.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct MissingTokenError {
    /// Wire name of the missing token.
    pub token: &'static str,
}

impl fmt::Debug for MissingTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MissingTokenError {{ token: {:?} }}", self.token)
    }
}

impl fmt::Display for MissingTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "derived token set is missing required token {}", self.token)
    }
}

impl core::error::Error for MissingTokenError {}

/// Error produced by token derivation.
#[derive(Clone, PartialEq, Eq)]
pub enum DeriveError {
    /// A mapping algorithm failed.
    Algorithm(AlgorithmError),
    /// The derived set is incomplete and the handling was
    /// [`MissingTokenHandling::Error`].
    MissingToken(MissingTokenError),
}

impl fmt::Debug for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Algorithm(err) => f.debug_tuple("Algorithm").field(err).finish(),
            Self::MissingToken(err) => f.debug_tuple("MissingToken").field(err).finish(),
        }
    }
}

impl fmt::Display for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Algorithm(err) => write!(f, "{err}"),
            Self::MissingToken(err) => write!(f, "{err}"),
        }
    }
}

impl core::error::Error for DeriveError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Algorithm(err) => Some(err),
            Self::MissingToken(err) => Some(err),
        }
    }
}

impl From<AlgorithmError> for DeriveError {
    fn from(err: AlgorithmError) -> Self {
        Self::Algorithm(err)
    }
}

fn check_complete(set: &TokenSet, handling: MissingTokenHandling) -> Result<(), DeriveError> {
    if handling == MissingTokenHandling::Allow {
        return Ok(());
    }
    for def in schema::ALIAS_TOKENS {
        if !set.contains(def.key) {
            match handling {
                MissingTokenHandling::DebugAssert => {
                    debug_assert!(false, "derived token set is missing {}", def.name);
                }
                MissingTokenHandling::Error => {
                    return Err(DeriveError::MissingToken(MissingTokenError {
                        token: def.name,
                    }));
                }
                MissingTokenHandling::Allow => {}
            }
        }
    }
    Ok(())
}

/// Derives a full token set from `seed` through `chain`.
///
/// With an empty chain the seed passes through unchanged (the default
/// theme). Algorithms apply left-to-right, each consuming the previous
/// output. Derivation is deterministic: equal inputs always produce equal
/// outputs.
///
/// Explicit per-token overrides are not part of derivation; apply them
/// afterwards with [`TokenSet::merged_with`].
///
/// # Errors
///
/// - [`DeriveError::Algorithm`] if any algorithm in the chain fails.
/// - [`DeriveError::MissingToken`] if the result is incomplete and
///   `handling` is [`MissingTokenHandling::Error`].
///
/// # Example
///
/// ```rust
/// use canopy_token::{AlgorithmChain, DarkAlgorithm, MissingTokenHandling, derive, schema};
///
/// let derived = derive(
///     &schema::seed(),
///     &AlgorithmChain::of(DarkAlgorithm),
///     MissingTokenHandling::Error,
/// )
/// .unwrap();
/// assert_eq!(derived.text(schema::COLOR_BG_BASE), Some("#000000"));
/// ```
pub fn derive(
    seed: &TokenSet,
    chain: &AlgorithmChain,
    handling: MissingTokenHandling,
) -> Result<TokenSet, DeriveError> {
    let derived = chain.run(seed)?;
    check_complete(&derived, handling)?;
    Ok(derived)
}

/// Derives a component-scoped token set.
///
/// The component set is seeded from the already-derived global set, so a
/// component algorithm only affects that component's tokens: run the
/// component chain (if any) over `global`, then apply the component's
/// explicit `overrides` on top.
///
/// # Errors
///
/// Same as [`derive`].
pub fn derive_component(
    global: &TokenSet,
    overrides: &TokenSet,
    chain: Option<&AlgorithmChain>,
    handling: MissingTokenHandling,
) -> Result<TokenSet, DeriveError> {
    let base = match chain {
        Some(chain) => chain.run(global)?,
        None => global.clone(),
    };
    let out = base.merged_with(overrides);
    check_complete(&out, handling)?;
    Ok(out)
}
