// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Class-name prefix resolution.
//!
//! Every generated class name starts from a prefix resolved through the
//! nearest provider's [`PrefixResolver`]. The default resolver implements
//! the library convention: an explicit custom prefix wins outright,
//! otherwise the component suffix is appended to the root prefix.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

/// Root class-name prefix used when no provider overrides it.
pub const DEFAULT_PREFIX: &str = "ant";

/// Class-name prefix for icons.
pub const DEFAULT_ICON_PREFIX: &str = "anticon";

/// A pure class-name prefix resolver.
///
/// Resolvers must be pure: same inputs, same output, no side effects. They
/// are invoked on every class-name computation, potentially many times per
/// render.
///
/// Cloning is cheap; the underlying function is reference-counted.
///
/// # Example
///
/// ```rust
/// use canopy_config::PrefixResolver;
///
/// let resolver = PrefixResolver::default();
/// assert_eq!(resolver.resolve(Some("button"), None), "ant-button");
/// assert_eq!(resolver.resolve(None, None), "ant");
/// assert_eq!(resolver.resolve(Some("button"), Some("brand-btn")), "brand-btn");
/// ```
#[derive(Clone)]
pub struct PrefixResolver {
    inner: Rc<dyn Fn(Option<&str>, Option<&str>) -> String>,
}

impl PrefixResolver {
    /// Creates a resolver from a pure function of `(suffix, custom_prefix)`.
    #[must_use]
    pub fn new(resolve: impl Fn(Option<&str>, Option<&str>) -> String + 'static) -> Self {
        Self {
            inner: Rc::new(resolve),
        }
    }

    /// Creates the default resolver for a given root prefix.
    ///
    /// The returned resolver yields `custom` when given, else
    /// `"{root}-{suffix}"` when a suffix is given, else `root`.
    #[must_use]
    pub fn with_root(root: impl Into<String>) -> Self {
        let root = root.into();
        Self::new(move |suffix, custom| {
            if let Some(custom) = custom {
                return String::from(custom);
            }
            match suffix {
                Some(suffix) => format!("{root}-{suffix}"),
                None => root.clone(),
            }
        })
    }

    /// Resolves a class-name prefix.
    ///
    /// `custom` is an explicit per-call-site prefix override; `suffix` is
    /// the component suffix (e.g. `"button"`).
    #[must_use]
    pub fn resolve(&self, suffix: Option<&str>, custom: Option<&str>) -> String {
        (self.inner)(suffix, custom)
    }
}

impl Default for PrefixResolver {
    fn default() -> Self {
        Self::with_root(DEFAULT_PREFIX)
    }
}

// Manual Debug impl since the resolver function is opaque.
impl fmt::Debug for PrefixResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_resolver_contract() {
        let resolver = PrefixResolver::default();
        assert_eq!(resolver.resolve(None, None), "ant");
        assert_eq!(resolver.resolve(Some("card"), None), "ant-card");
        assert_eq!(resolver.resolve(Some("card"), Some("x")), "x");
        assert_eq!(resolver.resolve(None, Some("x")), "x");
    }

    #[test]
    fn custom_root() {
        let resolver = PrefixResolver::with_root("brand");
        assert_eq!(resolver.resolve(Some("button"), None), "brand-button");
        assert_eq!(resolver.resolve(None, None), "brand");
    }

    #[test]
    fn fully_custom_resolver() {
        let resolver = PrefixResolver::new(|suffix, _| {
            let mut out = String::from("x");
            if let Some(suffix) = suffix {
                out.push('-');
                out.push_str(suffix);
            }
            out
        });
        assert_eq!(resolver.resolve(Some("tag"), None), "x-tag");
    }

    #[test]
    fn clone_shares_function() {
        let resolver = PrefixResolver::with_root("brand");
        let clone = resolver.clone();
        assert_eq!(
            resolver.resolve(Some("a"), None),
            clone.resolve(Some("a"), None)
        );
    }
}
