// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The provider scope tree.
//!
//! [`ScopeTree`] holds the nesting structure of configuration providers and
//! drives resolution: each scope's effective configuration is computed
//! lazily on first read by resolving its explicit record against the
//! parent's effective configuration, then cached for the scope's lifetime.
//!
//! Replacing a scope's configuration ([`ScopeTree::set_config`]) pushes an
//! invalidation down that scope's subtree: caches are cleared eagerly,
//! recomputation stays lazy. Sibling subtrees are untouched: resolution for
//! a subtree depends only on its ancestor chain.
//!
//! ## Explainability
//!
//! The tree does not store provenance for why a scope went stale. For
//! embedders that want to answer "why did this subtree re-resolve?", the
//! `*_with_trace` variants report every (scope, cause) pair to an
//! [`InvalidationTrace`]; [`InvalidationRecorder`] is a ready-made recorder
//! storing one cause path per scope.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::consumer::ConfigConsumer;
use crate::record::ProviderConfig;
use crate::resolve::{EffectiveConfig, ResolveError, resolve};

/// Identifier of a provider scope within a [`ScopeTree`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the underlying index of this scope ID.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopeId").field(&self.0).finish()
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({})", self.0)
    }
}

/// The recorded cause of staleness for a scope.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StaleCause {
    /// The scope's own configuration was replaced.
    Root,
    /// The scope went stale because an ancestor did.
    Because {
        /// The immediate ancestor that cascaded into this scope.
        because: ScopeId,
    },
}

/// A callback sink for invalidation tracing.
///
/// See [`ScopeTree::set_config_with_trace`].
pub trait InvalidationTrace {
    /// Called for the scope whose configuration was explicitly replaced.
    ///
    /// `newly_stale` indicates whether a cached effective configuration was
    /// actually dropped, or the scope was already unresolved.
    fn root(&mut self, scope: ScopeId, newly_stale: bool);

    /// Called when `scope` is invalidated because its parent `because` was.
    ///
    /// `newly_stale` indicates whether a cached effective configuration was
    /// actually dropped, or the scope was already unresolved.
    fn cascaded(&mut self, scope: ScopeId, because: ScopeId, newly_stale: bool);
}

/// Records one cause per invalidated scope (a spanning path per subtree).
///
/// # Example
///
/// ```rust
/// use canopy_config::{InvalidationRecorder, ProviderConfig, ScopeTree};
///
/// let mut tree = ScopeTree::new();
/// let root = tree.insert(None, ProviderConfig::empty());
/// let child = tree.insert(Some(root), ProviderConfig::empty());
/// let leaf = tree.insert(Some(child), ProviderConfig::empty());
/// tree.effective(leaf).unwrap();
///
/// let mut recorder = InvalidationRecorder::new();
/// tree.set_config_with_trace(root, ProviderConfig::empty(), &mut recorder);
///
/// assert_eq!(recorder.explain_path(leaf).unwrap(), vec![root, child, leaf]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InvalidationRecorder {
    causes: HashMap<ScopeId, StaleCause>,
}

impl InvalidationRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            causes: HashMap::new(),
        }
    }

    /// Clears all recorded causes.
    pub fn clear(&mut self) {
        self.causes.clear();
    }

    /// Returns the recorded cause for `scope`, if any.
    #[must_use]
    pub fn cause(&self, scope: ScopeId) -> Option<StaleCause> {
        self.causes.get(&scope).copied()
    }

    /// Returns the path from the invalidation root to `scope` (inclusive).
    #[must_use]
    pub fn explain_path(&self, scope: ScopeId) -> Option<Vec<ScopeId>> {
        let mut out = Vec::new();
        let mut current = scope;
        loop {
            out.push(current);
            match self.cause(current)? {
                StaleCause::Root => break,
                StaleCause::Because { because } => current = because,
            }
        }
        out.reverse();
        Some(out)
    }
}

impl InvalidationTrace for InvalidationRecorder {
    fn root(&mut self, scope: ScopeId, _newly_stale: bool) {
        self.causes.entry(scope).or_insert(StaleCause::Root);
    }

    fn cascaded(&mut self, scope: ScopeId, because: ScopeId, _newly_stale: bool) {
        self.causes
            .entry(scope)
            .or_insert(StaleCause::Because { because });
    }
}

/// Ignores every trace event.
struct IgnoreTrace;

impl InvalidationTrace for IgnoreTrace {
    fn root(&mut self, _scope: ScopeId, _newly_stale: bool) {}
    fn cascaded(&mut self, _scope: ScopeId, _because: ScopeId, _newly_stale: bool) {}
}

#[derive(Debug)]
struct ScopeNode {
    parent: Option<ScopeId>,
    children: SmallVec<[ScopeId; 4]>,
    explicit: ProviderConfig,
    /// Cached effective configuration; `None` while stale.
    effective: Option<EffectiveConfig>,
}

/// A tree of provider scopes with lazy, cached resolution.
///
/// Scopes without a parent resolve against the library's default
/// configuration store. The tree is single-threaded and synchronous;
/// resolution performs no I/O and never suspends.
///
/// # Example
///
/// ```rust
/// use canopy_config::{Direction, ProviderConfig, ScopeTree};
///
/// let mut tree = ScopeTree::new();
/// let root = tree.insert(
///     None,
///     ProviderConfig::builder().direction(Direction::Rtl).build(),
/// );
/// let leaf = tree.insert(Some(root), ProviderConfig::empty());
///
/// // The leaf inherits everything it does not set itself.
/// let effective = tree.effective(leaf).unwrap();
/// assert_eq!(effective.direction(), Direction::Rtl);
/// ```
#[derive(Debug)]
pub struct ScopeTree {
    nodes: Vec<Option<ScopeNode>>,
    free: Vec<u32>,
    len: usize,
    default_config: EffectiveConfig,
}

impl ScopeTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            len: 0,
            default_config: EffectiveConfig::library_default(),
        }
    }

    /// Returns the number of live scopes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree has no scopes.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `id` names a live scope.
    #[must_use]
    pub fn contains(&self, id: ScopeId) -> bool {
        self.nodes
            .get(id.index() as usize)
            .is_some_and(Option::is_some)
    }

    fn node(&self, id: ScopeId) -> &ScopeNode {
        self.nodes
            .get(id.index() as usize)
            .and_then(Option::as_ref)
            .unwrap_or_else(|| panic!("{id} is not in the tree"))
    }

    fn node_mut(&mut self, id: ScopeId) -> &mut ScopeNode {
        self.nodes
            .get_mut(id.index() as usize)
            .and_then(Option::as_mut)
            .unwrap_or_else(|| panic!("{id} is not in the tree"))
    }

    /// Inserts a new scope under `parent` with the given configuration.
    ///
    /// A scope with no parent resolves against the library default store.
    /// The new scope starts unresolved; nothing is computed until the first
    /// read.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not in the tree, or if more than `u32::MAX`
    /// scopes are allocated.
    pub fn insert(&mut self, parent: Option<ScopeId>, config: ProviderConfig) -> ScopeId {
        if let Some(parent) = parent {
            assert!(self.contains(parent), "{parent} is not in the tree");
        }

        let node = ScopeNode {
            parent,
            children: SmallVec::new(),
            explicit: config,
            effective: None,
        };

        let id = match self.free.pop() {
            Some(index) => {
                self.nodes[index as usize] = Some(node);
                ScopeId::new(index)
            }
            None => {
                assert!(
                    self.nodes.len() < u32::MAX as usize,
                    "too many scopes allocated (max {})",
                    u32::MAX
                );
                #[expect(clippy::cast_possible_truncation, reason = "checked above")]
                let index = self.nodes.len() as u32;
                self.nodes.push(Some(node));
                ScopeId::new(index)
            }
        };

        if let Some(parent) = parent {
            self.node_mut(parent).children.push(id);
        }
        self.len += 1;
        id
    }

    /// Returns the parent of a scope.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the tree.
    #[must_use]
    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.node(id).parent
    }

    /// Returns the explicit configuration of a scope.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the tree.
    #[must_use]
    pub fn config(&self, id: ScopeId) -> &ProviderConfig {
        &self.node(id).explicit
    }

    /// Replaces a scope's configuration wholesale and invalidates its
    /// subtree.
    ///
    /// Configuration records are immutable per scope lifetime; there is no
    /// field-level mutation. Cached effective configurations of the scope
    /// and all its descendants are dropped eagerly; recomputation happens on
    /// the next read. Siblings and ancestors are untouched.
    ///
    /// Effective configurations already handed to consumers stay valid (they
    /// are immutable snapshots); they are stale only until the consumer
    /// re-reads after this commit.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the tree.
    pub fn set_config(&mut self, id: ScopeId, config: ProviderConfig) {
        self.set_config_with_trace(id, config, &mut IgnoreTrace);
    }

    /// Like [`ScopeTree::set_config`], reporting every invalidated scope to
    /// `trace`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the tree.
    pub fn set_config_with_trace(
        &mut self,
        id: ScopeId,
        config: ProviderConfig,
        trace: &mut impl InvalidationTrace,
    ) {
        let node = self.node_mut(id);
        node.explicit = config;
        let newly_stale = node.effective.take().is_some();
        trace.root(id, newly_stale);
        self.invalidate_children(id, trace);
    }

    fn invalidate_children(&mut self, root: ScopeId, trace: &mut impl InvalidationTrace) {
        let mut stack: SmallVec<[(ScopeId, ScopeId); 8]> = self
            .node(root)
            .children
            .iter()
            .map(|child| (*child, root))
            .collect();

        while let Some((scope, because)) = stack.pop() {
            let node = self.node_mut(scope);
            let newly_stale = node.effective.take().is_some();
            trace.cascaded(scope, because, newly_stale);
            let children = self.node(scope).children.clone();
            stack.extend(children.into_iter().map(|child| (child, scope)));
        }
    }

    /// Returns the cached effective configuration of a scope, if resolved.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the tree.
    #[must_use]
    pub fn cached_effective(&self, id: ScopeId) -> Option<&EffectiveConfig> {
        self.node(id).effective.as_ref()
    }

    /// Returns the effective configuration of a scope, resolving lazily.
    ///
    /// Walks up to the nearest resolved ancestor (or the library default)
    /// and resolves the stale chain top-down, caching every intermediate
    /// result. Repeated reads without intervening configuration changes
    /// return the same record identity.
    ///
    /// # Errors
    ///
    /// Propagates [`ResolveError`] from the first failing scope on the
    /// chain. Scopes above the failure keep their fresh caches; the failing
    /// scope and everything below stay unresolved.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the tree.
    pub fn effective(&mut self, id: ScopeId) -> Result<EffectiveConfig, ResolveError> {
        assert!(self.contains(id), "{id} is not in the tree");

        // Collect the stale chain from `id` up to the nearest resolved
        // ancestor.
        let mut stale: SmallVec<[ScopeId; 8]> = SmallVec::new();
        let mut ancestor_config = self.default_config.clone();
        let mut current = Some(id);
        while let Some(scope) = current {
            let node = self.node(scope);
            if let Some(effective) = &node.effective {
                ancestor_config = effective.clone();
                break;
            }
            stale.push(scope);
            current = node.parent;
        }

        // Resolve top-down, threading each result into the next scope.
        for scope in stale.iter().rev().copied() {
            let effective = resolve(&ancestor_config, &self.node(scope).explicit)?;
            self.node_mut(scope).effective = Some(effective.clone());
            ancestor_config = effective;
        }

        Ok(ancestor_config)
    }

    /// Returns the consumption-contract view of a scope.
    ///
    /// # Errors
    ///
    /// Propagates [`ResolveError`] like [`ScopeTree::effective`].
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the tree.
    pub fn consumer(&mut self, id: ScopeId) -> Result<ConfigConsumer, ResolveError> {
        Ok(ConfigConsumer::new(id, self.effective(id)?))
    }

    /// Removes a scope and its entire subtree.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the tree.
    pub fn remove(&mut self, id: ScopeId) {
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|child| *child != id);
        }

        let mut stack: SmallVec<[ScopeId; 8]> = SmallVec::new();
        stack.push(id);
        while let Some(scope) = stack.pop() {
            let node = self.nodes[scope.index() as usize]
                .take()
                .unwrap_or_else(|| panic!("{scope} is not in the tree"));
            stack.extend(node.children);
            self.free.push(scope.index());
            self.len -= 1;
        }
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
