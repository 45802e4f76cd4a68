//! Per-pass traversal state

use crate::value::ObjectRef;
use rustc_hash::FxHashSet;

/// Identities of the objects already expanded in the current pass
#[derive(Debug, Default)]
pub struct VisitedSet {
    ids: FxHashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.ids.contains(identity)
    }

    /// Record an identity, returns false if it was already present
    pub fn insert(&mut self, identity: String) -> bool {
        self.ids.insert(identity)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// State owned by one top-level inspection call
///
/// Expanded objects are kept alive until the pass ends. Accessors may return
/// freshly allocated objects that would otherwise be dropped right after
/// conversion, letting a later allocation reuse the address and collide with
/// an address-based identity.
#[derive(Debug, Default)]
pub(crate) struct TraversalContext {
    visited: VisitedSet,
    retained: Vec<ObjectRef>,
}

impl TraversalContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Mark an object as expanded, returns false on a repeat visit
    pub(crate) fn visit(&mut self, object: &ObjectRef, identity: String) -> bool {
        if !self.visited.insert(identity) {
            return false;
        }
        self.retained.push(object.clone());
        true
    }

    pub(crate) fn visited(&self) -> &VisitedSet {
        &self.visited
    }
}
