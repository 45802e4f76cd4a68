//! Bounded, cycle-safe value inspection
//!
//! This module turns an arbitrary [`Value`] graph into a [`Representation`]:
//! - [`context`]: per-pass visited set
//! - [`identity`]: natural key / address identity of objects
//! - [`errors`]: accessor failures
//!
//! # Depth Budget
//!
//! Every plain container (sequence, mapping) consumes one unit of the depth
//! budget and needs at least one unit left for its children, otherwise it is
//! replaced by [`Representation::MaxDepthReached`]. Scalars cost nothing.
//! With `max_depth = 1`, `{"a": 1, "b": {"c": 2}}` becomes
//! `{"a": 1, "b": MAX DEPTH REACHED}`. A negative budget yields the sentinel
//! for any value.
//!
//! An object consumes two units: one for itself and one for the mapping of
//! its members (virtual properties or elements). Its member values are
//! inspected at `d - 2`, so an object needs `max_depth >= 2` to show scalar
//! members.
//!
//! # Objects
//!
//! Objects are expanded at most once per pass. Container-like objects are
//! materialized through [`Inspectable::elements`](crate::value::Inspectable::elements);
//! everything else is described by its getter-style accessors (`getTitle`,
//! `isActive`, `has_children`), which become the virtual properties `title`,
//! `active` and `children`. Accessors named by the [`MemberFilterPolicy`] are
//! never called.

pub mod context;
pub mod errors;
pub mod identity;
mod object;

pub use context::VisitedSet;
pub use errors::{AccessorError, InspectError};
pub use identity::identity_of;

use crate::policy::MemberFilterPolicy;
use crate::representation::{Representation, CLOSURE_MARKER};
use crate::value::Value;
use context::TraversalContext;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default depth budget
pub const DEFAULT_MAX_DEPTH: i32 = 8;

/// Default cap on items pulled from a lazily produced sequence
pub const DEFAULT_MAX_ITERABLE_ITEMS: usize = 10_000;

/// What to do when an accessor returns an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessorErrorMode {
    /// Abort the whole inspection
    #[default]
    Propagate,
    /// Record the failure in the property slot and continue
    Placeholder,
}

/// Inspect `value` with the default options
///
/// Equivalent to building an [`Inspector`] with `max_depth` and `policy`.
pub fn inspect(
    value: &Value,
    max_depth: i32,
    policy: &MemberFilterPolicy,
) -> Result<Representation, InspectError> {
    Walker::new(
        policy,
        AccessorErrorMode::default(),
        DEFAULT_MAX_ITERABLE_ITEMS,
    )
    .run(value, max_depth)
}

/// Configured inspector
///
/// Holds no per-call state: every call to [`Inspector::inspect`] gets its own
/// visited set, so one inspector can serve many threads.
#[derive(Debug, Clone)]
pub struct Inspector {
    max_depth: i32,
    policy: MemberFilterPolicy,
    accessor_errors: AccessorErrorMode,
    max_iterable_items: usize,
}

impl Inspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_policy(mut self, policy: MemberFilterPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_accessor_errors(mut self, mode: AccessorErrorMode) -> Self {
        self.accessor_errors = mode;
        self
    }

    pub fn with_max_iterable_items(mut self, limit: usize) -> Self {
        self.max_iterable_items = limit;
        self
    }

    pub fn max_depth(&self) -> i32 {
        self.max_depth
    }

    pub fn policy(&self) -> &MemberFilterPolicy {
        &self.policy
    }

    pub fn accessor_errors(&self) -> AccessorErrorMode {
        self.accessor_errors
    }

    pub fn max_iterable_items(&self) -> usize {
        self.max_iterable_items
    }

    /// Inspect with the configured depth budget
    pub fn inspect(&self, value: &Value) -> Result<Representation, InspectError> {
        self.inspect_with_depth(value, self.max_depth)
    }

    /// Inspect with an explicit depth budget
    pub fn inspect_with_depth(
        &self,
        value: &Value,
        max_depth: i32,
    ) -> Result<Representation, InspectError> {
        Walker::new(&self.policy, self.accessor_errors, self.max_iterable_items)
            .run(value, max_depth)
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Inspector {
            max_depth: DEFAULT_MAX_DEPTH,
            policy: MemberFilterPolicy::default(),
            accessor_errors: AccessorErrorMode::default(),
            max_iterable_items: DEFAULT_MAX_ITERABLE_ITEMS,
        }
    }
}

/// Recursive converter for one pass
struct Walker<'p> {
    policy: &'p MemberFilterPolicy,
    accessor_errors: AccessorErrorMode,
    max_iterable_items: usize,
    context: TraversalContext,
}

impl<'p> Walker<'p> {
    fn new(
        policy: &'p MemberFilterPolicy,
        accessor_errors: AccessorErrorMode,
        max_iterable_items: usize,
    ) -> Self {
        Walker {
            policy,
            accessor_errors,
            max_iterable_items,
            context: TraversalContext::new(),
        }
    }

    fn run(mut self, value: &Value, max_depth: i32) -> Result<Representation, InspectError> {
        tracing::debug!(kind = value.kind(), max_depth, "inspection started");
        let representation = self.convert_value(value, max_depth)?;
        tracing::debug!(
            objects = self.context.visited().len(),
            "inspection finished"
        );
        Ok(representation)
    }

    fn convert_value(&mut self, value: &Value, depth: i32) -> Result<Representation, InspectError> {
        if depth < 0 {
            return Ok(Representation::MaxDepthReached);
        }
        match value {
            Value::Null => Ok(Representation::Null),
            Value::Bool(b) => Ok(Representation::Bool(*b)),
            Value::Int(n) => Ok(Representation::Int(*n)),
            Value::Float(x) => Ok(Representation::Float(*x)),
            Value::String(s) => Ok(Representation::String(s.clone())),
            Value::Sequence(items) => self.convert_sequence(items.iter(), depth),
            Value::Mapping(entries) => self.convert_mapping(entries, depth),
            Value::Callable(_) => Ok(Representation::Opaque(CLOSURE_MARKER.to_string())),
            Value::Opaque(label) => Ok(Representation::Opaque(format!("({})", label))),
            Value::Object(object) => self.convert_object(object, depth),
        }
    }

    fn convert_sequence<'v, I>(&mut self, items: I, depth: i32) -> Result<Representation, InspectError>
    where
        I: Iterator<Item = &'v Value>,
    {
        let child_depth = depth - 1;
        if child_depth < 0 {
            return Ok(Representation::MaxDepthReached);
        }
        let mut converted = Vec::with_capacity(items.size_hint().0);
        for item in items {
            converted.push(self.convert_value(item, child_depth)?);
        }
        Ok(Representation::Sequence(converted))
    }

    fn convert_mapping(
        &mut self,
        entries: &IndexMap<String, Value>,
        depth: i32,
    ) -> Result<Representation, InspectError> {
        let child_depth = depth - 1;
        if child_depth < 0 {
            return Ok(Representation::MaxDepthReached);
        }
        let mut converted = IndexMap::with_capacity(entries.len());
        for (key, value) in entries {
            converted.insert(key.clone(), self.convert_value(value, child_depth)?);
        }
        Ok(Representation::Mapping(converted))
    }
}
