//! Object capabilities
//!
//! Objects describe themselves to the inspector through [`Inspectable`]
//! instead of runtime reflection. A type lists its zero-argument accessors by
//! name and answers [`Inspectable::invoke`] for each of them; the inspector
//! decides which accessors to call based on naming and the filter policy.

use super::Value;
use crate::inspector::errors::AccessorError;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Capability interface for aggregate values
///
/// Only [`Inspectable::accessors`] and [`Inspectable::invoke`] matter for
/// plain objects. Container-like objects override [`Inspectable::elements`]
/// instead, which takes precedence over accessors.
pub trait Inspectable: Send + Sync {
    /// Concrete type name, matched against per-type filter entries
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Stable domain key (persistent id, content hash) used for cycle detection
    fn natural_key(&self) -> Option<String> {
        None
    }

    /// Array-like or lazily produced contents
    fn elements(&self) -> Option<Elements<'_>> {
        None
    }

    /// Names of the public accessors that take no arguments, in declaration order
    fn accessors(&self) -> &[&str] {
        &[]
    }

    /// Call an accessor listed by [`Inspectable::accessors`]
    fn invoke(&self, accessor: &str) -> Result<Value, AccessorError> {
        Err(AccessorError::new(format!("no accessor named '{}'", accessor)))
    }
}

/// Contents of a container-like object
pub enum Elements<'a> {
    /// Index/key based access, already materialized
    Keyed(IndexMap<String, Value>),
    /// Lazily produced sequence; may be unbounded
    Iter(Box<dyn Iterator<Item = Value> + 'a>),
}

/// Shared handle to an inspectable object
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn Inspectable>);

impl ObjectRef {
    pub fn new<T: Inspectable + 'static>(object: T) -> Self {
        ObjectRef(Arc::new(object))
    }

    pub fn from_arc(object: Arc<dyn Inspectable>) -> Self {
        ObjectRef(object)
    }

    /// Borrow the underlying object
    pub fn get(&self) -> &dyn Inspectable {
        self.0.as_ref()
    }

    /// Allocation address, stable while any handle is alive
    pub fn address(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    /// Check if two handles point at the same object
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        self.address() == other.address()
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({} @ 0x{:x})", self.0.type_name(), self.address())
    }
}

type Producer = dyn Fn() -> Box<dyn Iterator<Item = Value>> + Send + Sync;

/// A sequence produced on demand, e.g. a generator or a database cursor
///
/// Every call to [`Inspectable::elements`] starts a fresh iteration.
pub struct LazySequence {
    producer: Box<Producer>,
}

impl LazySequence {
    pub fn new<F, I>(producer: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: Iterator<Item = Value> + 'static,
    {
        LazySequence {
            producer: Box::new(move || Box::new(producer()) as Box<dyn Iterator<Item = Value>>),
        }
    }
}

impl Inspectable for LazySequence {
    fn type_name(&self) -> &'static str {
        "LazySequence"
    }

    fn elements(&self) -> Option<Elements<'_>> {
        Some(Elements::Iter((self.producer)()))
    }
}
