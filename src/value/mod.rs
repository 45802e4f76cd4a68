//! Inspection targets
//!
//! This module defines [`Value`], the input side of the inspector. A value is
//! whatever a template expression evaluated to: a scalar, a plain container,
//! a closure, or an object that exposes its members through the
//! [`Inspectable`] capability trait.
//!
//! # Value Kinds
//!
//! - Scalars: [`Value::Null`], [`Value::Bool`], [`Value::Int`], [`Value::Float`],
//!   [`Value::String`]
//! - Plain containers: [`Value::Sequence`] and [`Value::Mapping`] (insertion order kept)
//! - [`Value::Callable`]: opaque, never introspected
//! - [`Value::Object`]: aggregate with accessors, array-like or lazily iterated elements
//! - [`Value::Opaque`]: platform handle with no conversion path
//!
//! Objects are shared through [`ObjectRef`], so a graph of values may contain
//! cycles. The inspector is responsible for walking such graphs safely.

mod object;

pub use object::{Elements, Inspectable, LazySequence, ObjectRef};

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Any value a template expression can produce
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(IndexMap<String, Value>),
    Callable(Callable),
    Object(ObjectRef),
    Opaque(String), // e.g. a stream or socket handle
}

impl Value {
    /// Wrap an inspectable object
    pub fn object<T: Inspectable + 'static>(object: T) -> Self {
        Value::Object(ObjectRef::new(object))
    }

    /// Wrap a closure
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Value::Callable(Callable::new(f))
    }

    /// Wrap a lazily produced sequence
    pub fn iterable<F, I>(producer: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: Iterator<Item = Value> + 'static,
    {
        Value::object(LazySequence::new(producer))
    }

    /// Build a mapping from key/value pairs, keeping their order
    pub fn mapping<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a sequence from anything convertible into values
    pub fn sequence<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Check if this value is a scalar (including null)
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_)
        )
    }

    /// Short name of the value kind, used in log output
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Callable(_) => "callable",
            Value::Object(_) => "object",
            Value::Opaque(_) => "opaque",
        }
    }

    /// Get the object reference, returns None if not an Object
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// An opaque closure value
///
/// The inspector never calls a callable it finds inside a value graph. The
/// debug tag uses the same type for its "render children" closure.
#[derive(Clone)]
pub struct Callable(Arc<dyn Fn() -> Value + Send + Sync>);

impl Callable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Callable(Arc::new(f))
    }

    /// Evaluate the closure
    pub fn call(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(..)")
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Mapping(entries)
    }
}

impl From<ObjectRef> for Value {
    fn from(object: ObjectRef) -> Self {
        Value::Object(object)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                // u64 beyond i64::MAX and real numbers
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Mapping(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
