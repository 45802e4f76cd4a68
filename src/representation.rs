//! Inspection output
//!
//! A [`Representation`] is a finite, acyclic, fully owned snapshot of a value
//! graph. It never points back into the inspected values, so it can be kept,
//! sent to another thread or serialized after the graph is gone.
//!
//! # JSON form
//!
//! | Node | JSON |
//! |---|---|
//! | `Mapping` | object |
//! | `Sequence` | array |
//! | scalars | native scalar |
//! | `MaxDepthReached` | `{"MAX DEPTH REACHED": "Maximum depth reached"}` |
//! | `RecursionDetected(id)` | `{"RECURSION": "Recursion to object <id> which was already dumped above"}` |
//! | `Opaque(label)` | the label, e.g. `"(closure)"` |
//! | `Skipped` | `"(method blacklisted, not called)"` |
//! | `AccessorFailed(msg)` | `"(accessor failed: <msg>)"` |
//! | `Truncated(n)` | `{"TRUNCATED": "Iteration stopped after <n> items"}` |

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

pub const MAX_DEPTH_KEY: &str = "MAX DEPTH REACHED";
pub const MAX_DEPTH_MESSAGE: &str = "Maximum depth reached";
pub const RECURSION_KEY: &str = "RECURSION";
pub const TRUNCATED_KEY: &str = "TRUNCATED";
pub const CLOSURE_MARKER: &str = "(closure)";
pub const SKIPPED_PLACEHOLDER: &str = "(method blacklisted, not called)";

/// Snapshot of an inspected value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Representation {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Representation>),
    Mapping(IndexMap<String, Representation>),
    /// Depth budget ran out at this node
    MaxDepthReached,
    /// Object with this identity was already expanded earlier in the pass
    RecursionDetected(String),
    /// Value that is never introspected (closures, handles)
    Opaque(String),
    /// Accessor excluded by the filter policy
    Skipped,
    /// Accessor raised an error (placeholder mode only)
    AccessorFailed(String),
    /// Lazily produced sequence cut off after this many items
    Truncated(usize),
}

impl Representation {
    pub fn recursion_message(identity: &str) -> String {
        format!(
            "Recursion to object {} which was already dumped above",
            identity
        )
    }

    pub fn truncation_message(limit: usize) -> String {
        format!("Iteration stopped after {} items", limit)
    }

    /// Check if this node is one of the marker variants
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self,
            Representation::MaxDepthReached
                | Representation::RecursionDetected(_)
                | Representation::Opaque(_)
                | Representation::Skipped
                | Representation::AccessorFailed(_)
                | Representation::Truncated(_)
        )
    }

    /// Look up a mapping entry
    pub fn get(&self, key: &str) -> Option<&Representation> {
        match self {
            Representation::Mapping(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Look up a sequence element
    pub fn at(&self, index: usize) -> Option<&Representation> {
        match self {
            Representation::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    /// Child nodes with their labels, in output order
    pub fn children(&self) -> Vec<(String, &Representation)> {
        match self {
            Representation::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item))
                .collect(),
            Representation::Mapping(entries) => {
                entries.iter().map(|(k, v)| (k.clone(), v)).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Number of nested container levels (a scalar or marker is 0)
    pub fn nesting(&self) -> usize {
        match self {
            Representation::Sequence(items) => {
                1 + items.iter().map(Representation::nesting).max().unwrap_or(0)
            }
            Representation::Mapping(entries) => {
                1 + entries
                    .values()
                    .map(Representation::nesting)
                    .max()
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Count the nodes (this one included) matching `predicate`
    pub fn count_matching<F>(&self, predicate: &F) -> usize
    where
        F: Fn(&Representation) -> bool,
    {
        let own = usize::from(predicate(self));
        own + self
            .children()
            .into_iter()
            .map(|(_, child)| child.count_matching(predicate))
            .sum::<usize>()
    }

    /// One-line summary used by the text and TUI renderers
    pub fn summary(&self) -> String {
        match self {
            Representation::Null => "null".to_string(),
            Representation::Bool(b) => b.to_string(),
            Representation::Int(n) => n.to_string(),
            Representation::Float(x) => x.to_string(),
            Representation::String(s) => format!("{:?}", s),
            Representation::Sequence(items) => format!("sequence({})", items.len()),
            Representation::Mapping(entries) => format!("mapping({})", entries.len()),
            Representation::MaxDepthReached => format!("[{}]", MAX_DEPTH_MESSAGE),
            Representation::RecursionDetected(id) => format!("[recursion to {}]", id),
            Representation::Opaque(label) => label.clone(),
            Representation::Skipped => SKIPPED_PLACEHOLDER.to_string(),
            Representation::AccessorFailed(message) => format!("(accessor failed: {})", message),
            Representation::Truncated(limit) => format!("[{}]", Self::truncation_message(*limit)),
        }
    }

    /// Convert into a `serde_json::Value` tree
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self)
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let children = self.children();
        if children.is_empty() {
            return write!(f, "{}", self.summary());
        }
        writeln!(f, "{} {{", self.summary())?;
        for (label, child) in children {
            write!(f, "{:width$}{} => ", "", label, width = (indent + 1) * 2)?;
            child.write_indented(f, indent + 1)?;
            writeln!(f)?;
        }
        write!(f, "{:width$}}}", "", width = indent * 2)
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

impl Serialize for Representation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Representation::Null => serializer.serialize_none(),
            Representation::Bool(b) => serializer.serialize_bool(*b),
            Representation::Int(n) => serializer.serialize_i64(*n),
            Representation::Float(x) => serializer.serialize_f64(*x),
            Representation::String(s) => serializer.serialize_str(s),
            Representation::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Representation::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Representation::MaxDepthReached => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(MAX_DEPTH_KEY, MAX_DEPTH_MESSAGE)?;
                map.end()
            }
            Representation::RecursionDetected(identity) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(RECURSION_KEY, &Self::recursion_message(identity))?;
                map.end()
            }
            Representation::Truncated(limit) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(TRUNCATED_KEY, &Self::truncation_message(*limit))?;
                map.end()
            }
            Representation::Opaque(_)
            | Representation::Skipped
            | Representation::AccessorFailed(_) => serializer.serialize_str(&self.summary()),
        }
    }
}

impl From<&Representation> for serde_json::Value {
    fn from(repr: &Representation) -> Self {
        use serde_json::{json, Value};

        match repr {
            Representation::Null => Value::Null,
            Representation::Bool(b) => Value::Bool(*b),
            Representation::Int(n) => json!(n),
            Representation::Float(x) => json!(x),
            Representation::String(s) => Value::String(s.clone()),
            Representation::Sequence(items) => Value::Array(items.iter().map(Value::from).collect()),
            Representation::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
            Representation::MaxDepthReached => json!({ MAX_DEPTH_KEY: MAX_DEPTH_MESSAGE }),
            Representation::RecursionDetected(identity) => {
                json!({ RECURSION_KEY: Representation::recursion_message(identity) })
            }
            Representation::Truncated(limit) => {
                json!({ TRUNCATED_KEY: Representation::truncation_message(*limit) })
            }
            Representation::Opaque(_)
            | Representation::Skipped
            | Representation::AccessorFailed(_) => Value::String(repr.summary()),
        }
    }
}
