// Shared inspectable fixtures for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use vardump::{AccessorError, Inspectable, ObjectRef, Value};

/// Object with a name and an optional link to another object (or itself)
pub struct Node {
    pub name: String,
    pub link: OnceLock<ObjectRef>,
}

impl Node {
    pub fn new(name: &str) -> Arc<Node> {
        Arc::new(Node {
            name: name.to_string(),
            link: OnceLock::new(),
        })
    }

    /// A node whose `self` property points back at it
    pub fn self_referencing(name: &str) -> ObjectRef {
        let node = Node::new(name);
        let handle = ObjectRef::from_arc(node.clone());
        let _ = node.link.set(handle.clone());
        handle
    }
}

impl Inspectable for Node {
    fn type_name(&self) -> &'static str {
        "Node"
    }

    fn accessors(&self) -> &[&str] {
        &["getName", "getSelf"]
    }

    fn invoke(&self, accessor: &str) -> Result<Value, AccessorError> {
        match accessor {
            "getName" => Ok(Value::from(self.name.as_str())),
            "getSelf" => Ok(self.link.get().cloned().map(Value::Object).unwrap_or_default()),
            other => Err(AccessorError::new(format!("unknown accessor {}", other))),
        }
    }
}

/// Persistent entity identified by its primary key
pub struct Post {
    pub id: i64,
    pub title: String,
}

impl Inspectable for Post {
    fn natural_key(&self) -> Option<String> {
        Some(format!("Post:{}", self.id))
    }

    fn accessors(&self) -> &[&str] {
        &["getUid", "getTitle"]
    }

    fn invoke(&self, accessor: &str) -> Result<Value, AccessorError> {
        match accessor {
            "getUid" => Ok(Value::Int(self.id)),
            "getTitle" => Ok(Value::from(self.title.as_str())),
            other => Err(AccessorError::new(format!("unknown accessor {}", other))),
        }
    }
}

/// File handle whose contents accessor counts its calls
pub struct File {
    pub path: String,
    pub content_reads: AtomicUsize,
}

impl File {
    pub fn new(path: &str) -> Arc<File> {
        Arc::new(File {
            path: path.to_string(),
            content_reads: AtomicUsize::new(0),
        })
    }

    pub fn reads(&self) -> usize {
        self.content_reads.load(Ordering::SeqCst)
    }
}

impl Inspectable for File {
    fn type_name(&self) -> &'static str {
        "storage::File"
    }

    fn accessors(&self) -> &[&str] {
        &["getPath", "getContents", "getFileContents"]
    }

    fn invoke(&self, accessor: &str) -> Result<Value, AccessorError> {
        match accessor {
            "getPath" => Ok(Value::from(self.path.as_str())),
            "getContents" | "getFileContents" => {
                self.content_reads.fetch_add(1, Ordering::SeqCst);
                Ok(Value::from("<contents>"))
            }
            other => Err(AccessorError::new(format!("unknown accessor {}", other))),
        }
    }
}

/// Object with one accessor that always fails
pub struct Flaky;

impl Inspectable for Flaky {
    fn type_name(&self) -> &'static str {
        "Flaky"
    }

    fn accessors(&self) -> &[&str] {
        &["getName", "getBroken", "isReady"]
    }

    fn invoke(&self, accessor: &str) -> Result<Value, AccessorError> {
        match accessor {
            "getName" => Ok(Value::from("flaky")),
            "getBroken" => Err(AccessorError::new("database is gone")),
            "isReady" => Ok(Value::Bool(true)),
            other => Err(AccessorError::new(format!("unknown accessor {}", other))),
        }
    }
}

/// Object exposing getters that collide on their derived name, plus
/// accessors that are not getters at all
#[derive(Default)]
pub struct Article {
    pub calls: Mutex<Vec<String>>,
}

impl Article {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl Inspectable for Article {
    fn type_name(&self) -> &'static str {
        "Article"
    }

    fn accessors(&self) -> &[&str] {
        &["getTitle", "isTitle", "is_published", "hash", "save", "getCallback"]
    }

    fn invoke(&self, accessor: &str) -> Result<Value, AccessorError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(accessor.to_string());
        }
        match accessor {
            "getTitle" => Ok(Value::from("Hello")),
            "isTitle" => Ok(Value::Bool(false)),
            "is_published" => Ok(Value::Bool(true)),
            "getCallback" => Ok(Value::callable(|| Value::Int(1))),
            "hash" | "save" => Ok(Value::Null),
            other => Err(AccessorError::new(format!("unknown accessor {}", other))),
        }
    }
}

/// Array-like object
pub struct Bag {
    pub items: Vec<(String, Value)>,
}

impl Inspectable for Bag {
    fn type_name(&self) -> &'static str {
        "Bag"
    }

    fn elements(&self) -> Option<vardump::Elements<'_>> {
        Some(vardump::Elements::Keyed(self.items.iter().cloned().collect()))
    }
}
