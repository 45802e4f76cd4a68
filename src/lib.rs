//! # Introduction
//!
//! vardump turns arbitrary runtime values into bounded, cycle-safe
//! [`Representation`] trees for debug dumps. It is the engine behind a
//! template `debug` tag: the host hands over a [`Value`], vardump walks it up
//! to a depth budget and the finished dump goes to a [`debug::Sink`].
//!
//! ## Pipeline
//!
//! ```text
//! Value → Inspector → Representation → Sink (console script, text, tracing)
//!                                   ↘ Breakpoint (terminal viewer)
//! ```
//!
//! 1. [`value`]: the dynamic value model and the [`Inspectable`] trait host
//!    objects implement.
//! 2. [`inspector`]: the depth-bounded walk with recursion detection and
//!    virtual properties read through accessors.
//! 3. [`policy`]: accessors that must never be invoked during a dump.
//! 4. [`representation`]: the output tree and its JSON form.
//! 5. [`debug`]: the tag adapter, sinks and breakpoint hooks.
//! 6. [`config`]: `vardump.toml` settings.
//! 7. [`ui`]: ratatui viewer used by the interactive breakpoint.
//!
//! ## Example
//!
//! ```
//! use vardump::{inspect, MemberFilterPolicy, Representation, Value};
//!
//! let value = Value::from(serde_json::json!({"a": 1, "b": {"c": 2}}));
//! let repr = inspect(&value, 1, &MemberFilterPolicy::default()).unwrap();
//! assert_eq!(repr.get("a"), Some(&Representation::Int(1)));
//! assert_eq!(repr.get("b"), Some(&Representation::MaxDepthReached));
//! ```

pub mod config;
pub mod debug;
pub mod inspector;
pub mod policy;
pub mod representation;
pub mod ui;
pub mod value;

pub use inspector::{inspect, AccessorError, AccessorErrorMode, InspectError, Inspector, VisitedSet};
pub use policy::MemberFilterPolicy;
pub use representation::Representation;
pub use value::{Callable, Elements, Inspectable, LazySequence, ObjectRef, Value};
