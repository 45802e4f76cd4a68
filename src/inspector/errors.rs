//! Inspection error types
//!
//! Running out of depth, meeting an object twice and finding a value with no
//! conversion path are not errors: they produce sentinel nodes in the
//! [`Representation`](crate::representation::Representation). The only thing
//! that can fail an inspection is an accessor reporting an error.

use thiserror::Error;

/// Failure reported by an [`Inspectable`](crate::value::Inspectable) accessor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AccessorError {
    pub message: String,
}

impl AccessorError {
    pub fn new(message: impl Into<String>) -> Self {
        AccessorError {
            message: message.into(),
        }
    }
}

/// Errors that abort an inspection pass
#[derive(Debug, Clone, Error)]
pub enum InspectError {
    /// An accessor failed while building virtual properties
    #[error("accessor '{accessor}' on {type_name} failed: {source}")]
    AccessorFailed {
        type_name: String,
        accessor: String,
        #[source]
        source: AccessorError,
    },
}

impl InspectError {
    /// Name of the accessor that failed
    pub fn accessor(&self) -> &str {
        match self {
            InspectError::AccessorFailed { accessor, .. } => accessor,
        }
    }
}
