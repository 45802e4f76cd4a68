//! Debug tag error types

use crate::inspector::errors::InspectError;
use std::io;
use thiserror::Error;

/// Errors raised while rendering a debug tag
#[derive(Debug, Error)]
pub enum DebugError {
    /// The inspector aborted (accessor failure)
    #[error(transparent)]
    Inspect(#[from] InspectError),

    /// Console level is not a plain method name
    #[error("invalid console level '{0}': expected a method name such as \"log\" or \"warn\"")]
    InvalidLevel(String),

    /// Writing to the output sink failed
    #[error("failed to write dump: {0}")]
    Io(#[from] io::Error),

    /// Encoding the representation failed
    #[error("failed to encode dump as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
