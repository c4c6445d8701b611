//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// This enum encapsulates the errors that can occur while loading or
/// persisting category assignments.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Represents an I/O error, typically from the backing store file.
    #[error("I/O error for path {1:?}: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// Represents a serialization or deserialization failure of store data.
    #[error("Invalid store data: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when no platform data directory could be determined for the
    /// default store location.
    #[error("Could not determine a data directory for the category store")]
    NoStorageDir,
}
