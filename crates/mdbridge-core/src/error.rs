//! Error types for mdbridge-core

use std::path::PathBuf;

use crate::side::Side;

/// Result type for mdbridge-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mdbridge-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// One of the synchronized trees does not exist
    #[error("{side} directory not found: {path}")]
    TreeNotFound { side: Side, path: PathBuf },

    /// Two physical documents in one tree resolve to the same id
    #[error("Documents {first} and {second} both resolve to id '{id}'")]
    IdCollision {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Directory walk failed
    #[error("Failed to scan {path}: {message}")]
    Scan { path: PathBuf, message: String },

    /// Persisted state could not be parsed
    #[error("Failed to parse sync state at {path}: {message}")]
    StateParse { path: PathBuf, message: String },

    /// Filesystem error from mdbridge-fs
    #[error(transparent)]
    Fs(#[from] mdbridge_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
