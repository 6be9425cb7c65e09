//! Error types for feedback persistence

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A persisted document could not be parsed
    #[error("Corrupted document {path}: {message}")]
    Corrupted { path: PathBuf, message: String },

    /// Generic error wrapper
    #[error("Storage error: {0}")]
    Other(#[from] anyhow::Error),
}

impl StorageError {
    /// Create a serialization error
    pub fn serialization<E: fmt::Display>(err: E) -> Self {
        Self::Serialization(err.to_string())
    }

    /// Create a corrupted-document error
    pub fn corrupted<E: fmt::Display>(path: impl Into<PathBuf>, err: E) -> Self {
        Self::Corrupted {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create an error from a plain message
    pub fn operation<E: fmt::Display>(msg: E) -> Self {
        Self::Other(anyhow::anyhow!(msg.to_string()))
    }

    /// Check if this error came from a malformed document
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Self::Corrupted { .. })
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err)
    }
}
