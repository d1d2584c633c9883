//! Error types for snapshot operations.

use thiserror::Error;

/// Errors that can occur while reading or writing snapshot entries.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The key cannot be used as a snapshot entry name.
    #[error("invalid snapshot key: {key}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backend's internal lock was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// I/O error during file-based snapshot operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;
