use utagaki_snapshot::SnapshotError;

/// Errors produced by session store operations.
///
/// Every failure is recoverable: the caller can correct the request and
/// re-issue it.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("config error: {0}")]
    Config(String),

    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

impl SessionError {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Returns `true` for a dangling reference to a participant, verse,
    /// reply, or match.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for rejected input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Convenience alias used throughout the session crate.
pub type Result<T> = std::result::Result<T, SessionError>;
