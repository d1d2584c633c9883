//! Snapshot key conventions.
//!
//! A snapshot holds one entry per collection. Entry keys are the collection
//! name behind a namespace prefix (`utagaki_verses`, `utagaki_users`, ...).
//!
//! Valid keys:
//! - Must be non-empty
//! - May only contain ASCII alphanumerics, `_`, `-` and `.`
//! - Must not start with `.`
//! - Must not contain `..`

use std::fmt;

use crate::error::{Result, SnapshotError};

/// The collections persisted by the session store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    /// Roster of registered participants.
    Users,
    /// Id of the participant holding the active session.
    CurrentUserId,
    /// Verse ledger, newest first.
    Verses,
    /// Reply ledger, oldest first.
    Replies,
    /// Match ledger, oldest first.
    Matches,
    /// Message log, oldest first.
    Messages,
}

impl CollectionKey {
    /// Every collection, in the order they are rehydrated.
    pub const ALL: [CollectionKey; 6] = [
        CollectionKey::Users,
        CollectionKey::CurrentUserId,
        CollectionKey::Verses,
        CollectionKey::Replies,
        CollectionKey::Matches,
        CollectionKey::Messages,
    ];

    /// The bare collection name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::CurrentUserId => "current_user_id",
            Self::Verses => "verses",
            Self::Replies => "replies",
            Self::Matches => "matches",
            Self::Messages => "messages",
        }
    }

    /// The full entry key under the given namespace prefix.
    pub fn with_prefix(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.name())
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validate a snapshot key, returning `Ok(())` if valid.
///
/// Keys double as file names in [`FileSnapshotStore`](crate::FileSnapshotStore),
/// so anything that could escape the snapshot directory is rejected.
///
/// # Examples
///
/// ```
/// use utagaki_snapshot::keys::validate_key;
///
/// assert!(validate_key("utagaki_verses").is_ok());
/// assert!(validate_key("").is_err());
/// assert!(validate_key("../etc/passwd").is_err());
/// ```
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(SnapshotError::InvalidKey {
            key: key.to_string(),
            reason: "key must not be empty".into(),
        });
    }

    if let Some(ch) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(SnapshotError::InvalidKey {
            key: key.to_string(),
            reason: format!("contains forbidden character: {ch:?}"),
        });
    }

    if key.starts_with('.') {
        return Err(SnapshotError::InvalidKey {
            key: key.to_string(),
            reason: "must not start with '.'".into(),
        });
    }

    if key.contains("..") {
        return Err(SnapshotError::InvalidKey {
            key: key.to_string(),
            reason: "must not contain '..'".into(),
        });
    }

    Ok(())
}
