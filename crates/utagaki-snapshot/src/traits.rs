//! The [`SnapshotStore`] trait defining the snapshot storage interface.
//!
//! Any backend (in-memory, directory of files, browser-style local storage)
//! implements this trait to hold the session store's collections.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SnapshotError};

/// Storage backend for snapshot entries.
///
/// Entries are opaque strings keyed by name. Implementations must be
/// thread-safe (`Send + Sync`) and make each `put` atomic: a reader sees
/// either the previous value or the new one, never a partial write.
pub trait SnapshotStore: Send + Sync {
    /// Read an entry by key.
    ///
    /// Returns `Ok(None)` if the entry does not exist.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write (create or replace) an entry.
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Remove an entry.
    ///
    /// Returns `Ok(true)` if the entry existed and was removed, `Ok(false)` if
    /// it did not exist.
    fn remove(&self, key: &str) -> Result<bool>;

    /// List all entry keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;

    /// Read an entry and decode it from JSON.
    fn get_json<T>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
        T: DeserializeOwned,
    {
        match self.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| SnapshotError::Serialization(format!("{key}: {e}"))),
            None => Ok(None),
        }
    }

    /// Encode a value as JSON and write it.
    fn put_json<T>(&self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)
            .map_err(|e| SnapshotError::Serialization(format!("{key}: {e}")))?;
        self.put(key, &raw)
    }
}

/// Shared handles delegate to the backend they point at, so one backend can
/// outlive a session store and be reopened by the next one.
impl<T: SnapshotStore + ?Sized> SnapshotStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}
