//! In-memory snapshot store for testing and ephemeral use.
//!
//! [`InMemorySnapshotStore`] keeps all entries in a `HashMap` protected by a
//! `RwLock`. Data is lost when the store is dropped; wrap it in an `Arc` to
//! hand the same entries to a second session store and simulate a restart.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{Result, SnapshotError};
use crate::keys::validate_key;
use crate::traits::SnapshotStore;

/// An in-memory implementation of [`SnapshotStore`].
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySnapshotStore {
    /// Create a new empty snapshot store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| SnapshotError::LockPoisoned(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;

        let mut entries = self
            .entries
            .write()
            .map_err(|e| SnapshotError::LockPoisoned(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        debug!(key, len = value.len(), "snapshot entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| SnapshotError::LockPoisoned(e.to_string()))?;
        Ok(entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| SnapshotError::LockPoisoned(e.to_string()))?;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn put_and_get() {
        let store = InMemorySnapshotStore::new();
        store.put("utagaki_users", "[]").unwrap();
        assert_eq!(store.get("utagaki_users").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn get_missing_returns_none() {
        let store = InMemorySnapshotStore::new();
        assert!(store.get("utagaki_verses").unwrap().is_none());
    }

    #[test]
    fn put_replaces_existing_value() {
        let store = InMemorySnapshotStore::new();
        store.put("k", "1").unwrap();
        store.put("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_reports_existence() {
        let store = InMemorySnapshotStore::new();
        store.put("k", "v").unwrap();
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn keys_are_sorted() {
        let store = InMemorySnapshotStore::new();
        store.put("utagaki_verses", "[]").unwrap();
        store.put("utagaki_matches", "[]").unwrap();
        store.put("utagaki_users", "[]").unwrap();
        assert_eq!(
            store.keys().unwrap(),
            vec!["utagaki_matches", "utagaki_users", "utagaki_verses"]
        );
    }

    #[test]
    fn rejects_invalid_key_on_put() {
        let store = InMemorySnapshotStore::new();
        let err = store.put("../escape", "x").unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidKey { .. }));
    }

    #[test]
    fn json_helpers_round_trip() {
        let store = InMemorySnapshotStore::new();
        store.put_json("nums", &vec![3, 1, 2]).unwrap();
        let nums: Vec<u32> = store.get_json("nums").unwrap().unwrap();
        assert_eq!(nums, vec![3, 1, 2]);
    }

    #[test]
    fn get_json_reports_garbage() {
        let store = InMemorySnapshotStore::new();
        store.put("nums", "not json").unwrap();
        let err = store.get_json::<Vec<u32>>("nums").unwrap_err();
        assert!(matches!(err, SnapshotError::Serialization(_)));
    }

    #[test]
    fn shared_handle_sees_same_entries() {
        let shared = Arc::new(InMemorySnapshotStore::new());
        let handle = Arc::clone(&shared);
        handle.put("k", "v").unwrap();
        assert_eq!(shared.get("k").unwrap().as_deref(), Some("v"));
    }
}
