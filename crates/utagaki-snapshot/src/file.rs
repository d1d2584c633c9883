//! Directory-backed snapshot store.
//!
//! Each entry lives in its own `<key>.json` file inside the snapshot
//! directory. Writes go to a temporary file in the same directory which is
//! then renamed over the target, so a crash mid-write leaves the previous
//! value intact.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SnapshotError};
use crate::keys::validate_key;
use crate::traits::SnapshotStore;

/// File extension used for entry files.
const ENTRY_EXTENSION: &str = "json";

/// A [`SnapshotStore`] that persists entries as files in a directory.
#[derive(Debug)]
pub struct FileSnapshotStore {
    root: PathBuf,
}

impl FileSnapshotStore {
    /// Open (or create) a snapshot directory at the given path.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        debug!(root = %root.display(), "opened file snapshot store");
        Ok(Self { root })
    }

    /// The snapshot directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{ENTRY_EXTENSION}")))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| SnapshotError::Io(e.error))?;

        debug!(key, len = value.len(), "snapshot entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::open(dir.path()).unwrap();

        store.put("utagaki_users", "[1,2]").unwrap();
        assert_eq!(store.get("utagaki_users").unwrap().as_deref(), Some("[1,2]"));
        assert!(dir.path().join("utagaki_users.json").is_file());
    }

    #[test]
    fn get_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::open(dir.path()).unwrap();
        assert!(store.get("utagaki_verses").unwrap().is_none());
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileSnapshotStore::open(dir.path()).unwrap();
            store.put("k", "persisted").unwrap();
        }
        let store = FileSnapshotStore::open(dir.path()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn put_overwrites_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::open(dir.path()).unwrap();
        store.put("k", "first").unwrap();
        store.put("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
        // No stray temp files are left behind.
        assert_eq!(store.keys().unwrap(), vec!["k"]);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn remove_reports_existence() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::open(dir.path()).unwrap();
        store.put("k", "v").unwrap();
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn keys_ignore_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::open(dir.path()).unwrap();
        store.put("utagaki_verses", "[]").unwrap();
        store.put("utagaki_matches", "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        assert_eq!(
            store.keys().unwrap(),
            vec!["utagaki_matches", "utagaki_verses"]
        );
    }

    #[test]
    fn rejects_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.get("../outside").unwrap_err(),
            SnapshotError::InvalidKey { .. }
        ));
        assert!(store.put("a/b", "x").is_err());
    }

    #[test]
    fn open_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileSnapshotStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.root(), nested.as_path());
    }
}
