use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::error::StorageError;

/// Get/set/remove of text values by key.
pub trait DraftStore {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// File-backed store: one file per key under the XDG data directory.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    base_path: PathBuf,
}

impl FileDraftStore {
    /// Creates a store using the XDG data directory.
    ///
    /// The drafts directory (`~/.local/share/berichtform/drafts/`) is created
    /// if it does not already exist.
    pub fn new() -> Result<Self, StorageError> {
        let data_dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
        Self::with_path(data_dir.join("berichtform").join("drafts"))
    }

    /// Creates a store rooted at the given path.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = path.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Returns the file path for a key.
    ///
    /// Replaces `/` and `\` with `_` so a key can never leave the base directory.
    fn key_path(&self, key: &str) -> PathBuf {
        let safe_key = key.replace(['/', '\\'], "_");
        self.base_path.join(format!("{safe_key}.json"))
    }
}

impl DraftStore for FileDraftStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }
}

impl DraftStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;
    use tempfile::tempdir;

    use super::*;

    fn make_store() -> (tempfile::TempDir, FileDraftStore) {
        let dir = tempdir().unwrap();
        let store = FileDraftStore::with_path(dir.path()).unwrap();
        (dir, store)
    }

    mod file_store {
        use super::*;

        #[test]
        fn missing_key_is_none() {
            let (_dir, store) = make_store();
            assert_eq!(store.get("berichtData").unwrap(), None);
        }

        #[test]
        fn set_then_get() {
            let (_dir, mut store) = make_store();
            store.set("berichtData", r#"{"Amt":"Jugend"}"#).unwrap();
            assert_eq!(
                store.get("berichtData").unwrap().as_deref(),
                Some(r#"{"Amt":"Jugend"}"#)
            );
        }

        #[test]
        fn set_overwrites() {
            let (_dir, mut store) = make_store();
            store.set("k", "one").unwrap();
            store.set("k", "two").unwrap();
            assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        }

        #[test]
        fn remove_deletes_file() {
            let (dir, mut store) = make_store();
            store.set("k", "v").unwrap();
            store.remove("k").unwrap();
            assert_eq!(store.get("k").unwrap(), None);
            assert!(!dir.path().join("k.json").exists());
        }

        #[test]
        fn remove_missing_key_is_ok() {
            let (_dir, mut store) = make_store();
            assert!(store.remove("never").is_ok());
        }

        #[test]
        fn key_with_slash_stays_inside_base() {
            let (dir, mut store) = make_store();
            store.set("../escape", "v").unwrap();
            assert!(dir.path().join(".._escape.json").exists());
        }

        #[test]
        fn keys_are_independent() {
            let (_dir, mut store) = make_store();
            store.set("a", "1").unwrap();
            store.set("b", "2").unwrap();
            store.remove("a").unwrap();
            assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
        }

        #[test]
        fn with_path_creates_directory() {
            let dir = tempdir().unwrap();
            let nested = dir.path().join("x").join("drafts");
            FileDraftStore::with_path(&nested).unwrap();
            assert!(nested.is_dir());
        }
    }

    mod memory_store {
        use super::*;

        #[test]
        fn with_entry_is_readable() {
            let store = MemoryStore::with_entry("k", "v");
            assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        }

        #[test]
        fn remove_clears_entry() {
            let mut store = MemoryStore::with_entry("k", "v");
            store.remove("k").unwrap();
            assert_eq!(store.get("k").unwrap(), None);
        }
    }

    #[quickcheck]
    fn file_store_returns_last_written_value(values: Vec<String>) -> bool {
        let (_dir, mut store) = make_store();
        for value in &values {
            store.set("k", value).unwrap();
        }
        store.get("k").unwrap() == values.last().cloned()
    }
}
