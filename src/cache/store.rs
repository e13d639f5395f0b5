// Flat key-value store over JSON files.
// Handles serialization and atomic filesystem writes.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{FirstprError, Result};

use super::paths;

/// Key-value store holding one JSON file per composite key.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open the store at the default per-user cache location.
    pub fn open() -> Result<Self> {
        let dir = paths::cache_dir().ok_or(FirstprError::NoCacheDir)?;
        Ok(Self::with_dir(dir.join("records")))
    }

    /// Open the store at an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(paths::key_file_name(key))
    }

    /// Read the record stored under `key`, if any.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let record: T = serde_json::from_str(&contents)?;
        Ok(Some(record))
    }

    /// Write `record` under `key`, atomically via temp file + rename.
    pub fn set<T: Serialize>(&self, key: &str, record: &T) -> Result<()> {
        let path = self.key_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(record)?;

        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Delete the record stored under `key`.
    pub fn clear(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Check whether a record exists under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.key_path(key).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestRecord {
        name: String,
        value: i32,
    }

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::with_dir(temp_dir.path());

        let record = TestRecord {
            name: "test".to_string(),
            value: 42,
        };

        store.set("alice|acme/widgets", &record).unwrap();

        let read: Option<TestRecord> = store.get("alice|acme/widgets").unwrap();
        assert_eq!(read, Some(record));
    }

    #[test]
    fn test_get_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::with_dir(temp_dir.path());

        let read: Option<TestRecord> = store.get("nobody|nowhere").unwrap();
        assert!(read.is_none());
    }

    #[test]
    fn test_clear_removes_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::with_dir(temp_dir.path());

        let record = TestRecord {
            name: "test".to_string(),
            value: 1,
        };
        store.set("alice|acme", &record).unwrap();
        assert!(store.contains("alice|acme"));

        store.clear("alice|acme").unwrap();
        assert!(!store.contains("alice|acme"));

        // Clearing an absent key is a no-op.
        store.clear("alice|acme").unwrap();
    }

    #[test]
    fn test_set_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::with_dir(temp_dir.path());

        let first = TestRecord {
            name: "first".to_string(),
            value: 1,
        };
        let second = TestRecord {
            name: "second".to_string(),
            value: 2,
        };

        store.set("k", &first).unwrap();
        store.set("k", &second).unwrap();

        let read: Option<TestRecord> = store.get("k").unwrap();
        assert_eq!(read, Some(second));
    }
}
