use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::KeyValueStore;
use crate::error::StorageError;

/// Durable key-value store kept as a single JSON object on disk
///
/// Every call re-reads the file, so two stores pointed at the same path see
/// each other's writes.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota_bytes: None,
        }
    }

    /// Refuse writes that would grow the file beyond `quota` bytes
    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota_bytes = quota;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(values)?;

        if let Some(quota) = self.quota_bytes {
            if content.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    needed: content.len(),
                    quota,
                });
            }
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write beside the target and rename so a crash never leaves half a file
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!(target: "storage", "Wrote {} key(s) to {:?}", values.len(), self.path);
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        if values.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("storage.json");

        let mut store = FileStore::new(&path);
        store.set("items", "[\"Eggs\"]".to_string()).unwrap();
        store.set("other", "x".to_string()).unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("items").unwrap().as_deref(), Some("[\"Eggs\"]"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
        assert!(reopened.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_remove_leaves_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("storage.json"));
        store.set("items", "[]".to_string()).unwrap();
        store.set("theme", "dark".to_string()).unwrap();

        store.remove("items").unwrap();
        store.remove("items").unwrap();

        assert!(store.get("items").unwrap().is_none());
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_quota_rejects_large_write() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("storage.json")).with_quota(Some(32));

        store.set("a", "1".to_string()).unwrap();
        let err = store.set("items", "x".repeat(64)).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 32, .. }));

        // The failed write did not clobber what was there
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert!(store.get("items").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get("items"), Err(StorageError::Encoding(_))));
    }
}
