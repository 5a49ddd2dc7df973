use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

use super::KeyValueStore;
use crate::error::StorageError;

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-process key-value store
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the List Manager wrote. Failures can be injected to exercise the
/// storage-unavailable path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail
    pub fn fail_reads(&self, fail: bool) {
        self.inner.borrow_mut().fail_reads = fail;
    }

    /// Make every subsequent `set`/`remove` fail
    pub fn fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Raw value currently stored under `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.borrow().values.contains_key(key)
    }

    fn unavailable(op: &str) -> StorageError {
        StorageError::Io(io::Error::new(
            io::ErrorKind::Other,
            format!("memory store {} disabled", op),
        ))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.inner.borrow();
        if inner.fail_reads {
            return Err(Self::unavailable("read"));
        }
        Ok(inner.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(Self::unavailable("write"));
        }
        inner.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(Self::unavailable("write"));
        }
        inner.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_values() {
        let mut store = MemoryStore::new();
        let observer = store.clone();

        store.set("items", "[\"Milk\"]".to_string()).unwrap();
        assert_eq!(observer.raw("items").as_deref(), Some("[\"Milk\"]"));

        store.remove("items").unwrap();
        assert!(!observer.contains_key("items"));
        // Removing again is fine
        store.remove("items").unwrap();
    }

    #[test]
    fn test_injected_failures() {
        let mut store = MemoryStore::new();
        store.fail_writes(true);
        assert!(store.set("items", "[]".to_string()).is_err());
        assert!(store.get("items").unwrap().is_none());

        store.fail_reads(true);
        assert!(store.get("items").is_err());
    }
}
