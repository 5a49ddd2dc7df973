use tracing::{debug, warn};

use super::{KeyValueStore, DEFAULT_ITEMS_KEY};
use crate::error::StorageError;

#[derive(Debug)]
enum StoreMode {
    Durable,
    /// Backend failed; the list lives only here until the process exits
    InMemory(Vec<String>),
}

/// The persistent mirror of the displayed list
///
/// Labels are stored in order as a JSON array of strings under one key. Every
/// read-modify-write re-fetches the array from the backend first; nothing is
/// cached between calls while the store is durable.
#[derive(Debug)]
pub struct ItemStore<S> {
    backend: S,
    key: String,
    mode: StoreMode,
}

impl<S: KeyValueStore> ItemStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_ITEMS_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            mode: StoreMode::Durable,
        }
    }

    pub fn is_durable(&self) -> bool {
        matches!(self.mode, StoreMode::Durable)
    }

    /// Stop using the backend and keep `items` in memory from now on
    pub fn degrade(&mut self, items: Vec<String>) {
        warn!(
            target: "storage",
            "Switching to in-memory storage with {} item(s)",
            items.len()
        );
        self.mode = StoreMode::InMemory(items);
    }

    /// All stored labels in stored order. An absent key is an empty list.
    pub fn fetch_items(&self) -> Result<Vec<String>, StorageError> {
        match &self.mode {
            StoreMode::InMemory(items) => Ok(items.clone()),
            StoreMode::Durable => {
                let Some(raw) = self.backend.get(&self.key)? else {
                    return Ok(Vec::new());
                };
                match serde_json::from_str::<Vec<String>>(&raw) {
                    Ok(items) => Ok(items),
                    Err(e) => {
                        // The next write replaces the unreadable value
                        warn!(
                            target: "storage",
                            "Ignoring unreadable value under '{}': {}", self.key, e
                        );
                        Ok(Vec::new())
                    }
                }
            }
        }
    }

    pub fn contains(&self, label: &str) -> Result<bool, StorageError> {
        Ok(self.fetch_items()?.iter().any(|item| item == label))
    }

    pub fn add_item(&mut self, label: &str) -> Result<(), StorageError> {
        let mut items = self.fetch_items()?;
        items.push(label.to_string());
        self.write_items(items)?;
        debug!(target: "storage", "Stored '{}'", label);
        Ok(())
    }

    /// Remove every stored entry equal to `label`, returning how many went
    pub fn remove_item(&mut self, label: &str) -> Result<usize, StorageError> {
        let mut items = self.fetch_items()?;
        let before = items.len();
        items.retain(|item| item != label);
        let removed = before - items.len();

        if removed > 0 {
            self.write_items(items)?;
        }
        debug!(target: "storage", "Removed {} stored entries for '{}'", removed, label);
        Ok(removed)
    }

    /// Drop the whole key rather than writing an empty array
    pub fn clear(&mut self) -> Result<(), StorageError> {
        match &mut self.mode {
            StoreMode::InMemory(items) => {
                items.clear();
                Ok(())
            }
            StoreMode::Durable => self.backend.remove(&self.key),
        }
    }

    fn write_items(&mut self, items: Vec<String>) -> Result<(), StorageError> {
        match &mut self.mode {
            StoreMode::InMemory(current) => {
                *current = items;
                Ok(())
            }
            StoreMode::Durable => {
                let encoded = serde_json::to_string(&items)?;
                self.backend.set(&self.key, encoded)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_absent_key_is_empty() {
        let store = ItemStore::new(MemoryStore::new());
        assert!(store.fetch_items().unwrap().is_empty());
        assert!(!store.contains("Milk").unwrap());
    }

    #[test]
    fn test_encoding_is_json_array_under_key() {
        let backend = MemoryStore::new();
        let mut store = ItemStore::with_key(backend.clone(), "groceries");
        store.add_item("Milk").unwrap();
        store.add_item("Bread \"white\"").unwrap();

        assert_eq!(
            backend.raw("groceries").as_deref(),
            Some(r#"["Milk","Bread \"white\""]"#)
        );
        assert!(!backend.contains_key("items"));
    }

    #[test]
    fn test_remove_drops_every_match() {
        let mut backend = MemoryStore::new();
        backend
            .set("items", r#"["Milk","Eggs","Milk"]"#.to_string())
            .unwrap();
        let mut store = ItemStore::new(backend);

        assert_eq!(store.remove_item("Milk").unwrap(), 2);
        assert_eq!(store.fetch_items().unwrap(), vec!["Eggs".to_string()]);
        assert_eq!(store.remove_item("Milk").unwrap(), 0);
    }

    #[test]
    fn test_clear_removes_key() {
        let backend = MemoryStore::new();
        let mut store = ItemStore::new(backend.clone());
        store.add_item("Milk").unwrap();
        store.clear().unwrap();
        assert!(!backend.contains_key("items"));
    }

    #[test]
    fn test_unreadable_value_reads_as_empty() {
        let mut backend = MemoryStore::new();
        backend.set("items", "not json".to_string()).unwrap();
        let mut store = ItemStore::new(backend.clone());

        assert!(store.fetch_items().unwrap().is_empty());
        store.add_item("Milk").unwrap();
        assert_eq!(backend.raw("items").as_deref(), Some(r#"["Milk"]"#));
    }

    #[test]
    fn test_degraded_store_ignores_backend() {
        let backend = MemoryStore::new();
        let mut store = ItemStore::new(backend.clone());
        backend.fail_writes(true);
        backend.fail_reads(true);

        store.degrade(vec!["Milk".to_string()]);
        assert!(!store.is_durable());

        store.add_item("Eggs").unwrap();
        assert_eq!(store.remove_item("Milk").unwrap(), 1);
        assert_eq!(store.fetch_items().unwrap(), vec!["Eggs".to_string()]);
        store.clear().unwrap();
        assert!(store.fetch_items().unwrap().is_empty());
    }
}
