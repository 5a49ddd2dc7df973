//! Persistence for the shopping list
//!
//! The list is kept as one JSON array of strings under a single key of a
//! [`KeyValueStore`]. [`ItemStore`] owns that encoding; the stores themselves
//! only move opaque strings around.

pub mod file_store;
pub mod item_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use item_store::ItemStore;
pub use memory_store::MemoryStore;

use crate::error::StorageError;

/// Key under which the item list is stored unless configured otherwise
pub const DEFAULT_ITEMS_KEY: &str = "items";

/// A string-valued key-value store
pub trait KeyValueStore {
    /// Read the value under `key`, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
