//! Key-value backends
//!
//! Everything Gatehouse persists is a string value under a string key, the
//! same shape as the browser's `localStorage`. Backends implement
//! [`KeyValueStore`]; the credential store and session manager share one
//! backend through a [`SharedStore`] handle.

use crate::storage::{StorageError, StorageResult};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::RwLock;

/// String key-value storage with `localStorage` semantics
pub trait KeyValueStore {
    /// Read a value, `None` when the key is absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a key. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Short backend name for logs
    fn backend(&self) -> &'static str;
}

/// Handle shared by the credential store and the session manager.
///
/// Execution is single-threaded, so `Rc` rather than `Arc`.
pub type SharedStore = Rc<dyn KeyValueStore>;

/// In-memory backend, used by tests and the demo binary
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience: a fresh memory store behind a [`SharedStore`]
    pub fn shared() -> SharedStore {
        Rc::new(Self::new())
    }

    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("authToken").unwrap().is_none());

        store.set("authToken", "abc").unwrap();
        assert_eq!(store.get("authToken").unwrap().as_deref(), Some("abc"));

        store.set("authToken", "def").unwrap();
        assert_eq!(store.get("authToken").unwrap().as_deref(), Some("def"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_remove() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        store.remove("a").unwrap();
        store.remove("missing").unwrap();
        assert!(store.get("a").unwrap().is_none());
        assert_eq!(store.len(), 1);

        store.remove("b").unwrap();
        assert!(store.is_empty());
    }
}
