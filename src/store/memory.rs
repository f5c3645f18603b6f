use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::persistence::StoragePort;
use super::StorageError;

/// In-memory key-value adapter.
///
/// Backs throwaway sessions and tests. `set_fail_saves` simulates an
/// unavailable backend so persistence-error paths can be exercised.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    fail_saves: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail until cleared.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pre-seed a key, bypassing the port contract. Test setup helper.
    pub fn seed(&self, key: &str, bytes: Vec<u8>) {
        if let Ok(mut map) = self.entries.lock() {
            map.insert(key.to_string(), bytes);
        }
    }
}

impl StoragePort for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let map = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))?;
        Ok(map.get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "memory store configured to fail saves".into(),
            ));
        }
        let mut map = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))?;
        map.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_round_trips() {
        let storage = MemoryStorage::new();
        storage.save("records/u-1", b"payload").unwrap();
        assert_eq!(storage.load("records/u-1").unwrap().unwrap(), b"payload");
    }

    #[test]
    fn missing_key_loads_none() {
        let storage = MemoryStorage::new();
        assert!(storage.load("records/nobody").unwrap().is_none());
    }

    #[test]
    fn save_replaces_previous_value() {
        let storage = MemoryStorage::new();
        storage.save("k", b"v1").unwrap();
        storage.save("k", b"v2").unwrap();
        assert_eq!(storage.load("k").unwrap().unwrap(), b"v2");
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn failure_toggle_rejects_saves() {
        let storage = MemoryStorage::new();
        storage.set_fail_saves(true);
        assert!(storage.save("k", b"v").is_err());
        storage.set_fail_saves(false);
        assert!(storage.save("k", b"v").is_ok());
    }
}
