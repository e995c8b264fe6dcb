use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::StorageError;

/// The key-value store a [`PersistentCell`](crate::PersistentCell) writes
/// through to.
///
/// The contract mirrors the browser's `localStorage`: string keys, string
/// values, and every operation may fail (storage disabled, quota exhausted,
/// I/O errors). Implementations use interior mutability so that one store
/// handle can be shared between several cells via `Rc`.
pub trait Storage {
    /// Returns the stored string for `key`, or `None` if there is no entry.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the entry under `key`. Removing a missing key is not an
    /// error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Non-persisting store backed by a `HashMap`. Useful for ephemeral state
/// and as a test double; its operations cannot fail.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.into(), value.into());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Store keeping all entries in a single JSON object file.
///
/// Every operation reads or rewrites the whole file, which is fine for the
/// handful of keys UI code persists, not for bulk data. Concurrent writers
/// on one file are not coordinated.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates a store over the JSON file at `path`. The file is created on
    /// the first write; parent directories are not.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    fn read_entries(&self) -> Result<HashMap<String, String>, String> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| e.to_string())?;
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), String> {
        let data = serde_json::to_string(entries).map_err(|e| e.to_string())?;
        fs::write(&self.path, data).map_err(|e| e.to_string())
    }
}

// Faults are reported under the class of the operation the caller asked
// for, matching the browser-backed stores.
impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries().map_err(StorageError::Read)?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries().map_err(StorageError::Write)?;
        entries.insert(key.into(), value.into());
        self.write_entries(&entries).map_err(StorageError::Write)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries().map_err(StorageError::Remove)?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries).map_err(StorageError::Remove)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_contract() {
        let storage = MemoryStorage::new();

        // Missing keys read as None.
        assert_eq!(storage.get("missing").unwrap(), None);

        // Set, overwrite, read back.
        storage.set("k", "1").unwrap();
        storage.set("k", "2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("2"));

        // Remove is idempotent.
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
