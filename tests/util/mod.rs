// Each integration test file compiles separately and none of them uses every
// helper here, so the unused ones would warn.
#![allow(dead_code)]

use std::cell::Cell;
use std::path::PathBuf;

use persistent_cell::{MemoryStorage, Storage, StorageError};

/// In-memory store whose individual operations can be switched to fail, for
/// exercising quota-exhausted and disabled-storage behavior.
pub struct FlakyStorage {
    inner: MemoryStorage,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
    pub fail_removes: Cell<bool>,
}

impl FlakyStorage {
    pub fn new() -> Self {
        FlakyStorage {
            inner: MemoryStorage::new(),
            fail_reads: Cell::new(false),
            fail_writes: Cell::new(false),
            fail_removes: Cell::new(false),
        }
    }
}

impl Storage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Read("storage disabled".into()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Write("quota exceeded".into()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_removes.get() {
            return Err(StorageError::Remove("storage disabled".into()));
        }
        self.inner.remove(key)
    }
}

/// A scratch file path unique to this process and `name`. Tests clean up
/// their own files.
pub fn temp_store(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "persistent-cell-{}-{}.json",
        std::process::id(),
        name
    ))
}
