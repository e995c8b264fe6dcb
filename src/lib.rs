//! State cells with write-through persistence.
//!
//! A [`PersistentCell`] seeds an in-memory [`ObservableCell`] from a
//! key-value [`Storage`] backend, persists every new value as JSON, and
//! keeps working in memory (with a logged warning) when the backend fails.
//! Ships with [`MemoryStorage`], [`FileStorage`] and, behind the `wasm`
//! feature, the browser's local/session storage.
//!
//! ```
//! use std::rc::Rc;
//! use persistent_cell::{MemoryStorage, PersistentCell};
//!
//! let storage = Rc::new(MemoryStorage::new());
//! let counter = PersistentCell::new(storage.clone(), "counter", 0u32);
//! counter.update(|n| *n += 1);
//! assert_eq!(counter.get(), 1);
//!
//! // A later cell on the same store picks the persisted value up.
//! let restored = PersistentCell::new(storage, "counter", 0u32);
//! assert_eq!(restored.get(), 1);
//! ```

mod cell;
mod error;
mod storage;
#[cfg(feature = "wasm")]
pub mod wasm;

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use cell::{ObservableCell, Subscription};
pub use error::StorageError;
pub use storage::{FileStorage, MemoryStorage, Storage};

/// A value cell that persists its contents under a fixed key.
///
/// Construction reads the store once to seed the cell; [`set`](Self::set)
/// and [`update`](Self::update) write through; [`clear`](Self::clear)
/// removes the stored entry. A store or codec failure never surfaces to the
/// caller: the affected operation degrades to in-memory-only behavior and
/// the fault is logged at `warn`.
pub struct PersistentCell<T: 'static> {
    key: String,
    storage: Rc<dyn Storage>,
    cell: ObservableCell<T>,
}

impl<T: 'static> PersistentCell<T> {
    /// Creates a cell addressing `key` in `storage`.
    ///
    /// The seed is the stored entry if one exists and decodes as `T`,
    /// otherwise `initial`. Construction itself cannot fail; an unreadable
    /// or undecodable entry falls back to `initial` with a warning.
    pub fn new(storage: Rc<dyn Storage>, key: &str, initial: T) -> Self
    where
        T: DeserializeOwned,
    {
        let seed = match Self::load(storage.as_ref(), key) {
            Ok(Some(value)) => value,
            Ok(None) => initial,
            Err(err) => {
                log::warn!("Failed to load {}: {}", key, err);
                initial
            }
        };

        PersistentCell {
            key: key.to_owned(),
            storage,
            cell: ObservableCell::new(seed),
        }
    }

    fn load(storage: &dyn Storage, key: &str) -> Result<Option<T>, StorageError>
    where
        T: DeserializeOwned,
    {
        match storage.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StorageError::Decode(e.to_string())),
            None => Ok(None),
        }
    }

    /// The store key this cell addresses.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns a clone of the current in-memory value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.cell.get()
    }

    /// Runs `f` over the current in-memory value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.cell.with(f)
    }

    /// A handle to the underlying observable cell, for binding UI to it.
    ///
    /// Writes through the handle stay in memory; only `set`/`update` on the
    /// `PersistentCell` itself reach the store.
    pub fn cell(&self) -> ObservableCell<T> {
        self.cell.clone()
    }

    /// Registers `notify` for every value change. See
    /// [`ObservableCell::subscribe`].
    pub fn subscribe(&self, notify: impl Fn(&T) + 'static) -> Subscription {
        self.cell.subscribe(notify)
    }

    /// Replaces the value and persists it.
    ///
    /// The in-memory update (and subscriber notification) is unconditional;
    /// if encoding or the store write fails, the new value simply stays
    /// unpersisted and the fault is logged.
    pub fn set(&self, value: T)
    where
        T: Serialize,
    {
        self.cell.set(value);
        self.persist_current();
    }

    /// Mutates the value in place, then persists the result.
    ///
    /// `f` sees the value as of this call, so updates relative to the
    /// previous state compose correctly.
    pub fn update(&self, f: impl FnOnce(&mut T))
    where
        T: Serialize,
    {
        self.cell.update(f);
        self.persist_current();
    }

    /// Removes the persisted entry for this cell's key.
    ///
    /// The in-memory value is deliberately left as it is: only the stored
    /// copy goes away. A cell constructed later on this key sees its
    /// initial value again, while this one keeps the current value until
    /// the next `set`.
    pub fn clear(&self) {
        if let Err(err) = self.storage.remove(&self.key) {
            log::warn!("Failed to clear {}: {}", self.key, err);
        }
    }

    fn persist_current(&self)
    where
        T: Serialize,
    {
        if let Err(err) = self.with(|value| self.store(value)) {
            log::warn!("Failed to persist {}: {}", self.key, err);
        }
    }

    fn store(&self, value: &T) -> Result<(), StorageError>
    where
        T: Serialize,
    {
        let raw =
            serde_json::to_string(value).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.storage.set(&self.key, &raw)
    }
}
