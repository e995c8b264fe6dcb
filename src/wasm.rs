//! Browser-backed stores, available with the `wasm` feature.

use wasm_bindgen::{JsCast, JsValue};

use crate::error::StorageError;
use crate::storage::Storage;

/// `window.localStorage` as a [`Storage`] backend.
///
/// The backing storage is resolved on every call: availability can change
/// (private browsing, storage disabled by policy) and holding on to a stale
/// handle would mask that.
#[derive(Debug, Default)]
pub struct LocalStorage;

/// `window.sessionStorage` as a [`Storage`] backend.
#[derive(Debug, Default)]
pub struct SessionStorage;

fn local_storage() -> Result<web_sys::Storage, String> {
    let window = web_sys::window().ok_or_else(|| "no window object".to_string())?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err("local storage is not available".to_string()),
        Err(err) => Err(describe(err)),
    }
}

fn session_storage() -> Result<web_sys::Storage, String> {
    let window = web_sys::window().ok_or_else(|| "no window object".to_string())?;
    match window.session_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err("session storage is not available".to_string()),
        Err(err) => Err(describe(err)),
    }
}

// Browsers report storage failures (quota, privacy mode) as DOMException values.
fn describe(err: JsValue) -> String {
    match err.dyn_into::<js_sys::Error>() {
        Ok(err) => String::from(err.message()),
        Err(other) => format!("{:?}", other),
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()
            .map_err(StorageError::Read)?
            .get_item(key)
            .map_err(|e| StorageError::Read(describe(e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()
            .map_err(StorageError::Write)?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(describe(e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        local_storage()
            .map_err(StorageError::Remove)?
            .remove_item(key)
            .map_err(|e| StorageError::Remove(describe(e)))
    }
}

impl Storage for SessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        session_storage()
            .map_err(StorageError::Read)?
            .get_item(key)
            .map_err(|e| StorageError::Read(describe(e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        session_storage()
            .map_err(StorageError::Write)?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(describe(e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        session_storage()
            .map_err(StorageError::Remove)?
            .remove_item(key)
            .map_err(|e| StorageError::Remove(describe(e)))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_local_storage_roundtrip() {
        let storage = LocalStorage;

        storage.set("persistent-cell-test", "\"x\"").unwrap();
        assert_eq!(
            storage.get("persistent-cell-test").unwrap().as_deref(),
            Some("\"x\"")
        );

        storage.remove("persistent-cell-test").unwrap();
        assert_eq!(storage.get("persistent-cell-test").unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn test_storages_are_distinct() {
        LocalStorage.set("persistent-cell-scope", "\"local\"").unwrap();
        assert_eq!(SessionStorage.get("persistent-cell-scope").unwrap(), None);
        LocalStorage.remove("persistent-cell-scope").unwrap();
    }
}
