//! Browser `localStorage` backend for persisted table state.

use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gridline_core::{KeyValueStore, StorageError};
use wasm_bindgen::JsValue;

/// [`KeyValueStore`] over the page's `localStorage`; values are stored as raw strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|err| backend_error("get", key, &err))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| backend_error("set", key, &err))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|err| backend_error("remove", key, &err))
    }
}

fn backend_error(operation: &'static str, key: &str, err: &JsValue) -> StorageError {
    let detail = format!("{err:?}");
    console::error!("storage operation failed", operation, key, detail.clone());
    StorageError::Backend {
        operation,
        key: key.to_string(),
        detail,
    }
}
