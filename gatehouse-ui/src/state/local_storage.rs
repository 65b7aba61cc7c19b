//! `localStorage` backend
//!
//! The browser's storage area as a [`KeyValueStore`]. Values live under the
//! same keys the native backends use, so the library's layout is what ends up
//! in the browser's dev tools.

use gatehouse::{KeyValueStore, StorageError, StorageResult};
use wasm_bindgen::JsValue;

pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// The window's `localStorage`. Fails when there is no window or storage
    /// is disabled (private mode, blocked cookies).
    pub fn open() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;

        Ok(Self { storage })
    }
}

fn js_error(err: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{:?}", err))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        // Quota errors surface here
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.storage.remove_item(key).map_err(js_error)
    }

    fn backend(&self) -> &'static str {
        "localStorage"
    }
}
