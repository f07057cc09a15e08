#![forbid(unsafe_code)]

//! `localStorage`-backed preference store.

use folio_core::preference::{PreferenceStore, StorageError, StorageResult};
use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

pub(crate) fn js_error_string(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::JSON::stringify(err)
                .ok()
                .and_then(|s| s.as_string())
        })
        .unwrap_or_else(|| "unknown JS error".to_string())
}

pub(crate) struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the window's `localStorage`. Fails when storage is disabled
    /// (privacy modes, sandboxed frames).
    pub(crate) fn open(window: &Window) -> StorageResult<Self> {
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StorageError::Unavailable("localStorage missing".into())),
            Err(err) => Err(StorageError::Unavailable(js_error_string(&err))),
        }
    }
}

impl PreferenceStore for LocalStorage {
    fn name(&self) -> &str {
        "localStorage"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|err| StorageError::Rejected(js_error_string(&err)))
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::Rejected(js_error_string(&err)))
    }
}
