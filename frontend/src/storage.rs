//! Browser localStorage backend for the template store.
//!
//! The store logic itself lives in `common::store`; this module only adapts
//! `web_sys`'s Storage API to the `KeyValue` trait and hands out a
//! ready-to-use `TemplateStore`.

use common::store::{KeyValue, StoreError, TemplateStore};

pub struct LocalStorage;

impl LocalStorage {
    fn raw() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl KeyValue for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::raw().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::raw()
            .ok_or_else(|| StoreError::Write("localStorage is not available".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|err| StoreError::Write(format!("{:?}", err)))
    }
}

/// The page-scoped template store, backed by this browser profile.
pub fn store() -> TemplateStore<LocalStorage> {
    TemplateStore::new(LocalStorage)
}
