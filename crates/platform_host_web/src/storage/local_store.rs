//! `localStorage`-backed key/value store implementation.
//!
//! The browser API is synchronous, matching [`platform_host::KeyValueStore`]. Reads swallow every
//! failure (disabled storage, privacy mode, missing window) and report the key as absent.

use platform_host::{KeyValueStore, StorageError, StorageValue};

#[derive(Debug, Clone, Copy, Default)]
/// Browser key/value store backed by `window.localStorage`.
pub struct WebLocalStore;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl WebLocalStore {
    /// Returns `true` when `localStorage` can be reached from this context.
    pub fn is_available(self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage().is_some()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    fn get_item(self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|err| StorageError::WriteFailed {
                    key: key.to_string(),
                    message: crate::bridge::js_error_message(&err),
                })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    fn remove_item(self, key: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage().ok_or(StorageError::Unavailable)?;
            storage
                .remove_item(key)
                .map_err(|err| StorageError::RemoveFailed {
                    key: key.to_string(),
                    message: crate::bridge::js_error_message(&err),
                })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

impl KeyValueStore for WebLocalStore {
    fn read(&self, key: &str) -> Option<String> {
        self.get_item(key)
    }

    fn write(&self, key: &str, value: &StorageValue) -> Result<(), StorageError> {
        match value {
            StorageValue::Set(value) => self.set_item(key, value),
            StorageValue::Delete => self.remove_item(key),
        }
    }
}
