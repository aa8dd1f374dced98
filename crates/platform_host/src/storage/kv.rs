//! Key/value storage contracts and in-memory adapters.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
/// Value half of a storage write: either a concrete string or an explicit delete marker.
///
/// An empty string is a concrete value. Only [`StorageValue::Delete`] removes a key.
pub enum StorageValue {
    /// Associates the key with this value, overwriting any previous one.
    Set(String),
    /// Removes the key. Removing an absent key is a no-op.
    Delete,
}

impl StorageValue {
    /// Builds a [`StorageValue::Set`] from anything string-like.
    pub fn set(value: impl Into<String>) -> Self {
        Self::Set(value.into())
    }

    /// Returns `true` for the delete marker.
    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete)
    }
}

impl From<Option<String>> for StorageValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Delete, Self::Set)
    }
}

impl From<StorageValue> for Option<String> {
    fn from(value: StorageValue) -> Self {
        match value {
            StorageValue::Set(value) => Some(value),
            StorageValue::Delete => None,
        }
    }
}

impl From<&str> for StorageValue {
    fn from(value: &str) -> Self {
        Self::Set(value.to_string())
    }
}

impl From<String> for StorageValue {
    fn from(value: String) -> Self {
        Self::Set(value)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Failures surfaced by [`KeyValueStore::write`].
pub enum StorageError {
    /// The backing store is disabled or missing in this context.
    #[error("storage unavailable")]
    Unavailable,
    /// Setting a value was rejected (quota, privacy mode, ...).
    #[error("storage write for `{key}` failed: {message}")]
    WriteFailed {
        /// Key being written.
        key: String,
        /// Backend-provided failure description.
        message: String,
    },
    /// Removing a key was rejected.
    #[error("storage remove for `{key}` failed: {message}")]
    RemoveFailed {
        /// Key being removed.
        key: String,
        /// Backend-provided failure description.
        message: String,
    },
}

/// Persistent string key/value store scoped to the current browsing context.
///
/// Implementations are synchronous at this boundary; browser `localStorage` is synchronous too.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    ///
    /// Never fails: an unavailable store reads as absent so startup configuration can proceed.
    fn read(&self, key: &str) -> Option<String>;

    /// Applies one write. [`StorageValue::Set`] overwrites, [`StorageValue::Delete`] removes.
    ///
    /// Applying the same write twice leaves the store in the same state as applying it once.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backing store rejects the mutation.
    fn write(&self, key: &str, value: &StorageValue) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &StorageValue) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Store that never holds anything; used for unsupported targets and baseline tests.
pub struct NoopKeyValueStore;

impl KeyValueStore for NoopKeyValueStore {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&self, _key: &str, _value: &StorageValue) -> Result<(), StorageError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory store keyed by string. Clones share the same backing map.
pub struct MemoryKeyValueStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    /// Creates a store pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            inner: Rc::new(RefCell::new(map)),
        }
    }

    /// Returns the stored keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = self.inner.borrow().keys().cloned().collect::<Vec<_>>();
        keys.sort();
        keys
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn read(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    fn write(&self, key: &str, value: &StorageValue) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        match value {
            StorageValue::Set(value) => {
                inner.insert(key.to_string(), value.clone());
            }
            StorageValue::Delete => {
                inner.remove(key);
            }
        }
        Ok(())
    }
}
