//! Sync batch model shared by application hosts and the storage bridge.

use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

use super::kv::StorageValue;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// One outbound persistence message: key to concrete value or delete marker.
///
/// Keys are unique within a batch. Iteration follows key order, which is not part of the
/// persistence contract; every key is applied independently.
pub struct SyncBatch {
    entries: BTreeMap<String, StorageValue>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Reasons a dynamic JSON message cannot be turned into a [`SyncBatch`].
pub enum BatchDecodeError {
    /// The message was not a JSON object.
    #[error("sync batch must be a JSON object, got {found}")]
    NotAnObject {
        /// JSON type name of the rejected message.
        found: &'static str,
    },
    /// An entry held a structured value that has no string form.
    #[error("sync batch entry `{key}` holds unsupported {found} value")]
    UnsupportedValue {
        /// Offending key.
        key: String,
        /// JSON type name of the rejected value.
        found: &'static str,
    },
}

impl SyncBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a concrete value for `key`.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, StorageValue::Set(value.into()));
        self
    }

    /// Adds or replaces a delete marker for `key`.
    #[must_use]
    pub fn delete(mut self, key: impl Into<String>) -> Self {
        self.insert(key, StorageValue::Delete);
        self
    }

    /// Inserts an entry, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: StorageValue) {
        self.entries.insert(key.into(), value);
    }

    /// Returns the entry for `key`.
    pub fn get(&self, key: &str) -> Option<&StorageValue> {
        self.entries.get(key)
    }

    /// Iterates entries.
    pub fn iter(&self) -> btree_map::Iter<'_, String, StorageValue> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the batch carries no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decodes a batch produced by a dynamically typed sender.
    ///
    /// Falsy values (`null`, `false`, `""`, `0`) become [`StorageValue::Delete`]. Other
    /// scalars are stored in their JavaScript string form (`true` -> `"true"`, `42` -> `"42"`).
    ///
    /// # Errors
    ///
    /// Returns [`BatchDecodeError`] when `value` is not an object or an entry holds an array or
    /// object.
    pub fn from_json(value: Value) -> Result<Self, BatchDecodeError> {
        let Value::Object(map) = value else {
            return Err(BatchDecodeError::NotAnObject {
                found: json_type_name(&value),
            });
        };

        let mut batch = Self::new();
        for (key, value) in map {
            let value = match value {
                Value::Null | Value::Bool(false) => StorageValue::Delete,
                Value::Bool(true) => StorageValue::set("true"),
                Value::String(text) if text.is_empty() => StorageValue::Delete,
                Value::String(text) => StorageValue::Set(text),
                Value::Number(number) => number_to_js_string(&number)
                    .map_or(StorageValue::Delete, StorageValue::Set),
                other @ (Value::Array(_) | Value::Object(_)) => {
                    return Err(BatchDecodeError::UnsupportedValue {
                        key,
                        found: json_type_name(&other),
                    });
                }
            };
            batch.insert(key, value);
        }
        Ok(batch)
    }
}

impl<'a> IntoIterator for &'a SyncBatch {
    type Item = (&'a String, &'a StorageValue);
    type IntoIter = btree_map::Iter<'a, String, StorageValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for SyncBatch {
    type Item = (String, StorageValue);
    type IntoIter = btree_map::IntoIter<String, StorageValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, StorageValue)> for SyncBatch {
    fn from_iter<I: IntoIterator<Item = (K, StorageValue)>>(iter: I) -> Self {
        let mut batch = Self::new();
        for (key, value) in iter {
            batch.insert(key, value);
        }
        batch
    }
}

/// `None` for zero, which is falsy.
fn number_to_js_string(number: &Number) -> Option<String> {
    if let Some(value) = number.as_i64() {
        return (value != 0).then(|| value.to_string());
    }
    if let Some(value) = number.as_u64() {
        return (value != 0).then(|| value.to_string());
    }
    let value = number.as_f64()?;
    if value == 0.0 {
        return None;
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return Some(value.to_string());
    }
    // Outside that range JavaScript switches to exponent notation with an explicit sign.
    let formatted = format!("{value:e}");
    Some(match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
