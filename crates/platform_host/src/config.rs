//! Startup configuration snapshot handed to the application host.

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

/// Storage key holding the current user identifier.
pub const USER_ID_KEY: &str = "userId";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Immutable configuration passed once to the application host at construction.
///
/// Serializes as `{"apiUrl": .., "userId": ..}` with `null` for absent fields.
pub struct ConfigSnapshot {
    api_url: Option<String>,
    user_id: Option<String>,
}

impl ConfigSnapshot {
    /// Builds a snapshot from already-resolved values.
    pub fn new(api_url: Option<String>, user_id: Option<String>) -> Self {
        Self { api_url, user_id }
    }

    /// Resolves the snapshot at startup by reading [`USER_ID_KEY`] once from `store`.
    ///
    /// A missing or empty stored identifier yields `None`; no placeholder is substituted.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, api_url: Option<String>) -> Self {
        let user_id = store.read(USER_ID_KEY).filter(|value| !value.is_empty());
        Self { api_url, user_id }
    }

    /// API base URL resolved from the build environment.
    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    /// Current user identifier read from storage at startup.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::storage::{MemoryKeyValueStore, NoopKeyValueStore};

    #[test]
    fn never_written_user_id_is_absent() {
        let store = MemoryKeyValueStore::default();
        let config = ConfigSnapshot::load(&store, Some("https://api.example.com".to_string()));
        assert_eq!(config.user_id(), None);
        assert_eq!(config.api_url(), Some("https://api.example.com"));
    }

    #[test]
    fn stored_user_id_is_passed_through() {
        let store = MemoryKeyValueStore::with_entries([(USER_ID_KEY, "42")]);
        let config = ConfigSnapshot::load(&store, None);
        assert_eq!(config.user_id(), Some("42"));
        assert_eq!(config.api_url(), None);
    }

    #[test]
    fn empty_stored_user_id_reads_as_absent() {
        let store = MemoryKeyValueStore::with_entries([(USER_ID_KEY, "")]);
        assert_eq!(ConfigSnapshot::load(&store, None).user_id(), None);
    }

    #[test]
    fn unavailable_store_degrades_to_absent() {
        let config = ConfigSnapshot::load(&NoopKeyValueStore, None);
        assert_eq!(config, ConfigSnapshot::default());
    }

    #[test]
    fn serializes_with_camel_case_and_nulls() {
        let config = ConfigSnapshot::new(Some("https://api.example.com".to_string()), None);
        assert_eq!(
            serde_json::to_value(&config).expect("serialize"),
            json!({"apiUrl": "https://api.example.com", "userId": null})
        );
    }
}
