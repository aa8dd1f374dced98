use platform_host::{
    KeyValueStore, MemoryKeyValueStore, NoopOfflineCacheRegistrar, OfflineCacheFuture,
    OfflineCacheRegistrar, StorageError, StorageValue,
};

use crate::{ServiceWorkerConfig, WebLocalStore, WebServiceWorkerRegistrar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time selected host strategy for `platform_host_web` adapters.
pub enum HostStrategy {
    /// Browser-backed adapters (`localStorage`, `navigator.serviceWorker`).
    Browser,
    /// In-memory storage and no offline registration, for headless runs and automation.
    Headless,
}

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "headless-host")]
    {
        HostStrategy::Headless
    }

    #[cfg(not(feature = "headless-host"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    match selected_host_strategy() {
        HostStrategy::Browser => "browser",
        HostStrategy::Headless => "headless",
    }
}

/// Adapter enum that erases the concrete key/value backend behind [`KeyValueStore`].
#[derive(Debug, Clone)]
pub enum KeyValueStoreAdapter {
    /// Browser `localStorage`.
    Browser(WebLocalStore),
    /// Process-local map that disappears on reload.
    Headless(MemoryKeyValueStore),
}

impl KeyValueStore for KeyValueStoreAdapter {
    fn read(&self, key: &str) -> Option<String> {
        match self {
            Self::Browser(store) => store.read(key),
            Self::Headless(store) => store.read(key),
        }
    }

    fn write(&self, key: &str, value: &StorageValue) -> Result<(), StorageError> {
        match self {
            Self::Browser(store) => store.write(key, value),
            Self::Headless(store) => store.write(key, value),
        }
    }
}

/// Adapter enum that erases the concrete registration backend behind [`OfflineCacheRegistrar`].
#[derive(Debug, Clone)]
pub enum OfflineCacheRegistrarAdapter {
    /// Service worker registration.
    Browser(WebServiceWorkerRegistrar),
    /// Registration skipped.
    Headless(NoopOfflineCacheRegistrar),
}

impl OfflineCacheRegistrar for OfflineCacheRegistrarAdapter {
    fn register(&self) -> OfflineCacheFuture<'_, Result<(), String>> {
        match self {
            Self::Browser(registrar) => registrar.register(),
            Self::Headless(registrar) => registrar.register(),
        }
    }
}

/// Builds the key/value store adapter for the compile-time selected host strategy.
pub fn key_value_store() -> KeyValueStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => KeyValueStoreAdapter::Browser(WebLocalStore),
        HostStrategy::Headless => KeyValueStoreAdapter::Headless(MemoryKeyValueStore::default()),
    }
}

/// Builds the offline-cache registrar for the compile-time selected host strategy.
pub fn offline_cache_registrar(config: ServiceWorkerConfig) -> OfflineCacheRegistrarAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => {
            OfflineCacheRegistrarAdapter::Browser(WebServiceWorkerRegistrar::new(config))
        }
        HostStrategy::Headless => OfflineCacheRegistrarAdapter::Headless(NoopOfflineCacheRegistrar),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn strategy_name_matches_selected_strategy() {
        let expected = if cfg!(feature = "headless-host") {
            "headless"
        } else {
            "browser"
        };
        assert_eq!(host_strategy_name(), expected);
    }

    #[test]
    fn headless_adapter_keeps_writes_in_memory() {
        let store = KeyValueStoreAdapter::Headless(MemoryKeyValueStore::default());
        store.write("userId", &StorageValue::set("42")).expect("write");
        assert_eq!(store.read("userId"), Some("42".to_string()));
        store.write("userId", &StorageValue::Delete).expect("delete");
        assert_eq!(store.read("userId"), None);
    }

    #[test]
    fn factories_build_usable_adapters() {
        let store = key_value_store();
        store.write("k", &StorageValue::set("v")).expect("write");
        let registrar = offline_cache_registrar(ServiceWorkerConfig {
            enabled: false,
            ..ServiceWorkerConfig::default()
        });
        block_on(registrar.register()).expect("register");
    }
}
