//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer for key/value storage
//! (`localStorage`) and offline-cache registration (`navigator.serviceWorker`). On non-wasm
//! targets every adapter is an inert, successful fallback so host-side tests can link it.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
mod bridge;
pub mod offline;
pub mod storage;

pub use adapters::{
    host_strategy_name, key_value_store, offline_cache_registrar, selected_host_strategy,
    HostStrategy, KeyValueStoreAdapter, OfflineCacheRegistrarAdapter,
};
#[cfg(target_arch = "wasm32")]
pub use bridge::js_batch_to_json;
pub use offline::{ServiceWorkerConfig, WebServiceWorkerRegistrar, DEFAULT_SERVICE_WORKER_URL};
pub use storage::local_store::WebLocalStore;
