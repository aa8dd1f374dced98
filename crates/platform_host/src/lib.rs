//! Typed host-domain contracts shared by the application runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the key/value storage
//! contract with its write-value and sync-batch models, the startup [`ConfigSnapshot`], and the
//! offline-cache registration contract. Concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod offline;
pub mod storage;

pub use config::{ConfigSnapshot, USER_ID_KEY};
pub use offline::{
    MemoryOfflineCacheRegistrar, NoopOfflineCacheRegistrar, OfflineCacheFuture,
    OfflineCacheRegistrar,
};
pub use storage::{
    BatchDecodeError, KeyValueStore, MemoryKeyValueStore, NoopKeyValueStore, StorageError,
    StorageValue, SyncBatch,
};
