//! Storage-domain contracts: key/value store, write values, and sync batches.

pub mod batch;
pub mod kv;

pub use batch::{BatchDecodeError, SyncBatch};
pub use kv::{KeyValueStore, MemoryKeyValueStore, NoopKeyValueStore, StorageError, StorageValue};
