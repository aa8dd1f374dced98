//! Storage synchronization bridge: applies outbound sync batches to the key/value store.

use std::rc::Rc;

use leptos::logging;
use platform_host::{KeyValueStore, SyncBatch};

use crate::port::{SyncPort, Subscription};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Outcome counts for one applied batch.
pub struct SyncReport {
    /// Entries stored with a concrete value.
    pub written: usize,
    /// Entries removed through the delete marker.
    pub removed: usize,
    /// Entries the store rejected. These are logged and dropped.
    pub failed: usize,
}

#[derive(Clone)]
/// Translates [`SyncBatch`] messages into [`KeyValueStore`] writes.
///
/// The bridge does no batching, retrying or acknowledgement of its own.
pub struct SyncBridge {
    store: Rc<dyn KeyValueStore>,
}

impl SyncBridge {
    /// Creates a bridge writing into `store`.
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Applies every entry of `batch` independently.
    ///
    /// Keys are unique within a batch, so the resulting store state does not depend on the
    /// order entries are visited in.
    pub fn apply(&self, batch: &SyncBatch) -> SyncReport {
        let mut report = SyncReport::default();
        for (key, value) in batch {
            match self.store.write(key, value) {
                Ok(()) if value.is_delete() => report.removed += 1,
                Ok(()) => report.written += 1,
                Err(err) => {
                    report.failed += 1;
                    logging::warn!("storage sync dropped `{key}`: {err}");
                }
            }
        }
        report
    }

    /// Subscribes the bridge to `port`; persistence stops when the subscription is dropped.
    pub fn attach(self, port: &SyncPort) -> Subscription {
        port.subscribe(move |batch| {
            let report = self.apply(batch);
            if report.failed > 0 {
                logging::debug_warn!(
                    "storage sync batch: {} written, {} removed, {} failed",
                    report.written,
                    report.removed,
                    report.failed
                );
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use platform_host::{MemoryKeyValueStore, StorageError, StorageValue};
    use pretty_assertions::assert_eq;

    use super::*;

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn read(&self, _key: &str) -> Option<String> {
            None
        }

        fn write(&self, key: &str, _value: &StorageValue) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed {
                key: key.to_string(),
                message: "QuotaExceededError".to_string(),
            })
        }
    }

    fn bridge_over(store: &MemoryKeyValueStore) -> SyncBridge {
        SyncBridge::new(Rc::new(store.clone()))
    }

    #[test]
    fn batch_entries_each_end_with_their_batch_value() {
        let store = MemoryKeyValueStore::with_entries([("a", "old"), ("b", "old")]);
        let bridge = bridge_over(&store);

        let report = bridge.apply(&SyncBatch::new().set("a", "1").delete("b").set("c", ""));

        assert_eq!(
            report,
            SyncReport {
                written: 2,
                removed: 1,
                failed: 0,
            }
        );
        assert_eq!(store.read("a"), Some("1".to_string()));
        assert_eq!(store.read("b"), None);
        assert_eq!(store.read("c"), Some(String::new()));
    }

    #[test]
    fn reapplying_a_batch_is_idempotent() {
        let store = MemoryKeyValueStore::default();
        let bridge = bridge_over(&store);
        let batch = SyncBatch::new().set("userId", "42").delete("token");

        bridge.apply(&batch);
        let after_once = store.keys();
        bridge.apply(&batch);

        assert_eq!(store.keys(), after_once);
        assert_eq!(store.read("userId"), Some("42".to_string()));
    }

    #[test]
    fn failed_writes_are_counted_and_swallowed() {
        let bridge = SyncBridge::new(Rc::new(ReadOnlyStore));
        let report = bridge.apply(&SyncBatch::new().set("a", "1").delete("b"));
        assert_eq!(report.failed, 2);
        assert_eq!(report.written + report.removed, 0);
    }

    #[test]
    fn attached_bridge_keeps_running_after_rejected_batches() {
        let port = SyncPort::new();
        let _subscription = SyncBridge::new(Rc::new(ReadOnlyStore)).attach(&port);

        port.send(SyncBatch::new().set("a", "1"));
        port.send(SyncBatch::new().delete("b"));

        assert_eq!(port.subscriber_count(), 1);
        assert_eq!(port.pending_count(), 0);
    }

    #[test]
    fn attached_bridge_persists_until_unsubscribed() {
        let store = MemoryKeyValueStore::default();
        let port = SyncPort::new();
        let subscription = bridge_over(&store).attach(&port);

        port.send(SyncBatch::new().set("userId", "42"));
        assert_eq!(store.read("userId"), Some("42".to_string()));

        subscription.unsubscribe();
        port.send(SyncBatch::new().delete("userId"));
        assert_eq!(store.read("userId"), Some("42".to_string()));
    }
}
