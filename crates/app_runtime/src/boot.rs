//! Startup sequence: seed config from storage, construct the host, bridge its port to storage,
//! then register the offline cache.

use std::rc::Rc;

use leptos::logging;
use platform_host::{ConfigSnapshot, KeyValueStore, OfflineCacheRegistrar};

use crate::{
    host::{ApplicationHost, MountTarget},
    port::{Subscription, SyncPort},
    sync_bridge::SyncBridge,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Values resolved before boot runs.
pub struct BootOptions {
    /// Where the application mounts.
    pub mount: MountTarget,
    /// API base URL from the build environment.
    pub api_url: Option<String>,
}

/// Live result of [`boot`]. Dropping it, or calling [`BootHandle::shutdown`], stops persistence.
pub struct BootHandle {
    config: ConfigSnapshot,
    port: SyncPort,
    subscription: Subscription,
}

impl BootHandle {
    /// The snapshot the host was constructed with.
    pub fn config(&self) -> &ConfigSnapshot {
        &self.config
    }

    /// The host's outbound sync port.
    pub fn port(&self) -> &SyncPort {
        &self.port
    }

    /// Releases the storage bridge subscription.
    pub fn shutdown(self) {
        self.subscription.unsubscribe();
    }

    /// Keeps the storage bridge attached for the rest of the process and returns the port.
    pub fn detach(self) -> SyncPort {
        self.subscription.detach();
        self.port
    }
}

/// Boots the application against `store` and `registrar`.
///
/// `store` is read exactly once, for the user id, before the host is constructed. Offline cache
/// registration runs last and its failure is only logged.
pub fn boot<H, S, R>(host: &H, store: S, registrar: R, options: BootOptions) -> BootHandle
where
    H: ApplicationHost + ?Sized,
    S: KeyValueStore + 'static,
    R: OfflineCacheRegistrar + 'static,
{
    let store: Rc<dyn KeyValueStore> = Rc::new(store);
    let config = ConfigSnapshot::load(store.as_ref(), options.api_url);
    let port = host.init(&options.mount, config.clone());
    let subscription = SyncBridge::new(store).attach(&port);
    spawn_registration(registrar);

    BootHandle {
        config,
        port,
        subscription,
    }
}

fn spawn_registration<R: OfflineCacheRegistrar + 'static>(registrar: R) {
    let task = async move {
        if let Err(err) = registrar.register().await {
            logging::warn!("offline cache registration failed: {err}");
        }
    };

    #[cfg(target_arch = "wasm32")]
    {
        leptos::spawn_local(task);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        futures::executor::block_on(task);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use platform_host::{
        MemoryKeyValueStore, MemoryOfflineCacheRegistrar, OfflineCacheFuture, SyncBatch,
        USER_ID_KEY,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    struct FailingRegistrar;

    impl OfflineCacheRegistrar for FailingRegistrar {
        fn register(&self) -> OfflineCacheFuture<'_, Result<(), String>> {
            Box::pin(async { Err("SecurityError".to_string()) })
        }
    }

    fn recording_host() -> (
        Rc<RefCell<Vec<(String, ConfigSnapshot)>>>,
        impl Fn(&MountTarget, ConfigSnapshot) -> SyncPort,
    ) {
        let inits = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&inits);
        let host = move |target: &MountTarget, config: ConfigSnapshot| {
            sink.borrow_mut().push((target.id().to_string(), config));
            SyncPort::new()
        };
        (inits, host)
    }

    fn options() -> BootOptions {
        BootOptions {
            mount: MountTarget::default(),
            api_url: Some("https://api.example.com".to_string()),
        }
    }

    #[test]
    fn empty_store_scenario_round_trips_user_id() {
        let store = MemoryKeyValueStore::default();
        let registrar = MemoryOfflineCacheRegistrar::default();
        let (inits, host) = recording_host();

        let handle = boot(&host, store.clone(), registrar.clone(), options());

        assert_eq!(
            *inits.borrow(),
            vec![(
                "root".to_string(),
                ConfigSnapshot::new(Some("https://api.example.com".to_string()), None)
            )]
        );
        assert_eq!(handle.config().user_id(), None);

        handle.port().send(SyncBatch::new().set(USER_ID_KEY, "42"));
        assert_eq!(store.read(USER_ID_KEY), Some("42".to_string()));

        handle.port().send(SyncBatch::new().delete(USER_ID_KEY));
        assert_eq!(store.read(USER_ID_KEY), None);

        assert_eq!(registrar.registrations(), 1);
    }

    #[test]
    fn stored_user_id_seeds_the_snapshot() {
        let store = MemoryKeyValueStore::with_entries([(USER_ID_KEY, "7")]);
        let (inits, host) = recording_host();

        let handle = boot(
            &host,
            store,
            MemoryOfflineCacheRegistrar::default(),
            BootOptions::default(),
        );

        assert_eq!(handle.config().user_id(), Some("7"));
        assert_eq!(handle.config().api_url(), None);
        assert_eq!(inits.borrow().len(), 1);
    }

    #[test]
    fn shutdown_detaches_the_storage_bridge() {
        let store = MemoryKeyValueStore::default();
        let (_inits, host) = recording_host();
        let handle = boot(
            &host,
            store.clone(),
            MemoryOfflineCacheRegistrar::default(),
            options(),
        );
        let port = handle.port().clone();

        handle.shutdown();
        port.send(SyncBatch::new().set("userId", "42"));

        assert!(store.is_empty());
        assert_eq!(port.subscriber_count(), 0);
    }

    #[test]
    fn detached_boot_keeps_persisting() {
        let store = MemoryKeyValueStore::default();
        let (_inits, host) = recording_host();
        let port = boot(
            &host,
            store.clone(),
            MemoryOfflineCacheRegistrar::default(),
            options(),
        )
        .detach();

        port.send(SyncBatch::new().set("theme", "dark"));
        assert_eq!(store.read("theme"), Some("dark".to_string()));
    }

    #[test]
    fn batches_sent_while_the_host_initializes_are_persisted() {
        let store = MemoryKeyValueStore::default();
        let host = |_target: &MountTarget, _config: ConfigSnapshot| {
            let port = SyncPort::new();
            port.send(SyncBatch::new().set(USER_ID_KEY, "42"));
            port
        };

        let handle = boot(
            &host,
            store.clone(),
            MemoryOfflineCacheRegistrar::default(),
            options(),
        );

        assert_eq!(store.read(USER_ID_KEY), Some("42".to_string()));
        assert_eq!(handle.port().pending_count(), 0);
    }

    #[test]
    fn registration_failure_does_not_affect_boot() {
        let store = MemoryKeyValueStore::default();
        let (_inits, host) = recording_host();
        let handle = boot(&host, store.clone(), FailingRegistrar, options());

        handle.port().send(SyncBatch::new().set("userId", "1"));
        assert_eq!(store.read("userId"), Some("1".to_string()));
    }
}
