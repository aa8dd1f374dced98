//! Offline-cache registration contracts and lightweight adapters.

use std::{cell::Cell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`OfflineCacheRegistrar`].
pub type OfflineCacheFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service that installs the offline caching worker.
///
/// Registration has no data dependency on storage or the application host.
pub trait OfflineCacheRegistrar {
    /// Registers the offline cache. Unsupported environments resolve successfully.
    fn register(&self) -> OfflineCacheFuture<'_, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op registrar for unsupported targets.
pub struct NoopOfflineCacheRegistrar;

impl OfflineCacheRegistrar for NoopOfflineCacheRegistrar {
    fn register(&self) -> OfflineCacheFuture<'_, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Registrar that records how many times registration ran. Clones share the counter.
pub struct MemoryOfflineCacheRegistrar {
    calls: Rc<Cell<usize>>,
}

impl MemoryOfflineCacheRegistrar {
    /// Number of completed `register` calls.
    pub fn registrations(&self) -> usize {
        self.calls.get()
    }
}

impl OfflineCacheRegistrar for MemoryOfflineCacheRegistrar {
    fn register(&self) -> OfflineCacheFuture<'_, Result<(), String>> {
        Box::pin(async move {
            self.calls.set(self.calls.get() + 1);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_registrar_counts_calls_across_clones() {
        let registrar = MemoryOfflineCacheRegistrar::default();
        let observer = registrar.clone();
        let registrar_obj: &dyn OfflineCacheRegistrar = &registrar;

        block_on(registrar_obj.register()).expect("register");
        block_on(registrar_obj.register()).expect("register again");
        assert_eq!(observer.registrations(), 2);
    }

    #[test]
    fn noop_registrar_succeeds() {
        block_on(NoopOfflineCacheRegistrar.register()).expect("register");
    }
}
