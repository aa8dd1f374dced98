//! Service-worker backed offline cache registration.

use platform_host::{OfflineCacheFuture, OfflineCacheRegistrar};

/// Default service worker script path, relative to the site root.
pub const DEFAULT_SERVICE_WORKER_URL: &str = "/service-worker.js";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where the service worker script lives and whether registration should run at all.
pub struct ServiceWorkerConfig {
    /// Script URL passed to `navigator.serviceWorker.register`.
    pub script_url: String,
    /// Optional registration scope; the browser default applies when `None`.
    pub scope: Option<String>,
    /// Registration is skipped entirely when `false`.
    pub enabled: bool,
}

impl Default for ServiceWorkerConfig {
    /// Registers [`DEFAULT_SERVICE_WORKER_URL`] in release builds only, so development builds
    /// never serve stale cached assets.
    fn default() -> Self {
        Self {
            script_url: DEFAULT_SERVICE_WORKER_URL.to_string(),
            scope: None,
            enabled: cfg!(not(debug_assertions)),
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Offline cache registrar backed by `navigator.serviceWorker`.
pub struct WebServiceWorkerRegistrar {
    config: ServiceWorkerConfig,
}

impl WebServiceWorkerRegistrar {
    /// Creates a registrar for `config`.
    pub fn new(config: ServiceWorkerConfig) -> Self {
        Self { config }
    }

    /// Removes the current registration. Resolves `Ok(true)` if one was removed.
    ///
    /// # Errors
    ///
    /// Returns an error when the browser rejects the lookup or unregistration.
    pub async fn unregister(&self) -> Result<bool, String> {
        crate::bridge::unregister_service_worker().await
    }
}

impl OfflineCacheRegistrar for WebServiceWorkerRegistrar {
    fn register(&self) -> OfflineCacheFuture<'_, Result<(), String>> {
        Box::pin(async move {
            if !self.config.enabled {
                return Ok(());
            }
            crate::bridge::register_service_worker(
                &self.config.script_url,
                self.config.scope.as_deref(),
            )
            .await
            .map(|_| ())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn default_config_targets_root_script() {
        let config = ServiceWorkerConfig::default();
        assert_eq!(config.script_url, DEFAULT_SERVICE_WORKER_URL);
        assert_eq!(config.scope, None);
        assert_eq!(config.enabled, cfg!(not(debug_assertions)));
    }

    #[test]
    fn disabled_registrar_resolves_without_touching_the_browser() {
        let registrar = WebServiceWorkerRegistrar::new(ServiceWorkerConfig {
            enabled: false,
            ..ServiceWorkerConfig::default()
        });
        block_on(registrar.register()).expect("register");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn enabled_registrar_non_wasm_is_a_successful_no_op() {
        let registrar = WebServiceWorkerRegistrar::new(ServiceWorkerConfig {
            script_url: "/sw.js".to_string(),
            scope: Some("/".to_string()),
            enabled: true,
        });
        let registrar_obj: &dyn OfflineCacheRegistrar = &registrar;
        block_on(registrar_obj.register()).expect("register");
        assert!(!block_on(registrar.unregister()).expect("unregister"));
    }
}
