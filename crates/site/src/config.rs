//! Build-time site configuration.

use app_runtime::{BootOptions, MountTarget};
use platform_host_web::ServiceWorkerConfig;

/// Build environment variable holding the API base URL.
pub const API_URL_ENV: &str = "APP_API_URL";
/// Build environment variable overriding the service worker script URL.
pub const SERVICE_WORKER_URL_ENV: &str = "APP_SERVICE_WORKER_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Values resolved when the site is compiled.
pub struct SiteConfig {
    /// API base URL handed to the application, absent when unset at build time.
    pub api_url: Option<String>,
    /// Element the application mounts into.
    pub mount: MountTarget,
    /// Offline cache registration settings.
    pub service_worker: ServiceWorkerConfig,
}

impl SiteConfig {
    /// Reads [`API_URL_ENV`] and [`SERVICE_WORKER_URL_ENV`] as captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("APP_API_URL"), option_env!("APP_SERVICE_WORKER_URL"))
    }

    fn from_values(api_url: Option<&str>, service_worker_url: Option<&str>) -> Self {
        let mut service_worker = ServiceWorkerConfig::default();
        if let Some(url) = service_worker_url.filter(|url| !url.is_empty()) {
            service_worker.script_url = url.to_string();
        }
        Self {
            api_url: api_url.map(str::to_string),
            mount: MountTarget::default(),
            service_worker,
        }
    }

    /// Boot options derived from this configuration.
    pub fn boot_options(&self) -> BootOptions {
        BootOptions {
            mount: self.mount.clone(),
            api_url: self.api_url.clone(),
        }
    }
}
