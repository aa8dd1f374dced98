pub mod config;
mod site_app;

pub use config::SiteConfig;
pub use site_app::SiteApp;

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
mod entry {
    use std::cell::RefCell;

    use app_runtime::{boot, LeptosAppHost, SyncPort};
    use platform_host_web::{host_strategy_name, key_value_store, offline_cache_registrar};
    use wasm_bindgen::prelude::*;

    use crate::{SiteApp, SiteConfig};

    thread_local! {
        static SITE_PORT: RefCell<Option<SyncPort>> = const { RefCell::new(None) };
    }

    pub fn mount() {
        console_error_panic_hook::set_once();

        let config = SiteConfig::from_build_env();
        let host = LeptosAppHost::new(|| leptos::view! { <SiteApp /> });
        let handle = boot(
            &host,
            key_value_store(),
            offline_cache_registrar(config.service_worker.clone()),
            config.boot_options(),
        );
        leptos::logging::log!("site mounted with {} host services", host_strategy_name());

        let port = handle.detach();
        SITE_PORT.with(|slot| *slot.borrow_mut() = Some(port));
    }

    /// Sends a `{key: value}` object from page scripts through the mounted app's sync port.
    /// Falsy values delete their key.
    #[wasm_bindgen(js_name = writeToLocalStorage)]
    pub fn write_to_local_storage(data: JsValue) -> Result<(), JsValue> {
        let value =
            platform_host_web::js_batch_to_json(data).map_err(|err| JsValue::from_str(&err))?;
        let port = SITE_PORT
            .with(|slot| slot.borrow().clone())
            .ok_or_else(|| JsValue::from_str("site is not mounted"))?;
        port.send_json(value)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }
}

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub use entry::{mount, write_to_local_storage};
