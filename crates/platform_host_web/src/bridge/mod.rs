//! Browser capability bridge for `platform_host_web` service adapters.
//!
//! Calls route through `interop`, which selects the wasm implementation or an inert non-wasm
//! fallback so host-side tests exercise the same public surface.

mod interop;

#[cfg(target_arch = "wasm32")]
pub use interop::{js_batch_to_json, js_error_message};

/// Registers the service worker script. Resolves `Ok(false)` when the browser has no
/// `navigator.serviceWorker`.
pub async fn register_service_worker(
    script_url: &str,
    scope: Option<&str>,
) -> Result<bool, String> {
    interop::register_service_worker(script_url, scope).await
}

/// Unregisters the active service worker registration, if any. Resolves `Ok(true)` when a
/// registration was removed.
pub async fn unregister_service_worker() -> Result<bool, String> {
    interop::unregister_service_worker().await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn service_worker_public_api_non_wasm_parity() {
        assert!(
            !block_on(register_service_worker("/service-worker.js", None)).expect("register")
        );
        assert!(!block_on(unregister_service_worker()).expect("unregister"));
    }
}
