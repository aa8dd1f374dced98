//! Shared transport interop for browser bridge domains.
//!
//! This module routes calls to target-specific implementations while preserving a uniform API
//! for the bridge.

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

#[cfg(target_arch = "wasm32")]
pub use wasm::{js_batch_to_json, js_error_message};

pub async fn register_service_worker(
    script_url: &str,
    scope: Option<&str>,
) -> Result<bool, String> {
    imp::register_service_worker(script_url, scope).await
}

pub async fn unregister_service_worker() -> Result<bool, String> {
    imp::unregister_service_worker().await
}
