use js_sys::Reflect;
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{RegistrationOptions, ServiceWorkerContainer, ServiceWorkerRegistration};

/// Renders a thrown JS value (string, `Error`, or anything else) as a message.
pub fn js_error_message(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        message
    } else if let Some(js_err) = err.dyn_ref::<js_sys::Error>() {
        js_err.message().into()
    } else {
        format!("{err:?}")
    }
}

/// Converts a JS object handed across the wasm boundary into JSON for batch decoding.
pub fn js_batch_to_json(value: JsValue) -> Result<Value, String> {
    serde_wasm_bindgen::from_value(value).map_err(|err| err.to_string())
}

fn service_worker_container() -> Result<Option<ServiceWorkerContainer>, String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let navigator = window.navigator();
    let supported = Reflect::has(&navigator, &JsValue::from_str("serviceWorker"))
        .map_err(|err| js_error_message(&err))?;
    if !supported {
        return Ok(None);
    }
    Ok(Some(navigator.service_worker()))
}

pub async fn register_service_worker(
    script_url: &str,
    scope: Option<&str>,
) -> Result<bool, String> {
    let Some(container) = service_worker_container()? else {
        return Ok(false);
    };

    let promise = match scope {
        Some(scope) => {
            let options = RegistrationOptions::new();
            options.set_scope(scope);
            container.register_with_options(script_url, &options)
        }
        None => container.register(script_url),
    };
    JsFuture::from(promise)
        .await
        .map_err(|err| format!("service worker registration failed: {}", js_error_message(&err)))?;
    Ok(true)
}

pub async fn unregister_service_worker() -> Result<bool, String> {
    let Some(container) = service_worker_container()? else {
        return Ok(false);
    };

    let registration = JsFuture::from(container.get_registration())
        .await
        .map_err(|err| format!("service worker lookup failed: {}", js_error_message(&err)))?;
    let Ok(registration) = registration.dyn_into::<ServiceWorkerRegistration>() else {
        return Ok(false);
    };

    let promise = registration
        .unregister()
        .map_err(|err| format!("service worker unregister failed: {}", js_error_message(&err)))?;
    let removed = JsFuture::from(promise)
        .await
        .map_err(|err| format!("service worker unregister failed: {}", js_error_message(&err)))?;
    Ok(removed.as_bool().unwrap_or(false))
}
