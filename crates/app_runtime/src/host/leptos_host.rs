use std::rc::Rc;

use leptos::*;
use platform_host::{ConfigSnapshot, SyncBatch};

use super::{ApplicationHost, MountTarget};
use crate::port::SyncPort;

#[derive(Clone)]
/// Leptos context given to the mounted application: its startup config and outbound port.
pub struct AppContext {
    /// Configuration snapshot the application was constructed with.
    pub config: Rc<ConfigSnapshot>,
    /// Outbound channel for persistence batches.
    pub sync: SyncPort,
}

impl AppContext {
    /// Sends a persistence batch on the application's outbound port.
    pub fn persist(&self, batch: SyncBatch) {
        self.sync.send(batch);
    }
}

/// Returns the [`AppContext`] provided by [`LeptosAppHost`], if rendering under one.
pub fn use_app_context() -> Option<AppContext> {
    use_context::<AppContext>()
}

#[derive(Clone)]
/// [`ApplicationHost`] that mounts a Leptos view and exposes [`AppContext`] to it.
pub struct LeptosAppHost {
    view: Rc<dyn Fn() -> View>,
}

impl LeptosAppHost {
    /// Wraps the root view factory of the application.
    pub fn new<F, N>(view: F) -> Self
    where
        F: Fn() -> N + 'static,
        N: IntoView,
    {
        Self {
            view: Rc::new(move || view().into_view()),
        }
    }
}

impl ApplicationHost for LeptosAppHost {
    fn init(&self, target: &MountTarget, config: ConfigSnapshot) -> SyncPort {
        let port = SyncPort::new();
        let context = AppContext {
            config: Rc::new(config),
            sync: port.clone(),
        };
        mount(target, context, Rc::clone(&self.view));
        port
    }
}

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn mount(target: &MountTarget, context: AppContext, view: Rc<dyn Fn() -> View>) {
    use wasm_bindgen::JsCast;

    let app = move || {
        provide_context(context);
        view()
    };
    let parent = document()
        .get_element_by_id(target.id())
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
    match parent {
        Some(parent) => mount_to(parent, app),
        None => {
            logging::warn!("mount target #{} not found; mounting to body", target.id());
            mount_to_body(app);
        }
    }
}

/// Nothing is rendered off-browser; the port is still live for the caller.
#[cfg(not(all(target_arch = "wasm32", feature = "csr")))]
fn mount(target: &MountTarget, context: AppContext, view: Rc<dyn Fn() -> View>) {
    let _ = (target, context, view);
}
