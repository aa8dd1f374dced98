//! Application host interface and the Leptos-backed host shim.
//!
//! The runtime treats the application as a black box: it is constructed once at a mount target
//! with a [`ConfigSnapshot`] and hands back the [`SyncPort`] it publishes persistence batches on.
//! When and why the application sends a batch is its own policy.

mod leptos_host;

use platform_host::ConfigSnapshot;

use crate::port::SyncPort;

pub use leptos_host::{use_app_context, AppContext, LeptosAppHost};

/// Element id the application mounts into by default.
pub const DEFAULT_MOUNT_ELEMENT_ID: &str = "root";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Opaque locator for where the application attaches itself in the hosting document.
pub struct MountTarget(String);

impl MountTarget {
    /// Targets the element with the given id.
    pub fn element_id(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The element id, unmodified.
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl Default for MountTarget {
    fn default() -> Self {
        Self::element_id(DEFAULT_MOUNT_ELEMENT_ID)
    }
}

/// Runtime that accepts a configuration snapshot and emits sync batches.
///
/// The host owns `config` for its whole lifetime. It must deliver batches on the returned port
/// sequentially; overlapping deliveries are outside the contract.
pub trait ApplicationHost {
    /// Constructs the application at `target` and returns its outbound sync port.
    fn init(&self, target: &MountTarget, config: ConfigSnapshot) -> SyncPort;
}

impl<F> ApplicationHost for F
where
    F: Fn(&MountTarget, ConfigSnapshot) -> SyncPort,
{
    fn init(&self, target: &MountTarget, config: ConfigSnapshot) -> SyncPort {
        self(target, config)
    }
}
