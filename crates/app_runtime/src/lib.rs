//! Application runtime glue: the outbound sync port, the storage sync bridge, the application
//! host interface with its Leptos shim, and the boot sequence tying them to platform services.

pub mod boot;
pub mod host;
pub mod port;
pub mod sync_bridge;

pub use boot::{boot, BootHandle, BootOptions};
pub use host::{
    use_app_context, AppContext, ApplicationHost, LeptosAppHost, MountTarget,
    DEFAULT_MOUNT_ELEMENT_ID,
};
pub use port::{Subscription, SyncPort};
pub use sync_bridge::{SyncBridge, SyncReport};
