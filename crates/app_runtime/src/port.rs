//! Outbound sync channel between an application host and its subscribers.
//!
//! Delivery is single-threaded and FIFO. A batch sent from inside a subscriber callback is
//! queued and delivered once the current batch has reached every subscriber, so no subscriber
//! ever runs re-entrantly.

use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::{Rc, Weak},
};

use platform_host::{BatchDecodeError, SyncBatch};
use serde_json::Value;

type Listener = Rc<dyn Fn(&SyncBatch)>;

#[derive(Default)]
struct PortState {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    pending: VecDeque<SyncBatch>,
    delivering: bool,
}

#[derive(Clone, Default)]
/// Host-owned outbound channel carrying [`SyncBatch`] messages to persistence.
///
/// Clones share the same channel.
pub struct SyncPort {
    inner: Rc<RefCell<PortState>>,
}

impl SyncPort {
    /// Creates a channel with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for every subsequently delivered batch.
    ///
    /// Batches held back while the port had no subscribers are delivered to `listener` before
    /// this returns. The listener stays registered until the returned [`Subscription`] is
    /// dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, listener: impl Fn(&SyncBatch) + 'static) -> Subscription {
        let id = {
            let mut state = self.inner.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.listeners.push((id, Rc::new(listener)));
            id
        };
        let subscription = Subscription {
            port: Rc::downgrade(&self.inner),
            id,
        };
        self.deliver_pending();
        subscription
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Number of batches waiting for a subscriber.
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Delivers `batch` to every current subscriber.
    ///
    /// Batches sent while nobody is subscribed are held until the next subscription. Listeners
    /// registered or removed while a batch is in flight take effect from the next batch.
    pub fn send(&self, batch: SyncBatch) {
        self.inner.borrow_mut().pending.push_back(batch);
        self.deliver_pending();
    }

    fn deliver_pending(&self) {
        {
            let mut state = self.inner.borrow_mut();
            if state.delivering || state.listeners.is_empty() {
                return;
            }
            state.delivering = true;
        }
        let _guard = DeliveryGuard { state: &self.inner };

        loop {
            let (batch, listeners) = {
                let mut state = self.inner.borrow_mut();
                if state.listeners.is_empty() {
                    return;
                }
                let Some(batch) = state.pending.pop_front() else {
                    return;
                };
                let listeners = state
                    .listeners
                    .iter()
                    .map(|(_, listener)| Rc::clone(listener))
                    .collect::<Vec<_>>();
                (batch, listeners)
            };

            for listener in listeners {
                listener(&batch);
            }
        }
    }

    /// Decodes a dynamically typed JSON object and sends it as a batch.
    ///
    /// # Errors
    ///
    /// Returns [`BatchDecodeError`] without sending anything when the message is malformed.
    pub fn send_json(&self, value: Value) -> Result<(), BatchDecodeError> {
        let batch = SyncBatch::from_json(value)?;
        self.send(batch);
        Ok(())
    }
}

/// Clears the in-flight flag even when a listener unwinds, so later sends still deliver.
struct DeliveryGuard<'a> {
    state: &'a RefCell<PortState>,
}

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        self.state.borrow_mut().delivering = false;
    }
}

/// Scoped registration on a [`SyncPort`]. Dropping it unsubscribes.
pub struct Subscription {
    port: Weak<RefCell<PortState>>,
    id: u64,
}

impl Subscription {
    /// Keeps the listener registered for the lifetime of the port.
    pub fn detach(self) {
        std::mem::forget(self);
    }

    /// Unsubscribes now. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(port) = self.port.upgrade() {
            port.borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}
