//! Provider scope owning one subscription list.
//!
//! [`EventScope`] is the lifetime boundary for a set of subscriptions: it is
//! created per logical session, hands out [`BusHandle`] capabilities, and
//! discards every subscription when dropped. Handles hold only a weak
//! reference, so any access after the scope is gone fails fast with
//! [`HookError::MissingProvider`](crate::HookError::MissingProvider) at the
//! access call, never lazily.

use std::any::{Any, TypeId};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::events::bus::BusHandle;

pub(crate) type ErasedCallback = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// One live subscription entry.
///
/// `id` is unique among the currently live subscriptions of one scope; the
/// list keeps insertion order so removal is stable and dispatch order is
/// subscription order.
pub(crate) struct Subscription {
    pub(crate) id: String,
    pub(crate) event: TypeId,
    pub(crate) callback: ErasedCallback,
}

pub(crate) struct ScopeInner {
    pub(crate) subscriptions: Mutex<Vec<Subscription>>,
}

/// Provider instance owning a subscription list.
///
/// ## Example
/// ```
/// use hookset::{EventKind, EventScope};
///
/// struct Ping;
/// impl EventKind for Ping {
///     type Payload = u32;
/// }
///
/// let scope = EventScope::new();
/// let bus = scope.bus();
/// let sub = bus.subscribe::<Ping>(|n| println!("ping {n}")).unwrap();
/// bus.publish::<Ping>(&7).unwrap();
/// sub.unsubscribe();
/// ```
pub struct EventScope {
    inner: Arc<ScopeInner>,
}

impl EventScope {
    /// Creates a scope with an empty subscription list.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                subscriptions: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Returns a subscribe/publish capability tied to this scope's lifetime.
    pub fn bus(&self) -> BusHandle {
        BusHandle::new(Arc::downgrade(&self.inner))
    }

    /// Number of currently live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.inner.subscriptions.lock().len()
    }
}

impl Default for EventScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventScope {
    fn drop(&mut self) {
        let count = self.inner.subscriptions.lock().len();
        trace!(subscriptions = count, "event scope dropped");
    }
}
