//! Subscribe/publish capability for one provider scope.
//!
//! [`BusHandle`] is the access surface handed out by
//! [`EventScope`](crate::EventScope). Every call upgrades the scope reference
//! first, so use after the provider is gone fails immediately with
//! [`HookError::MissingProvider`].
//!
//! ## Rules
//! - **Synchronous dispatch**: `publish` invokes every matching subscriber on
//!   the calling thread, in subscription order, before returning.
//! - **Snapshot semantics**: the subscription list is captured before
//!   iterating; a callback that subscribes or unsubscribes during a publish
//!   cycle never affects the current delivery pass.
//! - **No isolation**: a panicking subscriber propagates to the publisher.
//!   Swallowing it would hide subscriber bugs.

use std::any::{Any, TypeId};
use std::sync::{Arc, Weak};

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::trace;

use crate::error::HookError;
use crate::events::event::EventKind;
use crate::events::scope::{ErasedCallback, ScopeInner, Subscription};

/// Length of generated subscription ids; collision-resistant for the
/// lifetime of one scope.
const SUBSCRIPTION_ID_LEN: usize = 12;

fn subscription_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUBSCRIPTION_ID_LEN)
        .map(char::from)
        .collect()
}

/// Capability to subscribe and publish on one scope.
///
/// Cheap to clone; all clones point at the same scope.
#[derive(Clone)]
pub struct BusHandle {
    scope: Weak<ScopeInner>,
}

impl BusHandle {
    pub(crate) fn new(scope: Weak<ScopeInner>) -> Self {
        Self { scope }
    }

    fn live_scope(&self) -> Result<Arc<ScopeInner>, HookError> {
        self.scope.upgrade().ok_or(HookError::MissingProvider)
    }

    /// Registers a callback for event `E` and returns its [`Unsubscribe`]
    /// handle.
    ///
    /// # Errors
    /// [`HookError::MissingProvider`] when the owning scope has been dropped.
    pub fn subscribe<E: EventKind>(
        &self,
        callback: impl Fn(&E::Payload) + Send + Sync + 'static,
    ) -> Result<Unsubscribe, HookError> {
        let scope = self.live_scope()?;
        let id = subscription_id();

        // The TypeId filter in publish already guarantees a matching payload;
        // the downcast is the type-erasure boundary, not a runtime decision.
        let erased: ErasedCallback = Arc::new(move |payload: &dyn Any| {
            if let Some(payload) = payload.downcast_ref::<E::Payload>() {
                callback(payload);
            }
        });

        scope.subscriptions.lock().push(Subscription {
            id: id.clone(),
            event: TypeId::of::<E>(),
            callback: erased,
        });
        trace!(event = E::name(), id = %id, "subscribed");

        Ok(Unsubscribe {
            scope: self.scope.clone(),
            id,
        })
    }

    /// Synchronously delivers `payload` to every subscriber of `E`, in
    /// subscription order.
    ///
    /// Subscriber panics are not caught and propagate to the caller.
    ///
    /// # Errors
    /// [`HookError::MissingProvider`] when the owning scope has been dropped.
    pub fn publish<E: EventKind>(&self, payload: &E::Payload) -> Result<(), HookError> {
        let scope = self.live_scope()?;

        // Snapshot under the lock, dispatch outside it: subscribers added or
        // removed by a running callback must not affect this pass, and a
        // callback calling back into the bus must not deadlock.
        let snapshot: Vec<ErasedCallback> = {
            let subscriptions = scope.subscriptions.lock();
            subscriptions
                .iter()
                .filter(|sub| sub.event == TypeId::of::<E>())
                .map(|sub| Arc::clone(&sub.callback))
                .collect()
        };
        trace!(event = E::name(), delivered = snapshot.len(), "publish");

        for callback in snapshot {
            callback(payload);
        }
        Ok(())
    }
}

/// Removes exactly one subscription; safe to call any number of times.
#[derive(Debug)]
pub struct Unsubscribe {
    scope: Weak<ScopeInner>,
    id: String,
}

impl Unsubscribe {
    /// Removes the subscription this handle was created for. A second call,
    /// or a call after the scope is gone, is a no-op.
    pub fn unsubscribe(&self) {
        if let Some(scope) = self.scope.upgrade() {
            scope.subscriptions.lock().retain(|sub| sub.id != self.id);
            trace!(id = %self.id, "unsubscribed");
        }
    }
}
