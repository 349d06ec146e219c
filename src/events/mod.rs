//! Typed publish/subscribe scoped to a provider instance.
//!
//! - [`EventKind`]: marker trait declaring one event and its payload type.
//! - [`EventScope`]: provider instance owning the subscription list.
//! - [`BusHandle`]: subscribe/publish capability; fails fast once the scope
//!   is gone.
//! - [`Unsubscribe`]: idempotent removal handle returned by `subscribe`.

mod bus;
mod event;
mod scope;

pub use bus::{BusHandle, Unsubscribe};
pub use event::EventKind;
pub use scope::EventScope;
