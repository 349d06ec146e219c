//! # hookset
//!
//! **hookset** is a collection of small, scope-bound utility hooks for
//! async Rust applications: status-tracked call wrapping, typed
//! publish/subscribe event scopes, debounce/throttle/delay timers, typed
//! key-value storage, URL query-parameter synchronization, and document
//! title management.
//!
//! Each hook is self-contained: there is no shared runtime and no cross-hook
//! state. Lifetimes follow Rust ownership — constructing a hook "mounts" it,
//! dropping it "unmounts" it and tears down timers, pending invocations, and
//! subscriptions.
//!
//! ## Architecture
//! ```text
//!  ┌────────────────────────┐        ┌──────────────────────────────┐
//!  │ AsyncRunner            │        │ EventScope (provider)        │
//!  │  - AsyncStatus         │        │  - subscription list         │
//!  │  - Operation (OpFn)    │        │  ┌────────────────────────┐  │
//!  │  - CancellationToken   │        │  │ BusHandle (capability) │  │
//!  │  - liveness flag       │        │  │  subscribe / publish   │  │
//!  └──────────┬─────────────┘        │  └───────────┬────────────┘  │
//!             │ status: watch        └──────────────┼───────────────┘
//!             ▼                                     ▼ (synchronous,
//!  Idle ► Pending ► Fulfilled/Rejected      snapshot per publish)
//!                                           subscriber callbacks
//! ```
//!
//! ## Features
//! | Area           | Description                                              | Key types                               |
//! |----------------|----------------------------------------------------------|-----------------------------------------|
//! | **Runner**     | Wrap an async operation, track its status, cancel on drop.| [`AsyncRunner`], [`AsyncStatus`], [`OpFn`] |
//! | **Events**     | Typed pub/sub scoped to a provider instance.             | [`EventScope`], [`BusHandle`], [`EventKind`] |
//! | **Timing**     | Debounce, throttle, and delay values/callbacks.          | [`Debounce`], [`Throttle`], [`Delay`]   |
//! | **Store**      | Typed JSON view over opaque key-value storage.           | [`TypedStore`], [`Storage`]             |
//! | **Query**      | Typed URL query-parameter read/write.                    | [`QueryParams`], [`Location`]           |
//! | **Title**      | RAII document-title scoping.                             | [`TitleGuard`], [`TitleSink`]           |
//! | **Errors**     | Typed misuse and operation errors.                       | [`HookError`], [`RunError`]             |
//!
//! ## Optional features
//! - `auth`: authentication context factory built on the runner
//!   ([`AuthScope`], [`AuthHandlers`]).
//!
//! ## Example
//! ```no_run
//! use tokio_util::sync::CancellationToken;
//! use hookset::{AsyncRunner, EventKind, EventScope, OpFn, RunError, RunnerOptions};
//!
//! struct SearchCompleted;
//! impl EventKind for SearchCompleted {
//!     type Payload = Vec<String>;
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scope = EventScope::new();
//!     let bus = scope.bus();
//!     let _sub = bus.subscribe::<SearchCompleted>(|hits| {
//!         println!("{} results", hits.len());
//!     })?;
//!
//!     let results = bus.clone();
//!     let runner = AsyncRunner::manual(
//!         OpFn::arc(|query: String, _ctx: CancellationToken| async move {
//!             Ok::<_, RunError>(vec![query])
//!         }),
//!         RunnerOptions::new().with_on_success(move |hits: &Vec<String>| {
//!             let _ = results.publish::<SearchCompleted>(hits);
//!         }),
//!     );
//!
//!     runner.run("rust hooks".to_string())?;
//!     Ok(())
//! }
//! ```

mod error;
mod events;
mod query;
mod runner;
mod store;
mod timing;
mod title;

// ---- Public re-exports ----

pub use error::{HookError, RunError};
pub use events::{BusHandle, EventKind, EventScope, Unsubscribe};
pub use query::{cast_value, render_value, Location, MemoryLocation, QueryParams};
pub use runner::{AsyncRunner, AsyncStatus, OpFn, OpRef, Operation, RunnerOptions};
pub use store::{MemoryStorage, Storage, TypedStore};
pub use timing::{
    Debounce, Delay, Throttle, DEFAULT_CALLBACK_DELAY, DEFAULT_DEBOUNCE_DELAY,
    DEFAULT_THROTTLE_INTERVAL,
};
pub use title::{MemoryTitle, TitleGuard, TitleSink};

// Optional: authentication context factory.
// Enable with: `--features auth`
#[cfg(feature = "auth")]
mod auth;
#[cfg(feature = "auth")]
pub use auth::{AuthFuture, AuthHandlers, AuthScope};
