//! Status-tracked asynchronous call wrapping.
//!
//! - [`AsyncRunner`]: owns one operation, exposes [`AsyncStatus`] and a
//!   trigger.
//! - [`Operation`] / [`OpFn`] / [`OpRef`]: the cancelable unit of work.
//! - [`RunnerOptions`]: construction-time configuration.

mod operation;
mod options;
#[allow(clippy::module_inception)]
mod runner;
mod status;

pub use operation::{OpFn, OpRef, Operation};
pub use options::RunnerOptions;
pub use runner::AsyncRunner;
pub use status::AsyncStatus;
