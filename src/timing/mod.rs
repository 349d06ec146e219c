//! Timer-driven value and callback hooks.
//!
//! - [`Debounce`]: settle a value only after updates stop arriving.
//! - [`Throttle`]: apply at most one update per interval.
//! - [`Delay`]: run a callback once after a delay.

mod debounce;
mod delay;
mod throttle;

pub use debounce::{Debounce, DEFAULT_DEBOUNCE_DELAY};
pub use delay::{Delay, DEFAULT_CALLBACK_DELAY};
pub use throttle::{Throttle, DEFAULT_THROTTLE_INTERVAL};
