//! Deferred one-shot callback.
//!
//! [`Delay`] runs a callback once after a delay. Automatic mode arms the
//! timer at construction; manual mode arms it per [`Delay::run`] call. The
//! alive flag guards the callback, so dropping the hook disarms everything
//! still pending.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Delay applied when none is configured.
pub const DEFAULT_CALLBACK_DELAY: Duration = Duration::from_millis(250);

type DelayCallback = Arc<dyn Fn() + Send + Sync>;

/// Runs a callback after a delay.
///
/// Must be created inside a Tokio runtime; timers are spawned tasks.
pub struct Delay {
    callback: DelayCallback,
    delay: Duration,
    manual: bool,
    alive: Arc<AtomicBool>,
    auto_timer: Option<JoinHandle<()>>,
}

impl Delay {
    /// Creates an automatic delay with [`DEFAULT_CALLBACK_DELAY`]; the timer
    /// is armed immediately.
    pub fn new(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self::with_options(callback, DEFAULT_CALLBACK_DELAY, false)
    }

    /// Creates a delay with an explicit duration and mode.
    pub fn with_options(
        callback: impl Fn() + Send + Sync + 'static,
        delay: Duration,
        manual: bool,
    ) -> Self {
        let mut hook = Self {
            callback: Arc::new(callback),
            delay,
            manual,
            alive: Arc::new(AtomicBool::new(true)),
            auto_timer: None,
        };
        if !hook.manual {
            hook.auto_timer = Some(hook.arm());
        }
        hook
    }

    /// Arms the timer once in manual mode. In automatic mode this is a no-op
    /// (the timer was armed at construction).
    pub fn run(&self) {
        if !self.manual || !self.alive.load(Ordering::Acquire) {
            return;
        }
        // Manual arms are independent; each run schedules its own firing.
        let _ = self.arm();
    }

    fn arm(&self) -> JoinHandle<()> {
        let callback = Arc::clone(&self.callback);
        let alive = Arc::clone(&self.alive);
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if alive.load(Ordering::Acquire) {
                callback();
            }
        })
    }
}

impl Drop for Delay {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
        if let Some(handle) = self.auto_timer.take() {
            handle.abort();
        }
    }
}
