//! Throttled value holder.
//!
//! [`Throttle`] applies at most one update per interval. An update arriving
//! inside the quiet window is scheduled as a trailing update, replacing any
//! previously scheduled one, so the most recent value always wins.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Interval applied when none is configured.
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_millis(500);

struct ThrottleState {
    last_applied: Option<Instant>,
    trailing: Option<JoinHandle<()>>,
}

/// Holds a value that updates at most once per interval.
///
/// Must be used inside a Tokio runtime; trailing updates are timer tasks.
pub struct Throttle<T> {
    tx: watch::Sender<T>,
    rx: watch::Receiver<T>,
    interval: Duration,
    state: Arc<Mutex<ThrottleState>>,
}

impl<T> Throttle<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a throttler with [`DEFAULT_THROTTLE_INTERVAL`].
    pub fn new(initial: T) -> Self {
        Self::with_interval(initial, DEFAULT_THROTTLE_INTERVAL)
    }

    /// Creates a throttler with an explicit interval.
    pub fn with_interval(initial: T, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self {
            tx,
            rx,
            interval,
            state: Arc::new(Mutex::new(ThrottleState {
                last_applied: None,
                trailing: None,
            })),
        }
    }

    /// Applies `value` now when the interval has elapsed since the last
    /// applied update; otherwise schedules it as the trailing update,
    /// replacing any previously scheduled one.
    pub fn set(&self, value: T) {
        let now = Instant::now();
        let mut state = self.state.lock();

        let due = state
            .last_applied
            .is_some_and(|last| now >= last + self.interval);

        if let Some(handle) = state.trailing.take() {
            handle.abort();
        }

        if due {
            state.last_applied = Some(now);
            let _ = self.tx.send(value);
            return;
        }

        let tx = self.tx.clone();
        let interval = self.interval;
        let shared = Arc::clone(&self.state);
        state.trailing = Some(tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            let _ = tx.send(value);
            let mut state = shared.lock();
            // The applied timestamp is the set time, not the fire time.
            state.last_applied = Some(now);
            state.trailing = None;
        }));
    }

    /// Returns the throttled value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Returns a receiver observing throttled-value changes.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.rx.clone()
    }
}

impl<T> Drop for Throttle<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.state.lock().trailing.take() {
            handle.abort();
        }
    }
}
