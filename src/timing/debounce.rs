//! Debounced value holder.
//!
//! [`Debounce`] keeps a settled value and an at-most-one pending update.
//! Every `set` replaces the pending update and restarts the delay, so a burst
//! of rapid updates settles exactly once, with the last value.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Delay applied when none is configured.
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Holds a value that settles only after updates stop arriving.
///
/// Must be used inside a Tokio runtime; pending updates are timer tasks.
///
/// ## Example
/// ```no_run
/// # async fn demo() {
/// use hookset::Debounce;
///
/// let query = Debounce::new(String::new());
/// query.set("h".to_string());
/// query.set("he".to_string());
/// query.set("hello".to_string());
/// // After the delay elapses with no further updates:
/// // query.get() == "hello"
/// # }
/// ```
pub struct Debounce<T> {
    tx: watch::Sender<T>,
    rx: watch::Receiver<T>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Debounce<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a debouncer with [`DEFAULT_DEBOUNCE_DELAY`].
    pub fn new(initial: T) -> Self {
        Self::with_delay(initial, DEFAULT_DEBOUNCE_DELAY)
    }

    /// Creates a debouncer with an explicit delay.
    pub fn with_delay(initial: T, delay: Duration) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self {
            tx,
            rx,
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedules `value` to become the settled value after the delay,
    /// replacing any not-yet-settled update.
    pub fn set(&self, value: T) {
        let mut pending = self.pending.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let tx = self.tx.clone();
        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(value);
        }));
    }

    /// Returns the settled value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Returns a receiver observing settled-value changes.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.rx.clone()
    }
}

impl<T> Drop for Debounce<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }
}
