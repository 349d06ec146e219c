//! Scoped document-title management.
//!
//! The host's title API is an external collaborator behind the [`TitleSink`]
//! trait. [`TitleGuard`] applies a title for its own lifetime and restores
//! the previous one on drop, unless asked to persist.

use std::sync::Arc;

use parking_lot::Mutex;

/// Title capability supplied by the host.
pub trait TitleSink: Send + Sync {
    /// Current title.
    fn title(&self) -> String;
    /// Replaces the current title.
    fn set_title(&self, title: &str);
}

/// In-process [`TitleSink`] implementation; clones share state.
#[derive(Clone, Default)]
pub struct MemoryTitle {
    current: Arc<Mutex<String>>,
}

impl MemoryTitle {
    /// Creates a sink with an initial title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            current: Arc::new(Mutex::new(title.into())),
        }
    }
}

impl TitleSink for MemoryTitle {
    fn title(&self) -> String {
        self.current.lock().clone()
    }

    fn set_title(&self, title: &str) {
        *self.current.lock() = title.to_string();
    }
}

/// Applies a title for the guard's lifetime.
///
/// ## Example
/// ```
/// use hookset::{MemoryTitle, TitleGuard, TitleSink};
///
/// let sink = MemoryTitle::new("home");
/// {
///     let _guard = TitleGuard::new(sink.clone(), "settings");
///     assert_eq!(sink.title(), "settings");
/// }
/// assert_eq!(sink.title(), "home");
/// ```
pub struct TitleGuard<S: TitleSink> {
    sink: S,
    previous: String,
    persist: bool,
}

impl<S: TitleSink> TitleGuard<S> {
    /// Records the current title and applies `title`.
    pub fn new(sink: S, title: &str) -> Self {
        let previous = sink.title();
        sink.set_title(title);
        Self {
            sink,
            previous,
            persist: false,
        }
    }

    /// Keeps the applied title in place when the guard drops.
    pub fn persist_on_drop(mut self) -> Self {
        self.persist = true;
        self
    }
}

impl<S: TitleSink> Drop for TitleGuard<S> {
    fn drop(&mut self) {
        if !self.persist {
            self.sink.set_title(&self.previous);
        }
    }
}
