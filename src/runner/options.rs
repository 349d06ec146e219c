//! Construction-time configuration for [`AsyncRunner`](crate::AsyncRunner).

use std::fmt;
use std::sync::Arc;

use crate::error::RunError;

pub(crate) type SuccessCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;
pub(crate) type ErrorCallback = Arc<dyn Fn(&RunError) + Send + Sync>;

/// Recognized options for a runner, fixed at construction.
///
/// ## Field semantics
/// - `manual` (default `false`): when false, the operation is invoked exactly
///   once at construction with default arguments and explicit `run` calls are
///   rejected; when true, each `run` call starts an invocation.
/// - `cancelable` (default `true`): when true, an in-flight operation is
///   asked to cancel if the runner is dropped while still pending.
/// - `on_success` / `on_error`: invoked after a completion is observed, with
///   the resolved value or the failure.
pub struct RunnerOptions<T> {
    pub(crate) manual: bool,
    pub(crate) cancelable: bool,
    pub(crate) on_success: Option<SuccessCallback<T>>,
    pub(crate) on_error: Option<ErrorCallback>,
}

impl<T> RunnerOptions<T> {
    /// Creates options with defaults: automatic, cancelable, no callbacks.
    pub fn new() -> Self {
        Self {
            manual: false,
            cancelable: true,
            on_success: None,
            on_error: None,
        }
    }

    /// Selects manual mode (`run` required) or automatic mode.
    pub fn with_manual(mut self, manual: bool) -> Self {
        self.manual = manual;
        self
    }

    /// Governs whether teardown cancels an in-flight operation.
    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Registers a callback invoked with the resolved value after a
    /// successful completion.
    pub fn with_on_success(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(f));
        self
    }

    /// Registers a callback invoked with the failure after a rejected
    /// completion. Benign cancellations are never reported here.
    pub fn with_on_error(mut self, f: impl Fn(&RunError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(f));
        self
    }
}

impl<T> Default for RunnerOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RunnerOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunnerOptions")
            .field("manual", &self.manual)
            .field("cancelable", &self.cancelable)
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
