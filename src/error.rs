//! Error types used by the hookset runtime and wrapped operations.
//!
//! This module defines two main error enums:
//!
//! - [`HookError`] — misuse of a hook's API surface, raised synchronously at
//!   the call site and never swallowed.
//! - [`RunError`] — failures of a wrapped asynchronous operation, captured at
//!   the runner boundary and surfaced only via status and callbacks.
//!
//! Both types provide `as_label` helpers for logging/metrics.

use thiserror::Error;

/// # Errors raised by hook API misuse.
///
/// These are contract violations detected synchronously at the call site:
/// triggering an automatic runner by hand, touching an event bus whose
/// provider scope is gone, or driving an auth action without a handler.
/// They always propagate to the caller (fail fast).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HookError {
    /// `run` was called on a runner constructed in automatic mode.
    #[error("manual mode required to invoke the runner explicitly")]
    ManualRequired,

    /// The event bus was accessed after its provider scope was dropped.
    #[error("event bus accessed outside an active provider scope")]
    MissingProvider,

    /// An auth action was invoked without a configured handler.
    #[error("missing handler for {handler:?}, please provide a handler for this action")]
    MissingHandler {
        /// Name of the absent handler (e.g. `"login"`).
        handler: &'static str,
    },

    /// A stored entry could not be decoded as JSON.
    #[error("storage entry for {key:?} holds invalid JSON: {source}")]
    Storage {
        /// The key whose entry failed to decode.
        key: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

impl HookError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use hookset::HookError;
    ///
    /// assert_eq!(HookError::ManualRequired.as_label(), "manual_required");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HookError::ManualRequired => "manual_required",
            HookError::MissingProvider => "missing_provider",
            HookError::MissingHandler { .. } => "missing_handler",
            HookError::Storage { .. } => "storage_decode",
        }
    }
}

/// # Errors produced by wrapped asynchronous operations.
///
/// A failed operation never escapes as an unhandled failure: the runner
/// catches it and reports it through `status` and the `on_error` callback.
/// [`RunError::Canceled`] is the distinguished benign kind an operation
/// returns after observing its cancellation token; the runner suppresses it
/// entirely (no status write, no callback).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RunError {
    /// The operation failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The operation observed its cancellation token and stopped early.
    #[error("operation canceled")]
    Canceled,
}

impl RunError {
    /// Creates a [`RunError::Fail`] from any displayable error.
    pub fn fail(error: impl Into<String>) -> Self {
        RunError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RunError::Fail { .. } => "run_failed",
            RunError::Canceled => "run_canceled",
        }
    }

    /// Indicates whether this is the benign cancellation kind.
    ///
    /// # Example
    /// ```
    /// use hookset::RunError;
    ///
    /// assert!(RunError::Canceled.is_canceled());
    /// assert!(!RunError::fail("boom").is_canceled());
    /// ```
    pub fn is_canceled(&self) -> bool {
        matches!(self, RunError::Canceled)
    }
}
