//! Status of a wrapped asynchronous call.

/// Observable status of an [`AsyncRunner`](crate::AsyncRunner) instance.
///
/// ### Transitions
/// ```text
/// Idle ──(run)──► Pending ──(resolve)──► Fulfilled
///                    │
///                    └─────(reject)────► Rejected
/// ```
///
/// There is no transition out of `Fulfilled`/`Rejected` except a fresh `run`
/// call, which re-enters `Pending` from any terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncStatus {
    /// The operation has not been started yet.
    Idle,
    /// The operation is in flight.
    Pending,
    /// The most recently observed completion resolved successfully.
    Fulfilled,
    /// The most recently observed completion failed.
    Rejected,
}

impl AsyncStatus {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            AsyncStatus::Idle => "idle",
            AsyncStatus::Pending => "pending",
            AsyncStatus::Fulfilled => "fulfilled",
            AsyncStatus::Rejected => "rejected",
        }
    }

    /// True while an invocation is in flight.
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, AsyncStatus::Pending)
    }

    /// True once a completion has been observed (either outcome).
    #[inline]
    pub fn is_settled(&self) -> bool {
        matches!(self, AsyncStatus::Fulfilled | AsyncStatus::Rejected)
    }
}
