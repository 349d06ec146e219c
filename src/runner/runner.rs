//! Status-tracked wrapper around a cancelable asynchronous operation.
//!
//! [`AsyncRunner`] owns one operation and exposes its lifecycle as an
//! [`AsyncStatus`] that moves `Idle → Pending → Fulfilled | Rejected`.
//!
//! ## Rules
//! - **Automatic mode** invokes the operation exactly once at construction
//!   with default arguments; explicit `run` calls fail with
//!   [`HookError::ManualRequired`].
//! - **Manual mode** starts one invocation per `run` call. Calls are not
//!   queued or de-duplicated: overlapping invocations race and the status
//!   reflects whichever completion is observed last.
//! - **Liveness guard**: a completion observed after the runner was dropped
//!   performs no status write and invokes no callback.
//! - **Cancellation** is advisory. Dropping a cancelable runner while pending
//!   cancels the runner token; the operation is expected to notice and return
//!   [`RunError::Canceled`], which is suppressed (no status write, no
//!   `on_error`).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::error::{HookError, RunError};
use crate::runner::operation::OpRef;
use crate::runner::options::RunnerOptions;
use crate::runner::status::AsyncStatus;

/// Wraps an asynchronous operation and tracks its status.
///
/// Must be created and used inside a Tokio runtime: invocations are driven by
/// `tokio::spawn`.
///
/// ## Example
/// ```no_run
/// use tokio_util::sync::CancellationToken;
/// use hookset::{AsyncRunner, OpFn, RunError, RunnerOptions};
///
/// # async fn demo() {
/// let op = OpFn::arc(|name: String, _ctx: CancellationToken| async move {
///     Ok::<_, RunError>(format!("hello {name}"))
/// });
///
/// let runner = AsyncRunner::manual(
///     op,
///     RunnerOptions::new().with_on_success(|greeting: &String| {
///         println!("{greeting}");
///     }),
/// );
///
/// runner.run("world".to_string()).unwrap();
/// # }
/// ```
pub struct AsyncRunner<Args, T>
where
    Args: Send + 'static,
    T: Send + 'static,
{
    op: OpRef<Args, T>,
    options: RunnerOptions<T>,
    status_tx: watch::Sender<AsyncStatus>,
    status_rx: watch::Receiver<AsyncStatus>,
    alive: Arc<AtomicBool>,
    token: CancellationToken,
}

impl<Args, T> AsyncRunner<Args, T>
where
    Args: Send + 'static,
    T: Send + 'static,
{
    /// Creates a runner; in automatic mode the operation starts immediately
    /// with `Args::default()`.
    pub fn new(op: OpRef<Args, T>, options: RunnerOptions<T>) -> Self
    where
        Args: Default,
    {
        let runner = Self::idle(op, options);
        if !runner.options.manual {
            runner.spawn_invocation(Args::default());
        }
        runner
    }

    /// Creates a manual-mode runner regardless of `options.manual`.
    ///
    /// Use this when `Args` has no `Default` (nothing is auto-invoked, so no
    /// default arguments are needed).
    pub fn manual(op: OpRef<Args, T>, options: RunnerOptions<T>) -> Self {
        Self::idle(op, options.with_manual(true))
    }

    fn idle(op: OpRef<Args, T>, options: RunnerOptions<T>) -> Self {
        let (status_tx, status_rx) = watch::channel(AsyncStatus::Idle);
        Self {
            op,
            options,
            status_tx,
            status_rx,
            alive: Arc::new(AtomicBool::new(true)),
            token: CancellationToken::new(),
        }
    }

    /// Starts one invocation with the given arguments.
    ///
    /// Sets the status to `Pending` synchronously, before this call returns.
    ///
    /// # Errors
    /// [`HookError::ManualRequired`] when the runner was constructed in
    /// automatic mode, regardless of its current status.
    pub fn run(&self, args: Args) -> Result<(), HookError> {
        if !self.options.manual {
            return Err(HookError::ManualRequired);
        }
        self.spawn_invocation(args);
        Ok(())
    }

    /// Returns the current status.
    pub fn status(&self) -> AsyncStatus {
        *self.status_rx.borrow()
    }

    /// Returns a receiver that observes status transitions.
    pub fn watch(&self) -> watch::Receiver<AsyncStatus> {
        self.status_rx.clone()
    }

    fn spawn_invocation(&self, args: Args) {
        let _ = self.status_tx.send(AsyncStatus::Pending);

        let op = Arc::clone(&self.op);
        let ctx = self.token.child_token();
        let alive = Arc::clone(&self.alive);
        let status_tx = self.status_tx.clone();
        let on_success = self.options.on_success.clone();
        let on_error = self.options.on_error.clone();

        tokio::spawn(async move {
            let result = op.call(args, ctx).await;

            if !alive.load(Ordering::Acquire) {
                trace!(outcome = outcome_label(&result), "stale completion ignored");
                return;
            }
            match result {
                Ok(value) => {
                    let _ = status_tx.send(AsyncStatus::Fulfilled);
                    if let Some(cb) = on_success {
                        cb(&value);
                    }
                }
                Err(RunError::Canceled) => {
                    debug!("operation observed cancellation; completion suppressed");
                }
                Err(err) => {
                    let _ = status_tx.send(AsyncStatus::Rejected);
                    if let Some(cb) = on_error {
                        cb(&err);
                    }
                }
            }
        });
    }
}

impl<Args, T> Drop for AsyncRunner<Args, T>
where
    Args: Send + 'static,
    T: Send + 'static,
{
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
        if self.options.cancelable && self.status().is_pending() {
            debug!("runner dropped while pending; requesting cancellation");
            self.token.cancel();
        }
    }
}

fn outcome_label<T>(result: &Result<T, RunError>) -> &'static str {
    match result {
        Ok(_) => "fulfilled",
        Err(err) => err.as_label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::operation::OpFn;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    async fn settled(mut rx: watch::Receiver<AsyncStatus>) -> AsyncStatus {
        loop {
            let status = *rx.borrow();
            if status.is_settled() {
                return status;
            }
            if rx.changed().await.is_err() {
                return status;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn manual_runner_starts_idle_without_invoking() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let op = OpFn::arc(move |(): (), _ctx: CancellationToken| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, RunError>(())
            }
        });

        let runner = AsyncRunner::manual(op, RunnerOptions::new());
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(runner.status(), AsyncStatus::Idle);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn automatic_runner_invokes_exactly_once_at_construction() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let op = OpFn::arc(move |(): (), _ctx: CancellationToken| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, RunError>("done")
            }
        });

        let runner = AsyncRunner::new(op, RunnerOptions::new());
        let status = settled(runner.watch()).await;

        assert_eq!(status, AsyncStatus::Fulfilled);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn run_on_automatic_runner_fails_with_manual_required() {
        let op = OpFn::arc(|(): (), _ctx: CancellationToken| async { Ok::<_, RunError>(()) });
        let runner = AsyncRunner::new(op, RunnerOptions::new());

        let err = runner.run(()).expect_err("automatic runner must reject run");
        assert!(matches!(err, HookError::ManualRequired));

        // Still rejected once settled: mode, not state, governs the check.
        let _ = settled(runner.watch()).await;
        assert!(matches!(runner.run(()), Err(HookError::ManualRequired)));
    }

    #[tokio::test(start_paused = true)]
    async fn manual_run_moves_pending_then_fulfilled_with_on_success() {
        let seen = Arc::new(Mutex::new(None::<String>));
        let sink = Arc::clone(&seen);
        let op = OpFn::arc(|name: String, _ctx: CancellationToken| async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, RunError>(name.to_uppercase())
        });

        let runner = AsyncRunner::manual(
            op,
            RunnerOptions::new().with_on_success(move |value: &String| {
                *sink.lock() = Some(value.clone());
            }),
        );

        runner.run("test".to_string()).expect("manual run");
        assert_eq!(runner.status(), AsyncStatus::Pending);

        let status = settled(runner.watch()).await;
        assert_eq!(status, AsyncStatus::Fulfilled);
        assert_eq!(seen.lock().as_deref(), Some("TEST"));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_run_moves_to_rejected_and_calls_on_error() {
        let seen = Arc::new(Mutex::new(None::<String>));
        let sink = Arc::clone(&seen);
        let op = OpFn::arc(|(): (), _ctx: CancellationToken| async {
            Err::<(), _>(RunError::fail("boom"))
        });

        let runner = AsyncRunner::manual(
            op,
            RunnerOptions::new().with_on_error(move |err: &RunError| {
                *sink.lock() = Some(err.to_string());
            }),
        );

        runner.run(()).expect("manual run");
        let status = settled(runner.watch()).await;

        assert_eq!(status, AsyncStatus::Rejected);
        assert_eq!(seen.lock().as_deref(), Some("execution failed: boom"));
    }

    #[tokio::test(start_paused = true)]
    async fn canceled_completion_is_suppressed() {
        let errors = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&errors);
        let op = OpFn::arc(|(): (), _ctx: CancellationToken| async {
            Err::<(), _>(RunError::Canceled)
        });

        let runner = AsyncRunner::manual(
            op,
            RunnerOptions::new().with_on_error(move |_| {
                sink.fetch_add(1, Ordering::SeqCst);
            }),
        );

        runner.run(()).expect("manual run");
        tokio::time::sleep(Duration::from_millis(10)).await;

        // No terminal status, no error callback: cancellation is benign.
        assert_eq!(runner.status(), AsyncStatus::Pending);
        assert_eq!(errors.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_while_pending_cancels_the_operation() {
        let observed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&observed);
        let op = OpFn::arc(move |(): (), ctx: CancellationToken| {
            let flag = Arc::clone(&flag);
            async move {
                ctx.cancelled().await;
                flag.store(true, Ordering::SeqCst);
                Err::<(), _>(RunError::Canceled)
            }
        });

        let runner = AsyncRunner::new(op, RunnerOptions::new().with_cancelable(true));
        tokio::task::yield_now().await;
        assert_eq!(runner.status(), AsyncStatus::Pending);

        drop(runner);
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(observed.load(Ordering::SeqCst), "token was not cancelled");
    }

    #[tokio::test(start_paused = true)]
    async fn stale_completion_after_drop_is_ignored() {
        let successes = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&successes);
        let op = OpFn::arc(|(): (), _ctx: CancellationToken| async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, RunError>(())
        });

        let runner = AsyncRunner::new(
            op,
            RunnerOptions::new()
                .with_cancelable(false)
                .with_on_success(move |_| {
                    sink.fetch_add(1, Ordering::SeqCst);
                }),
        );
        tokio::task::yield_now().await;
        drop(runner);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(successes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_runs_settle_with_last_observed_completion() {
        let op = OpFn::arc(|delay_ms: u64, _ctx: CancellationToken| async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            Ok::<_, RunError>(delay_ms)
        });

        let runner = AsyncRunner::manual(op, RunnerOptions::new());
        runner.run(50).expect("first run");
        runner.run(10).expect("second run");

        tokio::time::sleep(Duration::from_millis(100)).await;
        // Both invocations completed; the status reflects the last completion
        // (the slower first run), not a queue order.
        assert_eq!(runner.status(), AsyncStatus::Fulfilled);
    }
}
