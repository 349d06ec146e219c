//! Operation abstraction and function-backed implementation.
//!
//! This module defines the [`Operation`] trait (async, cancelable) and a
//! convenient function-backed implementation [`OpFn`]. The common handle type
//! is [`OpRef`], an `Arc<dyn Operation>` suitable for sharing with spawned
//! invocations.
//!
//! An operation receives a [`CancellationToken`] and should check it to stop
//! cooperatively when the owning runner is torn down. Cancellation is
//! advisory: the runner requests it, the operation decides when to honor it
//! by returning [`RunError::Canceled`].

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::RunError;

/// # Asynchronous, cancelable unit of work wrapped by a runner.
///
/// `Args` carries the positional arguments forwarded from the trigger call;
/// automatic-mode runners invoke the operation with `Args::default()`.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use hookset::{Operation, RunError};
///
/// struct Fetch;
///
/// #[async_trait]
/// impl Operation<String> for Fetch {
///     type Output = usize;
///
///     async fn call(&self, url: String, ctx: CancellationToken) -> Result<usize, RunError> {
///         if ctx.is_cancelled() {
///             return Err(RunError::Canceled);
///         }
///         Ok(url.len())
///     }
/// }
/// ```
#[async_trait]
pub trait Operation<Args: Send + 'static>: Send + Sync + 'static {
    /// Value produced by a successful completion.
    type Output: Send + 'static;

    /// Executes one invocation until completion or cooperative cancellation.
    async fn call(&self, args: Args, ctx: CancellationToken) -> Result<Self::Output, RunError>;
}

/// Shared handle to an operation.
pub type OpRef<Args, T> = Arc<dyn Operation<Args, Output = T>>;

/// Function-backed operation implementation.
///
/// Wraps a closure that *creates* a new future per invocation, so no state is
/// shared between overlapping triggers unless the caller opts in via `Arc`.
#[derive(Debug)]
pub struct OpFn<F> {
    f: F,
}

impl<F> OpFn<F> {
    /// Creates a new function-backed operation.
    ///
    /// Prefer [`OpFn::arc`] when you immediately need an [`OpRef`].
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the operation and returns it as a shared handle.
    ///
    /// ## Example
    /// ```
    /// use tokio_util::sync::CancellationToken;
    /// use hookset::{OpFn, RunError};
    ///
    /// let op = OpFn::arc(|name: String, _ctx: CancellationToken| async move {
    ///     Ok::<_, RunError>(name.to_uppercase())
    /// });
    /// # let _ = op;
    /// ```
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut, Args, T> Operation<Args> for OpFn<F>
where
    Args: Send + 'static,
    T: Send + 'static,
    F: Fn(Args, CancellationToken) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, RunError>> + Send + 'static,
{
    type Output = T;

    async fn call(&self, args: Args, ctx: CancellationToken) -> Result<T, RunError> {
        (self.f)(args, ctx).await
    }
}
