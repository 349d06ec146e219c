//! Authentication context factory built on the async runner.
//!
//! [`AuthScope`] owns the current user and one manual, non-cancelable
//! [`AsyncRunner`] per configured handler. Actions whose handler is absent
//! fail synchronously with
//! [`HookError::MissingHandler`](crate::HookError::MissingHandler); outcomes
//! of configured handlers are reported through the per-action success and
//! failure callbacks, never as unhandled failures.
//!
//! Enabled via the `auth` cargo feature.

use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{HookError, RunError};
use crate::runner::{AsyncRunner, AsyncStatus, OpFn, RunnerOptions};

/// Future returned by an auth handler.
pub type AuthFuture<T> = BoxFuture<'static, Result<T, RunError>>;

type LoginHandler<U> = Arc<dyn Fn(String, String) -> AuthFuture<U> + Send + Sync>;
type RegisterHandler<U> = Arc<dyn Fn(U) -> AuthFuture<U> + Send + Sync>;
type ResetHandler = Arc<dyn Fn(String) -> AuthFuture<()> + Send + Sync>;
type ValueCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;
type UnitCallback = Arc<dyn Fn() + Send + Sync>;
type FailureCallback = Arc<dyn Fn(&RunError) + Send + Sync>;

/// Handler configuration for an [`AuthScope`]; every handler is optional.
pub struct AuthHandlers<U> {
    login: Option<LoginHandler<U>>,
    login_success: Option<ValueCallback<U>>,
    login_failure: Option<FailureCallback>,
    register: Option<RegisterHandler<U>>,
    register_success: Option<ValueCallback<U>>,
    register_failure: Option<FailureCallback>,
    reset_password: Option<ResetHandler>,
    reset_success: Option<UnitCallback>,
    reset_failure: Option<FailureCallback>,
    logout: Option<UnitCallback>,
}

impl<U> AuthHandlers<U> {
    /// Creates an empty configuration (every action unhandled).
    pub fn new() -> Self {
        Self {
            login: None,
            login_success: None,
            login_failure: None,
            register: None,
            register_success: None,
            register_failure: None,
            reset_password: None,
            reset_success: None,
            reset_failure: None,
            logout: None,
        }
    }

    /// Sets the login handler, receiving `(email, password)`.
    pub fn with_login(
        mut self,
        handler: impl Fn(String, String) -> AuthFuture<U> + Send + Sync + 'static,
    ) -> Self {
        self.login = Some(Arc::new(handler));
        self
    }

    /// Invoked with the authenticated user after a successful login.
    pub fn on_login_success(mut self, f: impl Fn(&U) + Send + Sync + 'static) -> Self {
        self.login_success = Some(Arc::new(f));
        self
    }

    /// Invoked with the failure after a rejected login.
    pub fn on_login_failure(mut self, f: impl Fn(&RunError) + Send + Sync + 'static) -> Self {
        self.login_failure = Some(Arc::new(f));
        self
    }

    /// Sets the register handler, receiving the new user payload.
    pub fn with_register(
        mut self,
        handler: impl Fn(U) -> AuthFuture<U> + Send + Sync + 'static,
    ) -> Self {
        self.register = Some(Arc::new(handler));
        self
    }

    /// Invoked with the registered user after a successful registration.
    pub fn on_register_success(mut self, f: impl Fn(&U) + Send + Sync + 'static) -> Self {
        self.register_success = Some(Arc::new(f));
        self
    }

    /// Invoked with the failure after a rejected registration.
    pub fn on_register_failure(mut self, f: impl Fn(&RunError) + Send + Sync + 'static) -> Self {
        self.register_failure = Some(Arc::new(f));
        self
    }

    /// Sets the reset-password handler, receiving the account email.
    pub fn with_reset_password(
        mut self,
        handler: impl Fn(String) -> AuthFuture<()> + Send + Sync + 'static,
    ) -> Self {
        self.reset_password = Some(Arc::new(handler));
        self
    }

    /// Invoked after a successful password reset.
    pub fn on_reset_success(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.reset_success = Some(Arc::new(f));
        self
    }

    /// Invoked with the failure after a rejected password reset.
    pub fn on_reset_failure(mut self, f: impl Fn(&RunError) + Send + Sync + 'static) -> Self {
        self.reset_failure = Some(Arc::new(f));
        self
    }

    /// Invoked when the scope logs out.
    pub fn on_logout(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.logout = Some(Arc::new(f));
        self
    }
}

impl<U> Default for AuthHandlers<U> {
    fn default() -> Self {
        Self::new()
    }
}

/// Authentication scope: current user plus one runner per configured action.
///
/// Must be created inside a Tokio runtime (runners spawn invocations).
pub struct AuthScope<U>
where
    U: Clone + Send + Sync + 'static,
{
    current_user: Arc<Mutex<Option<U>>>,
    login_runner: Option<AsyncRunner<(String, String), U>>,
    register_runner: Option<AsyncRunner<U, U>>,
    reset_runner: Option<AsyncRunner<String, ()>>,
    logout_handler: Option<UnitCallback>,
}

impl<U> AuthScope<U>
where
    U: Clone + Send + Sync + 'static,
{
    /// Builds the scope from handlers and an initial user.
    pub fn new(handlers: AuthHandlers<U>, initial_user: Option<U>) -> Self {
        let current_user = Arc::new(Mutex::new(initial_user));

        let login_runner = handlers.login.map(|handler| {
            let user = Arc::clone(&current_user);
            let success = handlers.login_success;
            let failure = handlers.login_failure;
            let op = OpFn::arc(move |(email, password): (String, String), _ctx: CancellationToken| {
                handler(email, password)
            });
            AsyncRunner::manual(
                op,
                RunnerOptions::new()
                    .with_cancelable(false)
                    .with_on_success(move |logged_in: &U| {
                        *user.lock() = Some(logged_in.clone());
                        if let Some(cb) = &success {
                            cb(logged_in);
                        }
                    })
                    .with_on_error(move |err| {
                        if let Some(cb) = &failure {
                            cb(err);
                        }
                    }),
            )
        });

        let register_runner = handlers.register.map(|handler| {
            let success = handlers.register_success;
            let failure = handlers.register_failure;
            let op = OpFn::arc(move |payload: U, _ctx: CancellationToken| handler(payload));
            AsyncRunner::manual(
                op,
                RunnerOptions::new()
                    .with_cancelable(false)
                    .with_on_success(move |registered: &U| {
                        if let Some(cb) = &success {
                            cb(registered);
                        }
                    })
                    .with_on_error(move |err| {
                        if let Some(cb) = &failure {
                            cb(err);
                        }
                    }),
            )
        });

        let reset_runner = handlers.reset_password.map(|handler| {
            let success = handlers.reset_success;
            let failure = handlers.reset_failure;
            let op = OpFn::arc(move |email: String, _ctx: CancellationToken| handler(email));
            AsyncRunner::manual(
                op,
                RunnerOptions::new()
                    .with_cancelable(false)
                    .with_on_success(move |(): &()| {
                        if let Some(cb) = &success {
                            cb();
                        }
                    })
                    .with_on_error(move |err| {
                        if let Some(cb) = &failure {
                            cb(err);
                        }
                    }),
            )
        });

        Self {
            current_user,
            login_runner,
            register_runner,
            reset_runner,
            logout_handler: handlers.logout,
        }
    }

    /// Starts a login attempt.
    ///
    /// # Errors
    /// [`HookError::MissingHandler`] when no login handler is configured.
    pub fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), HookError> {
        match &self.login_runner {
            None => Err(HookError::MissingHandler { handler: "login" }),
            Some(runner) => runner.run((email.into(), password.into())),
        }
    }

    /// Starts a registration attempt.
    ///
    /// # Errors
    /// [`HookError::MissingHandler`] when no register handler is configured.
    pub fn register(&self, payload: U) -> Result<(), HookError> {
        match &self.register_runner {
            None => Err(HookError::MissingHandler { handler: "register" }),
            Some(runner) => runner.run(payload),
        }
    }

    /// Starts a password reset.
    ///
    /// # Errors
    /// [`HookError::MissingHandler`] when no reset handler is configured.
    pub fn reset_password(&self, email: impl Into<String>) -> Result<(), HookError> {
        match &self.reset_runner {
            None => Err(HookError::MissingHandler {
                handler: "resetPassword",
            }),
            Some(runner) => runner.run(email.into()),
        }
    }

    /// Clears the current user and invokes the logout handler, if any.
    pub fn logout(&self) {
        debug!("auth scope logout");
        *self.current_user.lock() = None;
        if let Some(handler) = &self.logout_handler {
            handler();
        }
    }

    /// Returns the current user, if any.
    pub fn current_user(&self) -> Option<U> {
        self.current_user.lock().clone()
    }

    /// Status of the login runner, when a login handler is configured.
    pub fn login_status(&self) -> Option<AsyncStatus> {
        self.login_runner.as_ref().map(AsyncRunner::status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct User {
        email: String,
    }

    fn login_ok(email: String, _password: String) -> AuthFuture<User> {
        Box::pin(async move { Ok(User { email }) })
    }

    #[tokio::test(start_paused = true)]
    async fn successful_login_stores_the_current_user() {
        let scope = AuthScope::new(AuthHandlers::new().with_login(login_ok), None);
        assert_eq!(scope.current_user(), None);

        scope.login("ada@example.com", "pw").expect("login starts");
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(
            scope.current_user(),
            Some(User {
                email: "ada@example.com".to_string()
            })
        );
        assert_eq!(scope.login_status(), Some(AsyncStatus::Fulfilled));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_login_reports_through_the_failure_callback() {
        let failures = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&failures);
        let handlers = AuthHandlers::<User>::new()
            .with_login(|_, _| Box::pin(async { Err(RunError::fail("bad credentials")) }))
            .on_login_failure(move |_| {
                sink.fetch_add(1, Ordering::SeqCst);
            });

        let scope = AuthScope::new(handlers, None);
        scope.login("ada@example.com", "nope").expect("login starts");
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(failures.load(Ordering::SeqCst), 1);
        assert_eq!(scope.current_user(), None);
        assert_eq!(scope.login_status(), Some(AsyncStatus::Rejected));
    }

    #[tokio::test(start_paused = true)]
    async fn actions_without_handlers_fail_fast() {
        let scope: AuthScope<User> = AuthScope::new(AuthHandlers::new(), None);

        assert!(matches!(
            scope.login("a@b.c", "pw"),
            Err(HookError::MissingHandler { handler: "login" })
        ));
        assert!(matches!(
            scope.register(User {
                email: "a@b.c".to_string()
            }),
            Err(HookError::MissingHandler { handler: "register" })
        ));
        assert!(matches!(
            scope.reset_password("a@b.c"),
            Err(HookError::MissingHandler {
                handler: "resetPassword"
            })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn logout_clears_the_user_and_calls_the_handler() {
        let logouts = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&logouts);
        let handlers = AuthHandlers::new().with_login(login_ok).on_logout(move || {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        let scope = AuthScope::new(
            handlers,
            Some(User {
                email: "ada@example.com".to_string(),
            }),
        );

        scope.logout();
        assert_eq!(scope.current_user(), None);
        assert_eq!(logouts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn register_invokes_its_success_callback() {
        let registered = Arc::new(Mutex::new(None::<User>));
        let sink = Arc::clone(&registered);
        let handlers = AuthHandlers::new()
            .with_register(|payload: User| Box::pin(async move { Ok(payload) }))
            .on_register_success(move |user: &User| {
                *sink.lock() = Some(user.clone());
            });

        let scope = AuthScope::new(handlers, None);
        scope
            .register(User {
                email: "new@example.com".to_string(),
            })
            .expect("register starts");
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(
            registered.lock().as_ref().map(|u| u.email.clone()),
            Some("new@example.com".to_string())
        );
        // Registration alone does not authenticate.
        assert_eq!(scope.current_user(), None);
    }
}
