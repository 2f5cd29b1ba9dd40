//! The session manager.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ong_client::{AuthApi, AuthClient, AuthError, AuthResult};
use ong_model::{AuthResponse, RegisterRequest, Session};
use ong_store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::SessionConfig;
use crate::state::SessionState;

/// Owns the session lifecycle.
///
/// Construct one per process (or per test) with an injected auth client and
/// credential store; there are no globals. The manager publishes every state
/// transition on a watch channel so guards and pages can react.
///
/// Explicit `login`/`register` calls are not reentrant-safe; callers must
/// serialize them (e.g. disable the submit button while one is pending).
pub struct SessionManager {
    config: SessionConfig,
    auth: Arc<dyn AuthApi>,
    store: Arc<dyn CredentialStore>,
    state_tx: watch::Sender<SessionState>,
    restore_started: AtomicBool,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl SessionManager {
    /// Creates a manager with injected collaborators.
    #[must_use]
    pub fn new(
        config: SessionConfig,
        auth: Arc<dyn AuthApi>,
        store: Arc<dyn CredentialStore>,
    ) -> Arc<Self> {
        let (state_tx, _) = watch::channel(SessionState::Uninitialized);
        Arc::new(Self {
            config,
            auth,
            store,
            state_tx,
            restore_started: AtomicBool::new(false),
            refresh_task: Mutex::new(None),
        })
    }

    /// Creates a manager wired to the real HTTP client and the store named
    /// by the configuration (file-backed when `store_path` is set, else
    /// in-memory).
    ///
    /// # Errors
    ///
    /// `AuthError::Transport` when the HTTP client cannot be constructed.
    pub fn from_config(config: SessionConfig) -> AuthResult<Arc<Self>> {
        let auth: Arc<dyn AuthApi> = Arc::new(AuthClient::new(&config.api)?);
        let store: Arc<dyn CredentialStore> = match &config.store_path {
            Some(path) => Arc::new(FileCredentialStore::open(path)),
            None => Arc::new(MemoryCredentialStore::new()),
        };
        Ok(Self::new(config, auth, store))
    }

    /// Runs the one-time silent restore.
    ///
    /// Enters `Restoring`, resolves to `Authenticated` or `Anonymous`, and
    /// starts the periodic refresh task when the restored session carries a
    /// refresh token. Always completes; subsequent calls are no-ops. Guards
    /// observing the watch channel render nothing until this resolves.
    pub async fn initialize(self: &Arc<Self>) {
        if self.restore_started.swap(true, Ordering::SeqCst) {
            return;
        }

        self.state_tx.send_replace(SessionState::Restoring);
        let next = self.restore().await;
        let refreshable = next
            .session()
            .is_some_and(|session| session.refresh_token.is_some());
        self.state_tx.send_replace(next);

        if refreshable {
            self.spawn_refresh_task();
        }
    }

    async fn restore(&self) -> SessionState {
        if let Some(refresh_token) = self.store.refresh_token() {
            match self.auth.refresh(Some(&refresh_token)).await {
                Ok(response) => {
                    tracing::debug!("session restored via refresh token");
                    return SessionState::Authenticated(self.persist(response));
                }
                Err(err) if err.is_transport() => {
                    // Connectivity trouble is not a rejection; fall back to
                    // the cached credentials below.
                    tracing::warn!(%err, "restore refresh unreachable");
                }
                Err(err) => {
                    tracing::info!(%err, "stored refresh token rejected");
                    self.store.clear();
                    return SessionState::Anonymous;
                }
            }
        }

        match (self.store.access_token(), self.store.user()) {
            (Some(access_token), Some(user)) => {
                tracing::debug!("session restored from cached credentials");
                SessionState::Authenticated(Session {
                    user,
                    access_token,
                    refresh_token: self.store.refresh_token(),
                })
            }
            _ => SessionState::Anonymous,
        }
    }

    /// Exchanges credentials for a session.
    ///
    /// On success the credentials are persisted and the state becomes
    /// `Authenticated`. On failure the state and the store are untouched and
    /// the error propagates; nothing is retried.
    ///
    /// # Errors
    ///
    /// `AuthError::Rejected` or `AuthError::Transport` from the auth client.
    pub async fn login(self: &Arc<Self>, email: &str, password: &str) -> AuthResult<Session> {
        let response = self.auth.login(email, password).await?;
        tracing::info!(%email, "login succeeded");
        Ok(self.enter_session(response))
    }

    /// Registers a new account. Symmetric to [`login`](Self::login).
    ///
    /// # Errors
    ///
    /// Same contract as `login`.
    pub async fn register(self: &Arc<Self>, request: &RegisterRequest) -> AuthResult<Session> {
        let response = self.auth.register(request).await?;
        tracing::info!(email = %request.email, "registration succeeded");
        Ok(self.enter_session(response))
    }

    /// Clears the persisted credentials and transitions to `Anonymous`.
    ///
    /// Never fails; idempotent; stops the refresh task.
    pub fn logout(&self) {
        self.stop_refresh_task();
        self.store.clear();
        self.state_tx.send_replace(SessionState::Anonymous);
        tracing::info!("logged out");
    }

    /// Forced sign-out: the backend rejected our credentials mid-session.
    ///
    /// Same clearing as [`logout`](Self::logout); guards watching the state
    /// return the visitor to the landing page without an error dialog.
    pub fn force_sign_out(&self) {
        self.stop_refresh_task();
        self.store.clear();
        self.state_tx.send_replace(SessionState::Anonymous);
        tracing::warn!("forced sign-out: credentials rejected by backend");
    }

    /// Routes a domain API error through the forced sign-out contract.
    ///
    /// Every call site issuing bearer-authenticated requests must hand 401s
    /// here; other errors are left for the caller to surface.
    pub fn observe_api_error(&self, err: &AuthError) {
        if err.is_unauthorized() {
            self.force_sign_out();
        }
    }

    /// Subscribes to session state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// The current bearer token, if authenticated.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.state()
            .session()
            .map(|session| session.access_token.clone())
    }

    /// The default landing route for the current state.
    #[must_use]
    pub fn default_route(&self) -> &'static str {
        self.state().default_route()
    }

    fn enter_session(self: &Arc<Self>, response: AuthResponse) -> Session {
        let session = self.persist(response);
        self.state_tx
            .send_replace(SessionState::Authenticated(session.clone()));
        if session.refresh_token.is_some() {
            self.spawn_refresh_task();
        }
        session
    }

    /// Persists a fresh auth response and returns the session it carries.
    fn persist(&self, response: AuthResponse) -> Session {
        self.store.save_access_token(&response.access_token);
        match &response.refresh_token {
            Some(token) => self.store.save_refresh_token(token),
            None => self.store.clear_refresh_token(),
        }
        self.store.save_user(&response.user);
        Session::from(response)
    }

    fn spawn_refresh_task(self: &Arc<Self>) {
        let mut slot = self.refresh_task.lock();
        if slot.is_some() {
            return;
        }

        let manager = Arc::downgrade(self);
        let period = self.config.refresh_interval();
        let handle = tokio::spawn(async move {
            // Skip the immediate tick; the session was just minted.
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                ticker.tick().await;
                let Some(manager) = manager.upgrade() else {
                    break;
                };
                manager.refresh_once().await;
            }
        });
        *slot = Some(handle);
    }

    fn stop_refresh_task(&self) {
        if let Some(handle) = self.refresh_task.lock().take() {
            handle.abort();
        }
    }

    async fn refresh_once(&self) {
        // Without a refresh token there is nothing to present; only a
        // backend rejection may end the session.
        let Some(refresh_token) = self.store.refresh_token() else {
            return;
        };
        match self.auth.refresh(Some(&refresh_token)).await {
            Ok(response) => {
                let session = self.persist(response);
                self.state_tx
                    .send_replace(SessionState::Authenticated(session));
                tracing::debug!("silent refresh succeeded");
            }
            Err(err) if err.is_transport() => {
                // Retry on the next tick; connectivity is not a rejection.
                tracing::warn!(%err, "silent refresh unreachable");
            }
            Err(err) => {
                tracing::warn!(%err, "silent refresh rejected");
                self.force_sign_out();
            }
        }
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.stop_refresh_task();
    }
}
