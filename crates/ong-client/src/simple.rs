//! In-memory auth backend for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use ong_model::{AuthResponse, AuthUser, RegisterRequest, Role};
use parking_lot::Mutex;

use crate::auth::AuthApi;
use crate::error::{AuthError, AuthResult};

/// Simple in-memory [`AuthApi`] implementation.
///
/// Holds predefined accounts and refresh tokens; registration creates an
/// ONG account with deterministic tokens. Use it to exercise the session
/// manager without a real backend.
#[derive(Debug, Default)]
pub struct SimpleAuthApi {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    refresh_tokens: HashMap<String, AuthResponse>,
    next_id: u32,
    offline: bool,
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    response: AuthResponse,
}

impl SimpleAuthApi {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid account.
    pub fn add_account(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
        response: AuthResponse,
    ) {
        let mut inner = self.inner.lock();
        let email = email.into();
        if let Some(refresh) = &response.refresh_token {
            inner.refresh_tokens.insert(refresh.clone(), response.clone());
        }
        inner.accounts.insert(
            email,
            Account {
                password: password.into(),
                response,
            },
        );
    }

    /// Invalidates a refresh token so subsequent refresh calls are rejected.
    pub fn revoke_refresh_token(&self, token: &str) {
        self.inner.lock().refresh_tokens.remove(token);
    }

    /// Simulates a connectivity outage: while set, every network-backed call
    /// returns a transport error instead of an answer.
    pub fn set_offline(&self, offline: bool) {
        self.inner.lock().offline = offline;
    }
}

fn offline_error() -> AuthError {
    AuthError::Transport("backend offline".to_string())
}

#[async_trait]
impl AuthApi for SimpleAuthApi {
    async fn login(&self, email: &str, password: &str) -> AuthResult<AuthResponse> {
        let inner = self.inner.lock();
        if inner.offline {
            return Err(offline_error());
        }
        match inner.accounts.get(email) {
            Some(account) if account.password == password => Ok(account.response.clone()),
            _ => Err(AuthError::Rejected {
                status: 401,
                message: "Invalid credentials".to_string(),
            }),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> AuthResult<AuthResponse> {
        let mut inner = self.inner.lock();
        if inner.offline {
            return Err(offline_error());
        }
        if inner.accounts.contains_key(&request.email) {
            return Err(AuthError::Rejected {
                status: 409,
                message: "Email already registered".to_string(),
            });
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let response = AuthResponse {
            access_token: format!("access-{id}"),
            refresh_token: Some(format!("refresh-{id}")),
            user: AuthUser::new(
                format!("u-{id}"),
                request.email.clone(),
                request.first_name.clone(),
                request.last_name.clone(),
            )
            .with_roles([Role::Ong]),
        };

        if let Some(refresh) = &response.refresh_token {
            inner
                .refresh_tokens
                .insert(refresh.clone(), response.clone());
        }
        inner.accounts.insert(
            request.email.clone(),
            Account {
                password: request.password.clone(),
                response: response.clone(),
            },
        );

        Ok(response)
    }

    async fn refresh(&self, refresh_token: Option<&str>) -> AuthResult<AuthResponse> {
        let Some(token) = refresh_token else {
            return Err(AuthError::Rejected {
                status: 401,
                message: "No refresh token".to_string(),
            });
        };

        let inner = self.inner.lock();
        if inner.offline {
            return Err(offline_error());
        }
        inner
            .refresh_tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::Rejected {
                status: 401,
                message: "Refresh token rejected".to_string(),
            })
    }
}
