//! Auth endpoint client.

use async_trait::async_trait;
use ong_model::{AuthResponse, RegisterRequest};
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::{error_message, AuthError, AuthResult};

/// The auth endpoint seam.
///
/// The session manager depends on this trait rather than on a concrete HTTP
/// client so it can be exercised without a network (see
/// [`SimpleAuthApi`](crate::SimpleAuthApi)).
///
/// Implementations have no persistence side effects; storing the returned
/// credentials is the caller's responsibility.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a session.
    ///
    /// # Errors
    ///
    /// `AuthError::Rejected` for a non-2xx response, `AuthError::Transport`
    /// when no response was received.
    async fn login(&self, email: &str, password: &str) -> AuthResult<AuthResponse>;

    /// Registers a new account. Same error contract as `login`.
    async fn register(&self, request: &RegisterRequest) -> AuthResult<AuthResponse>;

    /// Mints a fresh session from a refresh token.
    ///
    /// # Errors
    ///
    /// `AuthError::Rejected` with status 401, synthesized locally without a
    /// network call, when `refresh_token` is `None`.
    async fn refresh(&self, refresh_token: Option<&str>) -> AuthResult<AuthResponse>;
}

/// HTTP implementation of [`AuthApi`].
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

impl AuthClient {
    /// Creates a client for the configured backend.
    ///
    /// # Errors
    ///
    /// `AuthError::Transport` when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &ApiConfig) -> AuthResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    async fn post_auth<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> AuthResult<AuthResponse> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "auth request");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AuthError::Rejected {
                status: status.as_u16(),
                message: error_message(status, &body),
            })
        }
    }
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, email: &str, password: &str) -> AuthResult<AuthResponse> {
        self.post_auth("/auth/login", &LoginRequest { email, password })
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> AuthResult<AuthResponse> {
        self.post_auth("/auth/register", request).await
    }

    async fn refresh(&self, refresh_token: Option<&str>) -> AuthResult<AuthResponse> {
        let Some(token) = refresh_token else {
            return Err(AuthError::Rejected {
                status: 401,
                message: "No refresh token".to_string(),
            });
        };

        self.post_auth("/auth/refresh", &RefreshRequest { refresh_token: token })
            .await
    }
}
