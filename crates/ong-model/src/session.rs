//! In-memory session and auth wire types.

use serde::{Deserialize, Serialize};

use crate::role;
use crate::user::AuthUser;

/// An authenticated session.
///
/// Held in memory only; reconstructed from persisted credentials on startup.
/// A `Session` exists iff an access token is held, so the "user is non-null
/// iff a valid access token is held" invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The authenticated user.
    pub user: AuthUser,
    /// Opaque bearer credential for protected endpoints.
    pub access_token: String,
    /// Opaque credential used to mint a new access token.
    pub refresh_token: Option<String>,
}

impl Session {
    /// The default landing route for this session's role set.
    #[must_use]
    pub fn default_route(&self) -> &'static str {
        role::default_route(&self.user.roles)
    }
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Self {
            user: response.user,
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        }
    }
}

/// Successful response from the auth endpoints.
///
/// Some backend revisions name the access token field `token`; both spellings
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer access token.
    #[serde(alias = "token")]
    pub access_token: String,
    /// Refresh token, when the backend issues one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// The authenticated user.
    pub user: AuthUser,
}

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Plain-text password, forwarded to the backend over TLS.
    pub password: String,
}

impl RegisterRequest {
    /// Creates a registration payload.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}
