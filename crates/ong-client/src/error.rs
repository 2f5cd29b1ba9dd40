//! Client error taxonomy.
//!
//! Call sites discriminate on the variant, never on downcasting: a rejected
//! auth attempt is surfaced to the user, a 401 from a protected endpoint
//! forces a sign-out, and a transport failure is reported as connectivity
//! trouble. The variants are deliberately distinct so the three are never
//! conflated.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors produced by the REST clients.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend answered an auth endpoint with a non-2xx status.
    ///
    /// The message comes from the response body's `message` field when one
    /// is present, else from the HTTP status line.
    #[error("{message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Human-readable message for the user.
        message: String,
    },

    /// A protected endpoint rejected the bearer credential (HTTP 401).
    ///
    /// Call sites must report this to the session manager, which clears the
    /// persisted credentials and returns the visitor to the landing page.
    #[error("session credentials rejected")]
    Unauthorized,

    /// No response was received (connection, DNS, timeout).
    #[error("connection error: {0}")]
    Transport(String),

    /// A 2xx response carried a body the client could not decode.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl AuthError {
    /// The HTTP status associated with this error, when there is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            Self::Transport(_) | Self::InvalidResponse(_) => None,
        }
    }

    /// True for a 401 from a protected endpoint (forced sign-out trigger).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// True for connectivity failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Result type for client operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Error body shape the backend uses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    #[allow(dead_code)]
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
    #[allow(dead_code)]
    pub error: Option<String>,
}

/// Extracts a user-facing message from a non-2xx response body.
///
/// Falls back to `"Error {status}: {reason}"` when the body is not the
/// expected JSON shape.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message {
            return message;
        }
    }
    format!(
        "Error {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}
