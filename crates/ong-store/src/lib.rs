//! # ong-store
//!
//! Credential persistence for the ong-console session core.
//!
//! The [`CredentialStore`] trait abstracts the durable key-value storage the
//! browser origin provided in the original platform. Implementations are
//! synchronous, best-effort, and never fail: a storage problem degrades to
//! "no persisted session" instead of reaching the caller.
//!
//! ## Implementations
//!
//! - [`MemoryCredentialStore`] - process-local, for tests and ephemeral use.
//! - [`FileCredentialStore`] - a single JSON record on disk.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

mod file;
mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

use ong_model::AuthUser;
use serde::{Deserialize, Serialize};

/// The persisted credential record.
///
/// All fields are optional; an empty record means no session survives a
/// restart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Bearer access token.
    pub access_token: Option<String>,
    /// Refresh token.
    pub refresh_token: Option<String>,
    /// Cached user, kept so a session can be restored without decoding the
    /// access token.
    pub user: Option<AuthUser>,
}

impl CredentialRecord {
    /// True when nothing is persisted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.user.is_none()
    }
}

/// Durable persistence of credentials across process restarts.
///
/// Every operation is synchronous and infallible. Writes must be atomic per
/// key: a save and a concurrent clear may race, but a reader never observes
/// a torn value. Reads of missing or malformed data yield `None`.
pub trait CredentialStore: Send + Sync {
    /// Persists the access token.
    fn save_access_token(&self, token: &str);

    /// Reads the persisted access token.
    fn access_token(&self) -> Option<String>;

    /// Removes the persisted access token.
    fn clear_access_token(&self);

    /// Persists the refresh token.
    fn save_refresh_token(&self, token: &str);

    /// Reads the persisted refresh token.
    fn refresh_token(&self) -> Option<String>;

    /// Removes the persisted refresh token.
    fn clear_refresh_token(&self);

    /// Caches the user object.
    fn save_user(&self, user: &AuthUser);

    /// Reads the cached user.
    fn user(&self) -> Option<AuthUser>;

    /// Removes the cached user.
    fn clear_user(&self);

    /// Removes everything. Idempotent.
    fn clear(&self) {
        self.clear_access_token();
        self.clear_refresh_token();
        self.clear_user();
    }
}
