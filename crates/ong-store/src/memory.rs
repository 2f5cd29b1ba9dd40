//! In-memory credential store.

use ong_model::AuthUser;
use parking_lot::Mutex;

use crate::{CredentialRecord, CredentialStore};

/// Process-local credential store.
///
/// Used by tests and by deployments that deliberately forget the session on
/// restart (equivalent to disabled browser storage).
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    record: Mutex<CredentialRecord>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a record.
    #[must_use]
    pub fn with_record(record: CredentialRecord) -> Self {
        Self {
            record: Mutex::new(record),
        }
    }

    /// Snapshot of the current record.
    #[must_use]
    pub fn record(&self) -> CredentialRecord {
        self.record.lock().clone()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save_access_token(&self, token: &str) {
        self.record.lock().access_token = Some(token.to_string());
    }

    fn access_token(&self) -> Option<String> {
        self.record.lock().access_token.clone()
    }

    fn clear_access_token(&self) {
        self.record.lock().access_token = None;
    }

    fn save_refresh_token(&self, token: &str) {
        self.record.lock().refresh_token = Some(token.to_string());
    }

    fn refresh_token(&self) -> Option<String> {
        self.record.lock().refresh_token.clone()
    }

    fn clear_refresh_token(&self) {
        self.record.lock().refresh_token = None;
    }

    fn save_user(&self, user: &AuthUser) {
        self.record.lock().user = Some(user.clone());
    }

    fn user(&self) -> Option<AuthUser> {
        self.record.lock().user.clone()
    }

    fn clear_user(&self) {
        self.record.lock().user = None;
    }

    fn clear(&self) {
        *self.record.lock() = CredentialRecord::default();
    }
}
