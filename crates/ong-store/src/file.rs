//! File-backed credential store.

use std::fs;
use std::path::{Path, PathBuf};

use ong_model::AuthUser;
use parking_lot::Mutex;

use crate::{CredentialRecord, CredentialStore};

/// Credential store persisting a single JSON record on disk.
///
/// The record is kept in memory and rewritten on every mutation via a
/// temp-file rename, so readers never observe a partially written file.
/// IO failures are logged and swallowed per the store contract; a missing or
/// malformed file reads as an empty record.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    record: Mutex<CredentialRecord>,
}

impl FileCredentialStore {
    /// Opens a store backed by the given file, loading any existing record.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let record = load_record(&path);
        Self {
            path,
            record: Mutex::new(record),
        }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mutate(&self, apply: impl FnOnce(&mut CredentialRecord)) {
        let mut record = self.record.lock();
        apply(&mut record);
        persist_record(&self.path, &record);
    }
}

fn load_record(path: &Path) -> CredentialRecord {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), %err, "failed to read credential file");
            }
            return CredentialRecord::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "malformed credential file, ignoring");
            CredentialRecord::default()
        }
    }
}

fn persist_record(path: &Path, record: &CredentialRecord) {
    let json = match serde_json::to_string_pretty(record) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!(%err, "failed to serialize credential record");
            return;
        }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), %err, "failed to create credential dir");
                return;
            }
        }
    }

    // Write-then-rename keeps the record atomic on the filesystem.
    let tmp = path.with_extension("tmp");
    if let Err(err) = fs::write(&tmp, json) {
        tracing::warn!(path = %tmp.display(), %err, "failed to write credential file");
        return;
    }
    if let Err(err) = fs::rename(&tmp, path) {
        tracing::warn!(path = %path.display(), %err, "failed to replace credential file");
    }
}

impl CredentialStore for FileCredentialStore {
    fn save_access_token(&self, token: &str) {
        self.mutate(|record| record.access_token = Some(token.to_string()));
    }

    fn access_token(&self) -> Option<String> {
        self.record.lock().access_token.clone()
    }

    fn clear_access_token(&self) {
        self.mutate(|record| record.access_token = None);
    }

    fn save_refresh_token(&self, token: &str) {
        self.mutate(|record| record.refresh_token = Some(token.to_string()));
    }

    fn refresh_token(&self) -> Option<String> {
        self.record.lock().refresh_token.clone()
    }

    fn clear_refresh_token(&self) {
        self.mutate(|record| record.refresh_token = None);
    }

    fn save_user(&self, user: &AuthUser) {
        self.mutate(|record| record.user = Some(user.clone()));
    }

    fn user(&self) -> Option<AuthUser> {
        self.record.lock().user.clone()
    }

    fn clear_user(&self) {
        self.mutate(|record| record.user = None);
    }

    fn clear(&self) {
        self.mutate(|record| *record = CredentialRecord::default());
    }
}
