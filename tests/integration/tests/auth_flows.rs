//! Login, registration, and silent-restore flows.

use std::sync::Arc;

use ong_client::{ApiConfig, AuthClient, AuthError};
use ong_model::{routes, RegisterRequest, Role};
use ong_session::{SessionConfig, SessionManager, SessionState};
use ong_store::{CredentialStore, FileCredentialStore};

use crate::common::{ong_user, TestBackend};

fn session_config(backend: &TestBackend, store_path: &std::path::Path) -> SessionConfig {
    SessionConfig {
        api: backend.api_config(),
        store_path: Some(store_path.to_path_buf()),
        ..SessionConfig::default()
    }
}

fn manager_for(
    backend: &TestBackend,
    store: &Arc<FileCredentialStore>,
) -> Arc<SessionManager> {
    let config = session_config(backend, store.path());
    let auth = AuthClient::new(&config.api).unwrap();
    SessionManager::new(config, Arc::new(auth), Arc::clone(store) as Arc<dyn CredentialStore>)
}

#[tokio::test]
async fn login_persists_session_and_routes_by_role() {
    let backend = TestBackend::start().await;
    backend.add_account("a@b.com", "secret", ong_user("a@b.com"));

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileCredentialStore::open(dir.path().join("credentials.json")));
    let manager = manager_for(&backend, &store);
    manager.initialize().await;
    assert_eq!(manager.state(), SessionState::Anonymous);

    let session = manager.login("a@b.com", "secret").await.unwrap();

    assert_eq!(session.user.email, "a@b.com");
    assert_eq!(session.default_route(), routes::PROJECTS);
    assert_eq!(manager.default_route(), routes::PROJECTS);
    assert_eq!(store.access_token(), Some(session.access_token.clone()));
    assert_eq!(store.refresh_token(), session.refresh_token);
    assert_eq!(store.user().map(|u| u.email), Some("a@b.com".to_string()));
}

#[tokio::test]
async fn wrong_password_is_surfaced_and_changes_nothing() {
    let backend = TestBackend::start().await;
    backend.add_account("a@b.com", "secret", ong_user("a@b.com"));

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileCredentialStore::open(dir.path().join("credentials.json")));
    let manager = manager_for(&backend, &store);
    manager.initialize().await;

    let err = manager.login("a@b.com", "wrong").await.unwrap_err();

    match err {
        AuthError::Rejected { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert_eq!(manager.state(), SessionState::Anonymous);
    assert_eq!(store.access_token(), None);
}

#[tokio::test]
async fn registration_creates_an_authenticated_ong_session() {
    let backend = TestBackend::start().await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileCredentialStore::open(dir.path().join("credentials.json")));
    let manager = manager_for(&backend, &store);
    manager.initialize().await;

    let request = RegisterRequest::new("Ada", "Lovelace", "ada@b.com", "pw");
    let session = manager.register(&request).await.unwrap();

    assert!(session.user.has_role(Role::Ong));
    assert_eq!(session.default_route(), routes::PROJECTS);
    assert!(manager.state().is_authenticated());

    // The account is usable for a normal login afterwards.
    let again = manager.login("ada@b.com", "pw").await.unwrap();
    assert_eq!(again.user.email, "ada@b.com");
}

#[tokio::test]
async fn session_survives_a_restart_via_refresh() {
    let backend = TestBackend::start().await;
    backend.add_account("a@b.com", "secret", ong_user("a@b.com"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");

    let first_token = {
        let store = Arc::new(FileCredentialStore::open(&path));
        let manager = manager_for(&backend, &store);
        manager.initialize().await;
        manager.login("a@b.com", "secret").await.unwrap().access_token
    };

    // "Restart": a fresh store and manager over the same credential file.
    let store = Arc::new(FileCredentialStore::open(&path));
    let manager = manager_for(&backend, &store);
    manager.initialize().await;

    let state = manager.state();
    let session = state.session().expect("session restored");
    assert_eq!(session.user.email, "a@b.com");
    // The restore minted a fresh access token through /auth/refresh.
    assert_ne!(session.access_token, first_token);
    assert_eq!(store.access_token(), Some(session.access_token.clone()));
}

#[tokio::test]
async fn restore_survives_an_unreachable_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    {
        let seeded = FileCredentialStore::open(&path);
        seeded.save_access_token("cached-tok");
        seeded.save_refresh_token("cached-ref");
        seeded.save_user(&ong_user("a@b.com"));
    }

    // Nothing listens on the discard port; the refresh attempt fails with a
    // connection error, not a rejection.
    let config = SessionConfig {
        api: ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
        },
        store_path: Some(path.clone()),
        ..SessionConfig::default()
    };
    let store = Arc::new(FileCredentialStore::open(&path));
    let auth = AuthClient::new(&config.api).unwrap();
    let manager = SessionManager::new(
        config,
        Arc::new(auth),
        Arc::clone(&store) as Arc<dyn CredentialStore>,
    );
    manager.initialize().await;

    let state = manager.state();
    let session = state.session().expect("cached session survives the outage");
    assert_eq!(session.access_token, "cached-tok");
    assert_eq!(session.user.email, "a@b.com");
    assert_eq!(store.refresh_token(), Some("cached-ref".to_string()));
}

#[tokio::test]
async fn empty_store_restores_anonymous() {
    let backend = TestBackend::start().await;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileCredentialStore::open(dir.path().join("credentials.json")));
    let manager = manager_for(&backend, &store);

    manager.initialize().await;

    let state = manager.state();
    assert!(!state.is_loading());
    assert_eq!(state, SessionState::Anonymous);
    assert_eq!(manager.access_token(), None);
}
