//! Common test utilities: a stub backend over real HTTP.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use ong_client::ApiConfig;
use ong_model::{AuthUser, Role};
use serde_json::{json, Value};

/// A stub ong-console backend bound to an ephemeral local port.
pub struct TestBackend {
    /// Base URL for client configuration.
    pub base_url: String,
    state: Arc<BackendState>,
}

#[derive(Default)]
struct BackendState {
    counter: AtomicU32,
    accounts: Mutex<HashMap<String, (String, AuthUser)>>,
    access_tokens: Mutex<HashSet<String>>,
    refresh_tokens: Mutex<HashMap<String, AuthUser>>,
}

impl TestBackend {
    /// Starts the stub backend.
    pub async fn start() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("ong_session=debug,ong_client=debug")
            .try_init();

        let state = Arc::new(BackendState::default());
        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/register", post(register))
            .route("/auth/refresh", post(refresh))
            .route("/projects", get(projects))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub backend");
        });

        Self { base_url, state }
    }

    /// Client configuration pointing at this backend.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::with_base_url(&self.base_url)
    }

    /// Registers a valid account.
    pub fn add_account(&self, email: &str, password: &str, user: AuthUser) {
        self.state
            .accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), user));
    }

    /// Invalidates every issued token; subsequent protected calls get 401
    /// and refresh attempts are rejected.
    pub fn revoke_all_tokens(&self) {
        self.state.access_tokens.lock().unwrap().clear();
        self.state.refresh_tokens.lock().unwrap().clear();
    }
}

/// A ready-made ONG user fixture.
pub fn ong_user(email: &str) -> AuthUser {
    AuthUser::new("u-1", email, "Ada", "Lovelace").with_roles([Role::Ong])
}

impl BackendState {
    fn mint(&self, user: &AuthUser) -> Value {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let access = format!("it-access-{n}");
        let refresh = format!("it-refresh-{n}");

        self.access_tokens.lock().unwrap().insert(access.clone());
        self.refresh_tokens
            .lock()
            .unwrap()
            .insert(refresh.clone(), user.clone());

        json!({
            "accessToken": access,
            "refreshToken": refresh,
            "user": serde_json::to_value(user).unwrap(),
        })
    }
}

fn rejection(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "message": message, "statusCode": status.as_u16() })),
    )
        .into_response()
}

async fn login(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let minted = {
        let accounts = state.accounts.lock().unwrap();
        match accounts.get(email) {
            Some((expected, user)) if expected == password => Some(user.clone()),
            _ => None,
        }
    };

    match minted {
        Some(user) => Json(state.mint(&user)).into_response(),
        None => rejection(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    }
}

async fn register(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();

    {
        let accounts = state.accounts.lock().unwrap();
        if accounts.contains_key(&email) {
            return rejection(StatusCode::CONFLICT, "Email already registered");
        }
    }

    let user = AuthUser::new(
        format!("u-reg-{email}"),
        email.clone(),
        body["firstName"].as_str().unwrap_or_default(),
        body["lastName"].as_str().unwrap_or_default(),
    )
    .with_roles([Role::Ong]);

    state
        .accounts
        .lock()
        .unwrap()
        .insert(email, (password, user.clone()));
    Json(state.mint(&user)).into_response()
}

async fn refresh(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    let token = body["refreshToken"].as_str().unwrap_or_default();

    let user = state.refresh_tokens.lock().unwrap().get(token).cloned();
    match user {
        Some(user) => Json(state.mint(&user)).into_response(),
        None => rejection(StatusCode::UNAUTHORIZED, "Refresh token rejected"),
    }
}

async fn projects(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    let bearer = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let valid = bearer
        .map(|token| state.access_tokens.lock().unwrap().contains(token))
        .unwrap_or(false);

    if valid {
        Json(json!([{ "id": "p-1", "name": "Reforestación" }])).into_response()
    } else {
        rejection(StatusCode::UNAUTHORIZED, "Invalid token")
    }
}
