//! Bearer-authenticated domain API client.
//!
//! Used by the view layer to reach the projects, tasks, compromises,
//! observations, users, and KPI endpoints. The only session-core concern
//! here is the cross-cutting 401 contract: a 401 from any protected call is
//! returned as [`AuthError::Unauthorized`] so the call site can hand it to
//! the session manager for forced sign-out.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::{error_message, AuthError, AuthResult};

/// HTTP client for protected backend endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
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

    /// Makes a GET request.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> AuthResult<T> {
        let request = self.client.get(self.url(path));
        handle_response(authorize(request, token).send().await?).await
    }

    /// Makes a POST request.
    pub async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> AuthResult<T> {
        let request = self.client.post(self.url(path)).json(body);
        handle_response(authorize(request, token).send().await?).await
    }

    /// Makes a PUT request, discarding the response body.
    pub async fn put<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> AuthResult<()> {
        let request = self.client.put(self.url(path)).json(body);
        handle_empty_response(authorize(request, token).send().await?).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> AuthResult<()> {
        let request = self.client.delete(self.url(path));
        handle_empty_response(authorize(request, token).send().await?).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

async fn check_status(response: reqwest::Response) -> AuthResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else if status == reqwest::StatusCode::UNAUTHORIZED {
        Err(AuthError::Unauthorized)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AuthError::Rejected {
            status: status.as_u16(),
            message: error_message(status, &body),
        })
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> AuthResult<T> {
    Ok(check_status(response).await?.json().await?)
}

async fn handle_empty_response(response: reqwest::Response) -> AuthResult<()> {
    check_status(response).await.map(|_| ())
}
