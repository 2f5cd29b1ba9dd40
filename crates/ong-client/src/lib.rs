//! # ong-client
//!
//! REST clients for the ong-console backend.
//!
//! This crate owns the wire-level concerns of the session core:
//!
//! - [`AuthApi`] - the auth endpoint seam (login, register, refresh).
//! - [`AuthClient`] - the HTTP implementation of [`AuthApi`].
//! - [`SimpleAuthApi`] - an in-memory implementation for tests.
//! - [`ApiClient`] - bearer-authenticated access to protected endpoints,
//!   carrying the cross-cutting 401 contract.
//! - [`AuthError`] - the typed failure taxonomy every call site matches on.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod simple;

pub use api::ApiClient;
pub use auth::{AuthApi, AuthClient};
pub use config::ApiConfig;
pub use error::{AuthError, AuthResult};
pub use simple::SimpleAuthApi;
