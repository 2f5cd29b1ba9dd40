//! # ong-session
//!
//! Session lifecycle management for ong-console.
//!
//! The [`SessionManager`] composes the credential store, the auth client,
//! and the role policy into one injected service that owns the session
//! state machine:
//!
//! ```text
//! Uninitialized -> Restoring -> { Authenticated, Anonymous }
//! Authenticated -> Authenticated   (silent refresh)
//! Authenticated -> Anonymous       (logout, forced sign-out)
//! ```
//!
//! Consumers observe the state through a watch channel (see
//! [`SessionManager::subscribe`]) so route guards re-evaluate promptly when
//! the session changes underneath them.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod config;
pub mod manager;
pub mod state;

pub use config::{ConfigError, SessionConfig};
pub use manager::SessionManager;
pub use state::SessionState;
