//! # ong-model
//!
//! Domain models for the ong-console session core.
//!
//! This crate defines the user, role, and session types shared by the
//! credential store, the auth client, the session manager, and the route
//! guard, together with the pure role-policy functions.
//!
//! ## Modules
//!
//! - [`user`] - The authenticated user model.
//! - [`role`] - Role enumeration, role policy, and route constants.
//! - [`session`] - In-memory session and auth wire types.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod role;
pub mod session;
pub mod user;

pub use role::{default_route, display_name, has_any_role, has_role, routes, Role, RoleId};
pub use session::{AuthResponse, RegisterRequest, Session};
pub use user::AuthUser;
