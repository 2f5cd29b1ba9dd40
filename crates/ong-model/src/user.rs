//! Authenticated user model.

use serde::{Deserialize, Serialize};

use crate::role::{self, Role, RoleId};

/// The user attached to an authenticated session.
///
/// Mirrors the JSON shape the backend returns from the auth endpoints.
/// Identifiers are opaque strings; `roles` carries raw role identifiers,
/// which may include values this front end does not recognize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// Opaque user identifier.
    pub id: String,
    /// Email address used to sign in.
    pub email: String,
    /// First name.
    #[serde(default)]
    pub first_name: String,
    /// Last name.
    #[serde(default)]
    pub last_name: String,
    /// Role identifiers held by this user.
    #[serde(default)]
    pub roles: Vec<RoleId>,
}

impl AuthUser {
    /// Creates a user with no roles.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            roles: Vec::new(),
        }
    }

    /// Sets the role identifiers.
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = roles.into_iter().map(Role::id).collect();
        self
    }

    /// Checks whether this user holds a specific role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        role::has_role(&self.roles, role)
    }

    /// Checks whether this user holds any of the given roles.
    #[must_use]
    pub fn has_any_role(&self, targets: &[Role]) -> bool {
        role::has_any_role(&self.roles, targets)
    }

    /// Comma-joined labels of this user's recognized roles.
    #[must_use]
    pub fn display_name(&self) -> String {
        role::display_name(&self.roles)
    }
}
