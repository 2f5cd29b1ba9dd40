//! Role enumeration and role policy.
//!
//! Users hold a set of raw integer role identifiers issued by the backend.
//! The closed [`Role`] enumeration covers the identifiers this front end
//! knows about; identifiers outside it still participate in membership
//! checks but are dropped from display names.

/// Raw role identifier as issued by the backend.
pub type RoleId = i32;

/// A role a user may hold.
///
/// Never serialized directly: the wire carries the integer identifiers, via
/// [`id`](Self::id) and [`from_id`](Self::from_id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Administrators: user management only.
    Admin,
    /// NGOs: create and manage projects.
    Ong,
    /// Organizations: create compromises for project tasks.
    Organization,
    /// Directors: read-only dashboard access.
    Director,
}

impl Role {
    /// All known roles, in default-route precedence order.
    pub const ALL: [Self; 4] = [Self::Admin, Self::Ong, Self::Organization, Self::Director];

    /// Returns the wire identifier for this role.
    #[must_use]
    pub const fn id(self) -> RoleId {
        match self {
            Self::Admin => 1,
            Self::Ong => 2,
            Self::Organization => 3,
            Self::Director => 4,
        }
    }

    /// Maps a wire identifier to a known role.
    #[must_use]
    pub const fn from_id(id: RoleId) -> Option<Self> {
        match id {
            1 => Some(Self::Admin),
            2 => Some(Self::Ong),
            3 => Some(Self::Organization),
            4 => Some(Self::Director),
            _ => None,
        }
    }

    /// Human-readable label, as displayed by the platform.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::Ong => "ONG",
            Self::Organization => "Organización",
            Self::Director => "Director",
        }
    }

    /// The landing page for a user whose highest-precedence role is this one.
    #[must_use]
    pub const fn home_route(self) -> &'static str {
        match self {
            Self::Admin => routes::USERS,
            Self::Ong => routes::PROJECTS,
            Self::Organization => routes::COMPROMISES,
            Self::Director => routes::DASHBOARD,
        }
    }
}

/// Well-known route paths.
pub mod routes {
    /// Public landing page; also the redirect target for anonymous visitors.
    pub const LANDING: &str = "/";
    /// User administration (Admin).
    pub const USERS: &str = "/users";
    /// Project management (ONG).
    pub const PROJECTS: &str = "/projects";
    /// Compromise management (Organization).
    pub const COMPROMISES: &str = "/compromises";
    /// KPI dashboard (Director).
    pub const DASHBOARD: &str = "/dashboard";
}

/// Placeholder display name for users without a recognized role.
const GENERIC_DISPLAY_NAME: &str = "Usuario";

/// Checks whether a role set contains a specific role.
#[must_use]
pub fn has_role(roles: &[RoleId], role: Role) -> bool {
    roles.contains(&role.id())
}

/// Checks whether a role set intersects a list of acceptable roles.
///
/// An empty `targets` list never matches.
#[must_use]
pub fn has_any_role(roles: &[RoleId], targets: &[Role]) -> bool {
    targets.iter().any(|role| has_role(roles, *role))
}

/// Returns the default landing route for a role set.
///
/// Roles are checked in a fixed precedence order (Admin, Ong, Organization,
/// Director); the first held role wins. Falls back to the public landing
/// route when no known role is held. The result depends only on membership,
/// not on element order or duplicates.
#[must_use]
pub fn default_route(roles: &[RoleId]) -> &'static str {
    Role::ALL
        .iter()
        .find(|role| has_role(roles, **role))
        .map_or(routes::LANDING, |role| role.home_route())
}

/// Joins the labels of all recognized roles in a role set.
///
/// Unrecognized identifiers are silently dropped; an empty result yields a
/// generic placeholder.
#[must_use]
pub fn display_name(roles: &[RoleId]) -> String {
    let labels: Vec<&str> = roles
        .iter()
        .filter_map(|id| Role::from_id(*id))
        .map(Role::label)
        .collect();

    if labels.is_empty() {
        GENERIC_DISPLAY_NAME.to_string()
    } else {
        labels.join(", ")
    }
}
