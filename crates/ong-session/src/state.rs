//! Session state machine states.

use ong_model::{role, RoleId, Session};

/// State of the session lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Process start; restoration has not begun.
    #[default]
    Uninitialized,
    /// The one-time silent restore is in flight.
    Restoring,
    /// No valid credentials are held.
    Anonymous,
    /// A session is active.
    Authenticated(Session),
}

impl SessionState {
    /// True before the initial restore has resolved.
    ///
    /// Once false, the state never becomes loading again for the lifetime of
    /// the process.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Restoring)
    }

    /// True when a session is active.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The active session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Role identifiers of the active session (empty when anonymous).
    #[must_use]
    pub fn roles(&self) -> &[RoleId] {
        self.session().map_or(&[], |session| &session.user.roles)
    }

    /// The default landing route for this state.
    ///
    /// Anonymous and loading states land on the public route.
    #[must_use]
    pub fn default_route(&self) -> &'static str {
        role::default_route(self.roles())
    }
}
