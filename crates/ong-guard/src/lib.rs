//! # ong-guard
//!
//! Role-gated route guarding for ong-console.
//!
//! A [`RouteGuard`] decides whether a protected subtree may render for the
//! current [`SessionState`]. It never fails: the outcome is either
//! [`GuardOutcome::Pending`] (restoration in flight, render nothing),
//! [`GuardOutcome::Allow`], or [`GuardOutcome::Redirect`] with the path to
//! navigate to. Redirects are issued from resolved state only, never
//! mid-restore, so there is no flash of protected or public content.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

use ong_model::{has_any_role, routes, Role};
use ong_session::SessionState;
use tokio::sync::watch;

/// Decision produced by a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session restoration has not resolved; render nothing, redirect
    /// nowhere.
    Pending,
    /// The visitor may see the protected subtree.
    Allow,
    /// Navigate to the given path and render nothing.
    Redirect(String),
}

impl GuardOutcome {
    /// True when the protected subtree may render.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Gates rendering of a protected subtree.
///
/// With no role list, any authenticated visitor is admitted. With one, the
/// visitor must hold at least one listed role; otherwise they are sent to
/// the fallback path. Anonymous visitors always go to the public landing
/// route.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    allowed_roles: Vec<Role>,
    fallback: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteGuard {
    /// Creates a guard admitting any authenticated visitor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allowed_roles: Vec::new(),
            fallback: routes::LANDING.to_string(),
        }
    }

    /// Restricts the guard to visitors holding any of the given roles.
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.allowed_roles = roles.into_iter().collect();
        self
    }

    /// Overrides the redirect target for authenticated visitors missing the
    /// required roles.
    #[must_use]
    pub fn with_fallback(mut self, path: impl Into<String>) -> Self {
        self.fallback = path.into();
        self
    }

    /// Evaluates the guard against a session state snapshot.
    #[must_use]
    pub fn evaluate(&self, state: &SessionState) -> GuardOutcome {
        match state {
            SessionState::Uninitialized | SessionState::Restoring => GuardOutcome::Pending,
            SessionState::Anonymous => GuardOutcome::Redirect(routes::LANDING.to_string()),
            SessionState::Authenticated(session) => {
                if self.allowed_roles.is_empty()
                    || has_any_role(&session.user.roles, &self.allowed_roles)
                {
                    GuardOutcome::Allow
                } else {
                    GuardOutcome::Redirect(self.fallback.clone())
                }
            }
        }
    }

    /// Waits for the session state to resolve past `Pending`, then decides.
    ///
    /// Call again after [`watch::Receiver::changed`] fires to re-evaluate a
    /// mounted guard (e.g. on forced sign-out).
    pub async fn resolve(&self, rx: &mut watch::Receiver<SessionState>) -> GuardOutcome {
        loop {
            let outcome = self.evaluate(&rx.borrow_and_update());
            if outcome != GuardOutcome::Pending {
                return outcome;
            }
            if rx.changed().await.is_err() {
                // Session manager gone; treat as signed out.
                return GuardOutcome::Redirect(routes::LANDING.to_string());
            }
        }
    }
}
