//! Route guarding for role-restricted navigation targets.
//!
//! A guard resolves the caller's authentication state against a route's
//! allow-list into one of four outcomes. Resolution while authentication
//! is still pending is its own outcome; it never defaults to allow or
//! deny.

use serde::{Deserialize, Serialize};

use crate::access::role::{CurrentUser, Role};

/// Authentication state as seen by the navigation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AuthState {
    /// Token validation is still in flight.
    Pending,
    /// No authenticated user.
    Anonymous,
    /// Resolved authenticated user.
    Authenticated(CurrentUser),
}

/// Resolution of a guarded route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Authentication status unknown; render a pending state.
    Pending,
    /// Unauthenticated; redirect to login.
    RedirectToLogin,
    /// Authenticated but the role is not on the allow-list; render the
    /// forbidden view.
    Forbidden,
    /// Authorized; render the route.
    Allow,
}

/// Role allow-list for a navigation target.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    /// `None` means any authenticated user may pass.
    allowed_roles: Option<Vec<Role>>,
}

impl RouteGuard {
    /// Guard that admits any authenticated user.
    #[must_use]
    pub const fn any_authenticated() -> Self {
        Self {
            allowed_roles: None,
        }
    }

    /// Guard that admits only the given roles.
    #[must_use]
    pub fn require(roles: impl Into<Vec<Role>>) -> Self {
        Self {
            allowed_roles: Some(roles.into()),
        }
    }

    /// Resolves the guard against the current authentication state.
    #[must_use]
    pub fn resolve(&self, state: &AuthState) -> GuardOutcome {
        match state {
            AuthState::Pending => GuardOutcome::Pending,
            AuthState::Anonymous => GuardOutcome::RedirectToLogin,
            AuthState::Authenticated(user) => match &self.allowed_roles {
                None => GuardOutcome::Allow,
                Some(roles) if user.has_role(roles) => GuardOutcome::Allow,
                Some(_) => GuardOutcome::Forbidden,
            },
        }
    }
}
