//! Access control error types.

use taskfleet_shared::error::AppError;
use thiserror::Error;

use crate::access::capability::Capability;
use crate::access::role::Role;

/// Errors produced by access control checks.
///
/// These cover genuinely exceptional conditions only; a plain "no" from a
/// permission predicate is a boolean, not an error.
#[derive(Debug, Error)]
pub enum AccessError {
    /// No authenticated user was resolved.
    #[error("Authentication required")]
    Unauthenticated,

    /// The user's role does not grant the requested capability.
    #[error("Role {role} is not permitted to {capability}")]
    Forbidden {
        /// The user's role.
        role: Role,
        /// The capability that was required.
        capability: Capability,
    },

    /// The authentication service produced a role string outside the
    /// closed set.
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

impl AccessError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::Forbidden { .. } => 403,
            Self::UnknownRole(_) => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
        }
    }
}

impl From<AccessError> for AppError {
    /// Maps an access decision onto the boundary error surface the API
    /// layer serializes.
    fn from(err: AccessError) -> Self {
        let message = err.to_string();
        match err {
            AccessError::Unauthenticated => Self::Unauthenticated(message),
            AccessError::Forbidden { .. } => Self::Forbidden(message),
            AccessError::UnknownRole(_) => Self::Validation(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AccessError::Unauthenticated.status_code(), 401);
        assert_eq!(
            AccessError::Forbidden {
                role: Role::TaskExecutor,
                capability: Capability::DeleteTask,
            }
            .status_code(),
            403
        );
        assert_eq!(AccessError::UnknownRole(String::new()).status_code(), 400);
    }

    #[test]
    fn test_boundary_conversion_preserves_status() {
        let app: AppError = AccessError::Unauthenticated.into();
        assert!(matches!(app, AppError::Unauthenticated(_)));
        assert_eq!(app.status_code(), 401);

        let app: AppError = AccessError::Forbidden {
            role: Role::TaskExecutor,
            capability: Capability::DeleteTask,
        }
        .into();
        assert_eq!(app.status_code(), 403);
        assert!(app.to_string().contains("delete_task"));

        let app: AppError = AccessError::UnknownRole("sysadmin".to_string()).into();
        assert!(matches!(app, AppError::Validation(_)));
    }

    #[test]
    fn test_forbidden_display_names_role_and_capability() {
        let err = AccessError::Forbidden {
            role: Role::TaskExecutor,
            capability: Capability::AssignTask,
        };
        let msg = err.to_string();
        assert!(msg.contains("task_executor"));
        assert!(msg.contains("assign_task"));
    }
}
