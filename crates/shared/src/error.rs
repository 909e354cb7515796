//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed or is missing.
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violation.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Remote API error.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::BusinessRule(_) => 422,
            Self::Conflict(_) => 409,
            Self::ExternalService(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Unauthenticated, 401, "UNAUTHENTICATED")]
    #[case(AppError::Forbidden, 403, "FORBIDDEN")]
    #[case(AppError::NotFound, 404, "NOT_FOUND")]
    #[case(AppError::Validation, 400, "VALIDATION_ERROR")]
    #[case(AppError::BusinessRule, 422, "BUSINESS_RULE_VIOLATION")]
    #[case(AppError::Conflict, 409, "CONFLICT")]
    #[case(AppError::ExternalService, 500, "EXTERNAL_SERVICE_ERROR")]
    #[case(AppError::Internal, 500, "INTERNAL_ERROR")]
    fn test_status_and_error_codes(
        #[case] variant: fn(String) -> AppError,
        #[case] status: u16,
        #[case] code: &str,
    ) {
        let error = variant(String::new());
        assert_eq!(error.status_code(), status);
        assert_eq!(error.error_code(), code);
    }

    #[rstest]
    #[case(AppError::Unauthenticated("msg".into()), "Authentication required: msg")]
    #[case(AppError::Forbidden("msg".into()), "Access denied: msg")]
    #[case(AppError::BusinessRule("msg".into()), "Business rule violation: msg")]
    fn test_error_display(#[case] error: AppError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
