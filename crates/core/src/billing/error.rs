//! Billing error types.

use rust_decimal::Decimal;
use taskfleet_shared::error::AppError;
use taskfleet_shared::types::{PlanId, PricingRuleId};
use thiserror::Error;

use crate::access::AccessError;
use crate::billing::types::{BillingStatus, OperationType, Platform};

/// Errors produced by pricing lookups and billing operations.
#[derive(Debug, Error)]
pub enum BillingError {
    /// No active pricing row matched the lookup keys.
    #[error("No active price for {company} / {platform} / {operation}")]
    PricingNotFound {
        /// Company name.
        company: String,
        /// Platform.
        platform: Platform,
        /// Operation type.
        operation: OperationType,
    },

    /// The account balance does not cover the required charge. The
    /// triggering action must be refused before any record is written.
    #[error("Insufficient balance: have {balance}, need {required}")]
    InsufficientBalance {
        /// Current balance.
        balance: Decimal,
        /// Amount the action would charge.
        required: Decimal,
    },

    /// The company already has a pricing plan.
    #[error("Company {0} already has a pricing plan")]
    DuplicatePlan(String),

    /// Pricing plan not found.
    #[error("Pricing plan {0} not found")]
    PlanNotFound(PlanId),

    /// Operation pricing rule not found.
    #[error("Operation pricing rule {0} not found")]
    PricingRuleNotFound(PricingRuleId),

    /// Attempted an invalid record status transition.
    #[error("Invalid billing status transition from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: BillingStatus,
        /// Attempted target status.
        to: BillingStatus,
    },

    /// Quantity cannot be negative for this operation.
    #[error("Quantity cannot be negative")]
    NegativeQuantity,

    /// Unit price cannot be negative.
    #[error("Unit price cannot be negative")]
    NegativeUnitPrice,

    /// The operation requires a company context the user does not have.
    #[error("A company is required for this operation")]
    MissingCompany,

    /// The caller is not permitted to perform the operation.
    #[error(transparent)]
    NotPermitted(#[from] AccessError),
}

impl BillingError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::PricingNotFound { .. }
            | Self::PlanNotFound(_)
            | Self::PricingRuleNotFound(_) => 404,
            Self::InsufficientBalance { .. } => 422,
            Self::DuplicatePlan(_) => 409,
            Self::InvalidStatusTransition { .. }
            | Self::NegativeQuantity
            | Self::NegativeUnitPrice
            | Self::MissingCompany => 400,
            Self::NotPermitted(inner) => inner.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::PricingNotFound { .. } => "PRICING_NOT_FOUND",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::DuplicatePlan(_) => "DUPLICATE_PLAN",
            Self::PlanNotFound(_) => "PLAN_NOT_FOUND",
            Self::PricingRuleNotFound(_) => "PRICING_RULE_NOT_FOUND",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::NegativeQuantity => "NEGATIVE_QUANTITY",
            Self::NegativeUnitPrice => "NEGATIVE_UNIT_PRICE",
            Self::MissingCompany => "MISSING_COMPANY",
            Self::NotPermitted(inner) => inner.error_code(),
        }
    }
}

impl From<BillingError> for AppError {
    /// Maps a billing failure onto the boundary error surface the API
    /// layer serializes. Access wrappers unwrap to their own mapping.
    fn from(err: BillingError) -> Self {
        let message = err.to_string();
        match err {
            BillingError::PricingNotFound { .. }
            | BillingError::PlanNotFound(_)
            | BillingError::PricingRuleNotFound(_) => Self::NotFound(message),
            BillingError::InsufficientBalance { .. } => Self::BusinessRule(message),
            BillingError::DuplicatePlan(_) => Self::Conflict(message),
            BillingError::InvalidStatusTransition { .. }
            | BillingError::NegativeQuantity
            | BillingError::NegativeUnitPrice
            | BillingError::MissingCompany => Self::Validation(message),
            BillingError::NotPermitted(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_balance_carries_amounts() {
        let err = BillingError::InsufficientBalance {
            balance: dec!(299.99),
            required: dec!(300.00),
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INSUFFICIENT_BALANCE");
        let msg = err.to_string();
        assert!(msg.contains("299.99"));
        assert!(msg.contains("300.00"));
    }

    #[test]
    fn test_pricing_not_found() {
        let err = BillingError::PricingNotFound {
            company: "acme".to_string(),
            platform: Platform::Douyin,
            operation: OperationType::Follow,
        };
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "PRICING_NOT_FOUND");
        assert!(err.to_string().contains("douyin"));
    }

    #[test]
    fn test_not_permitted_delegates_to_access_error() {
        let err = BillingError::NotPermitted(AccessError::Unauthenticated);
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.error_code(), "UNAUTHENTICATED");
    }

    #[test]
    fn test_boundary_conversion_keeps_taxonomy() {
        let app: AppError = BillingError::InsufficientBalance {
            balance: dec!(299.99),
            required: dec!(300.00),
        }
        .into();
        assert!(matches!(app, AppError::BusinessRule(_)));
        assert_eq!(app.status_code(), 422);

        let app: AppError = BillingError::DuplicatePlan("acme".to_string()).into();
        assert_eq!(app.status_code(), 409);

        // A wrapped access denial keeps its access-layer mapping.
        let app: AppError =
            BillingError::NotPermitted(AccessError::Unauthenticated).into();
        assert!(matches!(app, AppError::Unauthenticated(_)));
        assert_eq!(app.status_code(), 401);
    }

    #[test]
    fn test_transition_error_names_statuses() {
        let err = BillingError::InvalidStatusTransition {
            from: BillingStatus::Paid,
            to: BillingStatus::Overdue,
        };
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("paid"));
        assert!(err.to_string().contains("overdue"));
    }
}
