//! Pricing lookups, charge computation, and the billing ledger.
//!
//! All operations are pure computations over caller-supplied pricing
//! rows, balances, and records; fetching that data is the caller's
//! concern. Administrative operations are gated through the `access`
//! module.

pub mod catalog;
pub mod error;
pub mod schedule;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use catalog::PricingCatalog;
pub use error::BillingError;
pub use service::{BillingService, EmployeeCharge};
pub use types::{
    AdjustmentReason, BillingRecord, BillingStatus, BillingSummary, BillingType, CalculatedBilling,
    CompanyOperationPricing, CompanyPricingPlan, CreateOperationPricingInput, CreatePlanInput,
    OperationType, Platform, PlatformDefaultPrice, RecordScope, UpdateOperationPricingInput,
    UpdatePlanInput,
};
