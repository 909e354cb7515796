//! Billing data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use taskfleet_shared::types::{BillingRecordId, PlanId, PricingRuleId, UserId};

use crate::billing::error::BillingError;

/// Social platform a billable operation runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Xiaohongshu.
    Xiaohongshu,
    /// Douyin.
    Douyin,
}

impl Platform {
    /// Returns the wire name of the platform.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xiaohongshu => "xiaohongshu",
            Self::Douyin => "douyin",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billable automated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// Follow an account.
    Follow,
    /// Like a post.
    Like,
    /// Favorite a post.
    Favorite,
    /// Comment on a post.
    Comment,
}

impl OperationType {
    /// Returns the wire name of the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Like => "like",
            Self::Favorite => "favorite",
            Self::Comment => "comment",
        }
    }
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a billing record charges for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingType {
    /// Employee seat charge.
    EmployeeCount,
    /// Follow-operation charge or adjustment.
    FollowCount,
}

/// Lifecycle status of a billing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    /// Awaiting settlement.
    Pending,
    /// Settled.
    Paid,
    /// Past due.
    Overdue,
}

impl BillingStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for BillingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a manual follow-count adjustment was made.
///
/// Every adjustment record carries one of these for the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    /// Routine manual correction.
    ManualAdjustment,
    /// Fixing a counting error.
    ErrorCorrection,
    /// Refunding a charge.
    Refund,
    /// Bonus follows granted to the customer.
    Bonus,
    /// Anything else.
    Other,
}

/// Per-company recurring fee configuration for employee seats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyPricingPlan {
    /// Plan ID.
    pub id: PlanId,
    /// Company the plan applies to. Unique among active plans.
    pub company_name: String,
    /// Human-readable plan name.
    pub plan_name: String,
    /// Fee charged per employee seat per billing cycle. Two decimal places.
    pub employee_monthly_fee: Decimal,
    /// Whether the plan is in effect.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Per-company, per-platform unit price for a billable operation.
///
/// (company, platform, operation) is unique among active rows by
/// caller-maintained convention; the catalog does not enforce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyOperationPricing {
    /// Rule ID.
    pub id: PricingRuleId,
    /// Company the price applies to.
    pub company_name: String,
    /// Platform.
    pub platform: Platform,
    /// Operation type.
    pub operation_type: OperationType,
    /// Price per operation. Three decimal places.
    pub unit_price: Decimal,
    /// Whether the rule is in effect.
    pub is_active: bool,
}

/// Platform-wide default price, consulted only under the
/// `platform_default` missing-price policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformDefaultPrice {
    /// Platform.
    pub platform: Platform,
    /// Operation type.
    pub operation_type: OperationType,
    /// Default price per operation.
    pub unit_price: Decimal,
}

/// An immutable ledger entry representing one charge event.
///
/// Only `status` and `paid_at` change after creation, through
/// [`BillingRecord::mark_paid`] and [`BillingRecord::mark_overdue`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingRecord {
    /// Record ID.
    pub id: BillingRecordId,
    /// User the charge is attributed to.
    pub user_id: UserId,
    /// What the record charges for.
    pub billing_type: BillingType,
    /// Number of units. Negative for downward adjustments.
    pub quantity: i64,
    /// Price per unit at the time of the charge.
    pub unit_price: Decimal,
    /// `quantity * unit_price`, fixed at creation.
    pub total_amount: Decimal,
    /// Billing period label, e.g. "2026-08".
    pub billing_period: String,
    /// Start of the covered period.
    pub period_start: DateTime<Utc>,
    /// End of the covered period.
    pub period_end: DateTime<Utc>,
    /// Lifecycle status.
    pub status: BillingStatus,
    /// Audit reason; present on manual adjustments only.
    pub reason: Option<AdjustmentReason>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Settlement timestamp, set when the record is marked paid.
    pub paid_at: Option<DateTime<Utc>>,
}

impl BillingRecord {
    /// Marks a pending record as paid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` unless the record is pending.
    pub fn mark_paid(&mut self, at: DateTime<Utc>) -> Result<(), BillingError> {
        if self.status != BillingStatus::Pending {
            return Err(BillingError::InvalidStatusTransition {
                from: self.status,
                to: BillingStatus::Paid,
            });
        }
        self.status = BillingStatus::Paid;
        self.paid_at = Some(at);
        Ok(())
    }

    /// Marks a pending record as overdue.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` unless the record is pending.
    pub fn mark_overdue(&mut self) -> Result<(), BillingError> {
        if self.status != BillingStatus::Pending {
            return Err(BillingError::InvalidStatusTransition {
                from: self.status,
                to: BillingStatus::Overdue,
            });
        }
        self.status = BillingStatus::Overdue;
        Ok(())
    }
}

/// Result of a billing computation: the applied unit price and the exact
/// total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedBilling {
    /// Price per unit.
    pub unit_price: Decimal,
    /// Exact total, no rounding applied.
    pub total_amount: Decimal,
}

/// Derived billing overview for an administrator's panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingSummary {
    /// Current account balance.
    pub balance: Decimal,
    /// Sum of the absolute amounts of the supplied records.
    pub total_spent: Decimal,
    /// Number of active employee seats.
    pub employee_count: i32,
    /// Per-seat fee for the next cycle.
    pub monthly_fee: Decimal,
}

/// Which billing records a user may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordScope {
    /// Every record on the platform.
    All,
    /// Records of the named company's executors.
    Company(String),
    /// Only the user's own records.
    User(UserId),
}

/// Input for creating a pricing plan.
#[derive(Debug, Clone)]
pub struct CreatePlanInput {
    /// Company the plan applies to.
    pub company_name: String,
    /// Human-readable plan name.
    pub plan_name: String,
    /// Fee per employee seat per cycle.
    pub employee_monthly_fee: Decimal,
}

/// Input for updating a pricing plan. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdatePlanInput {
    /// New plan name.
    pub plan_name: Option<String>,
    /// New per-seat fee. Takes effect on the next billing computation
    /// only; past charges are untouched.
    pub employee_monthly_fee: Option<Decimal>,
    /// New active flag.
    pub is_active: Option<bool>,
}

/// Input for creating an operation pricing rule.
#[derive(Debug, Clone)]
pub struct CreateOperationPricingInput {
    /// Company the price applies to.
    pub company_name: String,
    /// Platform.
    pub platform: Platform,
    /// Operation type.
    pub operation_type: OperationType,
    /// Price per operation.
    pub unit_price: Decimal,
}

/// Input for updating an operation pricing rule. `None` fields are left
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateOperationPricingInput {
    /// New unit price.
    pub unit_price: Option<Decimal>,
    /// New active flag.
    pub is_active: Option<bool>,
}
