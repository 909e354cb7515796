//! Billing operations.
//!
//! Every operation takes the acting user and resolves its capability
//! requirement before touching any data. Balance checks are fail-closed:
//! when the balance does not cover a charge, the operation returns an
//! error and produces no record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use taskfleet_shared::types::{BillingRecordId, PlanId, PricingRuleId, UserId};

use crate::access::{Capability, CurrentUser, Role, require};
use crate::billing::catalog::PricingCatalog;
use crate::billing::error::BillingError;
use crate::billing::schedule::{billing_period, next_billing_date};
use crate::billing::types::{
    AdjustmentReason, BillingRecord, BillingStatus, BillingSummary, BillingType, CalculatedBilling,
    CompanyOperationPricing, CompanyPricingPlan, CreateOperationPricingInput, CreatePlanInput,
    RecordScope, UpdateOperationPricingInput, UpdatePlanInput,
};

/// A successful employee seat charge: the new pending record and the
/// balance after subtracting it.
#[derive(Debug, Clone)]
pub struct EmployeeCharge {
    /// The pending billing record for the seat.
    pub record: BillingRecord,
    /// Balance after the charge.
    pub remaining_balance: Decimal,
}

/// Billing business logic.
pub struct BillingService;

impl BillingService {
    /// Computes the exact total for a charge.
    ///
    /// `total = quantity * unit_price`, with no rounding. Pricing rows
    /// carry up to three decimal places, so totals may too; display
    /// rounding is a presentation concern.
    ///
    /// # Errors
    ///
    /// Returns `NegativeQuantity` or `NegativeUnitPrice` on negative
    /// inputs; signed quantities are only valid through
    /// [`Self::adjust_follow_count`].
    pub fn calculate_billing(
        billing_type: BillingType,
        quantity: i64,
        unit_price: Decimal,
    ) -> Result<CalculatedBilling, BillingError> {
        if quantity < 0 {
            return Err(BillingError::NegativeQuantity);
        }
        if unit_price < Decimal::ZERO {
            return Err(BillingError::NegativeUnitPrice);
        }

        let total_amount = Decimal::from(quantity) * unit_price;
        tracing::debug!(
            billing_type = ?billing_type,
            quantity,
            %unit_price,
            %total_amount,
            "calculated billing"
        );
        Ok(CalculatedBilling {
            unit_price,
            total_amount,
        })
    }

    /// Charges one employee seat for a new billing cycle.
    ///
    /// The fee comes from the company's active plan, or the platform
    /// default when there is none. The record covers `now` through
    /// `now + 31 days` and starts out pending.
    ///
    /// # Errors
    ///
    /// Requires `ManageAccounts`. Returns `InsufficientBalance` when the
    /// balance does not cover the fee; no record is produced in that case.
    pub fn create_employee_charge(
        actor: Option<&CurrentUser>,
        balance: Decimal,
        catalog: &PricingCatalog,
        company: &str,
        employee_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<EmployeeCharge, BillingError> {
        let actor = require(actor, Capability::ManageAccounts)?;

        let fee = catalog.employee_monthly_fee(company);
        if balance < fee {
            tracing::warn!(
                %employee_id,
                company,
                %balance,
                required = %fee,
                "employee charge refused, balance too low"
            );
            return Err(BillingError::InsufficientBalance {
                balance,
                required: fee,
            });
        }

        let record = BillingRecord {
            id: BillingRecordId::new(),
            user_id: employee_id,
            billing_type: BillingType::EmployeeCount,
            quantity: 1,
            unit_price: fee,
            total_amount: fee,
            billing_period: billing_period(now),
            period_start: now,
            period_end: next_billing_date(now),
            status: BillingStatus::Pending,
            reason: None,
            created_at: now,
            paid_at: None,
        };

        tracing::info!(
            actor_id = %actor.id,
            %employee_id,
            company,
            amount = %fee,
            record_id = %record.id,
            "employee seat charged"
        );
        Ok(EmployeeCharge {
            remaining_balance: balance - fee,
            record,
        })
    }

    /// Records a manual follow-count adjustment for a user.
    ///
    /// `delta` may be negative; the signed total flows straight into the
    /// record so the ledger sums correctly. Every adjustment carries its
    /// reason for the audit trail.
    ///
    /// # Errors
    ///
    /// Requires `ManageUsers`. Returns `NegativeUnitPrice` on a negative
    /// price.
    pub fn adjust_follow_count(
        actor: Option<&CurrentUser>,
        target_user: UserId,
        delta: i64,
        unit_price: Decimal,
        reason: AdjustmentReason,
        now: DateTime<Utc>,
    ) -> Result<BillingRecord, BillingError> {
        let actor = require(actor, Capability::ManageUsers)?;
        if unit_price < Decimal::ZERO {
            return Err(BillingError::NegativeUnitPrice);
        }

        let total_amount = Decimal::from(delta) * unit_price;
        let record = BillingRecord {
            id: BillingRecordId::new(),
            user_id: target_user,
            billing_type: BillingType::FollowCount,
            quantity: delta,
            unit_price,
            total_amount,
            billing_period: billing_period(now),
            period_start: now,
            period_end: now,
            status: BillingStatus::Pending,
            reason: Some(reason),
            created_at: now,
            paid_at: None,
        };

        tracing::info!(
            actor_id = %actor.id,
            %target_user,
            delta,
            %total_amount,
            reason = ?reason,
            "follow count adjusted"
        );
        Ok(record)
    }

    /// Derives the billing overview shown on an administrator's panel.
    ///
    /// `total_spent` sums the absolute amounts of the supplied records,
    /// so downward adjustments still count as activity.
    #[must_use]
    pub fn billing_summary(
        balance: Decimal,
        records: &[BillingRecord],
        employee_count: i32,
        monthly_fee: Decimal,
    ) -> BillingSummary {
        let total_spent = records
            .iter()
            .map(|r| r.total_amount.abs())
            .fold(Decimal::ZERO, |acc, amount| acc + amount);
        BillingSummary {
            balance,
            total_spent,
            employee_count,
            monthly_fee,
        }
    }

    /// Which billing records the user may see.
    ///
    /// Platform admins see everything, project managers see their
    /// company, task executors see only themselves.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` for an absent user and `MissingCompany`
    /// for a project manager without a company.
    pub fn record_scope(user: Option<&CurrentUser>) -> Result<RecordScope, BillingError> {
        let user = user.ok_or(crate::access::AccessError::Unauthenticated)?;
        match user.role {
            Role::PlatformAdmin => Ok(RecordScope::All),
            Role::ProjectManager => user
                .company
                .clone()
                .map(RecordScope::Company)
                .ok_or(BillingError::MissingCompany),
            Role::TaskExecutor => Ok(RecordScope::User(user.id)),
        }
    }

    // ---- gated catalog administration ----

    /// Lists every pricing plan. Platform admin only.
    ///
    /// # Errors
    ///
    /// Requires `ManageCompanies`.
    pub fn list_plans<'a>(
        actor: Option<&CurrentUser>,
        catalog: &'a PricingCatalog,
    ) -> Result<&'a [CompanyPricingPlan], BillingError> {
        require(actor, Capability::ManageCompanies)?;
        Ok(catalog.plans())
    }

    /// The active plan for a company, visible to the platform admin for
    /// any company and to a project manager for their own.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for other roles or another manager's company.
    pub fn plan_for_company<'a>(
        actor: Option<&CurrentUser>,
        catalog: &'a PricingCatalog,
        company: &str,
    ) -> Result<Option<&'a CompanyPricingPlan>, BillingError> {
        let actor = actor.ok_or(crate::access::AccessError::Unauthenticated)?;
        let allowed = match actor.role {
            Role::PlatformAdmin => true,
            Role::ProjectManager => actor.company.as_deref() == Some(company),
            Role::TaskExecutor => false,
        };
        if !allowed {
            return Err(crate::access::AccessError::Forbidden {
                role: actor.role,
                capability: Capability::ManageCompanies,
            }
            .into());
        }
        Ok(catalog.active_plan(company))
    }

    /// Creates a pricing plan. Platform admin only.
    ///
    /// # Errors
    ///
    /// Requires `ManageCompanies`; catalog errors pass through.
    pub fn create_plan(
        actor: Option<&CurrentUser>,
        catalog: &mut PricingCatalog,
        input: CreatePlanInput,
        now: DateTime<Utc>,
    ) -> Result<CompanyPricingPlan, BillingError> {
        let actor = require(actor, Capability::ManageCompanies)?;
        let plan = catalog.add_plan(input, now)?;
        tracing::info!(
            actor_id = %actor.id,
            plan_id = %plan.id,
            company = %plan.company_name,
            fee = %plan.employee_monthly_fee,
            "pricing plan created"
        );
        Ok(plan)
    }

    /// Updates a pricing plan. Platform admin only.
    ///
    /// # Errors
    ///
    /// Requires `ManageCompanies`; catalog errors pass through.
    pub fn update_plan(
        actor: Option<&CurrentUser>,
        catalog: &mut PricingCatalog,
        id: PlanId,
        input: UpdatePlanInput,
        now: DateTime<Utc>,
    ) -> Result<CompanyPricingPlan, BillingError> {
        let actor = require(actor, Capability::ManageCompanies)?;
        let plan = catalog.update_plan(id, input, now)?;
        tracing::info!(actor_id = %actor.id, plan_id = %plan.id, "pricing plan updated");
        Ok(plan)
    }

    /// Deletes a pricing plan. Platform admin only.
    ///
    /// # Errors
    ///
    /// Requires `ManageCompanies`; catalog errors pass through.
    pub fn delete_plan(
        actor: Option<&CurrentUser>,
        catalog: &mut PricingCatalog,
        id: PlanId,
    ) -> Result<(), BillingError> {
        let actor = require(actor, Capability::ManageCompanies)?;
        catalog.remove_plan(id)?;
        tracing::info!(actor_id = %actor.id, plan_id = %id, "pricing plan deleted");
        Ok(())
    }

    /// Lists operation pricing rules visible to the actor.
    ///
    /// The platform admin may filter by company or see everything; a
    /// project manager always sees exactly their own company.
    ///
    /// # Errors
    ///
    /// Returns `MissingCompany` for a manager without a company and
    /// `Forbidden` for task executors.
    pub fn list_operation_pricing(
        actor: Option<&CurrentUser>,
        catalog: &PricingCatalog,
        company: Option<&str>,
    ) -> Result<Vec<CompanyOperationPricing>, BillingError> {
        let actor = actor.ok_or(crate::access::AccessError::Unauthenticated)?;
        let filter = match actor.role {
            Role::PlatformAdmin => company.map(str::to_string),
            Role::ProjectManager => Some(
                actor
                    .company
                    .clone()
                    .ok_or(BillingError::MissingCompany)?,
            ),
            Role::TaskExecutor => {
                return Err(crate::access::AccessError::Forbidden {
                    role: actor.role,
                    capability: Capability::ManageCompanies,
                }
                .into());
            }
        };

        Ok(catalog
            .operation_pricing()
            .iter()
            .filter(|r| filter.as_deref().is_none_or(|c| r.company_name == c))
            .cloned()
            .collect())
    }

    /// Creates an operation pricing rule. Platform admin only.
    ///
    /// # Errors
    ///
    /// Requires `ManageCompanies`; catalog errors pass through.
    pub fn create_operation_pricing(
        actor: Option<&CurrentUser>,
        catalog: &mut PricingCatalog,
        input: CreateOperationPricingInput,
    ) -> Result<CompanyOperationPricing, BillingError> {
        let actor = require(actor, Capability::ManageCompanies)?;
        let rule = catalog.add_operation_pricing(input)?;
        tracing::info!(
            actor_id = %actor.id,
            rule_id = %rule.id,
            company = %rule.company_name,
            platform = %rule.platform,
            operation = %rule.operation_type,
            price = %rule.unit_price,
            "operation pricing created"
        );
        Ok(rule)
    }

    /// Updates an operation pricing rule. Platform admin only.
    ///
    /// # Errors
    ///
    /// Requires `ManageCompanies`; catalog errors pass through.
    pub fn update_operation_pricing(
        actor: Option<&CurrentUser>,
        catalog: &mut PricingCatalog,
        id: PricingRuleId,
        input: UpdateOperationPricingInput,
    ) -> Result<CompanyOperationPricing, BillingError> {
        let actor = require(actor, Capability::ManageCompanies)?;
        let rule = catalog.update_operation_pricing(id, input)?;
        tracing::info!(actor_id = %actor.id, rule_id = %rule.id, "operation pricing updated");
        Ok(rule)
    }

    /// Deletes an operation pricing rule. Platform admin only.
    ///
    /// # Errors
    ///
    /// Requires `ManageCompanies`; catalog errors pass through.
    pub fn delete_operation_pricing(
        actor: Option<&CurrentUser>,
        catalog: &mut PricingCatalog,
        id: PricingRuleId,
    ) -> Result<(), BillingError> {
        let actor = require(actor, Capability::ManageCompanies)?;
        catalog.remove_operation_pricing(id)?;
        tracing::info!(actor_id = %actor.id, rule_id = %id, "operation pricing deleted");
        Ok(())
    }
}
