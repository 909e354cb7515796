//! In-memory pricing catalog.
//!
//! The catalog holds the pricing rows the caller fetched from the remote
//! API and answers price lookups over them. Mutations here are plain
//! data operations; role gating lives in [`BillingService`].
//!
//! [`BillingService`]: crate::billing::service::BillingService

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use taskfleet_shared::config::{BillingConfig, MissingPricePolicy};
use taskfleet_shared::types::{PlanId, PricingRuleId};

use crate::billing::error::BillingError;
use crate::billing::types::{
    CompanyOperationPricing, CompanyPricingPlan, CreateOperationPricingInput, CreatePlanInput,
    OperationType, Platform, PlatformDefaultPrice, UpdateOperationPricingInput, UpdatePlanInput,
};

/// Employee monthly fee applied when a company has no active plan.
///
/// A documented business rule, not a placeholder.
fn default_employee_monthly_fee() -> Decimal {
    Decimal::new(300_00, 2)
}

/// Pricing plans and operation prices, plus the lookup policy.
#[derive(Debug, Clone)]
pub struct PricingCatalog {
    plans: Vec<CompanyPricingPlan>,
    operation_pricing: Vec<CompanyOperationPricing>,
    platform_defaults: Vec<PlatformDefaultPrice>,
    missing_price_policy: MissingPricePolicy,
    default_monthly_fee: Decimal,
}

impl PricingCatalog {
    /// Builds a catalog over the given rows with the default policy
    /// (missing prices are rejected) and the standard 300.00 fallback fee.
    #[must_use]
    pub fn new(
        plans: Vec<CompanyPricingPlan>,
        operation_pricing: Vec<CompanyOperationPricing>,
    ) -> Self {
        Self {
            plans,
            operation_pricing,
            platform_defaults: Vec::new(),
            missing_price_policy: MissingPricePolicy::Reject,
            default_monthly_fee: default_employee_monthly_fee(),
        }
    }

    /// Builds a catalog configured from the billing section of the
    /// application config.
    #[must_use]
    pub fn from_config(
        plans: Vec<CompanyPricingPlan>,
        operation_pricing: Vec<CompanyOperationPricing>,
        config: &BillingConfig,
    ) -> Self {
        Self {
            missing_price_policy: config.missing_price_policy,
            default_monthly_fee: config.default_employee_monthly_fee,
            ..Self::new(plans, operation_pricing)
        }
    }

    /// Sets the platform-wide default price table used by the
    /// `platform_default` policy.
    #[must_use]
    pub fn with_platform_defaults(mut self, defaults: Vec<PlatformDefaultPrice>) -> Self {
        self.platform_defaults = defaults;
        self
    }

    /// Overrides the missing-price policy.
    #[must_use]
    pub fn with_missing_price_policy(mut self, policy: MissingPricePolicy) -> Self {
        self.missing_price_policy = policy;
        self
    }

    /// All pricing plans, newest first not guaranteed; callers sort.
    #[must_use]
    pub fn plans(&self) -> &[CompanyPricingPlan] {
        &self.plans
    }

    /// All operation pricing rules.
    #[must_use]
    pub fn operation_pricing(&self) -> &[CompanyOperationPricing] {
        &self.operation_pricing
    }

    /// The active pricing plan for a company, if any.
    #[must_use]
    pub fn active_plan(&self, company: &str) -> Option<&CompanyPricingPlan> {
        self.plans
            .iter()
            .find(|p| p.is_active && p.company_name == company)
    }

    /// Employee monthly fee for a company.
    ///
    /// Falls back to the configured default (300.00 unless overridden)
    /// when the company has no active plan; this lookup never fails.
    #[must_use]
    pub fn employee_monthly_fee(&self, company: &str) -> Decimal {
        self.active_plan(company)
            .map_or(self.default_monthly_fee, |p| p.employee_monthly_fee)
    }

    /// Unit price for an operation, honoring the missing-price policy.
    ///
    /// # Errors
    ///
    /// Returns `PricingNotFound` when no active row matches and the
    /// policy does not supply a substitute.
    pub fn operation_price(
        &self,
        company: &str,
        platform: Platform,
        operation: OperationType,
    ) -> Result<Decimal, BillingError> {
        let hit = self.operation_pricing.iter().find(|r| {
            r.is_active
                && r.company_name == company
                && r.platform == platform
                && r.operation_type == operation
        });

        if let Some(rule) = hit {
            return Ok(rule.unit_price);
        }

        match self.missing_price_policy {
            MissingPricePolicy::Reject => Err(BillingError::PricingNotFound {
                company: company.to_string(),
                platform,
                operation,
            }),
            MissingPricePolicy::PlatformDefault => self
                .platform_defaults
                .iter()
                .find(|d| d.platform == platform && d.operation_type == operation)
                .map(|d| d.unit_price)
                .ok_or_else(|| BillingError::PricingNotFound {
                    company: company.to_string(),
                    platform,
                    operation,
                }),
            MissingPricePolicy::Zero => Ok(Decimal::ZERO),
        }
    }

    // ---- mutations (ungated; see BillingService for role checks) ----

    /// Adds a pricing plan.
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePlan` if the company already has an active plan,
    /// and `NegativeUnitPrice` for a negative fee.
    pub fn add_plan(
        &mut self,
        input: CreatePlanInput,
        now: DateTime<Utc>,
    ) -> Result<CompanyPricingPlan, BillingError> {
        if input.employee_monthly_fee < Decimal::ZERO {
            return Err(BillingError::NegativeUnitPrice);
        }
        if self.active_plan(&input.company_name).is_some() {
            return Err(BillingError::DuplicatePlan(input.company_name));
        }

        let plan = CompanyPricingPlan {
            id: self.next_plan_id(),
            company_name: input.company_name,
            plan_name: input.plan_name,
            employee_monthly_fee: input.employee_monthly_fee,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.plans.push(plan.clone());
        Ok(plan)
    }

    /// Updates a pricing plan in place. Fee changes affect future
    /// computations only; existing billing records are immutable.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotFound` if no plan has the given ID.
    pub fn update_plan(
        &mut self,
        id: PlanId,
        input: UpdatePlanInput,
        now: DateTime<Utc>,
    ) -> Result<CompanyPricingPlan, BillingError> {
        if matches!(input.employee_monthly_fee, Some(fee) if fee < Decimal::ZERO) {
            return Err(BillingError::NegativeUnitPrice);
        }

        let plan = self
            .plans
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(BillingError::PlanNotFound(id))?;

        if let Some(name) = input.plan_name {
            plan.plan_name = name;
        }
        if let Some(fee) = input.employee_monthly_fee {
            plan.employee_monthly_fee = fee;
        }
        if let Some(active) = input.is_active {
            plan.is_active = active;
        }
        plan.updated_at = now;
        Ok(plan.clone())
    }

    /// Removes a pricing plan entirely. There is no soft delete for plans.
    ///
    /// # Errors
    ///
    /// Returns `PlanNotFound` if no plan has the given ID.
    pub fn remove_plan(&mut self, id: PlanId) -> Result<(), BillingError> {
        let before = self.plans.len();
        self.plans.retain(|p| p.id != id);
        if self.plans.len() == before {
            return Err(BillingError::PlanNotFound(id));
        }
        Ok(())
    }

    /// Adds an operation pricing rule.
    ///
    /// Duplicate (company, platform, operation) rows are accepted; the
    /// uniqueness convention is the caller's to uphold.
    ///
    /// # Errors
    ///
    /// Returns `NegativeUnitPrice` for a negative price.
    pub fn add_operation_pricing(
        &mut self,
        input: CreateOperationPricingInput,
    ) -> Result<CompanyOperationPricing, BillingError> {
        if input.unit_price < Decimal::ZERO {
            return Err(BillingError::NegativeUnitPrice);
        }

        let rule = CompanyOperationPricing {
            id: self.next_pricing_rule_id(),
            company_name: input.company_name,
            platform: input.platform,
            operation_type: input.operation_type,
            unit_price: input.unit_price,
            is_active: true,
        };
        self.operation_pricing.push(rule.clone());
        Ok(rule)
    }

    /// Updates an operation pricing rule in place.
    ///
    /// # Errors
    ///
    /// Returns `PricingRuleNotFound` if no rule has the given ID.
    pub fn update_operation_pricing(
        &mut self,
        id: PricingRuleId,
        input: UpdateOperationPricingInput,
    ) -> Result<CompanyOperationPricing, BillingError> {
        if matches!(input.unit_price, Some(price) if price < Decimal::ZERO) {
            return Err(BillingError::NegativeUnitPrice);
        }

        let rule = self
            .operation_pricing
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(BillingError::PricingRuleNotFound(id))?;

        if let Some(price) = input.unit_price {
            rule.unit_price = price;
        }
        if let Some(active) = input.is_active {
            rule.is_active = active;
        }
        Ok(rule.clone())
    }

    /// Removes an operation pricing rule.
    ///
    /// # Errors
    ///
    /// Returns `PricingRuleNotFound` if no rule has the given ID.
    pub fn remove_operation_pricing(&mut self, id: PricingRuleId) -> Result<(), BillingError> {
        let before = self.operation_pricing.len();
        self.operation_pricing.retain(|r| r.id != id);
        if self.operation_pricing.len() == before {
            return Err(BillingError::PricingRuleNotFound(id));
        }
        Ok(())
    }

    // Locally created rows get sequential IDs above the highest the API
    // handed us.
    fn next_plan_id(&self) -> PlanId {
        let max = self.plans.iter().map(|p| p.id.into_inner()).max();
        PlanId::new(max.unwrap_or(0) + 1)
    }

    fn next_pricing_rule_id(&self) -> PricingRuleId {
        let max = self
            .operation_pricing
            .iter()
            .map(|r| r.id.into_inner())
            .max();
        PricingRuleId::new(max.unwrap_or(0) + 1)
    }
}
