//! Cross-module billing tests: decimal exactness, policy behavior, and
//! record lifecycle.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use taskfleet_shared::types::UserId;

use crate::access::{CurrentUser, Role};
use crate::billing::{
    AdjustmentReason, BillingError, BillingService, BillingStatus, BillingType, PricingCatalog,
};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 28, 10, 0, 0).unwrap()
}

fn admin() -> CurrentUser {
    CurrentUser {
        id: UserId::new(1),
        role: Role::PlatformAdmin,
        company: None,
    }
}

#[rstest]
#[case(1000, dec!(0.05), dec!(50.00))]
#[case(0, dec!(0.05), dec!(0.00))]
#[case(1, dec!(0.015), dec!(0.015))]
#[case(7, dec!(0.333), dec!(2.331))]
fn charge_totals_are_exact(
    #[case] quantity: i64,
    #[case] unit_price: Decimal,
    #[case] expected: Decimal,
) {
    let calc =
        BillingService::calculate_billing(BillingType::FollowCount, quantity, unit_price).unwrap();
    assert_eq!(calc.total_amount, expected);
}

#[test]
fn thousand_unit_charges_sum_to_one_bulk_charge() {
    // 1000 follows at 0.05 each, charged one at a time, must land on
    // exactly 50.00. Floats drift here; decimals must not.
    let unit_price = dec!(0.05);
    let mut accumulated = Decimal::ZERO;
    for _ in 0..1000 {
        let calc =
            BillingService::calculate_billing(BillingType::FollowCount, 1, unit_price).unwrap();
        accumulated += calc.total_amount;
    }

    let bulk =
        BillingService::calculate_billing(BillingType::FollowCount, 1000, unit_price).unwrap();
    assert_eq!(accumulated, dec!(50.00));
    assert_eq!(accumulated, bulk.total_amount);
}

proptest! {
    /// Charging n units one at a time equals charging them at once,
    /// for any realistic price with up to three decimal places.
    #[test]
    fn prop_unit_charges_accumulate_exactly(
        n in 0i64..500,
        price_millis in 0i64..10_000,
    ) {
        let unit_price = Decimal::new(price_millis, 3);
        let mut accumulated = Decimal::ZERO;
        for _ in 0..n {
            let calc = BillingService::calculate_billing(
                BillingType::FollowCount, 1, unit_price,
            ).unwrap();
            accumulated += calc.total_amount;
        }
        let bulk = BillingService::calculate_billing(
            BillingType::FollowCount, n, unit_price,
        ).unwrap();
        prop_assert_eq!(accumulated, bulk.total_amount);
    }

    /// An adjustment and its exact reversal cancel to zero in the ledger.
    #[test]
    fn prop_adjustment_and_reversal_cancel(
        delta in 1i64..10_000,
        price_millis in 0i64..10_000,
    ) {
        let unit_price = Decimal::new(price_millis, 3);
        let admin = admin();
        let up = BillingService::adjust_follow_count(
            Some(&admin), UserId::new(9), delta, unit_price,
            AdjustmentReason::ManualAdjustment, now(),
        ).unwrap();
        let down = BillingService::adjust_follow_count(
            Some(&admin), UserId::new(9), -delta, unit_price,
            AdjustmentReason::ErrorCorrection, now(),
        ).unwrap();
        prop_assert_eq!(up.total_amount + down.total_amount, Decimal::ZERO);
    }
}

#[test]
fn missing_plan_falls_back_to_standard_fee() {
    let catalog = PricingCatalog::new(vec![], vec![]);
    assert_eq!(catalog.employee_monthly_fee("no-such-company"), dec!(300.00));
}

#[test]
fn insufficient_balance_leaves_no_trace() {
    let catalog = PricingCatalog::new(vec![], vec![]);
    let admin = admin();
    let result = BillingService::create_employee_charge(
        Some(&admin),
        dec!(299.99),
        &catalog,
        "acme",
        UserId::new(9),
        now(),
    );
    // The error carries both amounts and no record was produced.
    match result {
        Err(BillingError::InsufficientBalance { balance, required }) => {
            assert_eq!(balance, dec!(299.99));
            assert_eq!(required, dec!(300.00));
        }
        other => panic!("expected InsufficientBalance, got {other:?}"),
    }
}

#[test]
fn record_lifecycle_pending_paid() {
    let admin = admin();
    let mut record = BillingService::adjust_follow_count(
        Some(&admin),
        UserId::new(9),
        10,
        dec!(0.05),
        AdjustmentReason::Bonus,
        now(),
    )
    .unwrap();

    assert_eq!(record.status, BillingStatus::Pending);
    assert!(record.paid_at.is_none());

    let paid_at = now() + chrono::Duration::hours(2);
    record.mark_paid(paid_at).unwrap();
    assert_eq!(record.status, BillingStatus::Paid);
    assert_eq!(record.paid_at, Some(paid_at));

    // Paid is terminal.
    assert!(matches!(
        record.mark_overdue(),
        Err(BillingError::InvalidStatusTransition {
            from: BillingStatus::Paid,
            to: BillingStatus::Overdue,
        })
    ));
    assert!(record.mark_paid(paid_at).is_err());
}

#[test]
fn record_lifecycle_pending_overdue() {
    let admin = admin();
    let mut record = BillingService::adjust_follow_count(
        Some(&admin),
        UserId::new(9),
        10,
        dec!(0.05),
        AdjustmentReason::Other,
        now(),
    )
    .unwrap();

    record.mark_overdue().unwrap();
    assert_eq!(record.status, BillingStatus::Overdue);
    assert!(record.paid_at.is_none());
    assert!(record.mark_paid(now()).is_err());
}

#[test]
fn wire_names_match_api_contract() {
    use crate::billing::{OperationType, Platform};

    assert_eq!(
        serde_json::to_string(&Platform::Xiaohongshu).unwrap(),
        "\"xiaohongshu\""
    );
    assert_eq!(
        serde_json::to_string(&Platform::Douyin).unwrap(),
        "\"douyin\""
    );
    assert_eq!(
        serde_json::to_string(&OperationType::Follow).unwrap(),
        "\"follow\""
    );
    assert_eq!(
        serde_json::to_string(&BillingType::EmployeeCount).unwrap(),
        "\"employee_count\""
    );
    assert_eq!(
        serde_json::to_string(&BillingStatus::Overdue).unwrap(),
        "\"overdue\""
    );
    assert_eq!(
        serde_json::to_string(&AdjustmentReason::ManualAdjustment).unwrap(),
        "\"manual_adjustment\""
    );

    let platform: Platform = serde_json::from_str("\"douyin\"").unwrap();
    assert_eq!(platform, Platform::Douyin);
}

#[test]
fn billing_record_serializes_decimals_as_strings() {
    let admin = admin();
    let record = BillingService::adjust_follow_count(
        Some(&admin),
        UserId::new(9),
        100,
        dec!(0.05),
        AdjustmentReason::ManualAdjustment,
        now(),
    )
    .unwrap();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["unit_price"], serde_json::json!("0.05"));
    assert_eq!(json["total_amount"], serde_json::json!("5.00"));
    assert_eq!(json["reason"], serde_json::json!("manual_adjustment"));
    assert_eq!(json["billing_period"], serde_json::json!("2026-08"));
}
