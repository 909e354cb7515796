//! Recurring billing schedule.
//!
//! Employee seats are billed on a fixed 31-day cycle counted from the
//! employee's creation instant. This is deliberately NOT calendar-month
//! billing: an employee created on Jan 31 is next billed on Mar 3 (in a
//! non-leap year), never on Feb 28 or Mar 1.

use chrono::{DateTime, Duration, Utc};

/// Length of one employee billing cycle, in days.
pub const BILLING_CYCLE_DAYS: i64 = 31;

const SECS_PER_DAY: i64 = 86_400;

/// Next billing date for an employee: `created_at + 31 days`.
///
/// Derived on demand, never stored.
#[must_use]
pub fn next_billing_date(created_at: DateTime<Utc>) -> DateTime<Utc> {
    created_at + Duration::days(BILLING_CYCLE_DAYS)
}

/// Whole days until the employee's next billing date, rounded up.
///
/// Zero or negative means the seat is due.
#[must_use]
pub fn days_until_due(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let remaining = next_billing_date(created_at) - now;
    // `i64::div_ceil` is not yet stable; ceiling division done manually.
    let secs = remaining.num_seconds();
    let quotient = secs / SECS_PER_DAY;
    if secs % SECS_PER_DAY > 0 {
        quotient + 1
    } else {
        quotient
    }
}

/// True once the billing cycle has elapsed.
#[must_use]
pub fn is_due(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= next_billing_date(created_at)
}

/// Billing period label for a charge created at the given instant,
/// e.g. "2026-08".
#[must_use]
pub fn billing_period(at: DateTime<Utc>) -> String {
    at.format("%Y-%m").to_string()
}
