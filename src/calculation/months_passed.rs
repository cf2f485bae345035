//! Earned leave credit for months already elapsed.
//!
//! When an earned leave policy is assigned partway through its period, the
//! months that have already passed are credited upfront instead of waiting
//! for the recurring accrual job.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{AuditStep, LeaveType};

use super::allocate_on_day::is_current_month_earned;
use super::context::AllocationContext;
use super::earned_leave_rate::earned_leave_rate;

/// The result of crediting elapsed months for an earned leave type.
#[derive(Debug, Clone)]
pub struct MonthsPassedResult {
    /// Number of months credited, including the current month when earned.
    pub months_passed: u32,
    /// Leaves credited per accrual.
    pub rate: Decimal,
    /// Total leaves credited.
    pub leaves: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Counts completed months from `from_date` to `reference_date`.
///
/// Returns `None` when the reference date falls before `from_date`'s month.
/// Only one year boundary is accounted for: for spans reaching into a later
/// year the count is `(12 - from.month) + reference.month` regardless of how
/// many years apart the dates are.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::count_months_passed;
/// use chrono::NaiveDate;
///
/// let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let reference = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
/// assert_eq!(count_months_passed(from, reference), Some(3));
///
/// let reference = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// assert_eq!(count_months_passed(from, reference), Some(12));
/// ```
pub fn count_months_passed(from_date: NaiveDate, reference_date: NaiveDate) -> Option<u32> {
    if reference_date.year() == from_date.year() && reference_date.month() >= from_date.month() {
        Some(reference_date.month() - from_date.month())
    } else if reference_date.year() > from_date.year() {
        Some((12 - from_date.month()) + reference_date.month())
    } else {
        None
    }
}

/// Credits an earned leave type for the months already passed in the period.
///
/// The count runs from the later of the period start and the joining date up
/// to the reference date, clamped to the period end. One more month is added
/// when the leave type's allocate-on-day rule says the current month is
/// already earned. The credited leaves are the per-accrual rate times the
/// months passed, or zero when no month has passed.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::{AllocationContext, calculate_leaves_for_passed_months};
/// use leave_engine::models::{AllocateOnDay, AssignmentBasis, LeaveType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut leave_type = LeaveType::new("Earned Leave");
/// leave_type.is_earned_leave = true;
/// leave_type.allocate_on_day = AllocateOnDay::FirstDay;
///
/// let ctx = AllocationContext::new(
///     Some(AssignmentBasis::LeavePeriod),
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 4, 15).unwrap(),
/// );
///
/// let result = calculate_leaves_for_passed_months(Decimal::from(24), &leave_type, &ctx, 1);
/// assert_eq!(result.months_passed, 4);
/// assert_eq!(result.leaves, Decimal::from(8));
/// ```
pub fn calculate_leaves_for_passed_months(
    annual_allocation: Decimal,
    leave_type: &LeaveType,
    ctx: &AllocationContext,
    step_number: u32,
) -> MonthsPassedResult {
    let current_date = ctx.reference_date.min(ctx.effective_to);
    let from_date = ctx.effective_from.max(ctx.date_of_joining);

    if current_date.year() - from_date.year() > 1 {
        warn!(
            leave_type = %leave_type.name,
            from_date = %from_date,
            current_date = %current_date,
            "Months passed span crosses more than one year boundary"
        );
    }

    let current_month_earned = is_current_month_earned(
        ctx.reference_date,
        ctx.date_of_joining,
        leave_type.allocate_on_day,
    );

    let months_passed = match count_months_passed(from_date, current_date) {
        Some(months) if current_month_earned => months + 1,
        Some(months) => months,
        None => 0,
    };

    let rate = earned_leave_rate(
        annual_allocation,
        leave_type.earned_leave_frequency,
        leave_type.rounding,
    );

    let leaves = if months_passed > 0 {
        rate * Decimal::from(months_passed)
    } else {
        Decimal::ZERO
    };

    let reasoning = if months_passed > 0 {
        format!(
            "{} month(s) passed since {} as of {} ({} on {}), {} x {} = {}",
            months_passed,
            from_date,
            current_date,
            if current_month_earned {
                "current month earned"
            } else {
                "current month not yet earned"
            },
            leave_type.allocate_on_day,
            rate.normalize(),
            months_passed,
            leaves.normalize()
        )
    } else {
        format!(
            "No month passed since {} as of {}, nothing credited",
            from_date, current_date
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "months_passed".to_string(),
        rule_name: "Earned Leave For Passed Months".to_string(),
        input: serde_json::json!({
            "annual_allocation": annual_allocation.normalize().to_string(),
            "from_date": from_date.to_string(),
            "current_date": current_date.to_string(),
            "allocate_on_day": leave_type.allocate_on_day.to_string(),
            "earned_leave_frequency": leave_type.earned_leave_frequency.to_string()
        }),
        output: serde_json::json!({
            "months_passed": months_passed,
            "rate": rate.normalize().to_string(),
            "leaves": leaves.normalize().to_string()
        }),
        reasoning,
    };

    MonthsPassedResult {
        months_passed,
        rate,
        leaves,
        audit_step,
    }
}
