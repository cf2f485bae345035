//! Pro-ration of leave allocations for late joiners.
//!
//! An employee who joins after the assignment's period has started receives
//! only the share of the allocation covering the days from joining to the end
//! of the pro-ration period.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AuditStep, LeaveType};

use super::allocate_on_day::is_current_month_earned;
use super::context::AllocationContext;
use super::dates::{inclusive_days, last_day_of_month, last_day_of_previous_month};
use super::precision::round_to_precision;

/// The result of applying pro-ration to an allocation.
#[derive(Debug, Clone)]
pub struct ProRationResult {
    /// The allocation after pro-ration (unchanged when not applied).
    pub leaves: Decimal,
    /// Whether pro-ration was applied.
    pub applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Scales `leaves` by the share of the period worked since joining.
///
/// The share is `(period_end - date_of_joining + 1) / (period_end -
/// period_start + 1)` in inclusive days, and the result is rounded to
/// `precision`. Spans that end before joining, or periods that end before
/// they start, yield zero.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::calculate_pro_rated_leaves;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let leaves = calculate_pro_rated_leaves(
///     Decimal::from(24),
///     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
///     3,
/// );
/// // 24 x 184 / 365
/// assert_eq!(leaves, Decimal::from_str("12.099").unwrap());
/// ```
pub fn calculate_pro_rated_leaves(
    leaves: Decimal,
    date_of_joining: NaiveDate,
    period_start: NaiveDate,
    period_end: NaiveDate,
    precision: u32,
) -> Decimal {
    let actual_period = inclusive_days(date_of_joining, period_end);
    let complete_period = inclusive_days(period_start, period_end);

    if actual_period <= 0 || complete_period <= 0 {
        return Decimal::ZERO;
    }

    let pro_rated = leaves * Decimal::from(actual_period) / Decimal::from(complete_period);
    round_to_precision(pro_rated, precision)
}

/// Returns the last day of the pro-ration period for a leave type.
///
/// Earned leaves are pro-rated up to the end of the last earned month: the
/// reference month when it is already earned, otherwise the month before.
/// Other leave types are pro-rated over the whole assignment.
pub fn pro_ration_period_end(leave_type: &LeaveType, ctx: &AllocationContext) -> NaiveDate {
    if leave_type.is_earned_leave {
        if is_current_month_earned(
            ctx.reference_date,
            ctx.date_of_joining,
            leave_type.allocate_on_day,
        ) {
            last_day_of_month(ctx.reference_date)
        } else {
            last_day_of_previous_month(ctx.reference_date)
        }
    } else {
        ctx.effective_to
    }
}

/// Applies pro-ration to an allocation for an employee who joined late.
///
/// Nothing changes when `leaves` is zero or the employee joined on or before
/// the assignment's start. Otherwise the allocation is scaled by
/// [`calculate_pro_rated_leaves`] up to [`pro_ration_period_end`]. Results
/// for leave types other than earned leave are rounded up to a whole day.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::{AllocationContext, apply_pro_ration};
/// use leave_engine::models::LeaveType;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let ctx = AllocationContext::new(
///     None,
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
/// );
///
/// let result = apply_pro_ration(Decimal::from(24), &LeaveType::new("Casual Leave"), &ctx, 1);
/// assert!(result.applied);
/// assert_eq!(result.leaves, Decimal::from(13));
/// ```
pub fn apply_pro_ration(
    leaves: Decimal,
    leave_type: &LeaveType,
    ctx: &AllocationContext,
    step_number: u32,
) -> ProRationResult {
    if leaves.is_zero() || !ctx.joined_mid_period() {
        let reasoning = if leaves.is_zero() {
            "Nothing to pro-rate".to_string()
        } else {
            format!(
                "Joined {} on or before period start {}, no pro-ration",
                ctx.date_of_joining, ctx.effective_from
            )
        };

        return ProRationResult {
            leaves,
            applied: false,
            audit_step: AuditStep {
                step_number,
                rule_id: "pro_ration".to_string(),
                rule_name: "Pro-Rated Leaves".to_string(),
                input: serde_json::json!({
                    "leaves": leaves.normalize().to_string(),
                    "date_of_joining": ctx.date_of_joining.to_string(),
                    "period_start": ctx.effective_from.to_string()
                }),
                output: serde_json::json!({
                    "leaves": leaves.normalize().to_string(),
                    "pro_ration_applied": false
                }),
                reasoning,
            },
        };
    }

    let period_end = pro_ration_period_end(leave_type, ctx);
    let pro_rated = calculate_pro_rated_leaves(
        leaves,
        ctx.date_of_joining,
        ctx.effective_from,
        period_end,
        ctx.precision,
    );

    // Earned leaves keep their fractional part
    let result = if leave_type.is_earned_leave {
        pro_rated
    } else {
        pro_rated.ceil()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "pro_ration".to_string(),
        rule_name: "Pro-Rated Leaves".to_string(),
        input: serde_json::json!({
            "leaves": leaves.normalize().to_string(),
            "date_of_joining": ctx.date_of_joining.to_string(),
            "period_start": ctx.effective_from.to_string(),
            "period_end": period_end.to_string()
        }),
        output: serde_json::json!({
            "leaves": result.normalize().to_string(),
            "pro_ration_applied": true,
            "rounded_up": !leave_type.is_earned_leave
        }),
        reasoning: format!(
            "{} x {} / {} days = {}{}",
            leaves.normalize(),
            inclusive_days(ctx.date_of_joining, period_end).max(0),
            inclusive_days(ctx.effective_from, period_end).max(0),
            pro_rated.normalize(),
            if leave_type.is_earned_leave {
                String::new()
            } else {
                format!(", rounded up to {}", result.normalize())
            }
        ),
    };

    ProRationResult {
        leaves: result,
        applied: true,
        audit_step,
    }
}
