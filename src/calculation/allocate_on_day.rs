//! Allocate-on-day rule evaluation.
//!
//! Decides whether the month containing the reference date has already been
//! earned for an earned leave type.

use chrono::{Datelike, NaiveDate};

use crate::models::AllocateOnDay;

use super::dates::{first_day_of_month, last_day_of_month};

/// Returns true if the employee is already entitled to the current month's
/// earned leave on `reference_date`.
///
/// - [`AllocateOnDay::DateOfJoining`]: the reference day of month has reached
///   the joining day of month.
/// - [`AllocateOnDay::FirstDay`]: always true once the month has started.
/// - [`AllocateOnDay::LastDay`]: only on the last day of the month.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::is_current_month_earned;
/// use leave_engine::models::AllocateOnDay;
/// use chrono::NaiveDate;
///
/// let joined = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// let reference = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
/// assert!(is_current_month_earned(reference, joined, AllocateOnDay::DateOfJoining));
/// assert!(!is_current_month_earned(reference, joined, AllocateOnDay::LastDay));
/// ```
pub fn is_current_month_earned(
    reference_date: NaiveDate,
    date_of_joining: NaiveDate,
    allocate_on_day: AllocateOnDay,
) -> bool {
    match allocate_on_day {
        AllocateOnDay::DateOfJoining => reference_date.day() >= date_of_joining.day(),
        AllocateOnDay::FirstDay => reference_date >= first_day_of_month(reference_date),
        AllocateOnDay::LastDay => reference_date == last_day_of_month(reference_date),
    }
}
