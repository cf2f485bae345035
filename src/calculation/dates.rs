//! Calendar helpers for month boundaries and inclusive day counts.

use chrono::{Datelike, NaiveDate};

/// Returns the first day of `date`'s month.
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Returns the last day of `date`'s month, accounting for leap years.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::last_day_of_month;
/// use chrono::NaiveDate;
///
/// let feb = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
/// assert_eq!(last_day_of_month(feb), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

/// Returns the last day of the month before `date`'s month.
pub fn last_day_of_previous_month(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date).pred_opt().unwrap_or(date)
}

/// Number of days from `from` to `to`, counting both ends.
///
/// Negative or zero when `to` is before `from`.
pub fn inclusive_days(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days() + 1
}
