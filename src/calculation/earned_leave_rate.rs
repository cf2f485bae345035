//! Earned leave accrual rate.

use rust_decimal::Decimal;

use crate::models::{EarnedLeaveFrequency, EarnedLeaveRounding};

/// Returns the leaves credited per accrual for an annual allocation.
///
/// The annual allocation is divided by the number of accruals per year for
/// `frequency`, then rounded to `rounding` when one is set.
///
/// # Examples
///
/// ```
/// use leave_engine::calculation::earned_leave_rate;
/// use leave_engine::models::{EarnedLeaveFrequency, EarnedLeaveRounding};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rate = earned_leave_rate(Decimal::from(24), EarnedLeaveFrequency::Monthly, None);
/// assert_eq!(rate, Decimal::from(2));
///
/// let rate = earned_leave_rate(
///     Decimal::from(15),
///     EarnedLeaveFrequency::Monthly,
///     Some(EarnedLeaveRounding::Half),
/// );
/// assert_eq!(rate, Decimal::from_str("1.5").unwrap());
/// ```
pub fn earned_leave_rate(
    annual_allocation: Decimal,
    frequency: EarnedLeaveFrequency,
    rounding: Option<EarnedLeaveRounding>,
) -> Decimal {
    if annual_allocation.is_zero() {
        return Decimal::ZERO;
    }

    let rate = annual_allocation / frequency.periods_per_year();
    match rounding {
        Some(rounding) => rounding.apply(rate),
        None => rate,
    }
}
