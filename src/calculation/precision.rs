//! Decimal precision handling for stored leave quantities.

use rust_decimal::Decimal;

/// Number of decimal digits used when no system setting is configured.
pub const DEFAULT_FLOAT_PRECISION: u32 = 3;

/// Rounds `value` to `precision` decimal digits, half-to-even at the midpoint.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::round_to_precision;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = Decimal::from_str("12.09863").unwrap();
/// assert_eq!(round_to_precision(value, 3), Decimal::from_str("12.099").unwrap());
/// ```
pub fn round_to_precision(value: Decimal, precision: u32) -> Decimal {
    value.round_dp(precision)
}
