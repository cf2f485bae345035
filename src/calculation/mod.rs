//! Calculation logic for the Leave Policy Allocation Engine.
//!
//! This module contains the rules for resolving an assignment's effective
//! period, validating overlaps between assignments, carry-forward
//! advisories, crediting earned leave for months already passed, pro-rating
//! allocations for late joiners, and deriving the final allocation quantity.

mod allocate_on_day;
mod allocation;
mod carry_forward;
mod context;
mod dates;
mod earned_leave_rate;
mod months_passed;
mod overlap;
mod period;
mod precision;
mod pro_ration;

pub use allocate_on_day::is_current_month_earned;
pub use allocation::{AllocationCalculation, calculate_new_leaves, calculate_policy_allocations};
pub use carry_forward::{
    CARRY_FORWARD_DISABLED, carry_forward_advisories, carry_forward_advisory,
    effective_carry_forward,
};
pub use context::AllocationContext;
pub use dates::{first_day_of_month, inclusive_days, last_day_of_month, last_day_of_previous_month};
pub use earned_leave_rate::earned_leave_rate;
pub use months_passed::{MonthsPassedResult, calculate_leaves_for_passed_months, count_months_passed};
pub use overlap::{ranges_overlap, validate_assignment_overlap};
pub use period::resolve_effective_dates;
pub use precision::{DEFAULT_FLOAT_PRECISION, round_to_precision};
pub use pro_ration::{
    ProRationResult, apply_pro_ration, calculate_pro_rated_leaves, pro_ration_period_end,
};
