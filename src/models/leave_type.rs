//! Leave type descriptor and its accrual settings.
//!
//! A [`LeaveType`] is an immutable snapshot of the rules that decide how much
//! of a policy's annual allocation is granted when a policy is assigned.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The day of the month on which an earned leave is credited.
///
/// Once this day has been reached in the reference month, the month counts
/// as already earned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocateOnDay {
    /// Credited on the same day of the month as the employee's joining date.
    DateOfJoining,
    /// Credited on the first day of each month.
    FirstDay,
    /// Credited on the last day of each month.
    #[default]
    LastDay,
}

impl std::fmt::Display for AllocateOnDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocateOnDay::DateOfJoining => write!(f, "Date of Joining"),
            AllocateOnDay::FirstDay => write!(f, "First Day"),
            AllocateOnDay::LastDay => write!(f, "Last Day"),
        }
    }
}

/// How often an earned leave accrues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarnedLeaveFrequency {
    /// Twelve accruals per year.
    #[default]
    Monthly,
    /// Four accruals per year.
    Quarterly,
    /// Two accruals per year.
    HalfYearly,
    /// One accrual per year.
    Yearly,
}

impl EarnedLeaveFrequency {
    /// Number of accruals in one year.
    pub fn periods_per_year(self) -> Decimal {
        match self {
            EarnedLeaveFrequency::Monthly => Decimal::from(12),
            EarnedLeaveFrequency::Quarterly => Decimal::from(4),
            EarnedLeaveFrequency::HalfYearly => Decimal::from(2),
            EarnedLeaveFrequency::Yearly => Decimal::ONE,
        }
    }
}

impl std::fmt::Display for EarnedLeaveFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EarnedLeaveFrequency::Monthly => write!(f, "Monthly"),
            EarnedLeaveFrequency::Quarterly => write!(f, "Quarterly"),
            EarnedLeaveFrequency::HalfYearly => write!(f, "Half-Yearly"),
            EarnedLeaveFrequency::Yearly => write!(f, "Yearly"),
        }
    }
}

/// Granularity to which a per-period earned leave is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EarnedLeaveRounding {
    /// Nearest quarter day.
    #[serde(rename = "0.25")]
    Quarter,
    /// Nearest half day.
    #[serde(rename = "0.5")]
    Half,
    /// Nearest whole day.
    #[serde(rename = "1.0")]
    Whole,
}

impl EarnedLeaveRounding {
    /// Rounds `value` to this granularity, half-to-even at the midpoint.
    pub fn apply(self, value: Decimal) -> Decimal {
        let steps = match self {
            EarnedLeaveRounding::Quarter => Decimal::from(4),
            EarnedLeaveRounding::Half => Decimal::from(2),
            EarnedLeaveRounding::Whole => Decimal::ONE,
        };
        (value * steps).round() / steps
    }
}

/// Snapshot of a leave type's accrual rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveType {
    /// Unique name of the leave type (e.g., "Casual Leave").
    pub name: String,
    /// Leave without pay; never allocated automatically.
    #[serde(default)]
    pub is_lwp: bool,
    /// Balance accrues incrementally instead of being granted upfront.
    #[serde(default)]
    pub is_earned_leave: bool,
    /// Granted in exchange for extra worked time by a separate process.
    #[serde(default)]
    pub is_compensatory: bool,
    /// Unused balance may be carried into the next period.
    #[serde(default)]
    pub is_carry_forward: bool,
    /// Day of the month on which earned leave is credited.
    #[serde(default)]
    pub allocate_on_day: AllocateOnDay,
    /// How often earned leave accrues.
    #[serde(default)]
    pub earned_leave_frequency: EarnedLeaveFrequency,
    /// Rounding applied to each accrual, if any.
    #[serde(default)]
    pub rounding: Option<EarnedLeaveRounding>,
    /// Days after which carry-forwarded leaves expire.
    #[serde(default)]
    pub expire_carry_forwarded_leaves_after_days: Option<u32>,
}

impl LeaveType {
    /// Creates a plain leave type with every flag cleared.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_lwp: false,
            is_earned_leave: false,
            is_compensatory: false,
            is_carry_forward: false,
            allocate_on_day: AllocateOnDay::default(),
            earned_leave_frequency: EarnedLeaveFrequency::default(),
            rounding: None,
            expire_carry_forwarded_leaves_after_days: None,
        }
    }
}
