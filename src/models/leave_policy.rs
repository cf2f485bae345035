//! Leave policy and leave period models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest annual allocation a policy or calculation accepts.
pub const MAX_ANNUAL_ALLOCATION: Decimal = Decimal::ONE_THOUSAND;

/// Returns true if `value` is between zero and [`MAX_ANNUAL_ALLOCATION`].
pub fn is_valid_annual_allocation(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= MAX_ANNUAL_ALLOCATION
}

/// One leave type entry of a leave policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicyDetail {
    /// Name of the leave type.
    pub leave_type: String,
    /// Leaves granted per year under this policy.
    pub annual_allocation: Decimal,
}

/// An ordered collection of leave types with their annual allocations.
///
/// # Example
///
/// ```
/// use leave_engine::models::{LeavePolicy, LeavePolicyDetail};
/// use rust_decimal::Decimal;
///
/// let policy = LeavePolicy {
///     name: "Standard Policy".to_string(),
///     title: "Standard".to_string(),
///     details: vec![LeavePolicyDetail {
///         leave_type: "Casual Leave".to_string(),
///         annual_allocation: Decimal::from(12),
///     }],
/// };
/// assert_eq!(policy.leave_types().collect::<Vec<_>>(), vec!["Casual Leave"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicy {
    /// Unique name of the policy.
    pub name: String,
    /// Display title of the policy.
    #[serde(default)]
    pub title: String,
    /// Leave types granted by this policy, in order.
    pub details: Vec<LeavePolicyDetail>,
}

impl LeavePolicy {
    /// Iterates over the leave type names of the policy in order.
    pub fn leave_types(&self) -> impl Iterator<Item = &str> {
        self.details.iter().map(|d| d.leave_type.as_str())
    }

    /// Returns the first detail whose annual allocation is out of range.
    pub fn invalid_allocation(&self) -> Option<&LeavePolicyDetail> {
        self.details
            .iter()
            .find(|d| !is_valid_annual_allocation(d.annual_allocation))
    }
}

/// A named date range leave policies can be assigned against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePeriod {
    /// Unique name of the leave period.
    pub name: String,
    /// First day of the period (inclusive).
    pub from_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub to_date: NaiveDate,
}
