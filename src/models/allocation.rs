//! Leave allocation output models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Leaves granted to an employee for one leave type over a date range.
///
/// Created once per non-LWP leave type when an assignment is allocated and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveAllocation {
    /// Unique identifier of the allocation.
    pub id: String,
    /// The employee the leaves are granted to.
    pub employee: String,
    /// The leave type granted.
    pub leave_type: String,
    /// First day of the allocation (inclusive).
    pub from_date: NaiveDate,
    /// Last day of the allocation (inclusive).
    pub to_date: NaiveDate,
    /// Number of leaves granted, rounded to the configured precision.
    pub new_leaves_allocated: Decimal,
    /// The leave period, for assignments based on one.
    pub leave_period: Option<String>,
    /// The policy the allocation came from.
    pub leave_policy: String,
    /// The assignment the allocation came from.
    pub leave_policy_assignment: String,
    /// Whether unused leaves of this allocation carry forward.
    pub carry_forward: bool,
}

/// Summary of one allocation returned to callers of the grant operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantedAllocation {
    /// Identifier of the created allocation.
    pub allocation_id: String,
    /// Number of leaves granted.
    pub leaves: Decimal,
}

impl From<&LeaveAllocation> for GrantedAllocation {
    fn from(allocation: &LeaveAllocation) -> Self {
        Self {
            allocation_id: allocation.id.clone(),
            leaves: allocation.new_leaves_allocated,
        }
    }
}
