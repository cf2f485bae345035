//! Carry-forward eligibility and advisories.

use tracing::warn;

use crate::error::EngineResult;
use crate::models::{AuditWarning, LeavePolicy, LeavePolicyAssignment, LeaveType};

/// Warning code for leave types that will not be carried forward.
pub const CARRY_FORWARD_DISABLED: &str = "CARRY_FORWARD_DISABLED";

/// Returns whether an allocation of `leave_type` carries forward.
///
/// A requested carry-forward is dropped when the leave type disallows it.
pub fn effective_carry_forward(requested: bool, leave_type: &LeaveType) -> bool {
    requested && leave_type.is_carry_forward
}

/// Returns the advisory raised when carry-forward is requested for
/// `leave_type`, or `None` if the leave type allows it.
pub fn carry_forward_advisory(leave_type: &LeaveType) -> Option<AuditWarning> {
    if leave_type.is_carry_forward {
        return None;
    }

    Some(AuditWarning {
        code: CARRY_FORWARD_DISABLED.to_string(),
        message: format!(
            "Leaves for the Leave Type {} won't be carry-forwarded since carry-forwarding is disabled.",
            leave_type.name
        ),
        severity: "low".to_string(),
    })
}

/// Lists advisories for policy leave types that cannot be carried forward.
///
/// Returns nothing unless the assignment requests carry-forward. Each leave
/// type of the policy whose descriptor disallows carry-forward produces one
/// low-severity [`AuditWarning`]. The advisories never block the assignment.
///
/// `leave_type` resolves a leave type name to its descriptor.
pub fn carry_forward_advisories<F>(
    assignment: &LeavePolicyAssignment,
    policy: &LeavePolicy,
    mut leave_type: F,
) -> EngineResult<Vec<AuditWarning>>
where
    F: FnMut(&str) -> EngineResult<LeaveType>,
{
    if !assignment.carry_forward {
        return Ok(Vec::new());
    }

    let mut warnings = Vec::new();
    for name in policy.leave_types() {
        let details = leave_type(name)?;
        if let Some(warning) = carry_forward_advisory(&details) {
            warn!(
                assignment_id = %assignment.id,
                leave_type = %details.name,
                "Carry forward requested for leave type that disallows it"
            );
            warnings.push(warning);
        }
    }

    Ok(warnings)
}
