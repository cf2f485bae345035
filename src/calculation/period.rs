//! Effective period resolution for leave policy assignments.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AssignmentBasis, LeavePeriod, LeavePolicyAssignment};

/// Sets an assignment's effective dates from its basis.
///
/// - Leave period basis: both dates come from `leave_period`.
/// - Joining date basis: the period starts on `date_of_joining`; the end date
///   is left as supplied.
/// - No basis: the dates are left untouched.
///
/// Fails when the basis needs a leave period or joining date that was not
/// supplied.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::resolve_effective_dates;
/// use leave_engine::models::{AssignmentBasis, AssignmentData, LeavePeriod};
/// use chrono::NaiveDate;
///
/// let mut assignment = AssignmentData {
///     assignment_based_on: Some(AssignmentBasis::LeavePeriod),
///     leave_policy: "Standard Policy".to_string(),
///     effective_from: None,
///     effective_to: None,
///     leave_period: Some("FY 2025".to_string()),
///     carry_forward: false,
/// }
/// .into_assignment("LPA-0001", "EMP-0001");
///
/// let period = LeavePeriod {
///     name: "FY 2025".to_string(),
///     from_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     to_date: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
/// };
///
/// resolve_effective_dates(&mut assignment, Some(&period), None).unwrap();
/// assert_eq!(assignment.effective_from, Some(period.from_date));
/// assert_eq!(assignment.effective_to, Some(period.to_date));
/// ```
pub fn resolve_effective_dates(
    assignment: &mut LeavePolicyAssignment,
    leave_period: Option<&LeavePeriod>,
    date_of_joining: Option<NaiveDate>,
) -> EngineResult<()> {
    match assignment.assignment_based_on {
        Some(AssignmentBasis::LeavePeriod) => {
            let period = leave_period.ok_or_else(|| EngineError::InvalidAssignment {
                field: "leave_period".to_string(),
                message: "required when assignment is based on a leave period".to_string(),
            })?;
            assignment.effective_from = Some(period.from_date);
            assignment.effective_to = Some(period.to_date);
        }
        Some(AssignmentBasis::JoiningDate) => {
            let joined = date_of_joining.ok_or_else(|| EngineError::InvalidAssignment {
                field: "date_of_joining".to_string(),
                message: "required when assignment is based on the joining date".to_string(),
            })?;
            assignment.effective_from = Some(joined);
        }
        None => {}
    }

    debug!(
        assignment_id = %assignment.id,
        effective_from = ?assignment.effective_from,
        effective_to = ?assignment.effective_to,
        "Resolved effective dates"
    );

    Ok(())
}
