//! Overlap validation between leave policy assignments.

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::LeavePolicyAssignment;

/// Returns true if two inclusive date ranges share at least one day.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::ranges_overlap;
/// use chrono::NaiveDate;
///
/// let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
/// assert!(ranges_overlap((d(1, 1), d(6, 30)), (d(6, 30), d(12, 31))));
/// assert!(!ranges_overlap((d(1, 1), d(6, 29)), (d(6, 30), d(12, 31))));
/// ```
pub fn ranges_overlap(first: (NaiveDate, NaiveDate), second: (NaiveDate, NaiveDate)) -> bool {
    first.1 >= second.0 && first.0 <= second.1
}

/// Checks that no submitted assignment of the same employee overlaps `candidate`.
///
/// Only submitted assignments for the candidate's employee take part; the
/// candidate itself (same id) and assignments without a complete date range
/// are ignored. On conflict, the error names the candidate's policy and
/// period.
pub fn validate_assignment_overlap(
    candidate: &LeavePolicyAssignment,
    existing: &[LeavePolicyAssignment],
) -> EngineResult<()> {
    let range = candidate.effective_range()?;

    let conflict = existing
        .iter()
        .filter(|other| {
            other.employee == candidate.employee && other.id != candidate.id && other.is_submitted()
        })
        .find(|other| {
            other
                .effective_range()
                .is_ok_and(|other_range| ranges_overlap(other_range, range))
        });

    match conflict {
        Some(other) => {
            warn!(
                assignment_id = %candidate.id,
                conflicting_assignment_id = %other.id,
                employee = %candidate.employee,
                "Leave policy assignment overlaps an existing assignment"
            );
            Err(EngineError::OverlapConflict {
                leave_policy: candidate.leave_policy.clone(),
                employee: candidate.employee.clone(),
                effective_from: range.0,
                effective_to: range.1,
            })
        }
        None => Ok(()),
    }
}
