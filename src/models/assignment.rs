//! Leave policy assignment models.
//!
//! This module contains the [`LeavePolicyAssignment`] record and the shared
//! [`AssignmentData`] used to create assignments for many employees at once.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// What an assignment's effective period is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentBasis {
    /// Dates come from a leave period record.
    LeavePeriod,
    /// The period starts on the employee's joining date.
    JoiningDate,
}

impl std::fmt::Display for AssignmentBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentBasis::LeavePeriod => write!(f, "Leave Period"),
            AssignmentBasis::JoiningDate => write!(f, "Joining Date"),
        }
    }
}

/// Lifecycle state of an assignment as far as overlap checks are concerned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Saved but not confirmed.
    #[default]
    Draft,
    /// Confirmed; takes part in overlap validation.
    Submitted,
}

/// Assignment of a leave policy to one employee for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePolicyAssignment {
    /// Unique identifier of the assignment.
    pub id: String,
    /// The employee the policy is assigned to.
    pub employee: String,
    /// What the effective period is derived from, if anything.
    #[serde(default)]
    pub assignment_based_on: Option<AssignmentBasis>,
    /// First day the assignment is effective (inclusive).
    #[serde(default)]
    pub effective_from: Option<NaiveDate>,
    /// Last day the assignment is effective (inclusive).
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// Whether unused leaves should be carried forward.
    #[serde(default)]
    pub carry_forward: bool,
    /// The leave period the dates come from.
    #[serde(default)]
    pub leave_period: Option<String>,
    /// The assigned leave policy.
    pub leave_policy: String,
    /// Draft or submitted.
    #[serde(default)]
    pub status: AssignmentStatus,
    /// Set once leave allocations have been granted.
    #[serde(default)]
    pub leaves_allocated: bool,
}

impl LeavePolicyAssignment {
    /// Returns true if the assignment has been submitted.
    pub fn is_submitted(&self) -> bool {
        self.status == AssignmentStatus::Submitted
    }

    /// Returns the effective date range, failing if either end is missing or
    /// the range is inverted.
    ///
    /// # Example
    ///
    /// ```
    /// use leave_engine::models::{AssignmentData, LeavePolicyAssignment};
    /// use chrono::NaiveDate;
    ///
    /// let data = AssignmentData {
    ///     assignment_based_on: None,
    ///     leave_policy: "Standard Policy".to_string(),
    ///     effective_from: NaiveDate::from_ymd_opt(2025, 1, 1),
    ///     effective_to: NaiveDate::from_ymd_opt(2025, 12, 31),
    ///     leave_period: None,
    ///     carry_forward: false,
    /// };
    /// let assignment = data.into_assignment("LPA-0001", "EMP-0001");
    /// let (from, to) = assignment.effective_range().unwrap();
    /// assert!(from < to);
    /// ```
    pub fn effective_range(&self) -> EngineResult<(NaiveDate, NaiveDate)> {
        let from = self
            .effective_from
            .ok_or_else(|| EngineError::InvalidAssignment {
                field: "effective_from".to_string(),
                message: "must be set".to_string(),
            })?;
        let to = self
            .effective_to
            .ok_or_else(|| EngineError::InvalidAssignment {
                field: "effective_to".to_string(),
                message: "must be set".to_string(),
            })?;

        if from > to {
            return Err(EngineError::InvalidAssignment {
                field: "effective_to".to_string(),
                message: format!("{} is before effective_from {}", to, from),
            });
        }

        Ok((from, to))
    }
}

/// Assignment fields shared by every employee in a bulk creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentData {
    /// What the effective period is derived from, if anything.
    #[serde(default)]
    pub assignment_based_on: Option<AssignmentBasis>,
    /// The leave policy to assign.
    pub leave_policy: String,
    /// Explicit start of the period.
    #[serde(default)]
    pub effective_from: Option<NaiveDate>,
    /// Explicit end of the period.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// The leave period to take dates from.
    #[serde(default)]
    pub leave_period: Option<String>,
    /// Whether unused leaves should be carried forward.
    #[serde(default)]
    pub carry_forward: bool,
}

impl AssignmentData {
    /// Builds a draft assignment of this data for one employee.
    pub fn into_assignment(
        self,
        id: impl Into<String>,
        employee: impl Into<String>,
    ) -> LeavePolicyAssignment {
        LeavePolicyAssignment {
            id: id.into(),
            employee: employee.into(),
            assignment_based_on: self.assignment_based_on,
            effective_from: self.effective_from,
            effective_to: self.effective_to,
            carry_forward: self.carry_forward,
            leave_period: self.leave_period,
            leave_policy: self.leave_policy,
            status: AssignmentStatus::Draft,
            leaves_allocated: false,
        }
    }
}
