//! Inputs shared by every allocation rule for one assignment.

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{AssignmentBasis, LeavePolicyAssignment};

use super::precision::DEFAULT_FLOAT_PRECISION;

/// The period, joining date and reference date an allocation is computed for.
///
/// `reference_date` stands in for "today": every rule that depends on the
/// current date reads it from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationContext {
    /// What the assignment's period was derived from, if anything.
    pub assignment_based_on: Option<AssignmentBasis>,
    /// First day of the assignment (inclusive).
    pub effective_from: NaiveDate,
    /// Last day of the assignment (inclusive).
    pub effective_to: NaiveDate,
    /// The employee's joining date.
    pub date_of_joining: NaiveDate,
    /// The date the allocation is computed as of.
    pub reference_date: NaiveDate,
    /// Decimal digits kept in the allocated quantity.
    pub precision: u32,
}

impl AllocationContext {
    /// Builds a context from a resolved assignment.
    ///
    /// Fails if the assignment's effective range is missing or inverted.
    pub fn for_assignment(
        assignment: &LeavePolicyAssignment,
        date_of_joining: NaiveDate,
        reference_date: NaiveDate,
        precision: u32,
    ) -> EngineResult<Self> {
        let (effective_from, effective_to) = assignment.effective_range()?;
        Ok(Self {
            assignment_based_on: assignment.assignment_based_on,
            effective_from,
            effective_to,
            date_of_joining,
            reference_date,
            precision,
        })
    }

    /// Builds a context with the default precision.
    pub fn new(
        assignment_based_on: Option<AssignmentBasis>,
        effective_from: NaiveDate,
        effective_to: NaiveDate,
        date_of_joining: NaiveDate,
        reference_date: NaiveDate,
    ) -> Self {
        Self {
            assignment_based_on,
            effective_from,
            effective_to,
            date_of_joining,
            reference_date,
            precision: DEFAULT_FLOAT_PRECISION,
        }
    }

    /// Returns true if the employee joined after the assignment started.
    pub fn joined_mid_period(&self) -> bool {
        self.date_of_joining > self.effective_from
    }
}
