//! Error types for the Leave Policy Allocation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while assigning leave policies
//! and granting leave allocations.

use chrono::NaiveDate;
use thiserror::Error;

/// Display format for dates embedded in user-facing messages.
pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

/// The main error type for the Leave Policy Allocation Engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::AlreadyAllocated {
///     assignment_id: "LPA-0001".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Leave already have been assigned for this Leave Policy Assignment: LPA-0001"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Another submitted assignment for the same employee covers an overlapping period.
    #[error(
        "Leave Policy: {leave_policy} already assigned for Employee {employee} for period {} to {}",
        .effective_from.format(DISPLAY_DATE_FORMAT),
        .effective_to.format(DISPLAY_DATE_FORMAT)
    )]
    OverlapConflict {
        /// The leave policy of the rejected assignment.
        leave_policy: String,
        /// The employee the assignment was for.
        employee: String,
        /// Start of the rejected assignment's period.
        effective_from: NaiveDate,
        /// End of the rejected assignment's period.
        effective_to: NaiveDate,
    },

    /// Leaves were already granted for the assignment.
    #[error("Leave already have been assigned for this Leave Policy Assignment: {assignment_id}")]
    AlreadyAllocated {
        /// The assignment that has already been allocated.
        assignment_id: String,
    },

    /// An assignment was missing data or contained inconsistent data.
    #[error("Invalid assignment field '{field}': {message}")]
    InvalidAssignment {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Leave type was not found.
    #[error("Leave type not found: {name}")]
    LeaveTypeNotFound {
        /// The leave type name that was not found.
        name: String,
    },

    /// Leave policy was not found.
    #[error("Leave policy not found: {name}")]
    LeavePolicyNotFound {
        /// The leave policy name that was not found.
        name: String,
    },

    /// Leave period was not found.
    #[error("Leave period not found: {name}")]
    LeavePeriodNotFound {
        /// The leave period name that was not found.
        name: String,
    },

    /// Employee was not found.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        id: String,
    },

    /// Leave policy assignment was not found.
    #[error("Leave policy assignment not found: {id}")]
    AssignmentNotFound {
        /// The assignment id that was not found.
        id: String,
    },

    /// The backing record store failed.
    #[error("Store error: {message}")]
    StoreError {
        /// A description of the store failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true for errors raised while validating an assignment.
    ///
    /// Bulk assignment creation skips employees that fail with one of these.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            EngineError::OverlapConflict { .. }
                | EngineError::InvalidAssignment { .. }
                | EngineError::AlreadyAllocated { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
