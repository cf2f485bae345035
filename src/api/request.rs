//! Request types for the Leave Policy Allocation Engine API.
//!
//! This module defines the JSON request structures for the API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::AllocationContext;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AssignmentBasis, AssignmentData, LeaveType, MAX_ANNUAL_ALLOCATION, is_valid_annual_allocation,
};

/// Request body for the `/calculate` endpoint.
///
/// Describes one leave type and the assignment period it is allocated over.
/// Nothing is read from or written to the record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The leave type descriptor to allocate.
    pub leave_type: LeaveType,
    /// Leaves granted per year.
    pub annual_allocation: Decimal,
    /// What the assignment period was derived from, if anything.
    #[serde(default)]
    pub assignment_based_on: Option<AssignmentBasis>,
    /// First day of the assignment (inclusive).
    pub effective_from: NaiveDate,
    /// Last day of the assignment (inclusive).
    pub effective_to: NaiveDate,
    /// The employee's joining date.
    pub date_of_joining: NaiveDate,
    /// Whether carry-forward is requested.
    #[serde(default)]
    pub carry_forward: bool,
    /// Date to calculate as of; today when omitted.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    /// Decimal digits to keep; the configured precision when omitted.
    #[serde(default)]
    pub precision: Option<u32>,
}

impl CalculationRequest {
    /// Builds the calculation context, rejecting inverted periods and
    /// out-of-range annual allocations.
    pub fn context(
        &self,
        reference_date: NaiveDate,
        default_precision: u32,
    ) -> EngineResult<AllocationContext> {
        if !is_valid_annual_allocation(self.annual_allocation) {
            return Err(EngineError::InvalidAssignment {
                field: "annual_allocation".to_string(),
                message: format!(
                    "{} is outside 0 to {}",
                    self.annual_allocation, MAX_ANNUAL_ALLOCATION
                ),
            });
        }
        if self.effective_from > self.effective_to {
            return Err(EngineError::InvalidAssignment {
                field: "effective_to".to_string(),
                message: format!(
                    "{} is before effective_from {}",
                    self.effective_to, self.effective_from
                ),
            });
        }

        let mut ctx = AllocationContext::new(
            self.assignment_based_on,
            self.effective_from,
            self.effective_to,
            self.date_of_joining,
            reference_date,
        );
        ctx.precision = self.precision.unwrap_or(default_precision);
        Ok(ctx)
    }
}

/// Request body for the `/assignments` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAssignmentRequest {
    /// Ids of the employees to assign the policy to.
    pub employees: Vec<String>,
    /// Assignment fields shared by every employee.
    pub data: AssignmentData,
    /// Date to grant allocations as of; today when omitted.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

/// Query parameters for granting allocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrantQuery {
    /// Date to grant allocations as of; today when omitted.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}
