//! Assignment validation, submission and allocation granting.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    AllocationCalculation, AllocationContext, calculate_policy_allocations,
    carry_forward_advisories, resolve_effective_dates, validate_assignment_overlap,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AssignmentBasis, AssignmentData, AssignmentStatus, AuditWarning, GrantedAllocation,
    LeaveAllocation, LeavePolicyAssignment, LeaveType,
};
use crate::store::{AssignmentStore, LeaveTypeCache, LeaveTypeSource};

/// Outcome of submitting one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAssignment {
    /// The submitted assignment.
    pub assignment: LeavePolicyAssignment,
    /// Allocations granted on submission, keyed by leave type.
    pub allocations: BTreeMap<String, GrantedAllocation>,
    /// Non-blocking advisories raised during validation.
    pub warnings: Vec<AuditWarning>,
}

/// Validates, submits and allocates leave policy assignments.
pub struct AllocationService<S, L> {
    store: S,
    leave_types: LeaveTypeCache<L>,
    precision: u32,
}

impl<S: AssignmentStore, L: LeaveTypeSource> AllocationService<S, L> {
    /// Creates a service over `store`, reading leave types from `leave_types`
    /// and rounding allocations to `precision` decimal digits.
    pub fn new(store: S, leave_types: L, precision: u32) -> Self {
        Self {
            store,
            leave_types: LeaveTypeCache::new(leave_types),
            precision,
        }
    }

    /// Returns the underlying record store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the configured float precision.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Resolves a leave type descriptor through the cache.
    pub fn leave_type(&self, name: &str) -> EngineResult<LeaveType> {
        self.leave_types.get(name)
    }

    /// Resolves an assignment's dates and checks it can be submitted.
    ///
    /// Fills in `effective_from`/`effective_to` from the assignment's basis,
    /// then rejects incomplete or inverted ranges and overlaps with the
    /// employee's submitted assignments. Returns the carry-forward
    /// advisories, which never block submission.
    pub fn validate_assignment(
        &self,
        assignment: &mut LeavePolicyAssignment,
    ) -> EngineResult<Vec<AuditWarning>> {
        let employee = self.store.employee(&assignment.employee)?;

        let leave_period = match (assignment.assignment_based_on, &assignment.leave_period) {
            (Some(AssignmentBasis::LeavePeriod), Some(name)) => {
                Some(self.store.leave_period(name)?)
            }
            _ => None,
        };

        resolve_effective_dates(
            assignment,
            leave_period.as_ref(),
            Some(employee.date_of_joining),
        )?;
        assignment.effective_range()?;

        let existing = self.store.assignments_for_employee(&assignment.employee)?;
        validate_assignment_overlap(assignment, &existing)?;

        let policy = self.store.leave_policy(&assignment.leave_policy)?;
        carry_forward_advisories(assignment, &policy, |name| self.leave_types.get(name))
    }

    /// Validates an assignment, stores it as submitted and grants its
    /// allocations as of `reference_date`.
    ///
    /// Nothing is stored when validation or the calculation fails. An id
    /// that is already submitted is rejected by the store, with
    /// `AlreadyAllocated` once its leaves were granted.
    pub fn submit_assignment(
        &self,
        mut assignment: LeavePolicyAssignment,
        reference_date: NaiveDate,
    ) -> EngineResult<SubmittedAssignment> {
        let warnings = self.validate_assignment(&mut assignment)?;

        assignment.status = AssignmentStatus::Submitted;
        let allocations = self.build_allocations(&assignment, reference_date)?;

        self.store.save_assignment(assignment.clone())?;
        let granted = self.record(&assignment.id, allocations)?;
        assignment.leaves_allocated = true;

        info!(
            assignment_id = %assignment.id,
            employee = %assignment.employee,
            leave_policy = %assignment.leave_policy,
            allocations = granted.len(),
            "Submitted leave policy assignment"
        );

        Ok(SubmittedAssignment {
            assignment,
            allocations: granted,
            warnings,
        })
    }

    /// Computes the allocations an assignment would receive as of
    /// `reference_date`, without storing anything.
    pub fn calculate_allocations(
        &self,
        assignment: &LeavePolicyAssignment,
        reference_date: NaiveDate,
    ) -> EngineResult<Vec<AllocationCalculation>> {
        let employee = self.store.employee(&assignment.employee)?;
        let policy = self.store.leave_policy(&assignment.leave_policy)?;
        let ctx = AllocationContext::for_assignment(
            assignment,
            employee.date_of_joining,
            reference_date,
            self.precision,
        )?;

        calculate_policy_allocations(&policy, &ctx, assignment.carry_forward, |name| {
            self.leave_types.get(name)
        })
    }

    /// Grants leave allocations for a submitted assignment.
    ///
    /// Creates one allocation per non-LWP leave type of the assignment's
    /// policy and marks the assignment allocated. Fails with
    /// `AlreadyAllocated` if the assignment was allocated before, including
    /// by a concurrent call; no allocation is written in that case.
    pub fn grant_leave_allocations(
        &self,
        assignment_id: &str,
        reference_date: NaiveDate,
    ) -> EngineResult<BTreeMap<String, GrantedAllocation>> {
        let assignment = self.store.assignment(assignment_id)?;

        if assignment.leaves_allocated {
            return Err(EngineError::AlreadyAllocated {
                assignment_id: assignment.id,
            });
        }
        if !assignment.is_submitted() {
            return Err(EngineError::InvalidAssignment {
                field: "status".to_string(),
                message: "must be submitted before leaves are granted".to_string(),
            });
        }

        let allocations = self.build_allocations(&assignment, reference_date)?;
        let granted = self.record(&assignment.id, allocations)?;

        info!(
            assignment_id = %assignment.id,
            employee = %assignment.employee,
            allocations = granted.len(),
            "Granted leave allocations"
        );

        Ok(granted)
    }

    /// Creates and submits one assignment of `data` per employee.
    ///
    /// Employees whose assignment fails validation, or fails for any other
    /// reason, are logged and skipped. Returns the ids of the assignments
    /// that were submitted, in input order.
    pub fn create_assignments_for_employees(
        &self,
        employees: &[String],
        data: &AssignmentData,
        reference_date: NaiveDate,
    ) -> Vec<String> {
        let mut submitted = Vec::with_capacity(employees.len());

        for employee in employees {
            let assignment = data.clone().into_assignment(new_id("LPA"), employee.clone());

            match self.submit_assignment(assignment, reference_date) {
                Ok(result) => submitted.push(result.assignment.id),
                Err(e) if e.is_validation_error() => {
                    warn!(
                        employee = %employee,
                        error = %e,
                        "Skipping employee: assignment failed validation"
                    );
                }
                Err(e) => {
                    warn!(
                        employee = %employee,
                        error = %e,
                        "Skipping employee: assignment could not be submitted"
                    );
                }
            }
        }

        info!(
            requested = employees.len(),
            submitted = submitted.len(),
            leave_policy = %data.leave_policy,
            "Bulk leave policy assignment complete"
        );

        submitted
    }

    /// Lists the allocations granted for an assignment.
    pub fn allocations_for_assignment(
        &self,
        assignment_id: &str,
    ) -> EngineResult<Vec<LeaveAllocation>> {
        self.store.assignment(assignment_id)?;
        self.store.allocations_for_assignment(assignment_id)
    }

    fn build_allocations(
        &self,
        assignment: &LeavePolicyAssignment,
        reference_date: NaiveDate,
    ) -> EngineResult<Vec<LeaveAllocation>> {
        let (from_date, to_date) = assignment.effective_range()?;
        let leave_period = match assignment.assignment_based_on {
            Some(AssignmentBasis::LeavePeriod) => assignment.leave_period.clone(),
            _ => None,
        };

        let calculations = self.calculate_allocations(assignment, reference_date)?;
        debug!(
            assignment_id = %assignment.id,
            leave_types = calculations.len(),
            "Calculated leave allocations"
        );

        Ok(calculations
            .into_iter()
            .map(|calculation| LeaveAllocation {
                id: new_id("LA"),
                employee: assignment.employee.clone(),
                leave_type: calculation.leave_type,
                from_date,
                to_date,
                new_leaves_allocated: calculation.new_leaves_allocated,
                leave_period: leave_period.clone(),
                leave_policy: assignment.leave_policy.clone(),
                leave_policy_assignment: assignment.id.clone(),
                carry_forward: calculation.carry_forward,
            })
            .collect())
    }

    fn record(
        &self,
        assignment_id: &str,
        allocations: Vec<LeaveAllocation>,
    ) -> EngineResult<BTreeMap<String, GrantedAllocation>> {
        let granted = allocations
            .iter()
            .map(|allocation| (allocation.leave_type.clone(), GrantedAllocation::from(allocation)))
            .collect();
        self.store.record_allocations(assignment_id, allocations)?;
        Ok(granted)
    }
}

fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}
