//! Record store boundaries for the Leave Policy Allocation Engine.
//!
//! Persistence is owned by an external document store. This module defines
//! the traits the engine reads and writes through, a read-through cache for
//! leave type descriptors, and an in-memory store used by the HTTP API and
//! tests.

mod leave_type_cache;
mod memory;

pub use leave_type_cache::LeaveTypeCache;
pub use memory::InMemoryStore;

use crate::error::EngineResult;
use crate::models::{
    Employee, LeaveAllocation, LeavePeriod, LeavePolicy, LeavePolicyAssignment, LeaveType,
};

/// Supplies the full set of leave type descriptors.
pub trait LeaveTypeSource: Send + Sync {
    /// Fetches every leave type descriptor.
    fn fetch_leave_types(&self) -> EngineResult<Vec<LeaveType>>;
}

impl LeaveTypeSource for Vec<LeaveType> {
    fn fetch_leave_types(&self) -> EngineResult<Vec<LeaveType>> {
        Ok(self.clone())
    }
}

/// Record access needed to assign policies and grant allocations.
pub trait AssignmentStore: Send + Sync {
    /// Looks up an employee by id.
    fn employee(&self, id: &str) -> EngineResult<Employee>;

    /// Looks up a leave policy by name.
    fn leave_policy(&self, name: &str) -> EngineResult<LeavePolicy>;

    /// Looks up a leave period by name.
    fn leave_period(&self, name: &str) -> EngineResult<LeavePeriod>;

    /// Looks up an assignment by id.
    fn assignment(&self, id: &str) -> EngineResult<LeavePolicyAssignment>;

    /// Returns every assignment of an employee, in any status.
    fn assignments_for_employee(&self, employee: &str) -> EngineResult<Vec<LeavePolicyAssignment>>;

    /// Inserts an assignment, or replaces a stored draft with the same id.
    ///
    /// A stored submitted assignment is never replaced: fails with
    /// `AlreadyAllocated` if its allocated flag is set, otherwise with
    /// `InvalidAssignment`.
    fn save_assignment(&self, assignment: LeavePolicyAssignment) -> EngineResult<()>;

    /// Marks an assignment allocated and stores its allocations as one unit.
    ///
    /// Fails with `AlreadyAllocated` without storing anything if the
    /// assignment's allocated flag is already set.
    fn record_allocations(
        &self,
        assignment_id: &str,
        allocations: Vec<LeaveAllocation>,
    ) -> EngineResult<()>;

    /// Returns the allocations created for an assignment.
    fn allocations_for_assignment(&self, assignment_id: &str) -> EngineResult<Vec<LeaveAllocation>>;
}
