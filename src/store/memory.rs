//! In-memory record store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, LeaveAllocation, LeavePeriod, LeavePolicy, LeavePolicyAssignment,
};

use super::AssignmentStore;

#[derive(Debug, Default)]
struct Tables {
    employees: HashMap<String, Employee>,
    leave_policies: HashMap<String, LeavePolicy>,
    leave_periods: HashMap<String, LeavePeriod>,
    assignments: BTreeMap<String, LeavePolicyAssignment>,
    allocations: Vec<LeaveAllocation>,
}

/// [`AssignmentStore`] backed by maps behind a single mutex.
///
/// Every operation takes the lock for its whole duration, so
/// [`AssignmentStore::record_allocations`] checks and sets the allocated flag
/// atomically with inserting the allocations.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee.
    pub fn insert_employee(&self, employee: Employee) -> EngineResult<()> {
        self.lock()?.employees.insert(employee.id.clone(), employee);
        Ok(())
    }

    /// Adds or replaces a leave policy.
    pub fn insert_leave_policy(&self, policy: LeavePolicy) -> EngineResult<()> {
        self.lock()?.leave_policies.insert(policy.name.clone(), policy);
        Ok(())
    }

    /// Adds or replaces a leave period.
    pub fn insert_leave_period(&self, period: LeavePeriod) -> EngineResult<()> {
        self.lock()?.leave_periods.insert(period.name.clone(), period);
        Ok(())
    }

    fn lock(&self) -> EngineResult<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| EngineError::StoreError {
            message: "record store lock poisoned".to_string(),
        })
    }
}

impl AssignmentStore for InMemoryStore {
    fn employee(&self, id: &str) -> EngineResult<Employee> {
        self.lock()?
            .employees
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    fn leave_policy(&self, name: &str) -> EngineResult<LeavePolicy> {
        self.lock()?
            .leave_policies
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::LeavePolicyNotFound {
                name: name.to_string(),
            })
    }

    fn leave_period(&self, name: &str) -> EngineResult<LeavePeriod> {
        self.lock()?
            .leave_periods
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::LeavePeriodNotFound {
                name: name.to_string(),
            })
    }

    fn assignment(&self, id: &str) -> EngineResult<LeavePolicyAssignment> {
        self.lock()?
            .assignments
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::AssignmentNotFound { id: id.to_string() })
    }

    fn assignments_for_employee(&self, employee: &str) -> EngineResult<Vec<LeavePolicyAssignment>> {
        Ok(self
            .lock()?
            .assignments
            .values()
            .filter(|a| a.employee == employee)
            .cloned()
            .collect())
    }

    fn save_assignment(&self, assignment: LeavePolicyAssignment) -> EngineResult<()> {
        debug!(
            assignment_id = %assignment.id,
            status = ?assignment.status,
            "Saving leave policy assignment"
        );
        let mut tables = self.lock()?;

        if let Some(stored) = tables.assignments.get(&assignment.id) {
            if stored.leaves_allocated {
                warn!(assignment_id = %assignment.id, "Refusing to replace allocated assignment");
                return Err(EngineError::AlreadyAllocated {
                    assignment_id: assignment.id,
                });
            }
            if stored.is_submitted() {
                warn!(assignment_id = %assignment.id, "Refusing to replace submitted assignment");
                return Err(EngineError::InvalidAssignment {
                    field: "id".to_string(),
                    message: format!("{} is already submitted", assignment.id),
                });
            }
        }

        tables.assignments.insert(assignment.id.clone(), assignment);
        Ok(())
    }

    fn record_allocations(
        &self,
        assignment_id: &str,
        allocations: Vec<LeaveAllocation>,
    ) -> EngineResult<()> {
        let mut tables = self.lock()?;

        let assignment = tables.assignments.get_mut(assignment_id).ok_or_else(|| {
            EngineError::AssignmentNotFound {
                id: assignment_id.to_string(),
            }
        })?;

        if assignment.leaves_allocated {
            warn!(assignment_id, "Allocation already claimed for assignment");
            return Err(EngineError::AlreadyAllocated {
                assignment_id: assignment_id.to_string(),
            });
        }
        assignment.leaves_allocated = true;

        debug!(
            assignment_id,
            count = allocations.len(),
            "Recording leave allocations"
        );
        tables.allocations.extend(allocations);
        Ok(())
    }

    fn allocations_for_assignment(&self, assignment_id: &str) -> EngineResult<Vec<LeaveAllocation>> {
        Ok(self
            .lock()?
            .allocations
            .iter()
            .filter(|a| a.leave_policy_assignment == assignment_id)
            .cloned()
            .collect())
    }
}
