//! Core data models for the Leave Policy Allocation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod allocation;
mod assignment;
mod audit;
mod employee;
mod leave_policy;
mod leave_type;

pub use allocation::{GrantedAllocation, LeaveAllocation};
pub use assignment::{AssignmentBasis, AssignmentData, AssignmentStatus, LeavePolicyAssignment};
pub use audit::{AuditStep, AuditWarning};
pub use employee::Employee;
pub use leave_policy::{
    LeavePeriod, LeavePolicy, LeavePolicyDetail, MAX_ANNUAL_ALLOCATION, is_valid_annual_allocation,
};
pub use leave_type::{AllocateOnDay, EarnedLeaveFrequency, EarnedLeaveRounding, LeaveType};
