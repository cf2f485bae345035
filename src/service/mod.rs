//! Orchestration of leave policy assignments.
//!
//! [`AllocationService`] ties the record store, the leave type cache and the
//! pure calculation rules together: it validates and submits assignments,
//! grants their leave allocations, and creates assignments in bulk.

mod allocation_service;

pub use allocation_service::{AllocationService, SubmittedAssignment};
