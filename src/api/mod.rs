//! HTTP API module for the Leave Policy Allocation Engine.
//!
//! This module provides the REST API endpoints for previewing allocations,
//! assigning leave policies in bulk and granting leave allocations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BulkAssignmentRequest, CalculationRequest, GrantQuery};
pub use response::{
    AllocationListResponse, ApiError, ApiErrorResponse, BulkAssignmentResponse,
    CalculationResponse, GrantResponse,
};
pub use state::{AppState, LeaveService};
