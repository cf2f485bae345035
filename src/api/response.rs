//! Response types for the Leave Policy Allocation Engine API.
//!
//! This module defines the response bodies, the error response structures
//! and the mapping from engine errors to HTTP status codes.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::AllocationCalculation;
use crate::error::EngineError;
use crate::models::{AuditWarning, GrantedAllocation, LeaveAllocation};

/// Response body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The date the calculation was made as of.
    pub reference_date: chrono::NaiveDate,
    /// The allocation with its audit steps.
    pub calculation: AllocationCalculation,
    /// Non-blocking advisories.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// Response body for the `/assignments` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkAssignmentResponse {
    /// Ids of the submitted assignments, in request order.
    pub assignment_ids: Vec<String>,
    /// Number of employees that were skipped.
    pub skipped: usize,
}

/// Response body for granting allocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantResponse {
    /// The allocated assignment.
    pub assignment_id: String,
    /// Allocations keyed by leave type.
    pub allocations: BTreeMap<String, GrantedAllocation>,
}

/// Response body for listing allocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationListResponse {
    /// The assignment the allocations belong to.
    pub assignment_id: String,
    /// The allocations.
    pub allocations: Vec<LeaveAllocation>,
    /// Sum of the allocated leaves.
    pub total_leaves: Decimal,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    fn not_found(code: &str, message: String) -> Self {
        Self::with_details(code, message, "The referenced record does not exist")
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration parse error", message),
            ),
            EngineError::OverlapConflict { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("OVERLAP_CONFLICT", message),
            ),
            EngineError::AlreadyAllocated { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("ALREADY_ALLOCATED", message),
            ),
            EngineError::InvalidAssignment { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_ASSIGNMENT",
                    message,
                    "The assignment data contains invalid information",
                ),
            ),
            EngineError::LeaveTypeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::not_found("LEAVE_TYPE_NOT_FOUND", message),
            ),
            EngineError::LeavePolicyNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::not_found("LEAVE_POLICY_NOT_FOUND", message),
            ),
            EngineError::LeavePeriodNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::not_found("LEAVE_PERIOD_NOT_FOUND", message),
            ),
            EngineError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::not_found("EMPLOYEE_NOT_FOUND", message),
            ),
            EngineError::AssignmentNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::not_found("ASSIGNMENT_NOT_FOUND", message),
            ),
            EngineError::StoreError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORE_ERROR", "Record store failure", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_overlap_maps_to_conflict() {
        let error: ApiErrorResponse = EngineError::OverlapConflict {
            leave_policy: "Standard Policy".to_string(),
            employee: "EMP-0001".to_string(),
            effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            effective_to: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        }
        .into();

        assert_eq!(error.status, StatusCode::CONFLICT);
        assert_eq!(error.error.code, "OVERLAP_CONFLICT");
        assert!(error.error.message.contains("01-01-2025 to 31-12-2025"));
    }

    #[test]
    fn test_already_allocated_maps_to_conflict() {
        let error: ApiErrorResponse = EngineError::AlreadyAllocated {
            assignment_id: "LPA-0001".to_string(),
        }
        .into();
        assert_eq!(error.status, StatusCode::CONFLICT);
        assert_eq!(error.error.code, "ALREADY_ALLOCATED");
    }

    #[test]
    fn test_not_found_errors_map_to_404() {
        let errors = [
            EngineError::LeaveTypeNotFound {
                name: "x".to_string(),
            },
            EngineError::LeavePolicyNotFound {
                name: "x".to_string(),
            },
            EngineError::LeavePeriodNotFound {
                name: "x".to_string(),
            },
            EngineError::EmployeeNotFound { id: "x".to_string() },
            EngineError::AssignmentNotFound { id: "x".to_string() },
        ];
        for error in errors {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_invalid_assignment_maps_to_400() {
        let error: ApiErrorResponse = EngineError::InvalidAssignment {
            field: "effective_to".to_string(),
            message: "must be set".to_string(),
        }
        .into();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.error.code, "INVALID_ASSIGNMENT");
    }

    #[test]
    fn test_store_error_maps_to_500() {
        let error: ApiErrorResponse = EngineError::StoreError {
            message: "lock poisoned".to_string(),
        }
        .into();
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.error.code, "STORE_ERROR");
    }
}
