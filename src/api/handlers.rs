//! HTTP request handlers for the Leave Policy Allocation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_new_leaves, carry_forward_advisory};
use crate::error::EngineError;

use super::request::{BulkAssignmentRequest, CalculationRequest, GrantQuery};
use super::response::{
    AllocationListResponse, ApiError, ApiErrorResponse, BulkAssignmentResponse,
    CalculationResponse, GrantResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/assignments", post(create_assignments_handler))
        .route(
            "/assignments/:id/allocations",
            post(grant_allocations_handler).get(list_allocations_handler),
        )
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Previews the allocation of one leave type with its audit trace. Nothing
/// is stored.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(json_rejection_error(&correlation_id, rejection)),
    };

    if request.leave_type.is_lwp {
        warn!(
            correlation_id = %correlation_id,
            leave_type = %request.leave_type.name,
            "Leave without pay is never allocated"
        );
        return bad_request(ApiError::validation_error(format!(
            "Leave type {} is leave without pay and is never allocated",
            request.leave_type.name
        )));
    }

    let reference_date = request.reference_date.unwrap_or_else(today);
    let ctx = match request.context(reference_date, state.service().precision()) {
        Ok(ctx) => ctx,
        Err(err) => return engine_error(&correlation_id, err),
    };

    let start_time = Instant::now();
    let calculation = calculate_new_leaves(
        request.annual_allocation,
        &request.leave_type,
        &ctx,
        request.carry_forward,
        1,
    );
    let warnings = if request.carry_forward {
        carry_forward_advisory(&request.leave_type)
            .into_iter()
            .collect()
    } else {
        Vec::new()
    };
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        leave_type = %calculation.leave_type,
        new_leaves_allocated = %calculation.new_leaves_allocated,
        duration_us,
        "Calculation completed successfully"
    );

    json_response(
        StatusCode::OK,
        CalculationResponse {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            reference_date,
            calculation,
            warnings,
            duration_us,
        },
    )
}

/// Handler for POST /assignments endpoint.
///
/// Creates, submits and allocates one assignment per employee. Employees
/// that fail are skipped.
async fn create_assignments_handler(
    State(state): State<AppState>,
    payload: Result<Json<BulkAssignmentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing bulk assignment request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(json_rejection_error(&correlation_id, rejection)),
    };

    let reference_date = request.reference_date.unwrap_or_else(today);
    let assignment_ids = state.service().create_assignments_for_employees(
        &request.employees,
        &request.data,
        reference_date,
    );
    let skipped = request.employees.len() - assignment_ids.len();

    info!(
        correlation_id = %correlation_id,
        leave_policy = %request.data.leave_policy,
        submitted = assignment_ids.len(),
        skipped,
        "Bulk assignment completed"
    );

    json_response(
        StatusCode::OK,
        BulkAssignmentResponse {
            assignment_ids,
            skipped,
        },
    )
}

/// Handler for POST /assignments/:id/allocations endpoint.
async fn grant_allocations_handler(
    State(state): State<AppState>,
    Path(assignment_id): Path<String>,
    query: Result<Query<GrantQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        assignment_id = %assignment_id,
        "Processing grant request"
    );

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection,
                "Invalid query string"
            );
            return bad_request(ApiError::validation_error(rejection.body_text()));
        }
    };

    let reference_date = query.reference_date.unwrap_or_else(today);
    match state
        .service()
        .grant_leave_allocations(&assignment_id, reference_date)
    {
        Ok(allocations) => {
            info!(
                correlation_id = %correlation_id,
                assignment_id = %assignment_id,
                allocations = allocations.len(),
                "Grant completed successfully"
            );
            json_response(
                StatusCode::CREATED,
                GrantResponse {
                    assignment_id,
                    allocations,
                },
            )
        }
        Err(err) => engine_error(&correlation_id, err),
    }
}

/// Handler for GET /assignments/:id/allocations endpoint.
async fn list_allocations_handler(
    State(state): State<AppState>,
    Path(assignment_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.service().allocations_for_assignment(&assignment_id) {
        Ok(allocations) => {
            let total_leaves: Decimal = allocations.iter().map(|a| a.new_leaves_allocated).sum();
            info!(
                correlation_id = %correlation_id,
                assignment_id = %assignment_id,
                count = allocations.len(),
                "Listed allocations"
            );
            json_response(
                StatusCode::OK,
                AllocationListResponse {
                    assignment_id,
                    allocations,
                    total_leaves,
                },
            )
        }
        Err(err) => engine_error(&correlation_id, err),
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn bad_request(error: ApiError) -> Response {
    json_response(StatusCode::BAD_REQUEST, error)
}

fn engine_error(correlation_id: &Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn json_rejection_error(correlation_id: &Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}
