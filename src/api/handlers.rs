//! HTTP request handlers for the Salary Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_net, solve_gross, validate_amount};
use crate::models::AuditTrace;

use super::request::{GrossRequest, NetRequest};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, Direction, ScheduleResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/net", post(net_handler))
        .route("/gross", post(gross_handler))
        .route("/schedule", get(schedule_handler))
        .with_state(state)
}

/// Handler for POST /net.
///
/// Computes net pay for the gross amount in the request body.
async fn net_handler(
    State(state): State<AppState>,
    payload: Result<Json<NetRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing net calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let gross = match validate_amount("gross", request.gross) {
        Ok(gross) => gross,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Rejected gross amount");
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let config = state.config();
    let calculation = calculate_net(gross, config.schedule(), 1);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        gross = %calculation.result.gross,
        net = %calculation.result.net,
        duration_us,
        "Net calculation completed"
    );

    json_response(CalculationResponse {
        calculation_id: correlation_id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        schedule_code: config.metadata().code.clone(),
        direction: Direction::NetFromGross,
        result: calculation.result,
        iterations: None,
        audit_trace: AuditTrace {
            steps: calculation.audit_steps,
            warnings: calculation.warnings,
            duration_us,
        },
    })
}

/// Handler for POST /gross.
///
/// Searches for the gross pay that yields the net amount in the request body.
async fn gross_handler(
    State(state): State<AppState>,
    payload: Result<Json<GrossRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing gross calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let net = match validate_amount("net", request.net) {
        Ok(net) => net,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Rejected net amount");
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let config = state.config();
    match solve_gross(net, config.schedule(), config.solver()) {
        Ok(solution) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                net = %net,
                gross = %solution.result.gross,
                iterations = solution.iterations,
                duration_us,
                "Gross calculation completed"
            );

            json_response(CalculationResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                schedule_code: config.metadata().code.clone(),
                direction: Direction::GrossFromNet,
                result: solution.result,
                iterations: Some(solution.iterations),
                audit_trace: AuditTrace {
                    steps: solution.audit_steps,
                    warnings: solution.warnings,
                    duration_us,
                },
            })
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Gross calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /schedule.
///
/// Returns the tables and solver settings the engine is using.
async fn schedule_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    json_response(ScheduleResponse {
        metadata: config.metadata().clone(),
        schedule: config.schedule().clone(),
        solver: *config.solver(),
    })
}

fn json_response<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
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
    };

    error_response(ApiErrorResponse::bad_request(error))
}
