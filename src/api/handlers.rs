//! HTTP request handlers.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine;
use crate::models::{Employee, PayPeriod, Shift};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/health", get(health_handler))
        .route("/info", get(info_handler))
        .with_state(state)
}

/// Handler for `POST /calculate`.
///
/// Accepts a calculation request and returns the calculated pay result.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = map_json_rejection(correlation_id, rejection);
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    let employee: Employee = request.employee.into();
    let pay_period: PayPeriod = request.pay_period.into();
    let shifts: Vec<Shift> = request.shifts.into_iter().map(Into::into).collect();

    match engine::calculate(&employee, &pay_period, &shifts, state.rules()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                shifts_count = shifts.len(),
                gross_pay = %result.totals.gross_pay,
                duration_us = result.audit_trace.duration_us,
                "Calculation completed successfully"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                error = %err,
                "Calculation failed"
            );
            let response: ApiErrorResponse = err.into();
            response.into_response()
        }
    }
}

/// Maps an axum JSON rejection onto an [`ApiError`].
fn map_json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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
            ApiError::malformed_json(format!("Invalid JSON syntax: {err}"))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for `GET /health`.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Handler for `GET /info`.
///
/// Returns the loaded rule set metadata and engine version.
async fn info_handler(State(state): State<AppState>) -> impl IntoResponse {
    let metadata = state.rules().metadata();
    Json(serde_json::json!({
        "engine_version": env!("CARGO_PKG_VERSION"),
        "ruleset": {
            "code": metadata.code,
            "name": metadata.name,
            "version": metadata.version,
            "source_url": metadata.source_url
        },
        "classification_count": state.rules().classifications().len()
    }))
}
