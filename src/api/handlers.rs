//! HTTP request handlers for the pay component engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{CalculationStrategy, run_components_with_rates};
use crate::formula::{FormulaValidationRequest, validate_formula};
use crate::models::PayComponent;

use super::request::ComputeRequest;
use super::response::{ApiError, ApiErrorResponse, ComponentListResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/formulas/validate", post(validate_formula_handler))
        .route("/strategies/author", post(author_strategy_handler))
        .route("/components", get(list_components_handler))
        .route("/components/compute", post(compute_components_handler))
        .with_state(state)
}

/// Handler for POST /formulas/validate.
///
/// Always answers 200 once the body parses; an invalid formula is reported
/// in the response body.
async fn validate_formula_handler(
    payload: Result<Json<FormulaValidationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing formula validation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let response = validate_formula(&request);
    info!(
        correlation_id = %correlation_id,
        valid = response.valid,
        "Formula validation completed"
    );
    json_response(StatusCode::OK, &response)
}

/// Handler for POST /strategies/author.
///
/// Overtime strategies without their own standard hours use the configured
/// value.
async fn author_strategy_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationStrategy>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing strategy authoring request");

    let strategy = match payload {
        Ok(Json(strategy)) => strategy,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let standard_hours = state.config().engine().standard_hours;
    match strategy.author_with_standard_hours(standard_hours) {
        Ok(authored) => {
            info!(
                correlation_id = %correlation_id,
                calculation_type = ?authored.calculation_type,
                "Strategy authored"
            );
            json_response(StatusCode::OK, &authored)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Strategy authoring failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /components.
async fn list_components_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    let mut components: Vec<PayComponent> = config.components().to_vec();
    components.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.code.cmp(&b.code))
    });

    json_response(
        StatusCode::OK,
        &ComponentListResponse {
            metadata: config.metadata().clone(),
            components,
        },
    )
}

/// Handler for POST /components/compute.
///
/// Runs the requested codes (or the whole catalogue) against the supplied
/// salaries. Row failures come back inside the run with `has_warnings`
/// set; only a malformed request or an unknown code fails the call.
async fn compute_components_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComputeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing component compute request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let ctx = match request.context() {
        Ok(ctx) => ctx,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid salaries");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let config = state.config();
    let selected: Vec<PayComponent> = match &request.codes {
        None => config.components().to_vec(),
        Some(codes) => {
            let mut selected = Vec::with_capacity(codes.len());
            for code in codes {
                match config.get_component(code) {
                    Ok(component) => selected.push(component.clone()),
                    Err(err) => {
                        warn!(
                            correlation_id = %correlation_id,
                            component = %code,
                            "Component not found"
                        );
                        return ApiErrorResponse::from(err).into_response();
                    }
                }
            }
            selected
        }
    };

    let run = run_components_with_rates(&selected, &ctx, config.special_tax());
    info!(
        correlation_id = %correlation_id,
        run_id = %run.run_id,
        lines = run.lines.len(),
        has_warnings = run.has_warnings,
        net_pay = %run.totals.net_pay,
        duration_us = run.audit_trace.duration_us,
        "Component run completed successfully"
    );
    json_response(StatusCode::OK, &run)
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's message, including the field name.
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

    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}
