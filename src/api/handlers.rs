//! HTTP request handlers for the salary engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::compute_salary;
use crate::config::{ConfigLoader, RateTable};
use crate::error::EngineResult;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/salary", post(salary_handler))
        .route("/rates", get(rates_handler))
        .with_state(state)
}

/// Handler for POST /salary.
///
/// Validates the request, selects the rate table and returns the salary
/// result.
async fn salary_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
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
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let config = state.config();
    let start_time = Instant::now();
    match perform_calculation(&request, &config) {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                mode = ?request.salary.mode,
                gross = %result.breakdown.gross,
                net = %result.breakdown.net,
                converged = result.breakdown.converged,
                duration_us = duration.as_micros(),
                "Salary calculation completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Salary request rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /rates.
///
/// Returns the latest rate table so forms can show labels and constants.
async fn rates_handler(State(state): State<AppState>) -> impl IntoResponse {
    let config = state.config();
    Json(config.latest().clone())
}

/// Validates a request and runs the calculation against the selected table.
fn perform_calculation(
    request: &CalculationRequest,
    config: &ConfigLoader,
) -> EngineResult<crate::models::SalaryResult> {
    request.salary.validate()?;
    let rates = select_rate_table(request, config)?;
    Ok(compute_salary(&request.salary, rates))
}

fn select_rate_table<'a>(
    request: &CalculationRequest,
    config: &'a ConfigLoader,
) -> EngineResult<&'a RateTable> {
    let rates = match request.effective_date {
        Some(date) => config.rate_table_for(date)?,
        None => config.latest(),
    };
    debug!(effective_date = %rates.effective_date, "Selected rate table");
    Ok(rates)
}
