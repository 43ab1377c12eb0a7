//! HTTP request handlers for the Benefit Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    HousingScoreInput, UnemploymentInput, YouthLeapInput, calculate, calculate_housing_score,
    calculate_unemployment_benefit, calculate_youth_leap, resolve_proration_ratio,
};
use crate::error::EngineError;
use crate::format::{format_percent, format_ratio, format_won, parse_date};
use crate::models::{CalculationInput, CalculationResult};

use super::request::{ChildcareRequest, PolicyRequest, RatioRequest};
use super::response::{
    ApiError, ApiErrorResponse, CalculatorResponse, ChildcareResponse, DisplayValues,
    PolicyResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/childcare/policy", post(policy_handler))
        .route("/childcare/ratio", post(ratio_handler))
        .route("/childcare/calculate", post(childcare_handler))
        .route("/housing/score", post(housing_score_handler))
        .route("/unemployment/calculate", post(unemployment_handler))
        .route("/youth-leap/calculate", post(youth_leap_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Turns a JSON extraction failure into a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
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
    json_response(StatusCode::BAD_REQUEST, error)
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn display_values<const N: usize>(values: [(&str, String); N]) -> DisplayValues {
    values
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Handler for POST /childcare/policy.
///
/// Looks up the policy parameters in force on a date.
async fn policy_handler(
    State(state): State<AppState>,
    payload: Result<Json<PolicyRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing policy lookup");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let Some(date) = parse_date(&request.date) else {
        warn!(
            correlation_id = %correlation_id,
            date = %request.date,
            "Policy not available"
        );
        return json_response(
            StatusCode::NOT_FOUND,
            ApiError::policy_not_available(&request.date),
        );
    };

    let policy = state.config().policies().policy_for_date(date);
    info!(
        correlation_id = %correlation_id,
        date = %date,
        threshold = %policy.hours_threshold_tier_a,
        "Policy resolved"
    );
    json_response(StatusCode::OK, PolicyResponse { date, policy })
}

/// Handler for POST /childcare/ratio.
///
/// Derives the proration ratio from the reduction period dates.
async fn ratio_handler(payload: Result<Json<RatioRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing ratio request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match resolve_proration_ratio(request.start_date, request.end_date) {
        Ok(resolved) => {
            let display = resolved
                .ratio()
                .map(|ratio| display_values([("ratio", format_ratio(ratio))]))
                .unwrap_or_default();
            json_response(
                StatusCode::OK,
                CalculatorResponse::new(correlation_id, resolved, display),
            )
        }
        Err(err) => error_response(correlation_id, err.into()),
    }
}

/// Handler for POST /childcare/calculate.
///
/// Resolves policy and ratio as the form requests, then calculates the
/// childcare reduced-hours benefit.
async fn childcare_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChildcareRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing childcare calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let outcome = request
        .prepare(state.config().policies())
        .and_then(|(input, mut warnings)| {
            let mut result = calculate(&input)?;
            warnings.append(&mut result.warnings);
            result.warnings = warnings;
            Ok((input, result))
        });

    match outcome {
        Ok((input, result)) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                total_benefit = %result.total_benefit,
                floor_applied = result.floor_applied,
                warnings = result.warnings.len(),
                duration_us = duration.as_micros(),
                "Childcare calculation completed successfully"
            );
            let display = childcare_display(&input, &result);
            json_response(
                StatusCode::OK,
                ChildcareResponse {
                    calculation_id: correlation_id,
                    calculated_at: Utc::now(),
                    policy: input.policy,
                    proration_ratio: input.proration_ratio,
                    result,
                    display,
                },
            )
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn childcare_display(input: &CalculationInput, result: &CalculationResult) -> DisplayValues {
    display_values([
        ("ordinary_wage_base", format_won(result.ordinary_wage_base)),
        ("benefit_tier_a", format_won(result.benefit_tier_a)),
        ("benefit_tier_b", format_won(result.benefit_tier_b)),
        ("total_benefit", format_won(result.total_benefit)),
        ("offset_reduction", format_won(result.offset_reduction)),
        ("company_paid_before", format_won(result.company_paid_before)),
        ("company_paid_after", format_won(result.company_paid_after)),
        ("grand_total_income", format_won(result.grand_total_income)),
        ("hours_ratio", format_percent(result.hours_ratio)),
        ("proration_ratio", format_ratio(input.proration_ratio)),
    ])
}

/// Handler for POST /housing/score.
async fn housing_score_handler(
    payload: Result<Json<HousingScoreInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing housing score request");

    let input = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let result = calculate_housing_score(&input);
    info!(
        correlation_id = %correlation_id,
        total_score = %result.total_score,
        "Housing score calculated"
    );
    json_response(
        StatusCode::OK,
        CalculatorResponse::new(correlation_id, result, DisplayValues::new()),
    )
}

/// Handler for POST /unemployment/calculate.
async fn unemployment_handler(
    State(state): State<AppState>,
    payload: Result<Json<UnemploymentInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing unemployment benefit request");

    let input = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match calculate_unemployment_benefit(&input, state.config().unemployment()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                daily_benefit = %result.daily_benefit,
                benefit_days = result.benefit_days,
                "Unemployment benefit calculated"
            );
            let display = display_values([
                ("daily_benefit", format_won(result.daily_benefit)),
                ("benefit_days", format!("{}일", result.benefit_days)),
                ("total_benefit", format_won(result.total_benefit)),
            ]);
            json_response(
                StatusCode::OK,
                CalculatorResponse::new(correlation_id, result, display),
            )
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /youth-leap/calculate.
async fn youth_leap_handler(
    State(state): State<AppState>,
    payload: Result<Json<YouthLeapInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing youth savings request");

    let input = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match calculate_youth_leap(&input, state.config().youth_leap()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                eligible = result.eligible,
                grand_total = %result.grand_total,
                "Youth savings projection calculated"
            );
            let display = display_values([
                ("total_principal", format_won(result.total_principal)),
                ("total_contribution", format_won(result.total_contribution)),
                ("total_interest", format_won(result.total_interest)),
                ("grand_total", format_won(result.grand_total)),
                (
                    "return_rate_percent",
                    format!("{:.2}%", result.return_rate_percent.round_dp(2)),
                ),
            ]);
            json_response(
                StatusCode::OK,
                CalculatorResponse::new(correlation_id, result, display),
            )
        }
        Err(err) => error_response(correlation_id, err),
    }
}
