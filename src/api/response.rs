//! Response types for the Benefit Engine API.
//!
//! This module defines the success envelopes, the error response structures
//! and the mapping from [`EngineError`] to HTTP status codes.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{CalculationResult, PolicyParameters};

/// Formatted strings for display, keyed by field name.
pub type DisplayValues = BTreeMap<String, String>;

/// Response body for `POST /childcare/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildcareResponse {
    /// Identifier of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub calculated_at: DateTime<Utc>,
    /// The policy parameters the calculation used.
    pub policy: PolicyParameters,
    /// The proration ratio the calculation used.
    pub proration_ratio: Decimal,
    /// The calculation result.
    pub result: CalculationResult,
    /// Rounded, formatted figures.
    pub display: DisplayValues,
}

/// Response body for the housing, unemployment and youth savings endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorResponse<T> {
    /// Identifier of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub calculated_at: DateTime<Utc>,
    /// The calculator result.
    pub result: T,
    /// Rounded, formatted figures.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub display: DisplayValues,
}

impl<T> CalculatorResponse<T> {
    /// Wraps a result, stamping it with the current time.
    pub fn new(calculation_id: Uuid, result: T, display: DisplayValues) -> Self {
        Self {
            calculation_id,
            calculated_at: Utc::now(),
            result,
            display,
        }
    }
}

/// Response body for `POST /childcare/policy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyResponse {
    /// The date looked up.
    pub date: NaiveDate,
    /// The parameters in force on `date`.
    pub policy: PolicyParameters,
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
    /// Every failed input check, for validation errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            errors: Vec::new(),
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
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

    /// Creates the error returned when no policy can be resolved for a date.
    pub fn policy_not_available(date: &str) -> Self {
        Self::with_details(
            "POLICY_NOT_AVAILABLE",
            format!("No policy available for date: {}", date),
            "Dates must be given as YYYY-MM-DD",
        )
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
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid configuration", message),
            },
            ref invalid @ EngineError::InvalidInput { ref errors } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError {
                    errors: errors.iter().map(ToString::to_string).collect(),
                    ..ApiError::validation_error(invalid.to_string())
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
        assert!(!json.contains("errors"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_policy_not_available_error() {
        let error = ApiError::policy_not_available("someday");
        assert_eq!(error.code, "POLICY_NOT_AVAILABLE");
        assert!(error.message.contains("someday"));
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request_with_every_error() {
        let engine_error = EngineError::InvalidInput {
            errors: vec![
                ValidationError::NonPositiveHoursBefore,
                ValidationError::MissingOrdinaryWage,
            ],
        };
        let api_error: ApiErrorResponse = engine_error.into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
        assert_eq!(
            api_error.error.errors,
            vec![
                "hours before reduction must be greater than 0".to_string(),
                "ordinary wage must be entered".to_string(),
            ]
        );
    }

    #[test]
    fn test_config_errors_are_server_errors() {
        let api_error: ApiErrorResponse = EngineError::InvalidConfig {
            message: "empty table".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
