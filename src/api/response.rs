//! Response types for the store calendar API.
//!
//! This module defines the error response structures and the mapping from
//! [`CalendarError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

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

    /// Creates an error response for a bad query string or path parameter.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new("INVALID_REQUEST", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<CalendarError> for ApiErrorResponse {
    fn from(error: CalendarError) -> Self {
        match error {
            CalendarError::Validation(err) => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(err.to_string()),
            },
            CalendarError::ConfigNotFound { store_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "CONFIG_NOT_FOUND",
                    format!("No calendar configuration for store '{}'", store_id),
                ),
            },
            CalendarError::Persistence { store_id, message } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "PERSISTENCE_ERROR",
                    format!("Could not load or save the calendar of store '{}'", store_id),
                    message,
                ),
            },
            CalendarError::PartialPropagation { failed } => ApiErrorResponse {
                status: StatusCode::MULTI_STATUS,
                error: ApiError::with_details(
                    "PARTIAL_PROPAGATION",
                    format!("Propagation failed for {} store(s)", failed.len()),
                    failed.join(", "),
                ),
            },
            CalendarError::DataIntegrity { date, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "DATA_INTEGRITY_ERROR",
                    format!("Stored calendar data is inconsistent on {}", date),
                    message,
                ),
            },
            CalendarError::HolidayTableNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "HOLIDAY_TABLE_ERROR",
                    "Holiday table not found",
                    path,
                ),
            },
            CalendarError::HolidayTableParse { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "HOLIDAY_TABLE_ERROR",
                    "Holiday table parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            CalendarError::InvalidSetting {
                name,
                value,
                message,
            } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    format!("Invalid server setting {}", name),
                    format!("'{}': {}", value, message),
                ),
            },
        }
    }
}
