//! Response types for the attendance API.
//!
//! This module defines the error body, the mapping from
//! [`AttendanceError`] to HTTP status codes, and the few response bodies the
//! service types do not already cover.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AttendanceError;
use crate::models::{AttendanceRecord, RegularizationStatus};

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
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// A 401 for a missing or malformed bearer token.
    pub fn missing_token() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::with_details(
                "UNAUTHENTICATED",
                "Authentication required",
                "Send 'Authorization: Bearer <session token>'",
            ),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<AttendanceError> for ApiErrorResponse {
    fn from(error: AttendanceError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            AttendanceError::ConfigNotFound { .. }
            | AttendanceError::ConfigParseError { .. }
            | AttendanceError::InvalidConfig { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            AttendanceError::EmployeeNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", message),
            ),
            AttendanceError::EmployeeExists { .. } => {
                (StatusCode::CONFLICT, ApiError::new("EMPLOYEE_EXISTS", message))
            }
            AttendanceError::InvalidEmployee { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    message,
                    "The employee data contains invalid information",
                ),
            ),
            AttendanceError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("INVALID_CREDENTIALS", message),
            ),
            AttendanceError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("UNAUTHENTICATED", message),
            ),
            AttendanceError::Forbidden { .. } => {
                (StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", message))
            }
            AttendanceError::AlreadyPunchedIn { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("ALREADY_PUNCHED_IN", message),
            ),
            AttendanceError::NotPunchedIn { .. } => {
                (StatusCode::CONFLICT, ApiError::new("NOT_PUNCHED_IN", message))
            }
            AttendanceError::AlreadyPunchedOut { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("ALREADY_PUNCHED_OUT", message),
            ),
            AttendanceError::PunchOutTooEarly { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("PUNCH_OUT_TOO_EARLY", message),
            ),
            AttendanceError::RegularizationNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("REGULARIZATION_NOT_FOUND", message),
            ),
            AttendanceError::InvalidRegularization { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_REGULARIZATION",
                    message,
                    "The regularization request contains invalid information",
                ),
            ),
            AttendanceError::DuplicateRegularization { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_REGULARIZATION", message),
            ),
            AttendanceError::InvalidDateRange { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_DATE_RANGE", message),
            ),
            AttendanceError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("STORE_ERROR", "Storage failure", message),
            ),
            AttendanceError::Auth(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("AUTH_ERROR", "Authentication backend failure", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// Response body for `POST /regularizations/:id/resolve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionResponse {
    /// The resolved request.
    pub id: Uuid,
    /// `approved` or `rejected`.
    pub status: RegularizationStatus,
    /// The record written on approval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<AttendanceRecord>,
}
