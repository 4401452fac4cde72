//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::client::{ClientError, ErrorContext};
use crate::services::FormErrors;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Booking form rejected field by field
    Form(FormErrors),
    /// Failure reported by the API backend
    Client(ClientError),
}

fn client_error_code(err: &ClientError) -> &'static str {
    match err {
        ClientError::Unauthorized { .. } => "UNAUTHORIZED",
        ClientError::NotFound { .. } => "NOT_FOUND",
        ClientError::Validation { .. } => "VALIDATION_ERROR",
        ClientError::Configuration { .. } => "CONFIGURATION_ERROR",
        ClientError::Connection { .. } | ClientError::Status { .. } | ClientError::Decode { .. } => {
            "UPSTREAM_ERROR"
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Form(errors) => {
                let details = serde_json::to_value(&errors.errors).unwrap_or_default();
                (
                    StatusCode::BAD_REQUEST,
                    ApiError::new("VALIDATION_ERROR", errors.to_string()).with_details(details),
                )
            }
            AppError::Client(err) => {
                let status = StatusCode::from_u16(err.http_status())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                let mut error = ApiError::new(client_error_code(&err), err.message());
                if *err.context() != ErrorContext::default() {
                    error = error.with_details(err.context().to_string().into());
                }
                (status, error)
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        AppError::Client(err)
    }
}

impl From<FormErrors> for AppError {
    fn from(errors: FormErrors) -> Self {
        AppError::Form(errors)
    }
}
