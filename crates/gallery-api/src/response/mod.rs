//! Response types and error handling for API endpoints
//!
//! Every failure renders as `{"error": {"code", "message", "details"?}}`.
//! Server errors are logged here and reach the client only as
//! "Internal server error".

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gallery_common::AppError;
use gallery_core::DomainError;
use gallery_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    InvalidPath(String),

    #[error("{0}")]
    InvalidBody(String),

    #[error("Image must be at most {max_mb} MB")]
    PayloadTooLarge { max_mb: usize },

    #[error("Resource not found")]
    RouteNotFound,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::App(e) => e.status_code(),
            Self::Service(e) => e.status_code(),
            Self::Domain(e) => e.status_code(),
            Self::Validation(_) | Self::InvalidPath(_) | Self::InvalidBody(_) => 400,
            Self::PayloadTooLarge { .. } => 413,
            Self::RouteNotFound => 404,
            Self::Internal(_) => 500,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::App(e) => e.error_code(),
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidPath(_) => "INVALID_PATH_PARAMETER",
            Self::InvalidBody(_) => "INVALID_REQUEST_BODY",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::RouteNotFound => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show a client
    fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            return INTERNAL_MESSAGE.to_string();
        }
        match self {
            // Surface the first field message rather than the whole report
            Self::Validation(errors) => errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .find_map(|e| e.message.as_ref().map(ToString::to_string))
                .unwrap_or_else(|| self.to_string()),
            _ => self.to_string(),
        }
    }

    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::InvalidBody(msg.into())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail for API responses
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let details = if let Self::Validation(errors) = &self {
            serde_json::to_value(errors).ok()
        } else {
            None
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.public_message(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
