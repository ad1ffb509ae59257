//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::dataset::DatasetError;
use crate::explore::{ControllerError, SessionError};

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input could not be applied to the explore state
    #[error("{0}")]
    Controller(#[from] ControllerError),

    /// Session lookup or creation failed
    #[error("{0}")]
    Session(#[from] SessionError),

    /// Dataset layer error
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Controller(e) => match e {
                ControllerError::UnknownDataset(_) => (StatusCode::NOT_FOUND, "DATASET_NOT_FOUND"),
                ControllerError::UnknownField { .. } => (StatusCode::BAD_REQUEST, "UNKNOWN_FIELD"),
                ControllerError::NoDatasets => (StatusCode::SERVICE_UNAVAILABLE, "NO_DATASETS"),
                ControllerError::Dataset(DatasetError::NotFound(_)) => {
                    (StatusCode::NOT_FOUND, "DATASET_NOT_FOUND")
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "CONTROLLER_ERROR"),
            },
            ApiError::Session(e) => match e {
                SessionError::NotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
                SessionError::Expired(_) => (StatusCode::NOT_FOUND, "SESSION_EXPIRED"),
                SessionError::TooManySessions(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "TOO_MANY_SESSIONS")
                }
            },
            ApiError::Dataset(DatasetError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "DATASET_NOT_FOUND")
            }
            ApiError::Dataset(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATASET_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::debug!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
