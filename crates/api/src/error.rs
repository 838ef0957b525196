//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationErrors;
use forecast_service::ServiceError;
use serde_json::json;
use storage::StorageError;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Submitted fields failed validation (400)
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Malformed request outside the validated fields (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No record for the requested key (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Key already taken (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal error (500, logged)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::ValidationFailed(errors) => ApiError::Validation(errors),
            ServiceError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ServiceError::CountTooLarge { .. } | ServiceError::DateOutOfRange { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            ServiceError::Storage(StorageError::DuplicateKey(_)) => ApiError::Conflict(err.to_string()),
            ServiceError::Storage(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": errors.to_string(),
                    "errors": errors,
                }),
            ),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "bad_request",
                    "message": message,
                }),
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": message,
                }),
            ),
            ApiError::Conflict(message) => (
                StatusCode::CONFLICT,
                json!({
                    "error": "conflict",
                    "message": message,
                }),
            ),
            ApiError::Internal(message) => {
                // Log the actual error, return generic message
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
