//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::dataset::{DataError, WORLD};

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Dataset could not be loaded or has no rows for the selection
    #[error("Data unavailable: {0}")]
    DataUnavailable(#[from] DataError),

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

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            // A missing World aggregate is a dataset problem, not a bad request
            ApiError::DataUnavailable(DataError::NoRows { location }) if location != WORLD => {
                (StatusCode::NOT_FOUND, "LOCATION_NOT_FOUND")
            }
            ApiError::DataUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "DATA_UNAVAILABLE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let unknown = ApiError::from(DataError::no_rows("Atlantis"));
        assert_eq!(
            unknown.status_and_code(),
            (StatusCode::NOT_FOUND, "LOCATION_NOT_FOUND")
        );

        let no_world = ApiError::from(DataError::no_rows(WORLD));
        assert_eq!(no_world.status_and_code().0, StatusCode::SERVICE_UNAVAILABLE);

        let missing = ApiError::from(DataError::MissingColumn("date".to_string()));
        assert_eq!(
            missing.status_and_code(),
            (StatusCode::SERVICE_UNAVAILABLE, "DATA_UNAVAILABLE")
        );

        let bad = ApiError::Validation("theme".to_string());
        assert_eq!(bad.status_and_code().0, StatusCode::BAD_REQUEST);
    }
}
