//! API error type and its status-code mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use gradplan_core::ValidationError;
use gradplan_progress::{ProgressError, RequirementError};
use gradplan_storage::StorageError;

/// Errors surfaced by the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed path segment or payload
    #[error("{0}")]
    BadRequest(String),

    /// Document does not exist
    #[error("{0}")]
    NotFound(String),

    /// The user has no requirement document yet
    #[error("graduation requirement not configured")]
    NotConfigured,

    /// Payload violates a domain invariant
    #[error("{0}")]
    Validation(String),

    /// Storage or other internal failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<ProgressError> for ApiError {
    fn from(e: ProgressError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<RequirementError> for ApiError {
    fn from(e: RequirementError) -> Self {
        match e {
            RequirementError::Invalid(v) => ApiError::Validation(v.to_string()),
            RequirementError::Storage(s) => ApiError::Internal(s.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } | ApiError::NotConfigured => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{}", self);
            return (status, Json(json!({ "error": "internal error" }))).into_response();
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
