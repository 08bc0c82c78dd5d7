use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::models::validation::ValidationError;
use crate::services::db::StoreError;

/// Body of every failed response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "Project not found")]
    pub error: String,
}

/// Failure of a resource operation, rendered as `{ "error": ... }`.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Store(String),
}

impl ResourceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ResourceError::NotFound(message.into())
    }

    /**
     * validation failures keep the 500 status clients already handle
     */
    pub fn status(&self) -> StatusCode {
        match self {
            ResourceError::NotFound(_) => StatusCode::NOT_FOUND,
            ResourceError::Validation(_) | ResourceError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for ResourceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey { .. } => ResourceError::Validation(err.to_string()),
            other => ResourceError::Store(other.to_string()),
        }
    }
}

impl From<ValidationError> for ResourceError {
    fn from(err: ValidationError) -> Self {
        ResourceError::Validation(err.to_string())
    }
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ResourceError::NotFound(message) => debug!("{message}"),
            ResourceError::Validation(message) | ResourceError::Store(message) => {
                error!(status = status.as_u16(), "{message}")
            }
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
