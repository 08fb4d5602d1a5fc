use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::DatabaseError;

/// Error body returned for every user-facing failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionResult {
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

impl ExceptionResult {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ExceptionResult {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("{}", .0.message)]
    Exception(ExceptionResult),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn to_exception(&self) -> ExceptionResult {
        match self {
            AppError::NotFound(msg) => ExceptionResult::new(StatusCode::NOT_FOUND, msg.as_str()),
            AppError::Conflict(msg) => ExceptionResult::new(StatusCode::CONFLICT, msg.as_str()),
            AppError::BadRequest(msg) => ExceptionResult::new(StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::Exception(result) => result.clone(),
            AppError::Internal(_) => ExceptionResult::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(err) = &self {
            tracing::error!("internal error: {:#}", err);
        }
        let body = self.to_exception();
        let status =
            StatusCode::from_u16(body.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        match err.constraint_violation() {
            Some(violation) => AppError::Exception(violation.into()),
            None => AppError::Internal(err.into()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(format!("Validation error: {}", err))
    }
}
