//! Request-boundary error type.
//!
//! Every failure a handler can produce ends up here and is rendered as
//! `{"error": "..."}` with a matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Role not supported yet")]
    UnsupportedRole,

    #[error("Unauthorized")]
    Unauthorized,

    /// Entry is missing or owned by someone else. The two cases are not distinguished.
    #[error("Timetable entry not found")]
    NotFoundOrForbidden,

    #[error("Invalid action")]
    InvalidAction,

    #[error("{0}")]
    Validation(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::UnsupportedRole => StatusCode::FORBIDDEN,
            AppError::NotFoundOrForbidden | AppError::InvalidAction | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(e) = &self {
            tracing::error!(error = ?e, "internal error");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
