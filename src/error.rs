//! Error types for the book information service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Generic body for every fault the caller must not see the detail of
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error occurred";

/// Numeric error codes carried in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 3,
    NoSuchBook = 5,
    Duplicate = 8,
    BadValue = 18,
    UnsupportedApiVersion = 22,
    Unavailable = 23,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported API version: {0}")]
    UnsupportedVersion(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as u32,
            error: format!("{:?}", code),
            message: message.into(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages.join("; "))
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_)
            | AppError::BadRequest(_)
            | AppError::UnsupportedVersion(_)
            // Duplicate titles are reported as invalid input at this boundary
            | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            AppError::NotFound(msg) => (ErrorCode::NoSuchBook, msg),
            AppError::Validation(msg) | AppError::BadRequest(msg) => (ErrorCode::BadValue, msg),
            AppError::UnsupportedVersion(msg) => (ErrorCode::UnsupportedApiVersion, msg),
            AppError::Conflict(msg) => (ErrorCode::Duplicate, msg),
            AppError::Database(e) => {
                tracing::error!(error = ?e, status = 500, "Database error");
                (ErrorCode::DbFailure, INTERNAL_ERROR_MESSAGE.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, status = 500, "Internal error");
                (ErrorCode::Failure, INTERNAL_ERROR_MESSAGE.to_string())
            }
            AppError::Unavailable(msg) => {
                tracing::warn!(reason = %msg, "Service unavailable");
                (ErrorCode::Unavailable, "Service unavailable".to_string())
            }
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
