//! Error types for the Bookloan server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable numeric error codes exposed to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchData = 4,
    BadValue = 5,
    OutOfStock = 6,
    AlreadyReturned = 7,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Out of stock: {0}")]
    OutOfStock(String),

    #[error("Already returned: {0}")]
    AlreadyReturned(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone())
            }
            AppError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::OutOfStock(msg) => {
                (StatusCode::CONFLICT, ErrorCode::OutOfStock, msg.clone())
            }
            AppError::AlreadyReturned(msg) => {
                (StatusCode::CONFLICT, ErrorCode::AlreadyReturned, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn error_kinds_map_to_expected_status_codes() {
        assert_eq!(
            status_of(AppError::Validation("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::NotFound("missing".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Forbidden("nope".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(AppError::OutOfStock("empty".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::AlreadyReturned("twice".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_hide_details_from_clients() {
        let response = AppError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
