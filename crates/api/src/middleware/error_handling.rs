//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the FitClub
//! API. It maps domain-specific errors to appropriate HTTP status codes and
//! JSON error responses, ensuring a consistent error handling experience
//! across the entire API.
//!
//! Booking conflicts get special treatment: the response body carries every
//! violated rule so a client can display the complete list at once.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use fitclub_core::errors::ClubError;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `ClubError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub ClubError);

/// Converts application errors to HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            ClubError::NotFound(_) => StatusCode::NOT_FOUND,
            ClubError::Validation(_) => StatusCode::BAD_REQUEST,
            ClubError::Conflict(_) => StatusCode::CONFLICT,
            ClubError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ClubError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.0.to_string();

        // Conflicts additionally list every violated rule
        let body = match &self.0 {
            ClubError::Conflict(reasons) => Json(json!({
                "error": message,
                "conflicts": reasons,
            })),
            _ => Json(json!({ "error": message })),
        };

        (status, body).into_response()
    }
}

/// Automatic conversion from ClubError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, ClubError>` in handler functions that return
/// `Result<T, AppError>`.
impl From<ClubError> for AppError {
    fn from(err: ClubError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, eyre::Report>` in handler functions that return
/// `Result<T, AppError>`. It wraps the eyre error in a
/// `ClubError::Database` variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ClubError::Database(err))
    }
}
