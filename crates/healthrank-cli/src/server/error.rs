//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use healthrank::QueryError;
use serde::Serialize;
use serde_json::{json, Value};

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound { message: String, details: Value },
    /// Bad request from client.
    BadRequest { message: String, details: Value },
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    details: Value,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message, details) = match self {
            ApiError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            ApiError::BadRequest { message, details } => {
                (StatusCode::BAD_REQUEST, "bad_request", message, details)
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
                details,
            }),
        )
            .into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound { resource, message } => ApiError::NotFound {
                message,
                details: json!({ "resource_type": resource }),
            },
            QueryError::BadRequest { message, details } => {
                ApiError::BadRequest { message, details }
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound { message, .. } => write!(f, "Not found: {}", message),
            ApiError::BadRequest { message, .. } => write!(f, "Bad request: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}
