//! Shared HTTP response types for the pdfshelf services.
//!
//! All services answer errors with the same flat envelope:
//!
//! ```json
//! { "error": "Search failed" }
//! ```
//!
//! Messages are fixed and generic for server-side faults — backend detail
//! stays in the logs, never in the response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// JSON error envelope: `{"error": "..."}`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error type that converts into an HTTP response with the envelope body.
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
pub fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

/// Constructs a 404 Not Found error.
pub fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        message: message.into(),
    }
}

/// Constructs a 500 Internal Server Error.
pub fn internal_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.into(),
    }
}

/// JSON response body for `GET /` liveness checks.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the service is running.
    pub status: String,
    /// Service name, e.g. `"PDF Search API"`.
    pub message: String,
}

impl HealthResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.to_string(),
        }
    }
}
