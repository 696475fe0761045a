//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain failures to HTTP status codes and the JSON bodies the
//! public client expects: field-tagged validation lists as
//! `{"errors": [...]}`, everything else as `{"message": "..."}`.
//! Internal error details are suppressed in production responses.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use serena_core::validate::FieldError;

/// Process-wide production flag, set once at startup from `AppConfig`.
/// When set, 500 responses carry a generic message instead of the
/// underlying error text.
static PRODUCTION: AtomicBool = AtomicBool::new(false);

/// Switch error shaping to production mode (or back, in tests).
pub fn set_production(enabled: bool) {
    PRODUCTION.store(enabled, Ordering::Relaxed);
}

fn is_production() -> bool {
    PRODUCTION.load(Ordering::Relaxed)
}

/// `{"message": "..."}` body used by every non-validation error.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// `{"errors": [...]}` body used by collected validation failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationBody {
    pub errors: Vec<FieldError>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Collected field validation failures (400).
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Malformed or semantically rejected request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authentication failure (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authorization failure (403). Always reads "access denied" on the
    /// wire; no resource-existence detail leaks through it.
    #[error("forbidden")]
    Forbidden,

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error (500). Message is logged; in production it
    /// is not returned to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        match self {
            Self::Validation(errors) => (status, Json(ValidationBody { errors })).into_response(),
            Self::BadRequest(message) | Self::Unauthorized(message) | Self::NotFound(message) => {
                (status, Json(MessageBody { message })).into_response()
            }
            Self::Forbidden => (
                status,
                Json(MessageBody {
                    message: "access denied".to_string(),
                }),
            )
                .into_response(),
            Self::Internal(message) => {
                let message = if is_production() {
                    "internal server error".to_string()
                } else {
                    message
                };
                (status, Json(MessageBody { message })).into_response()
            }
        }
    }
}

impl From<Vec<FieldError>> for AppError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }
}
