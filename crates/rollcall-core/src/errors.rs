//! Application error type with HTTP response conversion.
//!
//! Every handler in the API returns `Result<_, AppError>`. The error carries
//! the HTTP status, a stable `translate_key` the admin UI maps to a localized
//! message, and the underlying [`anyhow::Error`].
//!
//! Server-side failures (5xx) are logged with full detail and rendered with a
//! generic message so backend internals never reach the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// Body returned for every error response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable key used by clients to look up a localized message.
    #[schema(example = "auth.invalid_credentials")]
    pub translate_key: String,
    /// Human readable message.
    #[schema(example = "Invalid credentials")]
    pub error: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub translate_key: &'static str,
    pub error: anyhow::Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, translate_key: &'static str, err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self {
            status,
            translate_key,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, "validation.bad_request", err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "validation.invalid", err)
    }

    /// Message safe to show to the client.
    fn public_message(&self) -> String {
        match self.status {
            StatusCode::SERVICE_UNAVAILABLE => "Service temporarily unavailable".to_string(),
            status if status.is_server_error() => "Internal server error".to_string(),
            _ => self.error.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                status = %self.status.as_u16(),
                translate_key = %self.translate_key,
                error = ?self.error,
                "Request failed with server error"
            );
        }

        let body = Json(ErrorResponse {
            translate_key: self.translate_key.to_string(),
            error: self.public_message(),
        });

        (self.status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err)
    }
}
