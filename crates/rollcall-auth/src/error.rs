//! Authentication errors.
//!
//! One variant per failure the login flow, the middleware chain or the role
//! gate can produce. Conversion into an HTTP response happens once, through
//! [`AppError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rollcall_core::AppError;
use thiserror::Error;

use crate::credentials::StoreError;
use crate::session::CacheError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown identity or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Correct password for a deactivated admin account.
    #[error("Account disabled")]
    AccountDisabled,

    /// Neither an `Authorization` header nor a session cookie was sent.
    #[error("Missing authentication token")]
    MissingToken,

    /// `Authorization` header is not of the form `Bearer <token>`.
    #[error("Malformed authorization header")]
    MalformedToken,

    /// Signature or claim structure check failed.
    #[error("Invalid token")]
    InvalidToken,

    /// Token is past its expiration timestamp.
    #[error("Token expired")]
    TokenExpired,

    /// Token is not the one currently stored for its identity.
    #[error("Token revoked or unknown")]
    RevokedOrUnknownToken,

    /// A role-gated route was reached without an authenticated context.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Authenticated, but the role is not allowed on this route.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// Session cache unreachable or timed out.
    #[error("Session cache unavailable: {0}")]
    CacheUnavailable(#[from] CacheError),

    /// Credential store failure.
    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal auth error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::AccountDisabled
            | AuthError::MissingToken
            | AuthError::MalformedToken
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::RevokedOrUnknownToken
            | AuthError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AuthError::CacheUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Store(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Key sent to clients. A disabled account shares the invalid-credentials
    /// key so the response does not reveal which accounts exist.
    pub fn translate_key(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials | AuthError::AccountDisabled => {
                "auth.invalid_credentials"
            }
            AuthError::MissingToken => "auth.missing_token",
            AuthError::MalformedToken => "auth.malformed_token",
            AuthError::InvalidToken => "auth.invalid_token",
            AuthError::TokenExpired => "auth.token_expired",
            AuthError::RevokedOrUnknownToken => "auth.revoked_token",
            AuthError::AuthenticationRequired => "auth.authentication_required",
            AuthError::InsufficientPermissions => "auth.insufficient_permissions",
            AuthError::CacheUnavailable(_) => "service_unavailable",
            AuthError::Store(_) | AuthError::Internal(_) => "internal_error",
        }
    }

    /// Internal code used in logs; distinguishes cases the client cannot see.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::AccountDisabled => "account_disabled",
            AuthError::MissingToken => "missing_token",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidToken => "invalid_token",
            AuthError::TokenExpired => "token_expired",
            AuthError::RevokedOrUnknownToken => "revoked_or_unknown_token",
            AuthError::AuthenticationRequired => "authentication_required",
            AuthError::InsufficientPermissions => "insufficient_permissions",
            AuthError::CacheUnavailable(_) => "cache_unavailable",
            AuthError::Store(_) => "store_error",
            AuthError::Internal(_) => "internal_error",
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let status = err.status();
        let translate_key = err.translate_key();

        match err {
            // Same message as a wrong password.
            AuthError::AccountDisabled => AppError::new(
                status,
                translate_key,
                anyhow::anyhow!(AuthError::InvalidCredentials.to_string()),
            ),
            other => AppError::new(status, translate_key, other),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
