//! Authentication DTOs.

use chrono::{DateTime, Utc};
use rollcall_auth::{Claims, IssuedToken, UserType};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Login request.
///
/// `user_id` is the role's login identifier: an email for admins, the
/// teacher id or student id otherwise.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    pub user_type: UserType,
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "admin@school.com")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Successful login. The same token is also set as the session cookie.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user_type: UserType,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

impl From<IssuedToken> for LoginResponse {
    fn from(issued: IssuedToken) -> Self {
        let expires_at = issued.expires_at();
        Self {
            user_type: issued.claims.user_type,
            user_id: issued.claims.sub,
            token: issued.token,
            expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The authenticated caller's session.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user_id: String,
    pub user_type: UserType,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<&Claims> for SessionResponse {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            user_type: claims.user_type,
            issued_at: DateTime::from_timestamp(claims.iat, 0).unwrap_or_default(),
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or_default(),
        }
    }
}

/// Whether the request carried a valid session, and whose.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
}

impl SessionStatusResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user_id: None,
            user_type: None,
        }
    }

    pub fn authenticated(claims: &Claims) -> Self {
        Self {
            authenticated: true,
            user_id: Some(claims.sub.clone()),
            user_type: Some(claims.user_type),
        }
    }
}
