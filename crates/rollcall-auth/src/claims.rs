//! Token claim structures.
//!
//! - [`UserType`]: the three roles that can log in
//! - [`Claims`]: payload signed into every session token

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Role a credential belongs to. Selects the credential store at login and
/// is the unit of role-gated authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Admin,
    Teacher,
    Student,
}

impl UserType {
    pub const ALL: [UserType; 3] = [UserType::Admin, UserType::Teacher, UserType::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::Teacher => "teacher",
            UserType::Student => "student",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user type: {0}")]
pub struct UnknownUserType(pub String);

impl FromStr for UserType {
    type Err = UnknownUserType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserType::Admin),
            "teacher" => Ok(UserType::Teacher),
            "student" => Ok(UserType::Student),
            other => Err(UnknownUserType(other.to_string())),
        }
    }
}

/// Claims carried by a session token.
///
/// Immutable once issued. `exp - iat` equals the configured lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Role the token was issued for
    pub user_type: UserType,
    /// Issued-at timestamp (Unix seconds)
    pub iat: i64,
    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// True once `now` has reached the expiration timestamp.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// Seconds left before expiry, zero when already expired.
    pub fn remaining_lifetime(&self, now: i64) -> i64 {
        self.exp.saturating_sub(now).max(0)
    }
}
