use std::env;

use crate::env_or;

/// Default token lifetime: one hour.
pub const DEFAULT_TOKEN_LIFETIME: i64 = 3600;

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_LIFETIME: i64 = 365 * 24 * 3600;

/// Token signing configuration.
///
/// # Environment Variables
///
/// - `JWT_SECRET`: HMAC secret used to sign tokens
/// - `JWT_TOKEN_LIFETIME`: token lifetime in seconds (default: `3600`,
///   clamped to `1..=MAX_TOKEN_LIFETIME`)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub token_lifetime: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            token_lifetime: clamp_lifetime(env_or("JWT_TOKEN_LIFETIME", DEFAULT_TOKEN_LIFETIME)),
        }
    }
}

fn clamp_lifetime(seconds: i64) -> i64 {
    seconds.clamp(1, MAX_TOKEN_LIFETIME)
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "your-secret-key-change-in-production".to_string(),
            token_lifetime: DEFAULT_TOKEN_LIFETIME,
        }
    }
}
