//! Token signing and decoding.
//!
//! Tokens are HS256 JWTs carrying [`Claims`]. Decoding here checks the
//! signature and claim structure only; expiry is judged by the caller so the
//! middleware can consult the session cache first and logout can accept a
//! token that just expired.
//!
//! # Example
//!
//! ```ignore
//! use rollcall_auth::{UserType, create_token, decode_token};
//! use rollcall_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let issued = create_token("42", UserType::Teacher, &config)?;
//! let claims = decode_token(&issued.token, &config)?;
//! assert_eq!(claims.sub, "42");
//! ```

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rollcall_config::JwtConfig;
use tracing::debug;

use crate::claims::{Claims, UserType};
use crate::error::AuthError;

/// A freshly signed token and the claims inside it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

impl IssuedToken {
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.claims.exp, 0).unwrap_or_default()
    }
}

/// Signs a token for `user_id` valid for the configured lifetime from now.
pub fn create_token(
    user_id: &str,
    user_type: UserType,
    jwt_config: &JwtConfig,
) -> Result<IssuedToken, AuthError> {
    create_token_at(user_id, user_type, Utc::now().timestamp(), jwt_config)
}

/// Signs a token as if issued at `issued_at` (Unix seconds).
pub fn create_token_at(
    user_id: &str,
    user_type: UserType,
    issued_at: i64,
    jwt_config: &JwtConfig,
) -> Result<IssuedToken, AuthError> {
    let claims = Claims {
        sub: user_id.to_string(),
        user_type,
        iat: issued_at,
        exp: issued_at.saturating_add(jwt_config.token_lifetime),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AuthError::Internal(format!("Failed to create token: {}", e)))?;

    Ok(IssuedToken { token, claims })
}

/// Checks signature and structure, ignoring expiry.
pub fn decode_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "iat", "sub"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!(error = %e, "Token decoding failed");
        AuthError::InvalidToken
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_lifetime: 3600,
        }
    }

    #[test]
    fn test_create_and_decode() {
        let config = get_test_jwt_config();
        let issued = create_token("T-100", UserType::Teacher, &config).unwrap();

        let claims = decode_token(&issued.token, &config).unwrap();
        assert_eq!(claims, issued.claims);
        assert_eq!(claims.user_type, UserType::Teacher);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_decode_wrong_secret() {
        let config = get_test_jwt_config();
        let issued = create_token("1", UserType::Admin, &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            token_lifetime: 3600,
        };
        assert!(matches!(
            decode_token(&issued.token, &wrong_config),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_decode_garbage() {
        let config = get_test_jwt_config();
        assert!(matches!(
            decode_token("not-a-token", &config),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_decode_ignores_expiry() {
        let config = get_test_jwt_config();
        let issued_at = Utc::now().timestamp() - 7200;
        let issued = create_token_at("S-1", UserType::Student, issued_at, &config).unwrap();

        let claims = decode_token(&issued.token, &config).unwrap();
        assert_eq!(claims.sub, "S-1");
    }

    #[test]
    fn test_decoded_claims_carry_expiry() {
        let config = get_test_jwt_config();
        let issued = create_token_at("S-1", UserType::Student, 1_000, &config).unwrap();

        let claims = decode_token(&issued.token, &config).unwrap();
        assert!(!claims.is_expired_at(4_599));
        assert!(claims.is_expired_at(4_600));
    }

    #[test]
    fn test_oversized_lifetime_saturates() {
        let config = JwtConfig {
            token_lifetime: i64::MAX,
            ..get_test_jwt_config()
        };
        let issued = create_token_at("1", UserType::Admin, 1_700_000_000, &config).unwrap();
        assert_eq!(issued.claims.exp, i64::MAX);
    }

    #[test]
    fn test_expires_at() {
        let config = get_test_jwt_config();
        let issued = create_token_at("1", UserType::Admin, 1_700_000_000, &config).unwrap();
        assert_eq!(issued.expires_at().timestamp(), 1_700_003_600);
    }
}
