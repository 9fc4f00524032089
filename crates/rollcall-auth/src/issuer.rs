//! Login, logout and per-request token validation.
//!
//! [`TokenIssuer`] ties the credential stores, the signing configuration and
//! the session cache together:
//!
//! - `login` checks credentials, signs a token and records it as the single
//!   valid token for the identity (a later login replaces it).
//! - `validate` accepts a token only when it decodes, matches the cached
//!   value and has not expired.
//! - `logout` removes the cached value so the token stops working.
//!
//! Cache failures surface as [`AuthError::CacheUnavailable`]; no path grants
//! access on claims alone.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use chrono::Utc;
use rollcall_config::JwtConfig;
use rollcall_core::password::{compare_passwords, hash_password};
use tracing::{info, instrument, warn};

use crate::claims::{Claims, UserType};
use crate::credentials::CredentialStores;
use crate::error::AuthError;
use crate::jwt::{IssuedToken, create_token, decode_token};
use crate::session::{SessionCache, session_key};

/// Hash compared against when the identity does not exist, so unknown users
/// cost the same bcrypt work as a wrong password.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("rollcall-timing-equalizer").unwrap_or_default());

/// Upper bound on the best-effort last-login update.
const LAST_LOGIN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone)]
pub struct TokenIssuer {
    jwt_config: JwtConfig,
    stores: CredentialStores,
    cache: Arc<dyn SessionCache>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("token_lifetime", &self.jwt_config.token_lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(
        jwt_config: JwtConfig,
        stores: CredentialStores,
        cache: Arc<dyn SessionCache>,
    ) -> Self {
        Self {
            jwt_config,
            stores,
            cache,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    /// Authenticates `identifier` as `user_type` and issues a session token.
    #[instrument(skip(self, password), fields(user_type = %user_type))]
    pub async fn login(
        &self,
        user_type: UserType,
        identifier: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthError> {
        let store = self.stores.for_user_type(user_type);

        let Some(record) = store.find_by_identifier(identifier).await? else {
            password_matches(DUMMY_HASH.clone(), password).await?;
            warn!(code = "invalid_credentials", "Login rejected: unknown identity");
            return Err(AuthError::InvalidCredentials);
        };

        if !password_matches(record.password_hash.clone(), password).await? {
            warn!(
                code = "invalid_credentials",
                user_id = %record.user_id,
                "Login rejected: wrong password"
            );
            return Err(AuthError::InvalidCredentials);
        }

        if user_type == UserType::Admin && !record.is_active() {
            warn!(
                code = "account_disabled",
                user_id = %record.user_id,
                "Login rejected: account disabled"
            );
            return Err(AuthError::AccountDisabled);
        }

        let issued = create_token(&record.user_id, user_type, &self.jwt_config)?;
        let ttl = remaining_ttl(&issued.claims, Utc::now().timestamp());

        self.cache
            .put(
                &session_key(user_type, &record.user_id),
                &issued.token,
                ttl,
            )
            .await?;

        match tokio::time::timeout(LAST_LOGIN_TIMEOUT, store.touch_last_login(&record.user_id))
            .await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(user_id = %record.user_id, error = %e, "Failed to record last login");
            }
            Err(_) => {
                warn!(user_id = %record.user_id, "Recording last login timed out");
            }
        }

        info!(user_id = %record.user_id, "Login succeeded");

        Ok(issued)
    }

    /// Validates a presented token against its signature, the session cache
    /// and its expiry, in that order.
    #[instrument(skip_all)]
    pub async fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode_token(token, &self.jwt_config)?;
        let key = session_key(claims.user_type, &claims.sub);

        match self.cache.get(&key).await? {
            Some(current) if current == token => {}
            _ => return Err(AuthError::RevokedOrUnknownToken),
        }

        if claims.is_expired_at(Utc::now().timestamp()) {
            self.cache.delete(&key).await?;
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    /// Ends the session the token belongs to.
    ///
    /// Expiry is not checked. The cache entry is removed only while it still
    /// holds this token, so a stale token cannot end a newer session.
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode_token(token, &self.jwt_config)?;
        let key = session_key(claims.user_type, &claims.sub);

        if self.cache.get(&key).await?.as_deref() == Some(token) {
            self.cache.delete(&key).await?;
            info!(user_id = %claims.sub, user_type = %claims.user_type, "Logged out");
        }

        Ok(claims)
    }
}

/// Cache TTL matching what is left of the token's lifetime.
fn remaining_ttl(claims: &Claims, now: i64) -> Duration {
    Duration::from_secs(claims.remaining_lifetime(now).max(1) as u64)
}

/// Runs bcrypt off the async workers.
async fn password_matches(hash: String, candidate: &str) -> Result<bool, AuthError> {
    let candidate = candidate.to_owned();
    tokio::task::spawn_blocking(move || compare_passwords(&hash, &candidate))
        .await
        .map_err(|e| AuthError::Internal(format!("password verification task failed: {}", e)))
}
