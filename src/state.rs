use anyhow::Context;
use rollcall_auth::TokenIssuer;
use rollcall_cache::{CacheConfig, connect_session_cache};
use rollcall_config::{CookieConfig, CorsConfig, JwtConfig, ServerConfig};
use rollcall_db::{init_db_pool, pg_credential_stores, run_migrations};
use tracing::info;

#[derive(Clone, Debug)]
pub struct AppState {
    pub issuer: TokenIssuer,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
}

impl AppState {
    pub fn new(issuer: TokenIssuer) -> Self {
        Self {
            issuer,
            cookie_config: CookieConfig::default(),
            cors_config: CorsConfig::default(),
            server_config: ServerConfig::default(),
        }
    }
}

/// Builds the application state from the environment: Postgres credential
/// stores and the configured session cache.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let pool = init_db_pool()
        .await
        .context("Failed to connect to database")?;

    if std::env::var("RUN_MIGRATIONS").is_ok_and(|v| v == "true") {
        run_migrations(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let cache_config = CacheConfig::from_env();
    let cache = connect_session_cache(&cache_config)
        .await
        .context("Failed to connect session cache")?;

    let jwt_config = JwtConfig::from_env();
    info!(
        token_lifetime = jwt_config.token_lifetime,
        "Token issuer configured"
    );

    Ok(AppState {
        issuer: TokenIssuer::new(jwt_config, pg_credential_stores(&pool), cache),
        cookie_config: CookieConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        server_config: ServerConfig::from_env(),
    })
}
