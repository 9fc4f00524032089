//! # Rollcall DB
//!
//! Database pool and Postgres credential stores for the Rollcall API.
//!
//! # Example
//!
//! ```ignore
//! use rollcall_db::{init_db_pool, pg_credential_stores};
//!
//! let pool = init_db_pool().await?;
//! let stores = pg_credential_stores(&pool);
//! ```

pub mod credentials;

use std::env;

use tracing::info;

pub use credentials::{CredentialTable, PgCredentialStore, pg_credential_stores};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// The returned pool is cheaply cloneable and should be created once at
/// startup.
///
/// # Errors
///
/// Returns `sqlx::Error::Configuration` when `DATABASE_URL` is not set, or the
/// connection error when the database cannot be reached.
pub async fn init_db_pool() -> Result<PgPool, sqlx::Error> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;

    PgPool::connect(&database_url).await
}

/// Applies the SQL migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}
