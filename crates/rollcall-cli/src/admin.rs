use anyhow::{Context, bail};
use rollcall_core::hash_password_with_cost;
use sqlx::PgPool;

/// Fields for a new admin account.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Inserts an active admin and returns its id.
///
/// Fails when an admin with the same email (case-insensitive) already exists.
pub async fn create_admin(db: &PgPool, admin: &NewAdmin, cost: u32) -> anyhow::Result<String> {
    let password_hash = hash_password_with_cost(&admin.password, cost).map_err(|e| e.error)?;

    let id = sqlx::query_scalar::<_, String>(
        "INSERT INTO admins (first_name, last_name, email, password_hash)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT DO NOTHING
         RETURNING id::text",
    )
    .bind(&admin.first_name)
    .bind(&admin.last_name)
    .bind(admin.email.trim())
    .bind(&password_hash)
    .fetch_optional(db)
    .await
    .context("Failed to insert admin")?;

    match id {
        Some(id) => Ok(id),
        None => bail!("Admin with this email already exists"),
    }
}
