//! Postgres-backed credential stores.
//!
//! Each role lives in its own table and is looked up by its own identifier:
//! admins by email, teachers by `teacher_id`, students by `student_id`. Only
//! admins carry an `is_active` flag; the other tables report every row as
//! active.

use std::sync::Arc;

use async_trait::async_trait;
use rollcall_auth::{CredentialRecord, CredentialStore, CredentialStores, StoreError};
use sqlx::PgPool;
use tracing::{error, instrument};

/// Table a [`PgCredentialStore`] reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialTable {
    Admins,
    Teachers,
    Students,
}

impl CredentialTable {
    fn find_query(self) -> &'static str {
        match self {
            CredentialTable::Admins => {
                r#"
                SELECT id::text AS user_id, email AS identifier, password_hash, is_active AS active
                FROM admins
                WHERE LOWER(email) = LOWER($1)
                "#
            }
            CredentialTable::Teachers => {
                r#"
                SELECT teacher_id AS user_id, teacher_id AS identifier, password_hash, TRUE AS active
                FROM teachers
                WHERE teacher_id = $1
                "#
            }
            CredentialTable::Students => {
                r#"
                SELECT student_id AS user_id, student_id AS identifier, password_hash, TRUE AS active
                FROM students
                WHERE student_id = $1
                "#
            }
        }
    }

    fn touch_query(self) -> &'static str {
        match self {
            CredentialTable::Admins => "UPDATE admins SET last_login_at = NOW() WHERE id::text = $1",
            CredentialTable::Teachers => {
                "UPDATE teachers SET last_login_at = NOW() WHERE teacher_id = $1"
            }
            CredentialTable::Students => {
                "UPDATE students SET last_login_at = NOW() WHERE student_id = $1"
            }
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    user_id: String,
    identifier: String,
    password_hash: String,
    active: bool,
}

impl From<CredentialRow> for CredentialRecord {
    fn from(row: CredentialRow) -> Self {
        CredentialRecord {
            user_id: row.user_id,
            identifier: row.identifier,
            password_hash: row.password_hash,
            active: row.active,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgCredentialStore {
    pool: PgPool,
    table: CredentialTable,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool, table: CredentialTable) -> Self {
        Self { pool, table }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[instrument(skip(self), fields(table = ?self.table))]
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        let row = sqlx::query_as::<_, CredentialRow>(self.table.find_query())
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(row.map(CredentialRecord::from))
    }

    #[instrument(skip(self), fields(table = ?self.table))]
    async fn touch_last_login(&self, user_id: &str) -> Result<(), StoreError> {
        sqlx::query(self.table.touch_query())
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(())
    }
}

/// Builds the three role stores over one pool.
pub fn pg_credential_stores(pool: &PgPool) -> CredentialStores {
    CredentialStores::new(
        Arc::new(PgCredentialStore::new(pool.clone(), CredentialTable::Admins)),
        Arc::new(PgCredentialStore::new(pool.clone(), CredentialTable::Teachers)),
        Arc::new(PgCredentialStore::new(pool.clone(), CredentialTable::Students)),
    )
}

fn database_error(e: sqlx::Error) -> StoreError {
    error!(error = %e, "Credential query failed");
    StoreError::Backend(e.to_string())
}
