//! Credential store contract.
//!
//! Each role keeps its credentials in its own store, keyed by a role-specific
//! identifier (email for admins, teacher id or student id otherwise). The
//! [`CredentialStores`] registry picks the store for a [`UserType`] at login.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::claims::UserType;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("credential backend error: {0}")]
    Backend(String),
}

/// Credentials of one identity as held by its store.
#[derive(Clone)]
pub struct CredentialRecord {
    /// Stable id placed in the token subject.
    pub user_id: String,
    /// Login identifier the record was found by.
    pub identifier: String,
    pub password_hash: String,
    /// Only admin stores report `false`.
    pub active: bool,
}

impl CredentialRecord {
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("user_id", &self.user_id)
            .field("identifier", &self.identifier)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<CredentialRecord>, StoreError>;

    /// Records a successful login for `user_id`.
    async fn touch_last_login(&self, user_id: &str) -> Result<(), StoreError>;
}

/// One credential store per role.
#[derive(Clone)]
pub struct CredentialStores {
    admins: Arc<dyn CredentialStore>,
    teachers: Arc<dyn CredentialStore>,
    students: Arc<dyn CredentialStore>,
}

impl CredentialStores {
    pub fn new(
        admins: Arc<dyn CredentialStore>,
        teachers: Arc<dyn CredentialStore>,
        students: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            admins,
            teachers,
            students,
        }
    }

    pub fn for_user_type(&self, user_type: UserType) -> &dyn CredentialStore {
        match user_type {
            UserType::Admin => self.admins.as_ref(),
            UserType::Teacher => self.teachers.as_ref(),
            UserType::Student => self.students.as_ref(),
        }
    }
}

/// Credential store held in memory, for development and tests.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<HashMap<String, CredentialRecord>>,
    last_logins: RwLock<HashMap<String, u64>>,
    fail_touch: bool,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose `touch_last_login` always fails.
    pub fn with_failing_touch() -> Self {
        Self {
            fail_touch: true,
            ..Self::default()
        }
    }

    pub async fn insert(&self, record: CredentialRecord) {
        self.records
            .write()
            .await
            .insert(record.identifier.clone(), record);
    }

    /// Number of recorded logins for `user_id`.
    pub async fn login_count(&self, user_id: &str) -> u64 {
        self.last_logins
            .read()
            .await
            .get(user_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        Ok(self.records.read().await.get(identifier).cloned())
    }

    async fn touch_last_login(&self, user_id: &str) -> Result<(), StoreError> {
        if self.fail_touch {
            return Err(StoreError::Backend("last login update rejected".to_string()));
        }

        *self
            .last_logins
            .write()
            .await
            .entry(user_id.to_string())
            .or_insert(0) += 1;
        Ok(())
    }
}
