//! User Service - business logic layer

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumString};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::store::RecordStore;
use crate::validation::is_email_valid;

/// Which existence-check outcome an update requires.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UpdatePolicy {
    /// Update replaces an existing user; unknown emails fail with
    /// [`UserError::UserNotFound`].
    #[default]
    RequireExisting,
    /// Update only writes emails that are not stored yet and fails with
    /// [`UserError::DuplicateUser`] otherwise. Kept for deployments that
    /// depend on the old behaviour.
    RejectExisting,
}

/// User service providing the CRUD operations over a [`RecordStore`].
///
/// Holds no user data between calls; the store is the only owner.
pub struct UserService<S: RecordStore> {
    store: Arc<S>,
    update_policy: UpdatePolicy,
}

impl<S: RecordStore> UserService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            update_policy: UpdatePolicy::default(),
        }
    }

    pub fn with_update_policy(mut self, update_policy: UpdatePolicy) -> Self {
        self.update_policy = update_policy;
        self
    }

    pub fn update_policy(&self) -> UpdatePolicy {
        self.update_policy
    }

    /// Look up one user by email
    #[instrument(skip(self))]
    pub async fn fetch_user(&self, email: &str) -> UserResult<User> {
        let record = self
            .store
            .get(email)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to fetch user record");
                UserError::FetchRecord
            })?
            .ok_or(UserError::UserNotFound)?;

        User::from_record(record)
    }

    /// Every user in the table, in one unpaginated call
    #[instrument(skip(self))]
    pub async fn fetch_all_users(&self) -> UserResult<Vec<User>> {
        let records = self.store.scan_all().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to scan user records");
            UserError::FetchRecord
        })?;

        records.into_iter().map(User::from_record).collect()
    }

    /// Create a user from a raw JSON body.
    ///
    /// Uniqueness is best-effort: the existence check and the write are two
    /// separate store calls, so concurrent creates for one email can both pass.
    #[instrument(skip(self, raw_body))]
    pub async fn create_user(&self, raw_body: &str) -> UserResult<User> {
        let user = Self::decode_and_validate(raw_body)?;

        if self.exists(&user.email).await? {
            return Err(UserError::DuplicateUser);
        }

        self.write(&user).await?;

        tracing::info!(email = %user.email, "Created user");
        Ok(user)
    }

    /// Replace a user wholesale from a raw JSON body, subject to the
    /// configured [`UpdatePolicy`].
    #[instrument(skip(self, raw_body), fields(policy = %self.update_policy))]
    pub async fn update_user(&self, raw_body: &str) -> UserResult<User> {
        let user = Self::decode_and_validate(raw_body)?;
        let exists = self.exists(&user.email).await?;

        match (self.update_policy, exists) {
            (UpdatePolicy::RequireExisting, false) => return Err(UserError::UserNotFound),
            (UpdatePolicy::RejectExisting, true) => return Err(UserError::DuplicateUser),
            _ => {}
        }

        self.write(&user).await?;

        tracing::info!(email = %user.email, "Updated user");
        Ok(user)
    }

    /// Delete by email. Absent keys succeed.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, email: &str) -> UserResult<()> {
        self.store.delete(email).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to delete user record");
            UserError::DeleteItem
        })?;

        tracing::info!(email = %email, "Deleted user");
        Ok(())
    }

    fn decode_and_validate(raw_body: &str) -> UserResult<User> {
        let user = User::from_body(raw_body)?;

        if !is_email_valid(&user.email) {
            return Err(UserError::InvalidEmail);
        }

        Ok(user)
    }

    /// Existence check. A failing lookup is reported, not read as "absent".
    async fn exists(&self, email: &str) -> UserResult<bool> {
        let record = self.store.get(email).await.map_err(|e| {
            tracing::warn!(error = %e, "Existence check failed");
            UserError::FetchRecord
        })?;

        Ok(record.is_some())
    }

    async fn write(&self, user: &User) -> UserResult<()> {
        let record = user.to_record()?;

        self.store.put(record).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to write user record");
            UserError::StoreWrite
        })
    }
}

impl<S: RecordStore> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            update_policy: self.update_policy,
        }
    }
}
