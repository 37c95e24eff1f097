//! Requirement lifecycle service.
//!
//! Creation of the baseline document, partial-merge upserts, and the
//! account-deletion hook. The progress engine only ever reads requirement
//! documents; all writes go through this service.

use std::sync::Arc;

use async_trait::async_trait;
use gradplan_core::{GraduationRequirement, RequirementUpdate, UserId, ValidationError};
use gradplan_storage::{Storage, StorageError};
use tracing::info;

/// Errors from requirement lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum RequirementError {
    /// Underlying document access failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The merged document violates an invariant
    #[error("invalid requirement: {0}")]
    Invalid(#[from] ValidationError),
}

/// Result of [`RequirementManager::ensure_baseline`].
#[derive(Debug, Clone)]
pub struct BaselineOutcome {
    /// The document now on record
    pub requirement: GraduationRequirement,

    /// Whether it was created by this call
    pub created: bool,
}

/// Requirement lifecycle service.
#[async_trait]
pub trait RequirementManager: Send + Sync {
    /// Load a user's requirement document.
    async fn get(&self, user_id: UserId) -> Result<Option<GraduationRequirement>, RequirementError>;

    /// Create the baseline document if the user has none. Never overwrites
    /// existing settings.
    async fn ensure_baseline(&self, user_id: UserId) -> Result<BaselineOutcome, RequirementError>;

    /// Apply a partial update, creating the document from the baseline when
    /// absent. Omitted fields keep their current values.
    async fn upsert(
        &self,
        user_id: UserId,
        update: RequirementUpdate,
    ) -> Result<GraduationRequirement, RequirementError>;

    /// Remove the user's requirement and plan documents.
    async fn delete(&self, user_id: UserId) -> Result<(), RequirementError>;
}

/// Requirement manager backed by a [`Storage`].
pub struct StoredRequirementManager<S: Storage> {
    storage: Arc<S>,
}

impl<S: Storage> StoredRequirementManager<S> {
    /// Create a new manager over the given store.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage + 'static> RequirementManager for StoredRequirementManager<S> {
    async fn get(
        &self,
        user_id: UserId,
    ) -> Result<Option<GraduationRequirement>, RequirementError> {
        Ok(self.storage.load_requirement(user_id).await?)
    }

    async fn ensure_baseline(&self, user_id: UserId) -> Result<BaselineOutcome, RequirementError> {
        if let Some(existing) = self.storage.load_requirement(user_id).await? {
            return Ok(BaselineOutcome {
                requirement: existing,
                created: false,
            });
        }

        let requirement = GraduationRequirement::baseline(user_id);
        self.storage.save_requirement(&requirement).await?;
        info!("created baseline requirement for user {}", user_id);
        Ok(BaselineOutcome {
            requirement,
            created: true,
        })
    }

    async fn upsert(
        &self,
        user_id: UserId,
        update: RequirementUpdate,
    ) -> Result<GraduationRequirement, RequirementError> {
        let base = self
            .storage
            .load_requirement(user_id)
            .await?
            .unwrap_or_else(|| GraduationRequirement::baseline(user_id));

        let merged = update.apply(&base)?;
        self.storage.save_requirement(&merged).await?;
        Ok(merged)
    }

    async fn delete(&self, user_id: UserId) -> Result<(), RequirementError> {
        self.storage.delete_requirement(user_id).await?;
        self.storage.delete_plan(user_id).await?;
        info!("deleted requirement and plan for user {}", user_id);
        Ok(())
    }
}
