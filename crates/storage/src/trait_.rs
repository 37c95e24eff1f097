//! Storage trait abstraction.

use async_trait::async_trait;
use gradplan_core::{Course, CourseId, GraduationRequirement, Plan, User, UserId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for gradplan documents.
///
/// Plans and requirements are one document per user; the course catalog is
/// shared reference data. All operations take `&self`: the store supplies
/// per-document update semantics, there is no application-level locking.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Requirement operations ===

    /// Save a requirement document (create or replace).
    async fn save_requirement(&self, requirement: &GraduationRequirement) -> Result<()>;

    /// Load a user's requirement document.
    async fn load_requirement(&self, user_id: UserId) -> Result<Option<GraduationRequirement>>;

    /// Delete a user's requirement document. Deleting a missing document is
    /// not an error.
    async fn delete_requirement(&self, user_id: UserId) -> Result<()>;

    // === Plan operations ===

    /// Save a plan document (create or replace).
    async fn save_plan(&self, plan: &Plan) -> Result<()>;

    /// Load a user's plan document.
    async fn load_plan(&self, user_id: UserId) -> Result<Option<Plan>>;

    /// Delete a user's plan document. Deleting a missing document is not an
    /// error.
    async fn delete_plan(&self, user_id: UserId) -> Result<()>;

    // === Course catalog ===

    /// Save a catalog course (create or replace).
    async fn save_course(&self, course: &Course) -> Result<()>;

    /// Load a course by id.
    async fn load_course(&self, id: CourseId) -> Result<Option<Course>>;

    /// List the whole catalog.
    async fn list_courses(&self) -> Result<Vec<Course>>;

    // === User profiles ===

    /// Save a user profile (create or replace).
    async fn save_user(&self, user: &User) -> Result<()>;

    /// Load a user profile by id.
    async fn load_user(&self, id: UserId) -> Result<Option<User>>;
}
