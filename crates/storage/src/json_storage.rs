//! JSON file storage implementation.
//!
//! Stores each document as one JSON file under a data directory:
//! `requirements/` and `plans/` are keyed by user id, `courses/` and
//! `users/` by their own ids. Concurrent writers are serialized per
//! document by the filesystem, matching the one-document-per-user model.

use std::path::Path;

use gradplan_core::{Course, CourseId, GraduationRequirement, Plan, User, UserId};
use tokio::fs;
use tracing::warn;

use super::{Result, Storage};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: std::path::PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the document directories
    /// as needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("requirements")).await?;
        fs::create_dir_all(root.join("plans")).await?;
        fs::create_dir_all(root.join("courses")).await?;
        fs::create_dir_all(root.join("users")).await?;

        Ok(Self { root })
    }

    fn requirement_path(&self, user_id: UserId) -> std::path::PathBuf {
        self.root.join("requirements").join(format!("{}.json", user_id))
    }
    fn plan_path(&self, user_id: UserId) -> std::path::PathBuf {
        self.root.join("plans").join(format!("{}.json", user_id))
    }
    fn course_path(&self, id: CourseId) -> std::path::PathBuf {
        self.root.join("courses").join(format!("{}.json", id))
    }
    fn user_path(&self, id: UserId) -> std::path::PathBuf {
        self.root.join("users").join(format!("{}.json", id))
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_requirement(&self, requirement: &GraduationRequirement) -> Result<()> {
        write_json(&self.requirement_path(requirement.user_id), requirement).await
    }

    async fn load_requirement(&self, user_id: UserId) -> Result<Option<GraduationRequirement>> {
        read_json(&self.requirement_path(user_id)).await
    }

    async fn delete_requirement(&self, user_id: UserId) -> Result<()> {
        remove_if_exists(&self.requirement_path(user_id)).await
    }

    async fn save_plan(&self, plan: &Plan) -> Result<()> {
        write_json(&self.plan_path(plan.user_id), plan).await
    }

    async fn load_plan(&self, user_id: UserId) -> Result<Option<Plan>> {
        read_json(&self.plan_path(user_id)).await
    }

    async fn delete_plan(&self, user_id: UserId) -> Result<()> {
        remove_if_exists(&self.plan_path(user_id)).await
    }

    async fn save_course(&self, course: &Course) -> Result<()> {
        write_json(&self.course_path(course.id), course).await
    }

    async fn load_course(&self, id: CourseId) -> Result<Option<Course>> {
        read_json(&self.course_path(id)).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        list_dir(&self.root.join("courses")).await
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        write_json(&self.user_path(user.id), user).await
    }

    async fn load_user(&self, id: UserId) -> Result<Option<User>> {
        read_json(&self.user_path(id)).await
    }
}

async fn write_json<T: serde::Serialize>(path: &std::path::Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json.as_bytes()).await?;
    Ok(())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn remove_if_exists(path: &std::path::Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &std::path::Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&entry.path()).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => {
                warn!("skipping unreadable document {}: {}", entry.path().display(), e);
            }
        }
    }
    Ok(items)
}
