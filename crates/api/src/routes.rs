//! Request handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use gradplan_core::{
    Course, CourseCategory, CourseId, DepartmentId, GraduationProgress, GraduationRequirement,
    MajorType, Plan, RequirementUpdate, Semester, User, UserId,
};
use gradplan_progress::{
    ProgressEngine, RequirementManager, StoredProgressEngine, StoredRequirementManager,
};
use gradplan_storage::Storage;

use crate::error::ApiError;
use crate::state::AppState;

fn parse_id<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid {} id: {}", what, raw)))
}

/// Compute the caller's graduation progress.
pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    Path(user): Path<String>,
) -> Result<Json<GraduationProgress>, ApiError> {
    let user_id: UserId = parse_id(&user, "user")?;
    let engine = StoredProgressEngine::new(state.storage.clone());
    engine
        .graduation_progress(user_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotConfigured)
}

/// Fetch the requirement document.
pub async fn get_requirement(
    State(state): State<Arc<AppState>>,
    Path(user): Path<String>,
) -> Result<Json<GraduationRequirement>, ApiError> {
    let user_id: UserId = parse_id(&user, "user")?;
    let manager = StoredRequirementManager::new(state.storage.clone());
    manager
        .get(user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no graduation requirement for user {}", user_id)))
}

/// Partial-merge upsert of the requirement document.
pub async fn upsert_requirement(
    State(state): State<Arc<AppState>>,
    Path(user): Path<String>,
    Json(update): Json<RequirementUpdate>,
) -> Result<Json<GraduationRequirement>, ApiError> {
    let user_id: UserId = parse_id(&user, "user")?;
    let manager = StoredRequirementManager::new(state.storage.clone());
    Ok(Json(manager.upsert(user_id, update).await?))
}

/// Create the baseline requirement when none exists.
pub async fn create_default_requirement(
    State(state): State<Arc<AppState>>,
    Path(user): Path<String>,
) -> Result<(StatusCode, Json<GraduationRequirement>), ApiError> {
    let user_id: UserId = parse_id(&user, "user")?;
    let manager = StoredRequirementManager::new(state.storage.clone());
    let outcome = manager.ensure_baseline(user_id).await?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome.requirement)))
}

/// Account-deletion hook: remove the requirement and plan.
pub async fn delete_requirement(
    State(state): State<Arc<AppState>>,
    Path(user): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id: UserId = parse_id(&user, "user")?;
    let manager = StoredRequirementManager::new(state.storage.clone());
    manager.delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fetch the plan document.
pub async fn get_plan(
    State(state): State<Arc<AppState>>,
    Path(user): Path<String>,
) -> Result<Json<Plan>, ApiError> {
    let user_id: UserId = parse_id(&user, "user")?;
    state
        .storage
        .load_plan(user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no plan for user {}", user_id)))
}

/// Replacement payload for a plan's semesters.
#[derive(Debug, Deserialize)]
pub struct PlanUpdate {
    /// Semesters in chronological order
    pub semesters: Vec<Semester>,
}

/// Replace the plan's semesters, keeping the document's creation time.
pub async fn put_plan(
    State(state): State<Arc<AppState>>,
    Path(user): Path<String>,
    Json(update): Json<PlanUpdate>,
) -> Result<Json<Plan>, ApiError> {
    let user_id: UserId = parse_id(&user, "user")?;

    let mut plan = state
        .storage
        .load_plan(user_id)
        .await?
        .unwrap_or_else(|| Plan::new(user_id));
    plan.semesters = update.semesters;
    plan.updated_at = chrono::Utc::now();
    plan.validate()?;

    state.storage.save_plan(&plan).await?;
    Ok(Json(plan))
}

/// User profile payload for attribution context.
#[derive(Debug, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Primary department
    pub department: DepartmentId,
    /// Secondary department, when pursuing a double major or minor
    pub secondary_department: Option<DepartmentId>,
    /// Declared major type
    pub major_type: MajorType,
}

/// Store the attribution slice of a user profile.
pub async fn put_user(
    State(state): State<Arc<AppState>>,
    Path(user): Path<String>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<User>, ApiError> {
    let user_id: UserId = parse_id(&user, "user")?;
    let user = User {
        id: user_id,
        name: profile.name,
        department: profile.department,
        secondary_department: profile.secondary_department,
        major_type: profile.major_type,
    };
    state.storage.save_user(&user).await?;
    Ok(Json(user))
}

/// List the course catalog.
pub async fn list_courses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Course>>, ApiError> {
    Ok(Json(state.storage.list_courses().await?))
}

/// Catalog course payload.
#[derive(Debug, Deserialize)]
pub struct CoursePayload {
    /// Course code
    pub code: String,
    /// Display name
    pub name: String,
    /// Credit value, positive
    pub credits: u32,
    /// Curriculum category
    pub category: Option<CourseCategory>,
    /// Owning department
    pub department: Option<DepartmentId>,
}

/// Create or replace a catalog course.
pub async fn put_course(
    State(state): State<Arc<AppState>>,
    Path(course): Path<String>,
    Json(payload): Json<CoursePayload>,
) -> Result<Json<Course>, ApiError> {
    let id: CourseId = parse_id(&course, "course")?;
    if payload.credits == 0 {
        return Err(ApiError::Validation("credits must be positive".to_string()));
    }

    let course = Course {
        id,
        code: payload.code,
        name: payload.name,
        credits: payload.credits,
        category: payload.category,
        department: payload.department,
    };
    state.storage.save_course(&course).await?;
    Ok(Json(course))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradplan_core::{CourseStatus, PlannedCourse, Term};
    use gradplan_storage::JsonStorage;

    async fn test_state() -> Arc<AppState> {
        let dir = std::env::temp_dir().join(format!("gradplan-api-test-{}", UserId::new()));
        let storage = Arc::new(JsonStorage::new(&dir).await.unwrap());
        AppState::new(storage)
    }

    #[tokio::test]
    async fn test_progress_requires_configuration() {
        let state = test_state().await;
        let result = get_progress(State(state), Path(UserId::new().to_string())).await;
        assert!(matches!(result, Err(ApiError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_progress_rejects_malformed_id() {
        let state = test_state().await;
        let result = get_progress(State(state), Path("not-a-ulid".to_string())).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_default_requirement_is_idempotent() {
        let state = test_state().await;
        let user = UserId::new().to_string();

        let (status, Json(req)) =
            create_default_requirement(State(state.clone()), Path(user.clone()))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(req.total_credits, 120);

        let (status, _) = create_default_requirement(State(state.clone()), Path(user.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::OK);

        // Progress is now available, carrying only zeros.
        let Json(progress) = get_progress(State(state), Path(user)).await.unwrap();
        assert_eq!(progress.total.required, 120);
        assert_eq!(progress.total.earned, 0);
        assert_eq!(progress.total.percentage, 0);
    }

    #[tokio::test]
    async fn test_upsert_rejects_zero_total() {
        let state = test_state().await;
        let update = RequirementUpdate {
            total_credits: Some(0),
            ..Default::default()
        };

        let result = upsert_requirement(
            State(state),
            Path(UserId::new().to_string()),
            Json(update),
        )
        .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_plan_roundtrip_and_duplicate_rejection() {
        let state = test_state().await;
        let user = UserId::new().to_string();
        let course_id = CourseId::new();

        let entry = PlannedCourse {
            course_id,
            status: CourseStatus::Planned,
            grade: None,
            category_override: None,
        };

        let update = PlanUpdate {
            semesters: vec![Semester {
                year: 2026,
                term: Term::Fall,
                courses: vec![entry.clone()],
            }],
        };
        put_plan(State(state.clone()), Path(user.clone()), Json(update))
            .await
            .unwrap();

        let Json(plan) = get_plan(State(state.clone()), Path(user.clone()))
            .await
            .unwrap();
        assert_eq!(plan.semesters.len(), 1);

        // The same course planned twice is rejected.
        let duplicate = PlanUpdate {
            semesters: vec![
                Semester {
                    year: 2026,
                    term: Term::Fall,
                    courses: vec![entry.clone()],
                },
                Semester {
                    year: 2027,
                    term: Term::Spring,
                    courses: vec![entry],
                },
            ],
        };
        let result = put_plan(State(state), Path(user), Json(duplicate)).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_put_course_rejects_zero_credits() {
        let state = test_state().await;
        let payload = CoursePayload {
            code: "CS0000".to_string(),
            name: "Empty".to_string(),
            credits: 0,
            category: None,
            department: None,
        };

        let result = put_course(
            State(state),
            Path(CourseId::new().to_string()),
            Json(payload),
        )
        .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
