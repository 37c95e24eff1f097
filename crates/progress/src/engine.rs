//! Graduation progress engine.
//!
//! A pure read-then-compute service: it loads the user's requirement, plan,
//! and the referenced catalog courses, folds the plan into per-track credit
//! sums, and assembles the progress report. It performs no writes and keeps
//! no cache; every call recomputes from current documents.

use std::sync::Arc;

use async_trait::async_trait;
use gradplan_core::{
    FloorProgress, GraduationProgress, GraduationRequirement, MajorPlan, MajorTrackProgress,
    Plan, RequiredMinProgress, TrackProgress, UserId,
};
use gradplan_storage::{Storage, StorageError};
use tracing::debug;

use crate::tracks::{pct, ProgressTotals, ResolvedEntry, TrackTotals};

/// Errors that can occur while computing progress.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// Underlying document load failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Graduation progress computation service.
#[async_trait]
pub trait ProgressEngine: Send + Sync {
    /// Compute a user's graduation progress.
    ///
    /// Returns `None` when the user has no requirement document ("not
    /// configured"). A missing plan is not an error: the report then carries
    /// only the prior-earned offsets.
    async fn graduation_progress(
        &self,
        user_id: UserId,
    ) -> Result<Option<GraduationProgress>, ProgressError>;
}

/// Progress engine backed by a [`Storage`].
pub struct StoredProgressEngine<S: Storage> {
    storage: Arc<S>,
}

impl<S: Storage> StoredProgressEngine<S> {
    /// Create a new engine over the given store.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Resolve plan entries against the catalog, dropping dangling
    /// references.
    async fn resolve_entries(&self, plan: &Plan) -> Result<Vec<ResolvedEntry>, ProgressError> {
        let mut entries = Vec::new();
        for planned in plan.entries() {
            match self.storage.load_course(planned.course_id).await? {
                Some(course) => entries.push(ResolvedEntry::new(&course, planned)),
                None => {
                    debug!("skipping dangling course reference {}", planned.course_id);
                }
            }
        }
        Ok(entries)
    }
}

#[async_trait]
impl<S: Storage + 'static> ProgressEngine for StoredProgressEngine<S> {
    async fn graduation_progress(
        &self,
        user_id: UserId,
    ) -> Result<Option<GraduationProgress>, ProgressError> {
        let Some(requirement) = self.storage.load_requirement(user_id).await? else {
            return Ok(None);
        };

        let secondary_department = self
            .storage
            .load_user(user_id)
            .await?
            .and_then(|u| u.secondary_department);

        let totals = match self.storage.load_plan(user_id).await? {
            Some(plan) => {
                let entries = self.resolve_entries(&plan).await?;
                ProgressTotals::fold(requirement.major_type(), secondary_department, entries)
            }
            None => ProgressTotals::default(),
        };

        Ok(Some(build_report(&requirement, totals)))
    }
}

fn track_progress(required: u32, totals: TrackTotals, offset: u32) -> TrackProgress {
    let earned = totals.earned + offset;
    TrackProgress {
        required,
        earned,
        enrolled: totals.enrolled,
        planned: totals.planned,
        percentage: pct(earned, required),
    }
}

fn required_min_progress(required: u32, totals: TrackTotals, offset: u32) -> RequiredMinProgress {
    let earned = totals.earned + offset;
    RequiredMinProgress {
        required,
        earned,
        planned: totals.planned,
        percentage: pct(earned, required),
    }
}

fn major_track_progress(
    required: u32,
    totals: TrackTotals,
    offset: u32,
    min_required: u32,
    min_totals: TrackTotals,
    min_offset: u32,
) -> MajorTrackProgress {
    let earned = totals.earned + offset;
    MajorTrackProgress {
        required,
        earned,
        enrolled: totals.enrolled,
        planned: totals.planned,
        percentage: pct(earned, required),
        required_min: required_min_progress(min_required, min_totals, min_offset),
    }
}

/// Assemble the report from the requirement targets, the accumulated sums,
/// and the prior-earned offsets.
fn build_report(requirement: &GraduationRequirement, totals: ProgressTotals) -> GraduationProgress {
    let primary_major = major_track_progress(
        requirement.primary_major_credits,
        totals.primary_major,
        requirement.earned.primary_major,
        requirement.primary_major_required_min,
        totals.primary_required_min,
        requirement.earned.primary_major_required,
    );

    let (secondary_major, minor, minor_primary_major_min) = match requirement.major {
        MajorPlan::Single => (None, None, None),
        MajorPlan::Double {
            secondary_major_credits,
            secondary_major_required_min,
            earned_secondary_major_credits,
            earned_secondary_major_required_credits,
        } => (
            Some(major_track_progress(
                secondary_major_credits,
                totals.secondary_major,
                earned_secondary_major_credits,
                secondary_major_required_min,
                totals.secondary_required_min,
                earned_secondary_major_required_credits,
            )),
            None,
            None,
        ),
        MajorPlan::Minor {
            minor_credits,
            minor_required_min,
            minor_primary_major_min,
            earned_minor_credits,
            earned_minor_required_credits,
        } => {
            // The floor is measured against the primary major's earned
            // total, not the minor's own.
            let floor = minor_primary_major_min.map(|required| FloorProgress {
                required,
                earned: primary_major.earned,
                percentage: pct(primary_major.earned, required),
            });
            (
                None,
                Some(major_track_progress(
                    minor_credits,
                    totals.minor,
                    earned_minor_credits,
                    minor_required_min,
                    totals.minor_required_min,
                    earned_minor_required_credits,
                )),
                floor,
            )
        }
    };

    GraduationProgress {
        total: track_progress(
            requirement.total_credits,
            totals.total,
            requirement.earned.total,
        ),
        primary_major,
        general: track_progress(
            requirement.general_credits,
            totals.general,
            requirement.earned.general,
        ),
        secondary_major,
        minor,
        minor_primary_major_min,
        courses: totals.courses,
    }
}
