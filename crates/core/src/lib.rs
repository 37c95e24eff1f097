//! Gradplan core data models.
//!
//! This crate defines the data structures shared by the storage layer, the
//! graduation-progress engine, and the HTTP API: the course catalog, the
//! per-user course plan, the graduation-requirement settings document, and
//! the computed progress report.

#![warn(missing_docs)]

// Core identities
mod id;

// Catalog and plan
mod course;
mod plan;

// Requirement settings and attribution context
mod requirement;
mod user;

// Computed progress report
mod report;

mod error;

// Re-exports
pub use id::*;

// Catalog & Plan
pub use course::{Course, CourseCategory, CategoryBucket};
pub use plan::{Plan, Semester, Term, PlannedCourse, CourseStatus};

// Requirement & User
pub use requirement::{
    GraduationRequirement, MajorPlan, MajorType, EarnedCredits, RequirementUpdate,
};
pub use user::User;

// Progress report
pub use report::{
    GraduationProgress, TrackProgress, MajorTrackProgress, RequiredMinProgress,
    FloorProgress, CourseSummary, CourseLists,
};

pub use error::ValidationError;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
