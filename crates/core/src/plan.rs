//! Course plan model - ordered semesters of course references.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::course::CourseCategory;
use crate::error::ValidationError;
use crate::id::{CourseId, UserId};
use crate::Time;

/// A user's course plan: an ordered collection of semesters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Owning user
    pub user_id: UserId,

    /// Semesters in chronological order
    pub semesters: Vec<Semester>,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

/// One semester within a plan, keyed by `(year, term)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Semester {
    /// Calendar year
    pub year: i32,

    /// Term within the year
    pub term: Term,

    /// Courses placed in this semester
    pub courses: Vec<PlannedCourse>,
}

/// Academic term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    /// Spring term
    Spring,
    /// Fall term
    Fall,
}

/// A course reference placed in a semester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedCourse {
    /// Catalog course this entry refers to
    pub course_id: CourseId,

    /// Lifecycle status
    pub status: CourseStatus,

    /// Letter grade, once assigned
    pub grade: Option<String>,

    /// Category override for when the curriculum-derived category differs
    /// from the course's default
    pub category_override: Option<CourseCategory>,
}

/// Lifecycle status of a planned course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    /// Placed in a future semester
    Planned,
    /// Currently enrolled
    Enrolled,
    /// Completed and credited
    Completed,
    /// Failed; contributes nothing
    Failed,
}

impl Plan {
    /// Create an empty plan for a user.
    pub fn new(user_id: UserId) -> Self {
        let now = chrono::Utc::now();
        Self {
            user_id,
            semesters: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Iterate over every planned course across all semesters.
    pub fn entries(&self) -> impl Iterator<Item = &PlannedCourse> {
        self.semesters.iter().flat_map(|s| s.courses.iter())
    }

    /// Check the plan-wide invariant: a course may only be planned once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for entry in self.entries() {
            if !seen.insert(entry.course_id) {
                return Err(ValidationError::DuplicateCourse(entry.course_id));
            }
        }
        Ok(())
    }
}
