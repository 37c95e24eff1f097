//! Computed graduation-progress report shapes.

use serde::{Deserialize, Serialize};

use crate::id::CourseId;

/// Progress over one credit track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackProgress {
    /// Target credits for this track
    pub required: u32,

    /// Completed credits, prior-earned offset included
    pub earned: u32,

    /// Currently enrolled credits
    pub enrolled: u32,

    /// Planned credits
    pub planned: u32,

    /// `earned` over `required`, capped at 100
    pub percentage: u32,
}

/// Progress over a core sub-minimum within a major-type track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredMinProgress {
    /// Core sub-minimum target
    pub required: u32,

    /// Completed core credits, prior-earned offset included
    pub earned: u32,

    /// Planned core credits
    pub planned: u32,

    /// `earned` over `required`, capped at 100
    pub percentage: u32,
}

/// Progress over a major-type track, including its core sub-minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorTrackProgress {
    /// Target credits for this track
    pub required: u32,

    /// Completed credits, prior-earned offset included
    pub earned: u32,

    /// Currently enrolled credits
    pub enrolled: u32,

    /// Planned credits
    pub planned: u32,

    /// `earned` over `required`, capped at 100
    pub percentage: u32,

    /// Core sub-minimum within this track
    pub required_min: RequiredMinProgress,
}

/// A credit floor checked against another track's earned total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorProgress {
    /// Floor value
    pub required: u32,

    /// Earned credits measured against the floor
    pub earned: u32,

    /// `earned` over `required`, capped at 100
    pub percentage: u32,
}

/// Public course summary; the category used for routing is not exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    /// Catalog id
    pub id: CourseId,

    /// Course code
    pub code: String,

    /// Display name
    pub name: String,

    /// Credit value
    pub credits: u32,
}

/// Non-failed plan courses grouped by status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseLists {
    /// Completed courses
    pub completed: Vec<CourseSummary>,

    /// Currently enrolled courses
    pub enrolled: Vec<CourseSummary>,

    /// Planned courses
    pub planned: Vec<CourseSummary>,
}

/// The full graduation-progress report.
///
/// `secondary_major` is present only under a double major; `minor` and
/// `minor_primary_major_min` only under a minor plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraduationProgress {
    /// Grand total across every bucket, free electives included
    pub total: TrackProgress,

    /// Primary major track
    pub primary_major: MajorTrackProgress,

    /// General-education track
    pub general: TrackProgress,

    /// Secondary major track, double majors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_major: Option<MajorTrackProgress>,

    /// Minor track, minor plans only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor: Option<MajorTrackProgress>,

    /// Primary-major floor while pursuing a minor, when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor_primary_major_min: Option<FloorProgress>,

    /// Plan courses grouped by status
    pub courses: CourseLists,
}
