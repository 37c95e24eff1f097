//! Track attribution: the pure decision and accumulation logic behind the
//! progress engine.

use gradplan_core::{
    CategoryBucket, Course, CourseCategory, CourseLists, CourseStatus, CourseSummary,
    DepartmentId, MajorType, PlannedCourse,
};

/// The credit track a plan entry contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    /// General-education track
    General,
    /// Primary major track
    PrimaryMajor,
    /// Secondary major track (double majors)
    SecondaryMajor,
    /// Minor track (minor plans)
    Minor,
    /// Grand total only, no track of its own
    Free,
}

/// Route an effective category to its credit track.
///
/// Major-bucket courses split on the owning department: under a double major
/// or minor, courses owned by the secondary department go to the secondary
/// track; everything else, including courses with no department, stays on
/// the primary major.
pub fn route_track(
    category: CourseCategory,
    major_type: MajorType,
    course_department: Option<DepartmentId>,
    secondary_department: Option<DepartmentId>,
) -> Track {
    match category.bucket() {
        CategoryBucket::General => Track::General,
        CategoryBucket::Free => Track::Free,
        CategoryBucket::Major => match (major_type, secondary_department) {
            (MajorType::Single, _) | (_, None) => Track::PrimaryMajor,
            (MajorType::Double, Some(sec)) if course_department == Some(sec) => {
                Track::SecondaryMajor
            }
            (MajorType::Minor, Some(sec)) if course_department == Some(sec) => Track::Minor,
            _ => Track::PrimaryMajor,
        },
    }
}

/// Percentage of `earned` against `required`, rounded and capped at 100.
///
/// A zero target yields 0 rather than dividing by zero; over-completion is
/// kept in the raw sums but never displayed above 100.
pub fn pct(earned: u32, required: u32) -> u32 {
    if required == 0 {
        return 0;
    }
    let raw = (earned as f64 / required as f64 * 100.0).round();
    raw.min(100.0) as u32
}

/// Credit sums per status for one track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackTotals {
    /// Completed credits
    pub earned: u32,
    /// Currently enrolled credits
    pub enrolled: u32,
    /// Planned credits
    pub planned: u32,
}

impl TrackTotals {
    fn add(mut self, status: CourseStatus, credits: u32) -> Self {
        match status {
            CourseStatus::Completed => self.earned += credits,
            CourseStatus::Enrolled => self.enrolled += credits,
            CourseStatus::Planned => self.planned += credits,
            CourseStatus::Failed => {}
        }
        self
    }
}

/// A plan entry resolved against the catalog, ready for accumulation.
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    /// Public summary of the course
    pub summary: CourseSummary,

    /// Owning department, for major-track routing
    pub department: Option<DepartmentId>,

    /// Lifecycle status
    pub status: CourseStatus,

    /// Effective category: entry override, else the course's own, else
    /// free elective
    pub category: CourseCategory,
}

impl ResolvedEntry {
    /// Resolve a plan entry against its catalog course.
    pub fn new(course: &Course, planned: &PlannedCourse) -> Self {
        Self {
            summary: CourseSummary {
                id: course.id,
                code: course.code.clone(),
                name: course.name.clone(),
                credits: course.credits,
            },
            department: course.department,
            status: planned.status,
            category: planned
                .category_override
                .or(course.category)
                .unwrap_or(CourseCategory::FreeElective),
        }
    }
}

/// Accumulated credit sums across a whole plan.
///
/// Produced by a fold over resolved entries; each entry contributes to the
/// grand total and at most one track, with core `major_required` entries
/// additionally feeding that track's sub-minimum.
#[derive(Debug, Clone, Default)]
pub struct ProgressTotals {
    /// Every non-failed entry, free bucket included
    pub total: TrackTotals,
    /// General-education track
    pub general: TrackTotals,
    /// Primary major track
    pub primary_major: TrackTotals,
    /// Secondary major track
    pub secondary_major: TrackTotals,
    /// Minor track
    pub minor: TrackTotals,
    /// Core sub-minimum within the primary major
    pub primary_required_min: TrackTotals,
    /// Core sub-minimum within the secondary major
    pub secondary_required_min: TrackTotals,
    /// Core sub-minimum within the minor
    pub minor_required_min: TrackTotals,
    /// Non-failed courses grouped by status
    pub courses: CourseLists,
}

impl ProgressTotals {
    /// Fold resolved entries into accumulated totals.
    pub fn fold(
        major_type: MajorType,
        secondary_department: Option<DepartmentId>,
        entries: impl IntoIterator<Item = ResolvedEntry>,
    ) -> Self {
        entries
            .into_iter()
            .fold(Self::default(), |acc, entry| {
                acc.absorb(major_type, secondary_department, entry)
            })
    }

    fn absorb(
        mut self,
        major_type: MajorType,
        secondary_department: Option<DepartmentId>,
        entry: ResolvedEntry,
    ) -> Self {
        // Failed courses contribute nothing, not even to the course lists.
        if entry.status == CourseStatus::Failed {
            return self;
        }

        let credits = entry.summary.credits;
        self.total = self.total.add(entry.status, credits);

        let is_core = entry.category == CourseCategory::MajorRequired;
        match route_track(entry.category, major_type, entry.department, secondary_department) {
            Track::General => {
                self.general = self.general.add(entry.status, credits);
            }
            Track::PrimaryMajor => {
                self.primary_major = self.primary_major.add(entry.status, credits);
                if is_core {
                    self.primary_required_min = self.primary_required_min.add(entry.status, credits);
                }
            }
            Track::SecondaryMajor => {
                self.secondary_major = self.secondary_major.add(entry.status, credits);
                if is_core {
                    self.secondary_required_min =
                        self.secondary_required_min.add(entry.status, credits);
                }
            }
            Track::Minor => {
                self.minor = self.minor.add(entry.status, credits);
                if is_core {
                    self.minor_required_min = self.minor_required_min.add(entry.status, credits);
                }
            }
            Track::Free => {}
        }

        match entry.status {
            CourseStatus::Completed => self.courses.completed.push(entry.summary),
            CourseStatus::Enrolled => self.courses.enrolled.push(entry.summary),
            CourseStatus::Planned => self.courses.planned.push(entry.summary),
            CourseStatus::Failed => unreachable!("failed entries are skipped above"),
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradplan_core::CourseId;

    fn entry(
        credits: u32,
        category: CourseCategory,
        department: Option<DepartmentId>,
        status: CourseStatus,
    ) -> ResolvedEntry {
        ResolvedEntry {
            summary: CourseSummary {
                id: CourseId::new(),
                code: "T100".to_string(),
                name: "Test".to_string(),
                credits,
            },
            department,
            status,
            category,
        }
    }

    #[test]
    fn test_pct_caps_at_100() {
        assert_eq!(pct(45, 42), 100);
        assert_eq!(pct(42, 42), 100);
        assert_eq!(pct(1000, 1), 100);
    }

    #[test]
    fn test_pct_zero_target_is_zero() {
        assert_eq!(pct(0, 0), 0);
        assert_eq!(pct(99, 0), 0);
    }

    #[test]
    fn test_pct_rounds_half_away_from_zero() {
        assert_eq!(pct(3, 24), 13); // 12.5
        assert_eq!(pct(3, 130), 2); // 2.3
        assert_eq!(pct(3, 60), 5);
    }

    #[test]
    fn test_route_single_major_ignores_department() {
        let secondary = DepartmentId::new();
        // Even a course owned by the secondary department routes primary
        // under a single major.
        assert_eq!(
            route_track(
                CourseCategory::MajorElective,
                MajorType::Single,
                Some(secondary),
                Some(secondary),
            ),
            Track::PrimaryMajor
        );
    }

    #[test]
    fn test_route_without_secondary_department() {
        assert_eq!(
            route_track(
                CourseCategory::MajorRequired,
                MajorType::Double,
                Some(DepartmentId::new()),
                None,
            ),
            Track::PrimaryMajor
        );
    }

    #[test]
    fn test_route_double_major_by_department() {
        let primary = DepartmentId::new();
        let secondary = DepartmentId::new();

        assert_eq!(
            route_track(
                CourseCategory::MajorCompulsory,
                MajorType::Double,
                Some(secondary),
                Some(secondary),
            ),
            Track::SecondaryMajor
        );
        assert_eq!(
            route_track(
                CourseCategory::MajorCompulsory,
                MajorType::Double,
                Some(primary),
                Some(secondary),
            ),
            Track::PrimaryMajor
        );
        // Unknown department falls back to the primary major.
        assert_eq!(
            route_track(
                CourseCategory::MajorCompulsory,
                MajorType::Double,
                None,
                Some(secondary),
            ),
            Track::PrimaryMajor
        );
    }

    #[test]
    fn test_route_minor_by_department() {
        let secondary = DepartmentId::new();
        assert_eq!(
            route_track(
                CourseCategory::MajorElective,
                MajorType::Minor,
                Some(secondary),
                Some(secondary),
            ),
            Track::Minor
        );
    }

    #[test]
    fn test_route_general_and_free_ignore_major_type() {
        for major_type in [MajorType::Single, MajorType::Double, MajorType::Minor] {
            assert_eq!(
                route_track(CourseCategory::GeneralRequired, major_type, None, None),
                Track::General
            );
            assert_eq!(
                route_track(CourseCategory::Teaching, major_type, None, None),
                Track::Free
            );
            assert_eq!(
                route_track(CourseCategory::FreeElective, major_type, None, None),
                Track::Free
            );
        }
    }

    #[test]
    fn test_fold_failed_entries_vanish() {
        let totals = ProgressTotals::fold(
            MajorType::Single,
            None,
            vec![entry(3, CourseCategory::MajorRequired, None, CourseStatus::Failed)],
        );

        assert_eq!(totals.total, TrackTotals::default());
        assert_eq!(totals.primary_major, TrackTotals::default());
        assert!(totals.courses.completed.is_empty());
        assert!(totals.courses.enrolled.is_empty());
        assert!(totals.courses.planned.is_empty());
    }

    #[test]
    fn test_fold_free_bucket_counts_toward_total_only() {
        let totals = ProgressTotals::fold(
            MajorType::Single,
            None,
            vec![
                entry(2, CourseCategory::FreeElective, None, CourseStatus::Completed),
                entry(1, CourseCategory::Teaching, None, CourseStatus::Completed),
                entry(3, CourseCategory::MajorRequired, None, CourseStatus::Completed),
            ],
        );

        assert_eq!(totals.total.earned, 6);
        assert_eq!(totals.primary_major.earned, 3);
        assert_eq!(totals.general.earned, 0);
        // Free-bucket courses still appear in the completed list.
        assert_eq!(totals.courses.completed.len(), 3);
    }

    #[test]
    fn test_fold_required_min_takes_only_major_required() {
        let totals = ProgressTotals::fold(
            MajorType::Single,
            None,
            vec![
                entry(3, CourseCategory::MajorRequired, None, CourseStatus::Completed),
                entry(4, CourseCategory::MajorCompulsory, None, CourseStatus::Completed),
                entry(2, CourseCategory::MajorElective, None, CourseStatus::Planned),
            ],
        );

        assert_eq!(totals.primary_major.earned, 7);
        assert_eq!(totals.primary_major.planned, 2);
        assert_eq!(totals.primary_required_min.earned, 3);
        assert_eq!(totals.primary_required_min.planned, 0);
    }

    #[test]
    fn test_fold_statuses_land_in_their_columns() {
        let totals = ProgressTotals::fold(
            MajorType::Single,
            None,
            vec![
                entry(3, CourseCategory::GeneralRequired, None, CourseStatus::Completed),
                entry(4, CourseCategory::GeneralElective, None, CourseStatus::Enrolled),
                entry(2, CourseCategory::GeneralElective, None, CourseStatus::Planned),
            ],
        );

        assert_eq!(totals.general, TrackTotals { earned: 3, enrolled: 4, planned: 2 });
        assert_eq!(totals.courses.completed.len(), 1);
        assert_eq!(totals.courses.enrolled.len(), 1);
        assert_eq!(totals.courses.planned.len(), 1);
    }
}
