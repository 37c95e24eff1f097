//! Course catalog model - read-only reference data for attribution.

use serde::{Deserialize, Serialize};
use crate::id::{CourseId, DepartmentId};

/// A course in the catalog.
///
/// Catalog entries supply the credit value and curriculum category that the
/// progress engine needs when attributing a planned course to a credit track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier
    pub id: CourseId,

    /// Course code (e.g. "CS2040")
    pub code: String,

    /// Display name
    pub name: String,

    /// Credit value, positive
    pub credits: u32,

    /// Curriculum category; `None` is treated as free elective at
    /// attribution time
    pub category: Option<CourseCategory>,

    /// Owning department, used to split primary- vs secondary-department
    /// courses under a double major or minor
    pub department: Option<DepartmentId>,
}

/// Curriculum category of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseCategory {
    /// Core major course, counts toward the major's required minimum
    MajorRequired,
    /// Compulsory major course
    MajorCompulsory,
    /// Major elective
    MajorElective,
    /// Required general-education course
    GeneralRequired,
    /// General-education elective
    GeneralElective,
    /// Free elective
    FreeElective,
    /// Teaching-track course
    Teaching,
}

/// Coarse bucket a category falls into for credit attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryBucket {
    /// General-education credits
    General,
    /// Major credits, routed further by major type and department
    Major,
    /// Counts toward the grand total only
    Free,
}

impl CourseCategory {
    /// Classify this category into its attribution bucket.
    pub fn bucket(self) -> CategoryBucket {
        match self {
            CourseCategory::GeneralRequired | CourseCategory::GeneralElective => {
                CategoryBucket::General
            }
            CourseCategory::MajorRequired
            | CourseCategory::MajorCompulsory
            | CourseCategory::MajorElective => CategoryBucket::Major,
            CourseCategory::FreeElective | CourseCategory::Teaching => CategoryBucket::Free,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_buckets() {
        assert_eq!(CourseCategory::GeneralRequired.bucket(), CategoryBucket::General);
        assert_eq!(CourseCategory::GeneralElective.bucket(), CategoryBucket::General);
        assert_eq!(CourseCategory::MajorRequired.bucket(), CategoryBucket::Major);
        assert_eq!(CourseCategory::MajorCompulsory.bucket(), CategoryBucket::Major);
        assert_eq!(CourseCategory::MajorElective.bucket(), CategoryBucket::Major);
        assert_eq!(CourseCategory::FreeElective.bucket(), CategoryBucket::Free);
        assert_eq!(CourseCategory::Teaching.bucket(), CategoryBucket::Free);
    }

    #[test]
    fn test_category_wire_names() {
        let json = serde_json::to_string(&CourseCategory::MajorRequired).unwrap();
        assert_eq!(json, "\"major_required\"");
        let parsed: CourseCategory = serde_json::from_str("\"general_elective\"").unwrap();
        assert_eq!(parsed, CourseCategory::GeneralElective);
    }
}
