//! User attribution context.

use serde::{Deserialize, Serialize};

use crate::id::{DepartmentId, UserId};
use crate::requirement::MajorType;

/// The slice of a user profile the progress engine needs for attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Primary department
    pub department: DepartmentId,

    /// Secondary department, when pursuing a double major or minor
    pub secondary_department: Option<DepartmentId>,

    /// Declared major type; expected to agree with the requirement document
    pub major_type: MajorType,
}
