//! Domain validation errors.

use crate::id::CourseId;

/// Errors raised when a document violates a domain invariant.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A course appears in more than one place across the plan.
    #[error("course {0} is already planned in another semester")]
    DuplicateCourse(CourseId),

    /// The graduation target must be at least one credit.
    #[error("total_credits must be at least 1")]
    ZeroTotalCredits,
}
