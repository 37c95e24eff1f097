//! Graduation progress computation.
//!
//! Track attribution, credit accumulation, and the requirement lifecycle.

#![warn(missing_docs)]

pub mod tracks;
pub mod engine;
pub mod requirements;

pub use tracks::{Track, route_track, pct, TrackTotals, ProgressTotals, ResolvedEntry};
pub use engine::{ProgressEngine, StoredProgressEngine, ProgressError};
pub use requirements::{
    RequirementManager, StoredRequirementManager, RequirementError, BaselineOutcome,
};
