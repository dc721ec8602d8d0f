//! Structural error types.
//!
//! These cover malformed input and unknown identifiers only. A rejected
//! placement is NOT an error: collisions are an expected outcome of normal
//! scheduling use and travel as an ordinary
//! [`ConflictReport`](crate::models::ConflictReport) value.

use thiserror::Error;

use crate::models::{ConflictReport, LessonId, ScheduleId};
use crate::validation::SnapshotError;

/// Structural failure of a single engine call.
///
/// Aborts the call with no partial mutation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A time range with `start >= end`; rejected at construction.
    #[error("invalid time range: start {start_min} >= end {end_min}")]
    InvalidRange { start_min: i64, end_min: i64 },

    /// A draft references a schedule the registry has not seen.
    #[error("unknown schedule: {0}")]
    UnknownSchedule(ScheduleId),

    /// A bulk-load seed collides with an already registered schedule.
    #[error("duplicate schedule: {0}")]
    DuplicateSchedule(ScheduleId),

    /// The target of a move is not committed.
    #[error("unknown lesson: {0}")]
    UnknownLesson(LessonId),
}

/// Failure of `commit` or `move_lesson`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommitError {
    /// Structural failure; see [`EngineError`].
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The draft collides with committed lessons. Nothing was mutated;
    /// the caller must change room, teacher, time, or parity and resubmit.
    #[error("placement rejected with {} conflict(s)", .0.conflicts.len())]
    Rejected(ConflictReport),
}

/// Failure of the bulk `load_committed` startup path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    /// The snapshot failed integrity validation; nothing was loaded.
    /// Carries every problem found, not just the first.
    #[error("snapshot rejected with {} integrity error(s)", .0.len())]
    Invalid(Vec<SnapshotError>),

    /// A lesson could not be placed into the rebuilt state.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl CommitError {
    /// The conflict report of a rejected placement, if that is what failed.
    pub fn rejection(&self) -> Option<&ConflictReport> {
        match self {
            CommitError::Rejected(report) => Some(report),
            CommitError::Engine(_) => None,
        }
    }
}
