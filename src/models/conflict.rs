//! Conflict reporting.
//!
//! A rejected placement is described by a [`ConflictReport`]: a transient
//! value listing every committed lesson the draft collides with and why.
//! Reports are never persisted and never raised as errors; they are the
//! expected, recoverable outcome of normal scheduling use.
//!
//! Reasons serialize to stable machine tokens (`TEACHER_DOUBLE_BOOKED`,
//! `ROOM_DOUBLE_BOOKED`, `SLOT_COLLISION`) so the embedding API layer can
//! translate them into localized user-facing messages.

use serde::{Deserialize, Serialize};

use super::LessonId;

/// Why a draft collides with a committed lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictReason {
    /// Same teacher, same weekday, compatible parity, overlapping time.
    TeacherDoubleBooked,
    /// Same room, same weekday, compatible parity, overlapping time.
    RoomDoubleBooked,
    /// Same `(schedule, lesson_number)` slot under compatible parity,
    /// regardless of time overlap.
    SlotCollision,
}

/// A single collision against a committed lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// The committed lesson the draft collides with.
    pub lesson_id: LessonId,
    /// Why they collide.
    pub reason: ConflictReason,
}

impl Conflict {
    /// Creates a teacher double-booking conflict.
    pub fn teacher_double_booked(lesson_id: LessonId) -> Self {
        Self {
            lesson_id,
            reason: ConflictReason::TeacherDoubleBooked,
        }
    }

    /// Creates a room double-booking conflict.
    pub fn room_double_booked(lesson_id: LessonId) -> Self {
        Self {
            lesson_id,
            reason: ConflictReason::RoomDoubleBooked,
        }
    }

    /// Creates a slot collision conflict.
    pub fn slot_collision(lesson_id: LessonId) -> Self {
        Self {
            lesson_id,
            reason: ConflictReason::SlotCollision,
        }
    }
}

/// Outcome of checking a draft against the committed timetable.
///
/// Lists all conflicts found in one pass (teacher bookings first, then
/// room bookings, then slot collisions) so a caller can fix a draft in a
/// single iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Whether the draft may be committed as-is.
    pub accepted: bool,
    /// Every collision found, in check order.
    pub conflicts: Vec<Conflict>,
}

impl ConflictReport {
    /// Builds a report; accepted iff no conflicts were found.
    pub fn from_conflicts(conflicts: Vec<Conflict>) -> Self {
        Self {
            accepted: conflicts.is_empty(),
            conflicts,
        }
    }

    /// Ids of all offending lessons, in report order.
    pub fn offending_lessons(&self) -> Vec<LessonId> {
        self.conflicts.iter().map(|c| c.lesson_id).collect()
    }

    /// Whether any conflict carries the given reason.
    pub fn has_reason(&self, reason: ConflictReason) -> bool {
        self.conflicts.iter().any(|c| c.reason == reason)
    }

    /// Whether a specific lesson appears among the conflicts.
    pub fn involves(&self, lesson_id: LessonId) -> bool {
        self.conflicts.iter().any(|c| c.lesson_id == lesson_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_accepted() {
        let report = ConflictReport::from_conflicts(Vec::new());
        assert!(report.accepted);
        assert!(report.offending_lessons().is_empty());
    }

    #[test]
    fn test_report_with_conflicts() {
        let report = ConflictReport::from_conflicts(vec![
            Conflict::teacher_double_booked(LessonId::new(1)),
            Conflict::slot_collision(LessonId::new(2)),
        ]);
        assert!(!report.accepted);
        assert!(report.has_reason(ConflictReason::TeacherDoubleBooked));
        assert!(report.has_reason(ConflictReason::SlotCollision));
        assert!(!report.has_reason(ConflictReason::RoomDoubleBooked));
        assert!(report.involves(LessonId::new(1)));
        assert!(!report.involves(LessonId::new(3)));
        assert_eq!(
            report.offending_lessons(),
            vec![LessonId::new(1), LessonId::new(2)]
        );
    }

    #[test]
    fn test_reason_tokens_are_stable() {
        let json = serde_json::to_string(&ConflictReason::TeacherDoubleBooked).unwrap();
        assert_eq!(json, "\"TEACHER_DOUBLE_BOOKED\"");
        let json = serde_json::to_string(&ConflictReason::RoomDoubleBooked).unwrap();
        assert_eq!(json, "\"ROOM_DOUBLE_BOOKED\"");
        let json = serde_json::to_string(&ConflictReason::SlotCollision).unwrap();
        assert_eq!(json, "\"SLOT_COLLISION\"");
    }
}
