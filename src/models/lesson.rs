//! Lesson models: drafts, committed lessons, and their identifiers.
//!
//! A lesson occupies one slot (`lesson_number`) of one class's weekday
//! schedule, in a room, taught by a teacher. Room, teacher, and subject
//! are weak string references owned by the surrounding entity layer; the
//! engine trusts them and never re-validates referential integrity.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{TimeRange, WeekParity};

/// Identifier of a committed lesson, assigned by the engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LessonId(u64);

impl LessonId {
    /// Creates an id from its raw value (used when reloading from storage).
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lesson#{}", self.0)
    }
}

/// Identifier of a schedule (one class's one weekday), assigned by the
/// registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ScheduleId(u64);

impl ScheduleId {
    /// Creates an id from its raw value (used when reloading from storage).
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schedule#{}", self.0)
    }
}

/// An uncommitted lesson placement.
///
/// Built by the caller, checked by the engine's `propose`, and turned into
/// a [`Lesson`] by `commit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonDraft {
    /// Target schedule (class + weekday).
    pub schedule_id: ScheduleId,
    /// Slot ordinal within the day (0-based).
    pub lesson_number: u32,
    /// Occupied time of day.
    pub time: TimeRange,
    /// Week applicability.
    pub parity: WeekParity,
    /// Room reference (weak).
    pub room_id: String,
    /// Teacher reference (weak).
    pub teacher_id: String,
    /// Subject reference (weak).
    pub subject_id: String,
}

impl LessonDraft {
    /// Creates a draft for a slot; room, teacher, and subject are set via
    /// the `with_*` builders.
    pub fn new(
        schedule_id: ScheduleId,
        lesson_number: u32,
        time: TimeRange,
        parity: WeekParity,
    ) -> Self {
        Self {
            schedule_id,
            lesson_number,
            time,
            parity,
            room_id: String::new(),
            teacher_id: String::new(),
            subject_id: String::new(),
        }
    }

    /// Sets the room.
    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = room_id.into();
        self
    }

    /// Sets the teacher.
    pub fn with_teacher(mut self, teacher_id: impl Into<String>) -> Self {
        self.teacher_id = teacher_id.into();
        self
    }

    /// Sets the subject.
    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = subject_id.into();
        self
    }
}

/// A committed lesson, exclusively owned by its schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// Engine-assigned identity.
    pub id: LessonId,
    /// Owning schedule (class + weekday).
    pub schedule_id: ScheduleId,
    /// Slot ordinal within the day (0-based).
    pub lesson_number: u32,
    /// Occupied time of day.
    pub time: TimeRange,
    /// Week applicability.
    pub parity: WeekParity,
    /// Room reference (weak).
    pub room_id: String,
    /// Teacher reference (weak).
    pub teacher_id: String,
    /// Subject reference (weak).
    pub subject_id: String,
}

impl Lesson {
    /// Commits a draft under the given id.
    pub fn from_draft(id: LessonId, draft: LessonDraft) -> Self {
        Self {
            id,
            schedule_id: draft.schedule_id,
            lesson_number: draft.lesson_number,
            time: draft.time,
            parity: draft.parity,
            room_id: draft.room_id,
            teacher_id: draft.teacher_id,
            subject_id: draft.subject_id,
        }
    }

    /// The draft equivalent of this lesson (for re-proposing a placement).
    pub fn to_draft(&self) -> LessonDraft {
        LessonDraft {
            schedule_id: self.schedule_id,
            lesson_number: self.lesson_number,
            time: self.time,
            parity: self.parity,
            room_id: self.room_id.clone(),
            teacher_id: self.teacher_id.clone(),
            subject_id: self.subject_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_builder() {
        let time = TimeRange::from_hm(8, 0, 8, 45).unwrap();
        let draft = LessonDraft::new(ScheduleId::new(1), 0, time, WeekParity::Both)
            .with_room("R1")
            .with_teacher("T1")
            .with_subject("MATH");

        assert_eq!(draft.schedule_id, ScheduleId::new(1));
        assert_eq!(draft.lesson_number, 0);
        assert_eq!(draft.parity, WeekParity::Both);
        assert_eq!(draft.room_id, "R1");
        assert_eq!(draft.teacher_id, "T1");
        assert_eq!(draft.subject_id, "MATH");
    }

    #[test]
    fn test_draft_roundtrip_through_lesson() {
        let time = TimeRange::from_hm(9, 0, 10, 0).unwrap();
        let draft = LessonDraft::new(ScheduleId::new(7), 2, time, WeekParity::Odd)
            .with_room("R2")
            .with_teacher("T9")
            .with_subject("PHYS");

        let lesson = Lesson::from_draft(LessonId::new(42), draft.clone());
        assert_eq!(lesson.id, LessonId::new(42));
        assert_eq!(lesson.to_draft(), draft);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(LessonId::new(3).to_string(), "lesson#3");
        assert_eq!(ScheduleId::new(12).to_string(), "schedule#12");
    }
}
