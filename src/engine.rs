//! Timetable consistency engine.
//!
//! The public surface of the crate: propose / commit / remove / move over
//! lessons, backed by the [`ConflictIndex`] for candidate lookup and the
//! [`ScheduleRegistry`] for `(class, weekday)` resolution.
//!
//! # Consistency guarantee
//!
//! For any two committed lessons sharing a teacher or a room, on the same
//! weekday with compatible week parity, their time ranges do not overlap;
//! and no two committed lessons occupy the same `(schedule, lesson
//! number)` slot under compatible parity. Every mutation either preserves
//! this invariant or is rejected whole.
//!
//! # Lesson lifecycle
//!
//! Proposed → Committed → Removed. A draft is Proposed while it is only
//! being checked; `commit` makes it Committed (indexed and visible to
//! future checks); `remove` purges it from the index and its schedule.
//!
//! # Concurrency
//!
//! Entirely in-memory and synchronous; no suspension points. `propose`
//! takes `&self` and may run concurrently; mutations take `&mut self`, so
//! in-process the borrow checker enforces the single-writer discipline.
//! Check-then-act is never split across the API: `commit` runs its own
//! propose internally. Across threads, wrap each school's engine in its
//! own lock; there is no cross-school state.
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling"

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{CommitError, EngineError, LoadError};
use crate::index::ConflictIndex;
use crate::models::{
    Conflict, ConflictReport, Lesson, LessonDraft, LessonId, ScheduleId, Weekday,
};
use crate::registry::{ScheduleRecord, ScheduleRegistry};
use crate::validation::validate_snapshot;

/// Consistency engine for one school's timetable.
///
/// Owns the committed lesson store, the conflict index, and the schedule
/// registry. One instance per school.
#[derive(Debug, Clone, Default)]
pub struct TimetableEngine {
    lessons: HashMap<LessonId, Lesson>,
    index: ConflictIndex,
    registry: ScheduleRegistry,
    next_lesson_id: u64,
}

impl TimetableEngine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the schedule registry.
    pub fn registry(&self) -> &ScheduleRegistry {
        &self.registry
    }

    /// Returns the schedule for `(class_id, weekday)`, creating it if
    /// absent.
    pub fn get_or_create_schedule(
        &mut self,
        class_id: impl Into<String>,
        weekday: Weekday,
    ) -> ScheduleId {
        self.registry.get_or_create(class_id, weekday)
    }

    /// Checks a draft against the committed timetable without mutating
    /// anything.
    ///
    /// Resolves the draft's weekday through its schedule
    /// (`UnknownSchedule` aborts the call), then reports every teacher
    /// double-booking, room double-booking, and slot collision in one
    /// pass.
    pub fn propose(&self, draft: &LessonDraft) -> Result<ConflictReport, EngineError> {
        self.check(draft, None)
    }

    /// Validates and inserts a draft in one atomic step.
    ///
    /// On acceptance assigns a fresh id, indexes the lesson, and attaches
    /// it to its schedule. On rejection nothing is mutated and the report
    /// comes back as the error value; resubmitting the identical draft
    /// will fail again.
    pub fn commit(&mut self, draft: LessonDraft) -> Result<LessonId, CommitError> {
        let report = self.check(&draft, None)?;
        if !report.accepted {
            return Err(CommitError::Rejected(report));
        }
        let id = LessonId::new(self.next_lesson_id);
        self.next_lesson_id += 1;
        self.place(Lesson::from_draft(id, draft))?;
        debug!(lesson = %id, "lesson committed");
        Ok(id)
    }

    /// Removes a committed lesson, then deletes its schedule if that left
    /// it empty.
    ///
    /// Idempotent: removing an unknown id is a no-op, not an error (a
    /// concurrent remove may simply have won). Returns whether a lesson
    /// was actually removed.
    pub fn remove(&mut self, lesson_id: LessonId) -> bool {
        let Some(lesson) = self.lessons.remove(&lesson_id) else {
            return false;
        };
        self.index.remove(lesson_id);
        self.registry.detach(lesson.schedule_id, lesson_id);
        self.registry.remove_if_empty(lesson.schedule_id);
        debug!(lesson = %lesson_id, "lesson removed");
        true
    }

    /// Moves a committed lesson to a new placement as a single atomic
    /// step, reusing its id.
    ///
    /// The moved lesson is excluded from its own candidate set, so a
    /// lesson never conflicts with itself. The check runs before any
    /// mutation: a rejected placement leaves the original untouched.
    /// Unlike `remove`, moving an unknown id is a caller logic error and
    /// fails with `UnknownLesson`.
    pub fn move_lesson(
        &mut self,
        lesson_id: LessonId,
        draft: LessonDraft,
    ) -> Result<(), CommitError> {
        if !self.lessons.contains_key(&lesson_id) {
            return Err(EngineError::UnknownLesson(lesson_id).into());
        }
        let report = self.check(&draft, Some(lesson_id))?;
        if !report.accepted {
            return Err(CommitError::Rejected(report));
        }

        let old_schedule = match self.lessons.remove(&lesson_id) {
            Some(old) => {
                self.index.remove(lesson_id);
                self.registry.detach(old.schedule_id, lesson_id);
                old.schedule_id
            }
            None => return Err(EngineError::UnknownLesson(lesson_id).into()),
        };
        self.place(Lesson::from_draft(lesson_id, draft))?;
        // Deferred until after the reinsert: a move within one schedule
        // must not see its own schedule momentarily empty and delete it.
        self.registry.remove_if_empty(old_schedule);
        info!(lesson = %lesson_id, "lesson moved");
        Ok(())
    }

    /// Rebuilds engine state from durable storage.
    ///
    /// The only bulk entry point: schedule seeds restore the registry,
    /// lessons restore the store and the index. The snapshot is validated
    /// first and nothing is loaded on failure; existing state is replaced
    /// only on success.
    pub fn load_committed(
        &mut self,
        schedules: Vec<ScheduleRecord>,
        lessons: Vec<Lesson>,
    ) -> Result<(), LoadError> {
        validate_snapshot(&schedules, &lessons).map_err(LoadError::Invalid)?;

        let mut fresh = TimetableEngine::new();
        for record in schedules {
            fresh.registry.register(record).map_err(LoadError::Engine)?;
        }
        for lesson in lessons {
            fresh.next_lesson_id = fresh.next_lesson_id.max(lesson.id.as_u64() + 1);
            fresh.place(lesson)?;
        }
        let count = fresh.lessons.len();
        *self = fresh;
        info!(lessons = count, "timetable loaded from snapshot");
        Ok(())
    }

    /// The committed lesson with this id, if any.
    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons.get(&id)
    }

    /// Number of committed lessons.
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    /// Iterates over all committed lessons (unordered).
    pub fn iter_lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.lessons.values()
    }

    /// All committed lessons taught by a teacher.
    pub fn lessons_for_teacher(&self, teacher_id: &str) -> Vec<&Lesson> {
        self.lessons
            .values()
            .filter(|l| l.teacher_id == teacher_id)
            .collect()
    }

    /// All committed lessons held in a room.
    pub fn lessons_for_room(&self, room_id: &str) -> Vec<&Lesson> {
        self.lessons
            .values()
            .filter(|l| l.room_id == room_id)
            .collect()
    }

    /// One class's lessons for a weekday, ordered by lesson number.
    ///
    /// Empty if the class has no schedule on that weekday.
    pub fn day_plan(&self, class_id: &str, weekday: Weekday) -> Vec<&Lesson> {
        let Some(schedule_id) = self.registry.schedule_for(class_id, weekday) else {
            return Vec::new();
        };
        let Ok(ids) = self.registry.lessons_of(schedule_id) else {
            return Vec::new();
        };
        ids.iter()
            .filter_map(|id| self.lessons.get(id))
            .collect()
    }

    /// Conflict check shared by `propose`, `commit`, and `move_lesson`.
    ///
    /// `exclude` drops one committed lesson from the candidate set (the
    /// lesson being moved). Candidates arriving from the index are
    /// parity-compatible by construction; only true time overlap remains
    /// to be confirmed here.
    fn check(
        &self,
        draft: &LessonDraft,
        exclude: Option<LessonId>,
    ) -> Result<ConflictReport, EngineError> {
        let weekday = self.registry.weekday_of(draft.schedule_id)?;
        let mut conflicts = Vec::new();

        for id in self
            .index
            .candidates_for_teacher(&draft.teacher_id, weekday, draft.parity)
        {
            if Some(id) == exclude {
                continue;
            }
            if let Some(other) = self.lessons.get(&id) {
                if draft.time.overlaps(&other.time) {
                    conflicts.push(Conflict::teacher_double_booked(id));
                }
            }
        }

        for id in self
            .index
            .candidates_for_room(&draft.room_id, weekday, draft.parity)
        {
            if Some(id) == exclude {
                continue;
            }
            if let Some(other) = self.lessons.get(&id) {
                if draft.time.overlaps(&other.time) {
                    conflicts.push(Conflict::room_double_booked(id));
                }
            }
        }

        // Slot identity is checked independently of time overlap: the
        // (schedule, lesson number, parity) combination is globally
        // unique.
        for id in self.registry.lessons_of(draft.schedule_id)? {
            if Some(id) == exclude {
                continue;
            }
            if let Some(other) = self.lessons.get(&id) {
                if other.lesson_number == draft.lesson_number
                    && other.parity.compatible_with(draft.parity)
                {
                    conflicts.push(Conflict::slot_collision(id));
                }
            }
        }

        Ok(ConflictReport::from_conflicts(conflicts))
    }

    /// Inserts a lesson whose placement has already been validated.
    fn place(&mut self, lesson: Lesson) -> Result<(), EngineError> {
        let weekday = self.registry.weekday_of(lesson.schedule_id)?;
        self.registry
            .attach(lesson.schedule_id, lesson.lesson_number, lesson.id)?;
        self.index.insert(
            lesson.id,
            &lesson.teacher_id,
            &lesson.room_id,
            weekday,
            lesson.parity,
        );
        self.lessons.insert(lesson.id, lesson);
        Ok(())
    }
}
