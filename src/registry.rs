//! Schedule registry.
//!
//! Owns the one-schedule-per-class-per-weekday invariant and the
//! Schedule→Lesson containment relation. A schedule is created lazily the
//! first time a class's weekly plan touches a weekday, and deleted only
//! when it owns zero lessons; the registry never force-deletes lessons.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{LessonId, ScheduleId, Weekday};

/// Durable identity of a schedule, used to reseed the registry on bulk
/// load (a bare [`ScheduleId`] cannot be resolved back to its class and
/// weekday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    /// Schedule identity as persisted.
    pub id: ScheduleId,
    /// Owning class reference (weak).
    pub class_id: String,
    /// The weekday this schedule covers.
    pub weekday: Weekday,
}

#[derive(Debug, Clone)]
struct ScheduleEntry {
    class_id: String,
    weekday: Weekday,
    /// Owned lessons, ordered by lesson number.
    lessons: Vec<(u32, LessonId)>,
}

/// Registry of `(class, weekday)` schedules for one school.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRegistry {
    next_id: u64,
    by_key: HashMap<(String, Weekday), ScheduleId>,
    schedules: HashMap<ScheduleId, ScheduleEntry>,
}

impl ScheduleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the schedule for `(class_id, weekday)`, creating it if
    /// absent. Idempotent: never produces two schedules for the same key.
    pub fn get_or_create(&mut self, class_id: impl Into<String>, weekday: Weekday) -> ScheduleId {
        let class_id = class_id.into();
        if let Some(&id) = self.by_key.get(&(class_id.clone(), weekday)) {
            return id;
        }
        let id = ScheduleId::new(self.next_id);
        self.next_id += 1;
        self.by_key.insert((class_id.clone(), weekday), id);
        self.schedules.insert(
            id,
            ScheduleEntry {
                class_id,
                weekday,
                lessons: Vec::new(),
            },
        );
        id
    }

    /// Looks up an existing schedule without creating one.
    pub fn schedule_for(&self, class_id: &str, weekday: Weekday) -> Option<ScheduleId> {
        self.by_key.get(&(class_id.to_string(), weekday)).copied()
    }

    /// The weekday a schedule covers.
    pub fn weekday_of(&self, id: ScheduleId) -> Result<Weekday, EngineError> {
        self.schedules
            .get(&id)
            .map(|e| e.weekday)
            .ok_or(EngineError::UnknownSchedule(id))
    }

    /// The class a schedule belongs to.
    pub fn class_of(&self, id: ScheduleId) -> Result<&str, EngineError> {
        self.schedules
            .get(&id)
            .map(|e| e.class_id.as_str())
            .ok_or(EngineError::UnknownSchedule(id))
    }

    /// Whether a schedule id is registered.
    pub fn contains(&self, id: ScheduleId) -> bool {
        self.schedules.contains_key(&id)
    }

    /// Lessons owned by a schedule, ordered by lesson number.
    pub fn lessons_of(&self, id: ScheduleId) -> Result<Vec<LessonId>, EngineError> {
        self.schedules
            .get(&id)
            .map(|e| e.lessons.iter().map(|&(_, lid)| lid).collect())
            .ok_or(EngineError::UnknownSchedule(id))
    }

    /// Deletes a schedule only when it owns zero lessons.
    ///
    /// Returns whether it was deleted; a non-empty or unknown schedule is
    /// a no-op.
    pub fn remove_if_empty(&mut self, id: ScheduleId) -> bool {
        let Some(entry) = self.schedules.get(&id) else {
            return false;
        };
        if !entry.lessons.is_empty() {
            return false;
        }
        let key = (entry.class_id.clone(), entry.weekday);
        self.schedules.remove(&id);
        self.by_key.remove(&key);
        true
    }

    /// Number of registered schedules.
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    /// Whether no schedules are registered.
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Reseeds a schedule under its persisted id (bulk-load path).
    ///
    /// Fails with `DuplicateSchedule` when either the id or the
    /// `(class, weekday)` key is already registered.
    pub(crate) fn register(&mut self, record: ScheduleRecord) -> Result<(), EngineError> {
        let key = (record.class_id.clone(), record.weekday);
        if self.schedules.contains_key(&record.id) || self.by_key.contains_key(&key) {
            return Err(EngineError::DuplicateSchedule(record.id));
        }
        self.next_id = self.next_id.max(record.id.as_u64() + 1);
        self.by_key.insert(key, record.id);
        self.schedules.insert(
            record.id,
            ScheduleEntry {
                class_id: record.class_id,
                weekday: record.weekday,
                lessons: Vec::new(),
            },
        );
        Ok(())
    }

    /// Attaches a lesson, keeping the day ordered by lesson number.
    pub(crate) fn attach(
        &mut self,
        id: ScheduleId,
        lesson_number: u32,
        lesson_id: LessonId,
    ) -> Result<(), EngineError> {
        let entry = self
            .schedules
            .get_mut(&id)
            .ok_or(EngineError::UnknownSchedule(id))?;
        let pos = entry
            .lessons
            .partition_point(|&(number, _)| number <= lesson_number);
        entry.lessons.insert(pos, (lesson_number, lesson_id));
        Ok(())
    }

    /// Detaches a lesson from its schedule. Unknown ids are a no-op.
    pub(crate) fn detach(&mut self, id: ScheduleId, lesson_id: LessonId) -> bool {
        let Some(entry) = self.schedules.get_mut(&id) else {
            return false;
        };
        let before = entry.lessons.len();
        entry.lessons.retain(|&(_, lid)| lid != lesson_id);
        entry.lessons.len() != before
    }
}
