//! Conflict candidate index.
//!
//! Answers "which committed lessons could possibly conflict with this
//! draft" in time proportional to the number of true candidates rather
//! than the timetable size. Two keyed indices bucket lesson ids by
//! `(teacher, weekday, parity)` and `(room, weekday, parity)`; a query
//! unions the buckets whose parity is compatible with the query parity.
//!
//! The index holds only its own state, never errors, and yields empty
//! candidate lists for unknown keys.

use std::collections::HashMap;

use crate::models::{LessonId, WeekParity, Weekday};

type BucketKey = (String, Weekday, WeekParity);

/// In-memory candidate index over committed lessons.
#[derive(Debug, Clone, Default)]
pub struct ConflictIndex {
    by_teacher: HashMap<BucketKey, Vec<LessonId>>,
    by_room: HashMap<BucketKey, Vec<LessonId>>,
    /// Reverse map: lesson id to its (teacher, room) bucket keys, for
    /// O(1) amortized removal.
    keys: HashMap<LessonId, (BucketKey, BucketKey)>,
}

impl ConflictIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes a committed lesson under its teacher and room buckets.
    ///
    /// Re-inserting an already indexed id replaces its previous entry.
    pub fn insert(
        &mut self,
        lesson_id: LessonId,
        teacher_id: &str,
        room_id: &str,
        weekday: Weekday,
        parity: WeekParity,
    ) {
        self.remove(lesson_id);

        let teacher_key = (teacher_id.to_string(), weekday, parity);
        let room_key = (room_id.to_string(), weekday, parity);
        self.by_teacher
            .entry(teacher_key.clone())
            .or_default()
            .push(lesson_id);
        self.by_room
            .entry(room_key.clone())
            .or_default()
            .push(lesson_id);
        self.keys.insert(lesson_id, (teacher_key, room_key));
    }

    /// Drops a lesson from both indices. Unknown ids are a no-op.
    pub fn remove(&mut self, lesson_id: LessonId) -> bool {
        let Some((teacher_key, room_key)) = self.keys.remove(&lesson_id) else {
            return false;
        };
        drop_from_bucket(&mut self.by_teacher, &teacher_key, lesson_id);
        drop_from_bucket(&mut self.by_room, &room_key, lesson_id);
        true
    }

    /// Committed lessons for a teacher on a weekday whose parity is
    /// compatible with `parity` (always including `Both`-parity lessons).
    pub fn candidates_for_teacher(
        &self,
        teacher_id: &str,
        weekday: Weekday,
        parity: WeekParity,
    ) -> Vec<LessonId> {
        collect_compatible(&self.by_teacher, teacher_id, weekday, parity)
    }

    /// Committed lessons for a room on a weekday whose parity is
    /// compatible with `parity`.
    pub fn candidates_for_room(
        &self,
        room_id: &str,
        weekday: Weekday,
        parity: WeekParity,
    ) -> Vec<LessonId> {
        collect_compatible(&self.by_room, room_id, weekday, parity)
    }

    /// Number of indexed lessons.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Parity buckets a query for `parity` must visit.
fn compatible_parities(parity: WeekParity) -> &'static [WeekParity] {
    match parity {
        WeekParity::Odd => &[WeekParity::Odd, WeekParity::Both],
        WeekParity::Even => &[WeekParity::Even, WeekParity::Both],
        WeekParity::Both => &[WeekParity::Odd, WeekParity::Even, WeekParity::Both],
    }
}

fn collect_compatible(
    map: &HashMap<BucketKey, Vec<LessonId>>,
    id: &str,
    weekday: Weekday,
    parity: WeekParity,
) -> Vec<LessonId> {
    let mut out = Vec::new();
    for &p in compatible_parities(parity) {
        if let Some(bucket) = map.get(&(id.to_string(), weekday, p)) {
            out.extend_from_slice(bucket);
        }
    }
    out
}

fn drop_from_bucket(
    map: &mut HashMap<BucketKey, Vec<LessonId>>,
    key: &BucketKey,
    lesson_id: LessonId,
) {
    if let Some(bucket) = map.get_mut(key) {
        bucket.retain(|id| *id != lesson_id);
        if bucket.is_empty() {
            map.remove(key);
        }
    }
}
