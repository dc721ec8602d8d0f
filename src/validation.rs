//! Snapshot integrity validation for the bulk-load path.
//!
//! Checks a durable-storage snapshot before the engine rebuilds from it.
//! Detects:
//! - Duplicate schedule ids and duplicate `(class, weekday)` keys
//! - Duplicate lesson ids
//! - Lessons referencing unregistered schedules
//! - Duplicate `(schedule, lesson number)` slots under compatible parity
//! - Teacher and room double-bookings already present in the snapshot
//!
//! All problems are reported in one pass, mirroring the engine's
//! report-everything conflict policy: a caller repairing stored data needs
//! the complete picture, not the first hit.

use std::collections::{HashMap, HashSet};

use crate::models::{Lesson, ScheduleId, Weekday};
use crate::registry::ScheduleRecord;

/// Snapshot validation result.
pub type SnapshotResult = Result<(), Vec<SnapshotError>>;

/// An integrity problem in a storage snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotError {
    /// Error category.
    pub kind: SnapshotErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of snapshot integrity problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotErrorKind {
    /// Two schedule records share an id.
    DuplicateScheduleId,
    /// Two schedule records share a `(class, weekday)` key.
    DuplicateScheduleKey,
    /// Two lessons share an id.
    DuplicateLessonId,
    /// A lesson references a schedule that is not in the snapshot.
    UnknownScheduleRef,
    /// Two lessons occupy the same slot under compatible parity.
    SlotCollision,
    /// A teacher is double-booked within the snapshot.
    TeacherDoubleBooked,
    /// A room is double-booked within the snapshot.
    RoomDoubleBooked,
}

impl SnapshotError {
    fn new(kind: SnapshotErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a storage snapshot before the engine loads it.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_snapshot(schedules: &[ScheduleRecord], lessons: &[Lesson]) -> SnapshotResult {
    let mut errors = Vec::new();

    // Schedule identity
    let mut schedule_ids: HashMap<ScheduleId, Weekday> = HashMap::new();
    let mut schedule_keys = HashSet::new();
    for s in schedules {
        if schedule_ids.insert(s.id, s.weekday).is_some() {
            errors.push(SnapshotError::new(
                SnapshotErrorKind::DuplicateScheduleId,
                format!("Duplicate schedule id: {}", s.id),
            ));
        }
        if !schedule_keys.insert((s.class_id.as_str(), s.weekday)) {
            errors.push(SnapshotError::new(
                SnapshotErrorKind::DuplicateScheduleKey,
                format!(
                    "Duplicate schedule key: class '{}' on {:?}",
                    s.class_id, s.weekday
                ),
            ));
        }
    }

    // Lesson identity and schedule references
    let mut lesson_ids = HashSet::new();
    for l in lessons {
        if !lesson_ids.insert(l.id) {
            errors.push(SnapshotError::new(
                SnapshotErrorKind::DuplicateLessonId,
                format!("Duplicate lesson id: {}", l.id),
            ));
        }
        if !schedule_ids.contains_key(&l.schedule_id) {
            errors.push(SnapshotError::new(
                SnapshotErrorKind::UnknownScheduleRef,
                format!("{} references unknown {}", l.id, l.schedule_id),
            ));
        }
    }

    // Slot collisions: same (schedule, lesson number), compatible parity
    let mut by_slot: HashMap<(ScheduleId, u32), Vec<&Lesson>> = HashMap::new();
    for l in lessons {
        by_slot
            .entry((l.schedule_id, l.lesson_number))
            .or_default()
            .push(l);
    }
    for group in by_slot.values() {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                if a.parity.compatible_with(b.parity) {
                    errors.push(SnapshotError::new(
                        SnapshotErrorKind::SlotCollision,
                        format!(
                            "{} and {} occupy slot {} of {} with compatible parity",
                            a.id, b.id, a.lesson_number, a.schedule_id
                        ),
                    ));
                }
            }
        }
    }

    // Double-bookings: same resource, same weekday, compatible parity,
    // overlapping time. Lessons on unknown schedules were already
    // reported above and are skipped here.
    check_double_bookings(
        lessons,
        &schedule_ids,
        |l| &l.teacher_id,
        SnapshotErrorKind::TeacherDoubleBooked,
        "teacher",
        &mut errors,
    );
    check_double_bookings(
        lessons,
        &schedule_ids,
        |l| &l.room_id,
        SnapshotErrorKind::RoomDoubleBooked,
        "room",
        &mut errors,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_double_bookings<'a>(
    lessons: &'a [Lesson],
    schedule_ids: &HashMap<ScheduleId, Weekday>,
    resource: impl Fn(&'a Lesson) -> &'a str,
    kind: SnapshotErrorKind,
    label: &str,
    errors: &mut Vec<SnapshotError>,
) {
    let mut by_resource: HashMap<(&str, Weekday), Vec<&Lesson>> = HashMap::new();
    for l in lessons {
        if let Some(&weekday) = schedule_ids.get(&l.schedule_id) {
            by_resource
                .entry((resource(l), weekday))
                .or_default()
                .push(l);
        }
    }
    for ((res, _), group) in &by_resource {
        for (i, a) in group.iter().enumerate() {
            for b in &group[i + 1..] {
                if a.parity.compatible_with(b.parity) && a.time.overlaps(&b.time) {
                    errors.push(SnapshotError::new(
                        kind,
                        format!(
                            "{} '{}' is double-booked by {} ({}) and {} ({})",
                            label, res, a.id, a.time, b.id, b.time
                        ),
                    ));
                }
            }
        }
    }
}
