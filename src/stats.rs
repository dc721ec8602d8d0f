//! Timetable load metrics.
//!
//! Read-side summary of a committed timetable for dashboards and load
//! balancing: lesson counts per weekday and parity, scheduled minutes per
//! teacher and per room.
//!
//! Parities are not weighted: an `Odd` lesson counts its full duration
//! even though it runs every other week.

use std::collections::HashMap;

use crate::engine::TimetableEngine;
use crate::models::{WeekParity, Weekday};

/// Aggregate load indicators for one school's timetable.
#[derive(Debug, Clone, Default)]
pub struct TimetableStats {
    /// Total committed lessons.
    pub lesson_count: usize,
    /// Lessons per weekday.
    pub lessons_per_weekday: HashMap<Weekday, usize>,
    /// Lessons per week parity.
    pub lessons_per_parity: HashMap<WeekParity, usize>,
    /// Scheduled minutes per teacher.
    pub minutes_per_teacher: HashMap<String, i64>,
    /// Scheduled minutes per room.
    pub minutes_per_room: HashMap<String, i64>,
    /// Weekday with the most lessons; ties resolve to the earliest
    /// weekday in calendar order. `None` for an empty timetable.
    pub busiest_weekday: Option<Weekday>,
}

impl TimetableStats {
    /// Computes metrics over the engine's committed lessons.
    pub fn compute(engine: &TimetableEngine) -> Self {
        let mut stats = TimetableStats {
            lesson_count: engine.lesson_count(),
            ..Default::default()
        };

        for lesson in engine.iter_lessons() {
            if let Ok(weekday) = engine.registry().weekday_of(lesson.schedule_id) {
                *stats.lessons_per_weekday.entry(weekday).or_insert(0) += 1;
            }
            *stats.lessons_per_parity.entry(lesson.parity).or_insert(0) += 1;
            *stats
                .minutes_per_teacher
                .entry(lesson.teacher_id.clone())
                .or_insert(0) += lesson.time.duration_min();
            *stats
                .minutes_per_room
                .entry(lesson.room_id.clone())
                .or_insert(0) += lesson.time.duration_min();
        }

        let mut best: Option<(Weekday, usize)> = None;
        for &d in Weekday::ALL.iter() {
            if let Some(&n) = stats.lessons_per_weekday.get(&d) {
                if best.map_or(true, |(_, m)| n > m) {
                    best = Some((d, n));
                }
            }
        }
        stats.busiest_weekday = best.map(|(d, _)| d);

        stats
    }
}
