//! Temporal value types: weekday, week parity, and time ranges.
//!
//! # Time Model
//!
//! All times are minutes since midnight on the lesson's weekday. Ranges
//! are half-open `[start, end)`: a lesson ending at 10:00 and a lesson
//! starting at 10:00 do not overlap. This convention is load-bearing for
//! every conflict check in the crate.
//!
//! # Week Parity
//!
//! Bi-weekly rotation support. A lesson tagged `Odd` or `Even` occurs only
//! in odd or even academic weeks; `Both` occurs every week. `Both` is
//! compatible with everything; `Odd` and `Even` never coexist in one week.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Day of the week a schedule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in calendar order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];
}

/// Applicability of a lesson to the academic calendar's alternating weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekParity {
    /// Odd academic weeks only.
    Odd,
    /// Even academic weeks only.
    Even,
    /// Every week.
    Both,
}

impl WeekParity {
    /// Whether two parities can occur in the same academic week.
    ///
    /// `Both` is compatible with everything; `Odd` and `Even` are
    /// compatible only with `Both` and with themselves, never with each
    /// other.
    #[inline]
    pub fn compatible_with(self, other: WeekParity) -> bool {
        self == WeekParity::Both || other == WeekParity::Both || self == other
    }
}

/// A half-open time range `[start, end)` in minutes since midnight.
///
/// Construction enforces `start < end`; a zero-length or inverted range
/// never enters the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start_min: i64,
    end_min: i64,
}

impl TimeRange {
    /// Creates a range, rejecting `start >= end` with
    /// [`EngineError::InvalidRange`].
    pub fn new(start_min: i64, end_min: i64) -> Result<Self, EngineError> {
        if start_min >= end_min {
            return Err(EngineError::InvalidRange { start_min, end_min });
        }
        Ok(Self { start_min, end_min })
    }

    /// Creates a range from hour/minute pairs.
    ///
    /// `TimeRange::from_hm(8, 0, 8, 45)` is the 08:00 to 08:45 slot.
    pub fn from_hm(start_h: i64, start_m: i64, end_h: i64, end_m: i64) -> Result<Self, EngineError> {
        Self::new(start_h * 60 + start_m, end_h * 60 + end_m)
    }

    /// Range start (minutes since midnight, inclusive).
    #[inline]
    pub fn start_min(&self) -> i64 {
        self.start_min
    }

    /// Range end (minutes since midnight, exclusive).
    #[inline]
    pub fn end_min(&self) -> i64 {
        self.end_min
    }

    /// Duration in minutes.
    #[inline]
    pub fn duration_min(&self) -> i64 {
        self.end_min - self.start_min
    }

    /// Whether two ranges overlap.
    ///
    /// Half-open convention: touching endpoints (`self.end == other.start`)
    /// do NOT overlap.
    #[inline]
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start_min / 60,
            self.start_min % 60,
            self.end_min / 60,
            self.end_min % 60
        )
    }
}
