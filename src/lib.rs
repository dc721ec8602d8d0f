//! Timetable consistency engine for school administration.
//!
//! Maintains the committed set of weekly lessons for one school and
//! guarantees, on every mutation, that no teacher, room, or class is
//! double-booked. Conflict checks honor bi-weekly week parity (a lesson
//! applies to odd weeks, even weeks, or every week) and the one-schedule
//! per class per weekday identity.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Weekday`, `WeekParity`, `TimeRange`,
//!   `Lesson`, `LessonDraft`, `ConflictReport`
//! - **`engine`**: The consistency engine — propose / commit / remove / move
//! - **`index`**: Candidate index over committed lessons
//! - **`registry`**: Schedule identity and Schedule→Lesson containment
//! - **`validation`**: Snapshot integrity checks for the bulk-load path
//! - **`roster`**: Teacher/subject assignment relation
//! - **`stats`**: Read-side load metrics
//!
//! # Scope
//!
//! This crate validates placements a caller proposes; it never chooses
//! which lessons to schedule. Search and optimization over rooms and
//! teachers are a separate solver concern.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - de Werra (1985), "An Introduction to Timetabling"

pub mod engine;
pub mod error;
pub mod index;
pub mod models;
pub mod registry;
pub mod roster;
pub mod stats;
pub mod validation;
