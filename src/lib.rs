//! Weekly school timetable construction.
//!
//! Fills teachers' weekly subject loads into a (day × period × class)
//! grid with a greedy randomized heuristic, and reports conflicts in
//! schedules that were edited by hand.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeGrid`, `Day`, `TimeSlot`, `Teacher`,
//!   `SubjectLoad`, `WeeklySchedule`, `ScheduleCell`, `OffConstraint`,
//!   `SplitOption`
//! - **`scheduler`**: Block splitting, daily load limits, the `SlotFiller`
//!   placement engine, fill progress
//! - **`conflicts`**: Time, subject, and daily-load conflict detection
//! - **`editing`**: Manual-edit options and bounded undo/redo history
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown classes)
//! - **`config`**: JSON configuration loading
//!
//! # Value Semantics
//!
//! Every operation takes a schedule by reference and returns a new one.
//! Callers own the current schedule and its history.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod config;
pub mod conflicts;
pub mod editing;
pub mod models;
pub mod scheduler;
pub mod validation;
