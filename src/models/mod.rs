//! Timetabling domain models.
//!
//! Provides the data types the fill engine and conflict detector consume
//! and produce. The grid, roster, and constraint sets are configuration;
//! the [`WeeklySchedule`] is the value being built.
//!
//! # Domain Mappings
//!
//! | timetable-fill | Generic scheduling |
//! |----------------|--------------------|
//! | TimeGrid / Day | Calendar |
//! | Teacher | Resource |
//! | SubjectLoad | Task demand |
//! | WeeklySchedule | Schedule |
//! | OffConstraint | Blocked period |

mod constraint;
mod grid;
mod schedule;
mod teacher;

pub use constraint::{OffConstraint, OffConstraints, ParseSplitError, SplitOption, SplitPreferences};
pub use grid::{ClassName, Day, SlotKind, TimeGrid, TimeSlot, MAX_UNIFORM_PERIODS};
pub use schedule::{ClassCell, DayRows, PeriodRow, ScheduleCell, WeeklySchedule};
pub use teacher::{SubjectLoad, Teacher};
