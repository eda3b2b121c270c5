//! Manual-edit support.
//!
//! The fill engine is greedy and may leave gaps, so administrators finish
//! timetables by hand. This module lists the lessons a cell may take and
//! keeps an undo/redo history of the edits. Conflicts introduced by hand
//! are reported by [`crate::conflicts`].

mod history;
mod options;

pub use history::{ScheduleHistory, DEFAULT_HISTORY_CAPACITY};
pub use options::{cell_options, CellOption};
