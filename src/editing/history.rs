//! Bounded undo/redo history of schedule snapshots.
//!
//! Snapshots live in an arena indexed by a cursor. Pushing discards the
//! redo tail; overflowing the capacity discards the oldest snapshot.

use log::trace;
use std::collections::VecDeque;

use crate::models::WeeklySchedule;

/// Snapshots kept unless configured otherwise.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Undo/redo stack of full schedule snapshots.
///
/// # Example
///
/// ```
/// use timetable_fill::editing::ScheduleHistory;
/// use timetable_fill::models::{ScheduleCell, TimeGrid, WeeklySchedule};
///
/// let grid = TimeGrid::uniform(&["MON"], 4, None, &["X"]);
/// let empty = WeeklySchedule::empty(&grid);
/// let mut history = ScheduleHistory::new(empty.clone());
///
/// history.push(empty.with_cell("MON", 1, "X", ScheduleCell::blocked("Manual")));
/// assert_eq!(history.undo(), Some(&empty));
/// assert!(history.can_redo());
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleHistory {
    snapshots: VecDeque<WeeklySchedule>,
    cursor: usize,
    capacity: usize,
}

impl ScheduleHistory {
    /// Starts a history at `initial` with the default capacity.
    pub fn new(initial: WeeklySchedule) -> Self {
        Self::with_capacity(initial, DEFAULT_HISTORY_CAPACITY)
    }

    /// Starts a history holding at most `capacity` snapshots (at least 1).
    pub fn with_capacity(initial: WeeklySchedule, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut snapshots = VecDeque::with_capacity(capacity);
        snapshots.push_back(initial);
        Self {
            snapshots,
            cursor: 0,
            capacity,
        }
    }

    /// Records a new current snapshot.
    pub fn push(&mut self, schedule: WeeklySchedule) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(schedule);
        if self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
            trace!("history full, dropped oldest snapshot");
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Drops all history and starts over at `schedule`.
    pub fn reset(&mut self, schedule: WeeklySchedule) {
        self.snapshots.clear();
        self.snapshots.push_back(schedule);
        self.cursor = 0;
    }

    /// Steps back. Returns the new current snapshot, or `None` at the start.
    pub fn undo(&mut self) -> Option<&WeeklySchedule> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    /// Steps forward. Returns the new current snapshot, or `None` at the end.
    pub fn redo(&mut self) -> Option<&WeeklySchedule> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    /// The current snapshot.
    pub fn current(&self) -> &WeeklySchedule {
        &self.snapshots[self.cursor]
    }

    /// Whether an older snapshot exists.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a newer snapshot exists.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Snapshots held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`: a history holds at least one snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Maximum snapshots held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
