//! Weekly schedule (solution) model.
//!
//! A schedule holds one [`ScheduleCell`] per (day, period, class) triple
//! for every slot with a non-negative period. Engines never mutate a
//! schedule handed to them; they return a new value.
//!
//! # Tolerance
//! Schedules may be partially initialized or manually edited. Every
//! lookup treats a missing cell as absent instead of failing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ClassName, SubjectLoad, Teacher, TimeGrid};

/// Content of one (day, period, class) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleCell {
    /// Free for placement.
    Empty,
    /// Not available (break, ceremony, or manual block).
    Blocked {
        /// Display reason.
        reason: String,
    },
    /// A lesson.
    Class(ClassCell),
}

/// A lesson occupying a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCell {
    /// Subject code.
    pub subject_code: String,
    /// Subject display name.
    pub subject_name: String,
    /// Teacher join key.
    pub teacher_id: u32,
    /// Teacher short code.
    pub teacher_code: String,
    /// Teacher display name.
    pub teacher_name: String,
    /// Presentation color hint.
    #[serde(default)]
    pub color: String,
}

impl ClassCell {
    /// Creates a lesson cell for a teacher teaching a subject.
    pub fn new(teacher: &Teacher, subject: &SubjectLoad) -> Self {
        Self {
            subject_code: subject.code.clone(),
            subject_name: subject.name.clone(),
            teacher_id: teacher.id,
            teacher_code: teacher.code.clone(),
            teacher_name: teacher.name.clone(),
            color: subject.color.clone(),
        }
    }

    /// Whether this lesson is `subject_code` taught by `teacher_id`.
    #[inline]
    pub fn is(&self, teacher_id: u32, subject_code: &str) -> bool {
        self.teacher_id == teacher_id && self.subject_code == subject_code
    }
}

impl ScheduleCell {
    /// Creates a blocked cell.
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self::Blocked {
            reason: reason.into(),
        }
    }

    /// Creates a lesson cell.
    pub fn class(teacher: &Teacher, subject: &SubjectLoad) -> Self {
        Self::Class(ClassCell::new(teacher, subject))
    }

    /// Whether the cell is free.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Whether the cell is blocked.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    /// The lesson, if any.
    pub fn as_class(&self) -> Option<&ClassCell> {
        match self {
            Self::Class(cell) => Some(cell),
            Self::Empty | Self::Blocked { .. } => None,
        }
    }
}

/// Cells of one period, by class.
pub type PeriodRow = BTreeMap<ClassName, ScheduleCell>;

/// Rows of one day, by period.
pub type DayRows = BTreeMap<i32, PeriodRow>;

/// A weekly timetable: day → period → class → cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: BTreeMap<String, DayRows>,
}

impl WeeklySchedule {
    /// Creates a schedule with no cells.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fully populated schedule for a grid.
    ///
    /// Instructional slots start EMPTY. Other slots with a non-negative
    /// period start BLOCKED with the slot label (or kind) as reason.
    ///
    /// # Example
    ///
    /// ```
    /// use timetable_fill::models::{TimeGrid, WeeklySchedule};
    ///
    /// let grid = TimeGrid::uniform(&["MONDAY"], 8, Some(4), &["X A"]);
    /// let schedule = WeeklySchedule::empty(&grid);
    /// assert_eq!(schedule.cell_count(), 8);
    /// assert!(schedule.cell("MONDAY", 1, "X A").unwrap().is_empty());
    /// ```
    pub fn empty(grid: &TimeGrid) -> Self {
        let mut days = BTreeMap::new();
        for day in &grid.days {
            let mut rows = DayRows::new();
            for slot in day.slots.iter().filter(|s| s.has_cells()) {
                let cell = if slot.is_instructional() {
                    ScheduleCell::Empty
                } else {
                    ScheduleCell::blocked(slot.block_reason())
                };
                let row = grid
                    .classes
                    .iter()
                    .map(|class| (class.clone(), cell.clone()))
                    .collect();
                rows.insert(slot.period, row);
            }
            days.insert(day.name.clone(), rows);
        }
        Self { days }
    }

    /// The cell at (`day`, `period`, `class`), if present.
    pub fn cell(&self, day: &str, period: i32, class: &str) -> Option<&ScheduleCell> {
        self.days.get(day)?.get(&period)?.get(class)
    }

    /// Rows of a day, if present.
    pub fn day(&self, day: &str) -> Option<&DayRows> {
        self.days.get(day)
    }

    /// Iterates over days as `(name, rows)`, sorted by name.
    pub fn days(&self) -> impl Iterator<Item = (&str, &DayRows)> {
        self.days.iter().map(|(name, rows)| (name.as_str(), rows))
    }

    /// Replaces an existing cell. Returns `false` if no such cell exists.
    pub fn set_cell(&mut self, day: &str, period: i32, class: &str, cell: ScheduleCell) -> bool {
        match self
            .days
            .get_mut(day)
            .and_then(|rows| rows.get_mut(&period))
            .and_then(|row| row.get_mut(class))
        {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Returns a copy with one cell replaced (unchanged if the cell is missing).
    pub fn with_cell(&self, day: &str, period: i32, class: &str, cell: ScheduleCell) -> Self {
        let mut next = self.clone();
        next.set_cell(day, period, class, cell);
        next
    }

    /// Iterates over every cell as `(day, period, class, cell)`.
    pub fn cells(&self) -> impl Iterator<Item = (&str, i32, &ClassName, &ScheduleCell)> {
        self.days.iter().flat_map(|(day, rows)| {
            rows.iter().flat_map(move |(&period, row)| {
                row.iter()
                    .map(move |(class, cell)| (day.as_str(), period, class, cell))
            })
        })
    }

    /// Iterates over lesson cells only.
    pub fn lessons(&self) -> impl Iterator<Item = (&str, i32, &ClassName, &ClassCell)> {
        self.cells()
            .filter_map(|(day, period, class, cell)| cell.as_class().map(|c| (day, period, class, c)))
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.days
            .values()
            .flat_map(|rows| rows.values())
            .map(|row| row.len())
            .sum()
    }

    /// Hours of `subject_code` by `teacher_id` placed in `class` this week.
    pub fn placed_hours(&self, teacher_id: u32, subject_code: &str, class: &str) -> u32 {
        self.lessons()
            .filter(|(_, _, c, cell)| c.as_str() == class && cell.is(teacher_id, subject_code))
            .count() as u32
    }

    /// Hours of `subject_code` (any teacher) placed in `class` on `day`.
    pub fn hours_on_day(&self, day: &str, class: &str, subject_code: &str) -> u32 {
        self.class_lessons_on(day, class)
            .filter(|cell| cell.subject_code == subject_code)
            .count() as u32
    }

    /// Hours of `subject_code` by `teacher_id` placed in `class` on `day`.
    pub fn teacher_hours_on_day(
        &self,
        day: &str,
        teacher_id: u32,
        subject_code: &str,
        class: &str,
    ) -> u32 {
        self.class_lessons_on(day, class)
            .filter(|cell| cell.is(teacher_id, subject_code))
            .count() as u32
    }

    /// Whether `teacher_id` teaches any class at (`day`, `period`).
    pub fn is_teacher_busy(&self, day: &str, period: i32, teacher_id: u32) -> bool {
        self.days
            .get(day)
            .and_then(|rows| rows.get(&period))
            .is_some_and(|row| {
                row.values()
                    .filter_map(ScheduleCell::as_class)
                    .any(|cell| cell.teacher_id == teacher_id)
            })
    }

    /// Whether `teacher_id` teaches `class` in any period of `day`.
    pub fn teacher_teaches_class_on(&self, day: &str, teacher_id: u32, class: &str) -> bool {
        self.class_lessons_on(day, class)
            .any(|cell| cell.teacher_id == teacher_id)
    }

    /// Resets every cell of a (teacher, subject) pair to EMPTY.
    ///
    /// Returns the number of cells cleared.
    pub fn clear_teacher_subject(&mut self, teacher_id: u32, subject_code: &str) -> usize {
        let mut cleared = 0;
        for row in self.days.values_mut().flat_map(|rows| rows.values_mut()) {
            for cell in row.values_mut() {
                if cell.as_class().is_some_and(|c| c.is(teacher_id, subject_code)) {
                    *cell = ScheduleCell::Empty;
                    cleared += 1;
                }
            }
        }
        cleared
    }

    fn class_lessons_on<'a>(
        &'a self,
        day: &str,
        class: &'a str,
    ) -> impl Iterator<Item = &'a ClassCell> + 'a {
        self.days
            .get(day)
            .into_iter()
            .flat_map(|rows| rows.values())
            .filter_map(move |row| row.get(class))
            .filter_map(ScheduleCell::as_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, SlotKind, TimeSlot};
    use chrono::NaiveTime;

    fn teacher() -> Teacher {
        Teacher::new(1, "Ani", "AN")
            .with_subject(SubjectLoad::new("MTK", "Mathematics").with_load("A", 4))
            .with_subject(SubjectLoad::new("FIS", "Physics").with_load("A", 2))
    }

    fn lesson(code: &str) -> ScheduleCell {
        let t = teacher();
        ScheduleCell::class(&t, t.subject(code).unwrap())
    }

    fn sample_schedule() -> WeeklySchedule {
        let grid = TimeGrid::uniform(&["MON", "TUE"], 4, None, &["A", "B"]);
        let mut s = WeeklySchedule::empty(&grid);
        s.set_cell("MON", 1, "A", lesson("MTK"));
        s.set_cell("MON", 2, "A", lesson("MTK"));
        s.set_cell("TUE", 3, "B", lesson("FIS"));
        s
    }

    #[test]
    fn test_empty_schedule_shape() {
        let grid = TimeGrid::uniform(&["MON", "TUE"], 8, Some(4), &["A", "B", "C"]);
        let s = WeeklySchedule::empty(&grid);
        // 2 days x 8 periods x 3 classes; the negative break has no cells
        assert_eq!(s.cell_count(), 48);
        assert!(s.cell("MON", -1, "A").is_none());
        assert!(s.cells().all(|(_, _, _, c)| c.is_empty()));
    }

    #[test]
    fn test_empty_schedule_blocks_non_instructional_rows() {
        let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let grid = TimeGrid::new()
            .with_class("A")
            .with_day(
                Day::new("MON")
                    .with_slot(TimeSlot::new(0, t(7), t(8), SlotKind::Ceremony).with_label("FLAG"))
                    .with_slot(TimeSlot::instructional(1, t(8), t(9))),
            );
        let s = WeeklySchedule::empty(&grid);
        assert_eq!(s.cell("MON", 0, "A"), Some(&ScheduleCell::blocked("FLAG")));
        assert_eq!(s.cell("MON", 1, "A"), Some(&ScheduleCell::Empty));
    }

    #[test]
    fn test_missing_cells_are_absent() {
        let mut s = sample_schedule();
        assert!(s.cell("SUN", 1, "A").is_none());
        assert!(s.cell("MON", 99, "A").is_none());
        assert!(s.cell("MON", 1, "Z").is_none());
        assert!(!s.set_cell("SUN", 1, "A", ScheduleCell::Empty));
        assert!(!s.is_teacher_busy("SUN", 1, 1));
        assert_eq!(s.hours_on_day("SUN", "A", "MTK"), 0);
    }

    #[test]
    fn test_with_cell_is_functional() {
        let s = sample_schedule();
        let next = s.with_cell("MON", 3, "B", ScheduleCell::blocked("Manual"));
        assert!(s.cell("MON", 3, "B").unwrap().is_empty());
        assert!(next.cell("MON", 3, "B").unwrap().is_blocked());
    }

    #[test]
    fn test_counting_queries() {
        let s = sample_schedule();
        assert_eq!(s.placed_hours(1, "MTK", "A"), 2);
        assert_eq!(s.placed_hours(1, "MTK", "B"), 0);
        assert_eq!(s.hours_on_day("MON", "A", "MTK"), 2);
        assert_eq!(s.teacher_hours_on_day("MON", 1, "MTK", "A"), 2);
        assert_eq!(s.teacher_hours_on_day("MON", 2, "MTK", "A"), 0);
        assert_eq!(s.lessons().count(), 3);
    }

    #[test]
    fn test_teacher_presence() {
        let s = sample_schedule();
        assert!(s.is_teacher_busy("MON", 1, 1));
        assert!(!s.is_teacher_busy("MON", 3, 1));
        assert!(s.teacher_teaches_class_on("MON", 1, "A"));
        assert!(!s.teacher_teaches_class_on("MON", 1, "B"));
        assert!(s.teacher_teaches_class_on("TUE", 1, "B"));
    }

    #[test]
    fn test_clear_teacher_subject() {
        let mut s = sample_schedule();
        assert_eq!(s.clear_teacher_subject(1, "MTK"), 2);
        assert_eq!(s.placed_hours(1, "MTK", "A"), 0);
        assert_eq!(s.placed_hours(1, "FIS", "B"), 1);
    }

    #[test]
    fn test_cell_serde_tagging() {
        let json = serde_json::to_value(ScheduleCell::Empty).unwrap();
        assert_eq!(json["type"], "EMPTY");

        let json = serde_json::to_value(ScheduleCell::blocked("RECESS")).unwrap();
        assert_eq!(json["type"], "BLOCKED");
        assert_eq!(json["reason"], "RECESS");

        let json = serde_json::to_value(lesson("MTK")).unwrap();
        assert_eq!(json["type"], "CLASS");
        assert_eq!(json["teacher_id"], 1);

        let back: ScheduleCell = serde_json::from_value(json).unwrap();
        assert_eq!(back, lesson("MTK"));
    }

    #[test]
    fn test_schedule_serde_shape() {
        let s = sample_schedule();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["MON"]["1"]["A"]["subject_code"], "MTK");
        let back: WeeklySchedule = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }
}
