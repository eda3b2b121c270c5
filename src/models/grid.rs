//! Weekly time grid.
//!
//! Defines the fixed weekly structure the timetable is built on: days,
//! each holding an ordered list of time slots, plus the closed set of
//! classes being timetabled.
//!
//! # Instructional Periods
//! A slot takes part in placement iff its kind is
//! [`SlotKind::Instructional`] AND its period number is non-negative.
//! Negative periods always denote breaks and never carry schedule cells.
//! Non-negative slots of any other kind carry BLOCKED cells.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Classification of a time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotKind {
    /// Regular teaching period.
    Instructional,
    /// Recess between periods.
    Break,
    /// Flag ceremony or assembly.
    Ceremony,
    /// Religious activity.
    Religious,
    /// Physical exercise session.
    Exercise,
}

impl SlotKind {
    /// Upper-case label used as the default block reason.
    pub fn label(&self) -> &'static str {
        match self {
            SlotKind::Instructional => "INSTRUCTIONAL",
            SlotKind::Break => "BREAK",
            SlotKind::Ceremony => "CEREMONY",
            SlotKind::Religious => "RELIGIOUS",
            SlotKind::Exercise => "EXERCISE",
        }
    }
}

/// A single slot in a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Period number. Negative = non-instructional break.
    pub period: i32,
    /// Slot start (time of day).
    pub start: NaiveTime,
    /// Slot end (time of day).
    pub end: NaiveTime,
    /// Slot classification.
    pub kind: SlotKind,
    /// Display label (e.g. "RECESS"). Presentation only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl TimeSlot {
    /// Creates a slot of the given kind.
    pub fn new(period: i32, start: NaiveTime, end: NaiveTime, kind: SlotKind) -> Self {
        Self {
            period,
            start,
            end,
            kind,
            label: None,
        }
    }

    /// Creates an instructional slot.
    pub fn instructional(period: i32, start: NaiveTime, end: NaiveTime) -> Self {
        Self::new(period, start, end, SlotKind::Instructional)
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether automatic placement may use this slot.
    #[inline]
    pub fn is_instructional(&self) -> bool {
        self.period >= 0 && self.kind == SlotKind::Instructional
    }

    /// Whether this slot owns a row of schedule cells.
    #[inline]
    pub fn has_cells(&self) -> bool {
        self.period >= 0
    }

    /// Slot length in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Reason recorded in BLOCKED cells created for this slot.
    pub fn block_reason(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.kind.label().to_string())
    }
}

/// A named day with its ordered slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Day identifier (e.g. "MONDAY").
    pub name: String,
    /// Slots in chronological order.
    pub slots: Vec<TimeSlot>,
}

impl Day {
    /// Creates a day with no slots.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
        }
    }

    /// Appends a slot.
    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Instructional periods in chronological order.
    ///
    /// Consecutive entries of this list are treated as adjacent for block
    /// placement, even when a break separates them on the clock.
    pub fn instructional_periods(&self) -> Vec<i32> {
        self.slots
            .iter()
            .filter(|s| s.is_instructional())
            .map(|s| s.period)
            .collect()
    }

    /// Finds the slot for a period number.
    pub fn slot(&self, period: i32) -> Option<&TimeSlot> {
        self.slots.iter().find(|s| s.period == period)
    }
}

/// Class identifier (e.g. "X TSM").
///
/// The set of classes is closed and supplied by the [`TimeGrid`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassName(String);

impl ClassName {
    /// Creates a class name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrowed name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ClassName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ClassName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Most periods [`TimeGrid::uniform`] lays out per day (07:00 to 23:45).
pub const MAX_UNIFORM_PERIODS: u32 = 22;

/// The weekly structure: days and classes.
///
/// Days need not share the same slot layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeGrid {
    /// Days in week order.
    pub days: Vec<Day>,
    /// Classes being timetabled.
    pub classes: Vec<ClassName>,
}

impl TimeGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a day.
    pub fn with_day(mut self, day: Day) -> Self {
        self.days.push(day);
        self
    }

    /// Appends a class.
    pub fn with_class(mut self, class: impl Into<ClassName>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Builds a grid where every day has the same layout.
    ///
    /// Each day holds `periods_per_day` 45-minute instructional periods
    /// (numbered from 1) starting at 07:00. When `break_after` is set, a
    /// 15-minute break (period `-1`) follows that period. The day must end
    /// before midnight, so `periods_per_day` is clamped to
    /// [`MAX_UNIFORM_PERIODS`].
    ///
    /// # Example
    ///
    /// ```
    /// use timetable_fill::models::TimeGrid;
    ///
    /// let grid = TimeGrid::uniform(&["MONDAY", "TUESDAY"], 8, Some(4), &["X A", "X B"]);
    /// assert_eq!(grid.days.len(), 2);
    /// assert_eq!(grid.days[0].slots.len(), 9);
    /// assert_eq!(grid.days[0].instructional_periods(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    /// ```
    pub fn uniform(
        day_names: &[&str],
        periods_per_day: u32,
        break_after: Option<u32>,
        classes: &[&str],
    ) -> Self {
        let period_len = Duration::minutes(45);
        let break_len = Duration::minutes(15);
        let day_start = NaiveTime::MIN + Duration::hours(7);
        let periods_per_day = periods_per_day.min(MAX_UNIFORM_PERIODS);

        let days = day_names
            .iter()
            .map(|name| {
                let mut day = Day::new(*name);
                let mut clock = day_start;
                for period in 1..=periods_per_day {
                    let end = clock + period_len;
                    day.slots
                        .push(TimeSlot::instructional(period as i32, clock, end));
                    clock = end;
                    if break_after == Some(period) && period < periods_per_day {
                        let end = clock + break_len;
                        day.slots.push(
                            TimeSlot::new(-1, clock, end, SlotKind::Break).with_label("RECESS"),
                        );
                        clock = end;
                    }
                }
                day
            })
            .collect();

        Self {
            days,
            classes: classes.iter().map(|c| ClassName::from(*c)).collect(),
        }
    }

    /// Finds a day by name.
    pub fn day(&self, name: &str) -> Option<&Day> {
        self.days.iter().find(|d| d.name == name)
    }

    /// Day names in week order.
    pub fn day_names(&self) -> Vec<&str> {
        self.days.iter().map(|d| d.name.as_str()).collect()
    }

    /// Whether the class belongs to this grid.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c.as_str() == class)
    }
}
