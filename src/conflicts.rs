//! Conflict detection for manually edited schedules.
//!
//! Scans a schedule for three rule violations and maps every affected
//! (day, period, class) slot to human-readable messages:
//!
//! - **Time clash**: one teacher in more than one class in the same
//!   period. Every class involved is flagged.
//! - **Subject mismatch**: within one (day, class), one teacher recorded
//!   under more than one subject code. All that teacher's periods in the
//!   class that day are flagged.
//! - **Daily load exceeded**: within one (day, class), a (teacher,
//!   subject) pair holds more periods than [`max_daily_hours`] allows for
//!   its weekly load. All contributing periods are flagged.
//!
//! Findings are advisory data, never errors. Periods below zero are
//! ignored. Messages for one slot appear in the order above.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::models::{ClassName, DayRows, SplitPreferences, Teacher, WeeklySchedule};
use crate::scheduler::max_daily_hours;

/// A (day, period, class) cell address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    /// Day name.
    pub day: String,
    /// Period number.
    pub period: i32,
    /// Class name.
    pub class: ClassName,
}

impl SlotKey {
    /// Creates a slot key.
    pub fn new(day: impl Into<String>, period: i32, class: impl Into<ClassName>) -> Self {
        Self {
            day: day.into(),
            period,
            class: class.into(),
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.day, self.period, self.class)
    }
}

/// Rule a conflict violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    /// Teacher in two classes at once.
    TimeClash,
    /// Teacher under two subjects in one class on one day.
    SubjectMismatch,
    /// Too many periods of one subject on one day.
    DailyLoadExceeded,
}

/// One violation at one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Violated rule.
    pub kind: ConflictKind,
    /// Display message.
    pub message: String,
}

impl Conflict {
    fn new(kind: ConflictKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Conflicts by slot. Slots without conflicts are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictMap {
    entries: BTreeMap<SlotKey, Vec<Conflict>>,
}

impl ConflictMap {
    /// Conflicts at a slot (empty if none).
    pub fn get(&self, key: &SlotKey) -> &[Conflict] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Messages at a slot, in rule order.
    pub fn messages(&self, key: &SlotKey) -> Vec<&str> {
        self.get(key).iter().map(|c| c.message.as_str()).collect()
    }

    /// Whether a slot has any conflict.
    pub fn is_conflicted(&self, key: &SlotKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether a slot has a conflict of `kind`.
    pub fn has_kind(&self, key: &SlotKey, kind: ConflictKind) -> bool {
        self.get(key).iter().any(|c| c.kind == kind)
    }

    /// Number of conflicted slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no slot is conflicted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over conflicted slots in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&SlotKey, &[Conflict])> {
        self.entries.iter().map(|(k, v)| (k, v.as_slice()))
    }

    fn add(&mut self, key: SlotKey, conflict: Conflict) {
        self.entries.entry(key).or_default().push(conflict);
    }
}

/// Computes every conflict in `schedule`.
///
/// Daily limits come from [`max_daily_hours`], the same rule the fill
/// engine places by. Lessons whose (teacher, subject) has no load in the
/// class are not checked for daily load.
///
/// # Example
///
/// ```
/// use timetable_fill::conflicts::{detect_conflicts, SlotKey};
/// use timetable_fill::models::{ScheduleCell, SplitPreferences, SubjectLoad, Teacher, TimeGrid, WeeklySchedule};
///
/// let teacher = Teacher::new(1, "Rina", "RN")
///     .with_subject(SubjectLoad::new("MTH", "Mathematics").with_load("X", 4).with_load("Y", 4));
/// let lesson = ScheduleCell::class(&teacher, &teacher.subjects[0]);
/// let grid = TimeGrid::uniform(&["MON"], 8, None, &["X", "Y"]);
/// let schedule = WeeklySchedule::empty(&grid)
///     .with_cell("MON", 3, "X", lesson.clone())
///     .with_cell("MON", 3, "Y", lesson);
///
/// let conflicts = detect_conflicts(&schedule, &[teacher], &SplitPreferences::new());
/// assert!(conflicts.is_conflicted(&SlotKey::new("MON", 3, "X")));
/// assert!(conflicts.is_conflicted(&SlotKey::new("MON", 3, "Y")));
/// ```
pub fn detect_conflicts(
    schedule: &WeeklySchedule,
    teachers: &[Teacher],
    preferences: &SplitPreferences,
) -> ConflictMap {
    let mut map = ConflictMap::default();
    for (day, rows) in schedule.days() {
        detect_time_clashes(day, rows, &mut map);
    }
    for (day, rows) in schedule.days() {
        detect_class_day_conflicts(day, rows, teachers, preferences, &mut map);
    }
    map
}

fn detect_time_clashes(day: &str, rows: &DayRows, map: &mut ConflictMap) {
    for (&period, row) in rows.range(0_i32..) {
        // teacher id → (code, classes)
        let mut locations: BTreeMap<u32, (&str, Vec<&ClassName>)> = BTreeMap::new();
        for (class, cell) in row {
            if let Some(lesson) = cell.as_class() {
                locations
                    .entry(lesson.teacher_id)
                    .or_insert_with(|| (lesson.teacher_code.as_str(), Vec::new()))
                    .1
                    .push(class);
            }
        }

        for (teacher_code, classes) in locations.values() {
            if classes.len() < 2 {
                continue;
            }
            for &class in classes {
                let others = classes
                    .iter()
                    .filter(|&&other| other != class)
                    .map(|other| other.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                map.add(
                    SlotKey::new(day, period, class.clone()),
                    Conflict::new(
                        ConflictKind::TimeClash,
                        format!("Time clash: {teacher_code} is also teaching {others}"),
                    ),
                );
            }
        }
    }
}

#[derive(Default)]
struct TeacherDay<'a> {
    code: &'a str,
    subjects: BTreeSet<&'a str>,
    periods: Vec<i32>,
}

#[derive(Default)]
struct ClassDay<'a> {
    by_teacher: BTreeMap<u32, TeacherDay<'a>>,
    by_pair: BTreeMap<(u32, &'a str), Vec<i32>>,
}

fn detect_class_day_conflicts(
    day: &str,
    rows: &DayRows,
    teachers: &[Teacher],
    preferences: &SplitPreferences,
    map: &mut ConflictMap,
) {
    let mut classes: BTreeMap<&ClassName, ClassDay<'_>> = BTreeMap::new();
    for (&period, row) in rows.range(0_i32..) {
        for (class, cell) in row {
            let Some(lesson) = cell.as_class() else {
                continue;
            };
            let entry = classes.entry(class).or_default();
            let teacher_day = entry.by_teacher.entry(lesson.teacher_id).or_default();
            teacher_day.code = lesson.teacher_code.as_str();
            teacher_day.subjects.insert(lesson.subject_code.as_str());
            teacher_day.periods.push(period);
            entry
                .by_pair
                .entry((lesson.teacher_id, lesson.subject_code.as_str()))
                .or_default()
                .push(period);
        }
    }

    for (class, class_day) in &classes {
        for teacher_day in class_day.by_teacher.values() {
            if teacher_day.subjects.len() < 2 {
                continue;
            }
            let subjects = teacher_day
                .subjects
                .iter()
                .copied()
                .collect::<Vec<_>>()
                .join(" & ");
            for &period in &teacher_day.periods {
                map.add(
                    SlotKey::new(day, period, (*class).clone()),
                    Conflict::new(
                        ConflictKind::SubjectMismatch,
                        format!(
                            "Subject clash: {} teaches different subjects ({subjects}) in this class today",
                            teacher_day.code
                        ),
                    ),
                );
            }
        }

        for (&(teacher_id, subject_code), periods) in &class_day.by_pair {
            let weekly = teachers
                .iter()
                .find(|t| t.id == teacher_id)
                .and_then(|t| t.subject(subject_code))
                .map_or(0, |s| s.load_for(class.as_str()));
            if weekly == 0 {
                continue;
            }
            let max = max_daily_hours(subject_code, weekly, preferences);
            let count = periods.len() as u32;
            if count <= max {
                continue;
            }
            for &period in periods {
                map.add(
                    SlotKey::new(day, period, (*class).clone()),
                    Conflict::new(
                        ConflictKind::DailyLoadExceeded,
                        format!("Daily load exceeded: {count} periods today (max {max})"),
                    ),
                );
            }
        }
    }
}
