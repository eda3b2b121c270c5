//! Candidate lessons for a manually edited cell.

use serde::{Deserialize, Serialize};

use crate::models::{ScheduleCell, SplitPreferences, Teacher, WeeklySchedule};
use crate::scheduler::max_daily_hours;

/// A lesson an administrator may put into a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellOption {
    /// Teacher id.
    pub teacher_id: u32,
    /// Teacher short code.
    pub teacher_code: String,
    /// Subject code.
    pub subject_code: String,
    /// Weekly hours still owed to the class.
    pub remaining: u32,
    /// Hours of this (teacher, subject) already in the class on the day.
    pub used_on_day: u32,
    /// Daily limit for the subject's weekly load.
    pub max_daily: u32,
    /// Whether `used_on_day` already reaches `max_daily`.
    pub max_reached: bool,
    /// The cell to write when chosen.
    pub cell: ScheduleCell,
}

impl CellOption {
    /// Whether choosing this option keeps the day within its limit.
    pub fn is_selectable(&self) -> bool {
        !self.max_reached
    }
}

/// Lessons that could fill a cell of `class` on `day`.
///
/// Lists every (teacher, subject) with a nonzero load in the class and
/// hours still outstanding, in roster order. Options at their daily
/// limit are included but marked `max_reached`.
pub fn cell_options(
    schedule: &WeeklySchedule,
    teachers: &[Teacher],
    preferences: &SplitPreferences,
    day: &str,
    class: &str,
) -> Vec<CellOption> {
    let mut options = Vec::new();
    for teacher in teachers {
        for subject in &teacher.subjects {
            let total = subject.load_for(class);
            if total == 0 {
                continue;
            }
            let placed = schedule.placed_hours(teacher.id, &subject.code, class);
            if placed >= total {
                continue;
            }
            let used_on_day = schedule.teacher_hours_on_day(day, teacher.id, &subject.code, class);
            let max_daily = max_daily_hours(&subject.code, total, preferences);
            options.push(CellOption {
                teacher_id: teacher.id,
                teacher_code: teacher.code.clone(),
                subject_code: subject.code.clone(),
                remaining: total - placed,
                used_on_day,
                max_daily,
                max_reached: used_on_day >= max_daily,
                cell: ScheduleCell::class(teacher, subject),
            });
        }
    }
    options
}
