//! Fill progress: required versus placed hours.
//!
//! Placement is best-effort and reports nothing about unplaced blocks, so
//! callers recompute progress from the schedule itself. The same
//! per-class deficits drive step one of the fill engine.

use serde::{Deserialize, Serialize};

use crate::models::{ClassName, SubjectLoad, WeeklySchedule};

/// Outstanding hours for one (teacher, subject, class) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deficit {
    /// Class owed the hours.
    pub class: ClassName,
    /// Required weekly hours.
    pub required: u32,
    /// Hours already in the schedule.
    pub placed: u32,
}

impl Deficit {
    /// Hours still to place.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.required.saturating_sub(self.placed)
    }
}

/// Classes of `subject` whose placed hours fall short of the requirement.
///
/// Deficits follow the order of `classes` (the grid's class order); loads
/// naming a class outside it are ignored. Only classes with a nonzero load
/// are considered. With `target_load`, only classes whose load equals it
/// exactly.
pub fn deficits(
    schedule: &WeeklySchedule,
    classes: &[ClassName],
    teacher_id: u32,
    subject: &SubjectLoad,
    target_load: Option<u32>,
) -> Vec<Deficit> {
    classes
        .iter()
        .map(|class| (class, subject.load_for(class.as_str())))
        .filter(|&(_, required)| required > 0)
        .filter(|&(_, required)| target_load.map_or(true, |target| required == target))
        .filter_map(|(class, required)| {
            let placed = schedule.placed_hours(teacher_id, &subject.code, class.as_str());
            (placed < required).then(|| Deficit {
                class: class.clone(),
                required,
                placed,
            })
        })
        .collect()
}

/// Aggregate progress for one (teacher, subject, target load) selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillProgress {
    /// Classes matching the selection.
    pub classes: u32,
    /// Required hours across matching classes.
    pub required: u32,
    /// Placed hours across matching classes.
    pub placed: u32,
}

impl FillProgress {
    /// Computes progress from a schedule.
    ///
    /// Over-placed classes count their real placed hours, so `placed`
    /// may exceed `required` after manual edits. Totals saturate at
    /// `u32::MAX`.
    pub fn calculate(
        schedule: &WeeklySchedule,
        teacher_id: u32,
        subject: &SubjectLoad,
        target_load: Option<u32>,
    ) -> Self {
        subject
            .taught_classes()
            .filter(|&(_, required)| target_load.map_or(true, |target| required == target))
            .fold(Self::default(), |acc, (class, required)| Self {
                classes: acc.classes.saturating_add(1),
                required: acc.required.saturating_add(required),
                placed: acc
                    .placed
                    .saturating_add(schedule.placed_hours(teacher_id, &subject.code, class.as_str())),
            })
    }

    /// Hours still to place.
    pub fn remaining(&self) -> u32 {
        self.required.saturating_sub(self.placed)
    }

    /// Whether every matching class is fully placed.
    pub fn is_complete(&self) -> bool {
        self.placed >= self.required
    }

    /// Placed fraction (0.0..=1.0); 1.0 when nothing is required.
    pub fn ratio(&self) -> f64 {
        if self.required == 0 {
            1.0
        } else {
            (self.placed as f64 / self.required as f64).min(1.0)
        }
    }
}
