//! Input validation for timetable configuration.
//!
//! Checks structural integrity of the grid, roster, and split
//! preferences before filling. Detects:
//! - Duplicate teacher IDs
//! - Duplicate day names and duplicate periods within a day
//! - Duplicate subject codes within one teacher
//! - Loads naming a class outside the grid
//! - Split options with a zero-sized block or an overflowing sum
//!
//! The fill engine tolerates all of these (it treats missing cells as
//! absent), but the results are rarely what the administrator intended.

use std::collections::HashSet;
use std::fmt;

use crate::models::{SplitPreferences, Teacher, TimeGrid};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// Two days share a name.
    DuplicateDay,
    /// A day lists the same period twice.
    DuplicatePeriod,
    /// A teacher lists the same subject code twice.
    DuplicateSubject,
    /// A load entry references a class that doesn't exist.
    UnknownClass,
    /// A split option contains a block of size 0.
    InvalidSplit,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a timetable configuration.
///
/// Checks:
/// 1. No duplicate day names
/// 2. No duplicate periods within a day
/// 3. No duplicate teacher IDs
/// 4. No duplicate subject codes within a teacher
/// 5. All load entries name a class of the grid
/// 6. No split option contains a zero-sized block or overflows when summed
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(
    grid: &TimeGrid,
    teachers: &[Teacher],
    preferences: &SplitPreferences,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut day_names = HashSet::new();
    for day in &grid.days {
        if !day_names.insert(day.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateDay,
                format!("Duplicate day: {}", day.name),
            ));
        }

        let mut periods = HashSet::new();
        for slot in &day.slots {
            if !periods.insert(slot.period) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicatePeriod,
                    format!("Day '{}' lists period {} twice", day.name, slot.period),
                ));
            }
        }
    }

    let mut teacher_ids = HashSet::new();
    for teacher in teachers {
        if !teacher_ids.insert(teacher.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", teacher.id),
            ));
        }

        let mut codes = HashSet::new();
        for subject in &teacher.subjects {
            if !codes.insert(subject.code.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateSubject,
                    format!(
                        "Teacher '{}' lists subject '{}' twice",
                        teacher.code, subject.code
                    ),
                ));
            }

            for (class, _) in subject.taught_classes() {
                if !grid.has_class(class.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownClass,
                        format!(
                            "Teacher '{}' subject '{}' references unknown class '{}'",
                            teacher.code, subject.code, class
                        ),
                    ));
                }
            }
        }
    }

    for (code, options) in preferences.iter() {
        for option in options {
            if option.blocks().contains(&0) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidSplit,
                    format!("Split option '{option}' for '{code}' has an empty block"),
                ));
            }
            if option.checked_sum().is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidSplit,
                    format!("Split option '{option}' for '{code}' sums past the hour limit"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
