//! Timetable configuration loading.
//!
//! A [`TimetableConfig`] bundles everything the fill engine reads but
//! never writes: the time grid, the teacher roster, off constraints, and
//! split preferences. Configurations are JSON documents; loading parses
//! and then validates them.
//!
//! ```json
//! {
//!   "grid": { "days": [...], "classes": ["X A", "X B"] },
//!   "teachers": [...],
//!   "off_constraints": { "1-MTH": { "blocked_days": ["SATURDAY"] } },
//!   "split_preferences": { "MTH": ["4+3", "3+4"] }
//! }
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{OffConstraints, SplitPreferences, Teacher, TimeGrid, WeeklySchedule};
use crate::validation::{validate_config, ValidationError};

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not a valid configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration parsed but failed validation.
    #[error("invalid configuration: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Grid, roster, and placement settings for one school.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimetableConfig {
    /// Days, periods, and classes.
    pub grid: TimeGrid,
    /// Teacher roster.
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    /// Unavailable days and periods per (teacher, subject).
    #[serde(default)]
    pub off_constraints: OffConstraints,
    /// Allowed block splits per subject code.
    #[serde(default)]
    pub split_preferences: SplitPreferences,
}

impl TimetableConfig {
    /// Creates a configuration with no teachers or settings.
    pub fn new(grid: TimeGrid) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Sets the off constraints.
    pub fn with_off_constraints(mut self, off_constraints: OffConstraints) -> Self {
        self.off_constraints = off_constraints;
        self
    }

    /// Sets the split preferences.
    pub fn with_split_preferences(mut self, split_preferences: SplitPreferences) -> Self {
        self.split_preferences = split_preferences;
        self
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        debug!(
            "loaded configuration: {} days, {} classes, {} teachers",
            config.grid.days.len(),
            config.grid.classes.len(),
            config.teachers.len()
        );
        Ok(config)
    }

    /// Reads, parses, and validates a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Runs [`validate_config`] on this configuration.
    pub fn validate(&self) -> Result<()> {
        validate_config(&self.grid, &self.teachers, &self.split_preferences).map_err(|errors| {
            for e in &errors {
                warn!("{e}");
            }
            ConfigError::Invalid(errors)
        })
    }

    /// Fresh schedule for the configured grid.
    pub fn empty_schedule(&self) -> WeeklySchedule {
        WeeklySchedule::empty(&self.grid)
    }
}
