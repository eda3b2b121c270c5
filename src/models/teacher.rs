//! Teacher roster model.
//!
//! A teacher carries one or more subject loads. Each load states how many
//! weekly instructional hours the teacher owes a class in that subject.
//!
//! # Load Semantics
//! A class absent from `load` and a class mapped to `0` are equivalent:
//! the teacher does not teach that subject to that class.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ClassName;

/// A teacher and the subjects they teach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Stable identifier; the join key referenced by schedule cells.
    pub id: u32,
    /// Full name.
    pub name: String,
    /// Short code shown in timetable cells.
    pub code: String,
    /// Staff registration number.
    #[serde(default)]
    pub nip: String,
    /// Civil-service rank.
    #[serde(default)]
    pub rank: String,
    /// Pay group.
    #[serde(default)]
    pub group: String,
    /// Non-teaching assignment (e.g. homeroom, lab head).
    #[serde(default)]
    pub additional_task: String,
    /// Hours credited for `additional_task`.
    #[serde(default)]
    pub additional_hours: u32,
    /// Subject loads, in display order.
    #[serde(default)]
    pub subjects: Vec<SubjectLoad>,
}

/// Weekly teaching requirement for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectLoad {
    /// Record identifier.
    #[serde(default)]
    pub id: String,
    /// Subject display name.
    pub name: String,
    /// Subject code (unique per teacher).
    pub code: String,
    /// Presentation color hint, passed through to cells untouched.
    #[serde(default)]
    pub color: String,
    /// Required weekly hours per class.
    #[serde(default)]
    pub load: BTreeMap<ClassName, u32>,
}

impl Teacher {
    /// Creates a teacher with no subjects.
    pub fn new(id: u32, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: code.into(),
            nip: String::new(),
            rank: String::new(),
            group: String::new(),
            additional_task: String::new(),
            additional_hours: 0,
            subjects: Vec::new(),
        }
    }

    /// Adds a subject load.
    pub fn with_subject(mut self, subject: SubjectLoad) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Sets the non-teaching assignment and its credited hours.
    pub fn with_additional_task(mut self, task: impl Into<String>, hours: u32) -> Self {
        self.additional_task = task.into();
        self.additional_hours = hours;
        self
    }

    /// Finds a subject by code.
    pub fn subject(&self, code: &str) -> Option<&SubjectLoad> {
        self.subjects.iter().find(|s| s.code == code)
    }

    /// Total weekly teaching hours across all subjects and classes.
    pub fn teaching_hours(&self) -> u32 {
        self.subjects.iter().map(|s| s.total_hours()).sum()
    }
}

impl SubjectLoad {
    /// Creates a subject with no load.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            id: code.clone(),
            name: name.into(),
            code,
            color: String::new(),
            load: BTreeMap::new(),
        }
    }

    /// Sets the record identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the color hint.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the weekly hours owed to a class.
    pub fn with_load(mut self, class: impl Into<ClassName>, hours: u32) -> Self {
        self.load.insert(class.into(), hours);
        self
    }

    /// Weekly hours owed to a class (0 when absent).
    pub fn load_for(&self, class: &str) -> u32 {
        self.load.get(class).copied().unwrap_or(0)
    }

    /// Classes with a nonzero requirement, in class order.
    pub fn taught_classes(&self) -> impl Iterator<Item = (&ClassName, u32)> {
        self.load
            .iter()
            .filter(|&(_, &hours)| hours > 0)
            .map(|(class, &hours)| (class, hours))
    }

    /// Sum of weekly hours across classes.
    pub fn total_hours(&self) -> u32 {
        self.load.values().sum()
    }
}
