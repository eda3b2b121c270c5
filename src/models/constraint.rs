//! Placement constraints and split preferences.
//!
//! Two kinds of administrator-supplied configuration steer the fill
//! engine:
//!
//! - [`OffConstraint`]: days or periods a (teacher, subject) pair must
//!   never be placed on.
//! - [`SplitOption`]: an allowed way of cutting a weekly total into daily
//!   blocks (e.g. "4+3" for a 7-hour subject), grouped per subject code
//!   in [`SplitPreferences`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unavailable days and periods for one (teacher, subject) pair.
///
/// A day listed in `blocked_days` is unavailable as a whole, regardless
/// of `blocked_periods`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffConstraint {
    /// Fully unavailable days.
    #[serde(default)]
    pub blocked_days: BTreeSet<String>,
    /// Unavailable periods per day.
    #[serde(default)]
    pub blocked_periods: BTreeMap<String, BTreeSet<i32>>,
}

impl OffConstraint {
    /// Creates an unrestricted constraint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks a whole day.
    pub fn with_blocked_day(mut self, day: impl Into<String>) -> Self {
        self.blocked_days.insert(day.into());
        self
    }

    /// Blocks one period of a day.
    pub fn with_blocked_period(mut self, day: impl Into<String>, period: i32) -> Self {
        self.blocked_periods
            .entry(day.into())
            .or_default()
            .insert(period);
        self
    }

    /// Whether the whole day is unavailable.
    pub fn blocks_day(&self, day: &str) -> bool {
        self.blocked_days.contains(day)
    }

    /// Whether a period is unavailable (day-level blocks included).
    pub fn blocks_period(&self, day: &str, period: i32) -> bool {
        self.blocks_day(day)
            || self
                .blocked_periods
                .get(day)
                .is_some_and(|periods| periods.contains(&period))
    }

    /// Whether nothing is blocked.
    pub fn is_empty(&self) -> bool {
        self.blocked_days.is_empty() && self.blocked_periods.values().all(|p| p.is_empty())
    }
}

/// Off constraints keyed by `"teacherId-subjectCode"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OffConstraints {
    constraints: BTreeMap<String, OffConstraint>,
}

impl OffConstraints {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup key for a (teacher, subject) pair.
    pub fn key(teacher_id: u32, subject_code: &str) -> String {
        format!("{teacher_id}-{subject_code}")
    }

    /// Sets the constraint for a pair, replacing any previous one.
    pub fn insert(&mut self, teacher_id: u32, subject_code: &str, constraint: OffConstraint) {
        self.constraints
            .insert(Self::key(teacher_id, subject_code), constraint);
    }

    /// Builder: sets a constraint and returns self.
    pub fn with_constraint(
        mut self,
        teacher_id: u32,
        subject_code: &str,
        constraint: OffConstraint,
    ) -> Self {
        self.insert(teacher_id, subject_code, constraint);
        self
    }

    /// Constraint for a pair, if any.
    pub fn get(&self, teacher_id: u32, subject_code: &str) -> Option<&OffConstraint> {
        self.constraints.get(&Self::key(teacher_id, subject_code))
    }

    /// Flips a whole-day block. Returns `true` if the day is now blocked.
    pub fn toggle_day(&mut self, teacher_id: u32, subject_code: &str, day: &str) -> bool {
        let entry = self
            .constraints
            .entry(Self::key(teacher_id, subject_code))
            .or_default();
        if entry.blocked_days.remove(day) {
            false
        } else {
            entry.blocked_days.insert(day.to_string());
            true
        }
    }

    /// Flips a single-period block. Returns `true` if the period is now blocked.
    pub fn toggle_period(
        &mut self,
        teacher_id: u32,
        subject_code: &str,
        day: &str,
        period: i32,
    ) -> bool {
        let periods = self
            .constraints
            .entry(Self::key(teacher_id, subject_code))
            .or_default()
            .blocked_periods
            .entry(day.to_string())
            .or_default();
        if periods.remove(&period) {
            false
        } else {
            periods.insert(period);
            true
        }
    }

    /// Whether the pair may not be placed anywhere on `day`.
    pub fn is_day_blocked(&self, teacher_id: u32, subject_code: &str, day: &str) -> bool {
        self.get(teacher_id, subject_code)
            .is_some_and(|c| c.blocks_day(day))
    }

    /// Whether the pair may not be placed at (`day`, `period`).
    pub fn is_period_blocked(
        &self,
        teacher_id: u32,
        subject_code: &str,
        day: &str,
        period: i32,
    ) -> bool {
        self.get(teacher_id, subject_code)
            .is_some_and(|c| c.blocks_period(day, period))
    }

    /// Number of keyed constraints.
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Iterates over `(key, constraint)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OffConstraint)> {
        self.constraints.iter().map(|(k, c)| (k.as_str(), c))
    }
}

/// Error parsing a split option name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSplitError {
    /// The name was empty.
    #[error("split option name is empty")]
    Empty,
    /// A `+`-separated part was not a positive integer.
    #[error("invalid block size '{part}' in split option '{name}'")]
    InvalidBlock { name: String, part: String },
    /// The blocks add up to more than `u32::MAX` hours.
    #[error("split option '{name}' sums past {}", u32::MAX)]
    TooLarge { name: String },
}

/// A named way to cut a weekly total into daily blocks.
///
/// Serialized as its name (`"4+3"`). The special name `"DEFAULT"` carries
/// no blocks and is never valid for any total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SplitOption {
    name: String,
    blocks: Vec<u32>,
}

impl SplitOption {
    /// Name of the block-less placeholder option.
    pub const DEFAULT_NAME: &'static str = "DEFAULT";

    /// Options offered by the administration screen.
    const CATALOG: [&'static str; 15] = [
        "4+4+2", "4+4", "4+3", "3+4", "4+2", "3+3", "2+2+2", "3+2", "2+2", "5", "4", "3", "2",
        "1", "DEFAULT",
    ];

    /// Parses `"a+b+..."`, or `"DEFAULT"`.
    ///
    /// # Example
    ///
    /// ```
    /// use timetable_fill::models::SplitOption;
    ///
    /// let opt = SplitOption::parse("4+3").unwrap();
    /// assert_eq!(opt.blocks(), &[4, 3]);
    /// assert_eq!(opt.sum(), 7);
    /// assert!(SplitOption::parse("4+x").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self, ParseSplitError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseSplitError::Empty);
        }
        if name == Self::DEFAULT_NAME {
            return Ok(Self {
                name: name.to_string(),
                blocks: Vec::new(),
            });
        }

        let blocks = name
            .split('+')
            .map(|part| {
                let part = part.trim();
                match part.parse::<u32>() {
                    Ok(size) if size > 0 => Ok(size),
                    _ => Err(ParseSplitError::InvalidBlock {
                        name: name.to_string(),
                        part: part.to_string(),
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if checked_sum(&blocks).is_none() {
            return Err(ParseSplitError::TooLarge {
                name: name.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            blocks,
        })
    }

    /// Builds an option from block sizes; the name joins them with `+`.
    pub fn from_blocks(blocks: Vec<u32>) -> Self {
        let name = blocks
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join("+");
        Self { name, blocks }
    }

    /// The options the administration screen offers, in display order.
    pub fn catalog() -> Vec<SplitOption> {
        Self::CATALOG
            .iter()
            .filter_map(|name| Self::parse(name).ok())
            .collect()
    }

    /// Option name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Block sizes, in order.
    pub fn blocks(&self) -> &[u32] {
        &self.blocks
    }

    /// Sum of block sizes, saturating at `u32::MAX`.
    pub fn sum(&self) -> u32 {
        self.checked_sum().unwrap_or(u32::MAX)
    }

    /// Sum of block sizes, or `None` on overflow.
    pub fn checked_sum(&self) -> Option<u32> {
        checked_sum(&self.blocks)
    }

    /// Largest block, or 0 when there are no blocks.
    pub fn max_block(&self) -> u32 {
        self.blocks.iter().copied().max().unwrap_or(0)
    }

    /// Whether this option cuts exactly `total` hours.
    pub fn is_valid_for(&self, total: u32) -> bool {
        !self.blocks.is_empty() && self.checked_sum() == Some(total)
    }
}

fn checked_sum(blocks: &[u32]) -> Option<u32> {
    blocks.iter().try_fold(0u32, |acc, &b| acc.checked_add(b))
}

impl fmt::Display for SplitOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for SplitOption {
    type Err = ParseSplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SplitOption {
    type Error = ParseSplitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SplitOption> for String {
    fn from(option: SplitOption) -> Self {
        option.name
    }
}

/// Declared split options per subject code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitPreferences {
    options: BTreeMap<String, Vec<SplitOption>>,
}

impl SplitPreferences {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the options declared for a subject.
    pub fn set(&mut self, subject_code: impl Into<String>, options: Vec<SplitOption>) {
        self.options.insert(subject_code.into(), options);
    }

    /// Builder: declares options for a subject and returns self.
    pub fn with_options(mut self, subject_code: impl Into<String>, options: Vec<SplitOption>) -> Self {
        self.set(subject_code, options);
        self
    }

    /// Options declared for a subject (empty when none).
    pub fn options_for(&self, subject_code: &str) -> &[SplitOption] {
        self.options
            .get(subject_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any option is declared for a subject.
    pub fn has_options(&self, subject_code: &str) -> bool {
        !self.options_for(subject_code).is_empty()
    }

    /// Iterates over `(subject_code, options)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SplitOption])> {
        self.options
            .iter()
            .map(|(code, opts)| (code.as_str(), opts.as_slice()))
    }

    /// Number of subjects with declarations.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
