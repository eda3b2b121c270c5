//! Block splitting and daily load limits.
//!
//! # Block Splitting
//!
//! A weekly total is cut into daily blocks. Declared split options whose
//! sum matches the total win (one chosen uniformly at random); otherwise
//! a built-in table applies:
//!
//! | Total | Blocks |
//! |-------|--------|
//! | 10 | 4+4+2 |
//! | 8 | 4+4 |
//! | 7 | 4+3 |
//! | 6 | 3+3 |
//! | 5 | 3+2 |
//! | 4 | 2+2 |
//! | 3 | 2+1 |
//! | 2 | 2 |
//! | 1 | 1 |
//! | other | single block |
//!
//! # Daily Limit
//!
//! The most hours of one subject a class may receive on one day. With
//! declared options the limit is the largest block across *all* of them
//! (matching the total or not). Otherwise:
//!
//! | Total | Limit |
//! |-------|-------|
//! | ≥ 6 | 4 |
//! | 5 | 3 |
//! | 3, 4 | 2 |
//! | other | total |
//!
//! The same limit drives placement, conflict detection, and manual-edit
//! options. Earlier manual-edit checks used a stricter default (≥ 6 → 3);
//! that table is no longer applied anywhere.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::{SplitOption, SplitPreferences};

/// Built-in blocks for a total when no declared option applies.
pub fn default_blocks(total: u32) -> Vec<u32> {
    match total {
        0 => Vec::new(),
        10 => vec![4, 4, 2],
        8 => vec![4, 4],
        7 => vec![4, 3],
        6 => vec![3, 3],
        5 => vec![3, 2],
        4 => vec![2, 2],
        3 => vec![2, 1],
        other => vec![other],
    }
}

/// Declared options for `subject_code` that cut exactly `total` hours.
pub fn valid_options<'a>(
    total: u32,
    subject_code: &str,
    preferences: &'a SplitPreferences,
) -> Vec<&'a SplitOption> {
    preferences
        .options_for(subject_code)
        .iter()
        .filter(|opt| opt.is_valid_for(total))
        .collect()
}

/// Cuts `total` weekly hours of a subject into daily blocks.
///
/// The blocks always sum to `total`. A total of 0 yields no blocks.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use timetable_fill::models::{SplitOption, SplitPreferences};
/// use timetable_fill::scheduler::split_hours;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let prefs = SplitPreferences::new();
/// assert_eq!(split_hours(3, "MTK", &prefs, &mut rng), vec![2, 1]);
///
/// let prefs = prefs.with_options("MTK", vec![SplitOption::parse("4+3").unwrap()]);
/// assert_eq!(split_hours(7, "MTK", &prefs, &mut rng), vec![4, 3]);
/// ```
pub fn split_hours<R: Rng + ?Sized>(
    total: u32,
    subject_code: &str,
    preferences: &SplitPreferences,
    rng: &mut R,
) -> Vec<u32> {
    let candidates = valid_options(total, subject_code, preferences);
    match candidates.choose(rng) {
        Some(option) => option.blocks().to_vec(),
        None => default_blocks(total),
    }
}

/// Most hours of `subject_code` one class may receive on a single day.
pub fn max_daily_hours(subject_code: &str, total: u32, preferences: &SplitPreferences) -> u32 {
    let declared_max = preferences
        .options_for(subject_code)
        .iter()
        .map(SplitOption::max_block)
        .max()
        .unwrap_or(0);

    if declared_max > 0 {
        return declared_max;
    }
    default_daily_limit(total)
}

fn default_daily_limit(total: u32) -> u32 {
    match total {
        t if t >= 6 => 4,
        5 => 3,
        3 | 4 => 2,
        other => other,
    }
}
