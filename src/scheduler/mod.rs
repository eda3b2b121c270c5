//! Slot filling: block splitting, daily limits, greedy placement.
//!
//! Fills the outstanding weekly hours of one (teacher, subject) selection
//! into a [`WeeklySchedule`](crate::models::WeeklySchedule) and returns a
//! new schedule.
//!
//! # Algorithm
//!
//! `SlotFiller` is a greedy, randomized, two-pass heuristic. It is not
//! complete: under tight constraints it can leave blocks unplaced where a
//! backtracking search would succeed. Partial fills are normal outcomes,
//! visible through [`FillReport`] or by recomputing [`FillProgress`].
//!
//! # Randomness
//!
//! Day order and the choice among declared split options draw from a
//! caller-supplied [`rand::Rng`]. Seeded generators make runs
//! reproducible.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4

mod blocks;
mod filler;
mod progress;

pub use blocks::{default_blocks, max_daily_hours, split_hours, valid_options};
pub use filler::{FillReport, FillRequest, Placement, PlacementPass, PlacementTask, SlotFiller};
pub use progress::{deficits, Deficit, FillProgress};
