//! Greedy randomized slot filler.
//!
//! # Algorithm
//!
//! 1. Compute per-class deficits for the selected (teacher, subject).
//! 2. Split each deficit into daily blocks; one placement task per block.
//! 3. Sort tasks by duration, longest first (small blocks fit leftovers).
//! 4. For each task, shuffle the days once and make two passes over them:
//!    - pass A skips days on which the teacher already teaches the class,
//!    - pass B drops that restriction.
//! 5. The first viable day wins. Within it, the first run of consecutive
//!    instructional periods (left to right) that is free for both the
//!    class and the teacher receives the block.
//!
//! There is no backtracking. A block that fits nowhere is left unplaced
//! and earlier placements stand.
//!
//! # Complexity
//! O(b * d * p * c) where b=blocks, d=days, p=periods/day, c=classes.

use log::{debug, info, trace};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::blocks::{max_daily_hours, split_hours};
use super::progress::deficits;
use crate::config::TimetableConfig;
use crate::models::{
    ClassName, Day, OffConstraint, OffConstraints, ScheduleCell, SplitPreferences, SubjectLoad,
    Teacher, TimeGrid, WeeklySchedule,
};

/// Selection to fill: one teacher's subject, optionally one load size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillRequest {
    /// Teacher to place.
    pub teacher_id: u32,
    /// Subject to place.
    pub subject_code: String,
    /// Only fill classes whose weekly load equals this value.
    pub target_load: Option<u32>,
}

impl FillRequest {
    /// Creates a request covering every class of the subject.
    pub fn new(teacher_id: u32, subject_code: impl Into<String>) -> Self {
        Self {
            teacher_id,
            subject_code: subject_code.into(),
            target_load: None,
        }
    }

    /// Restricts the request to classes with exactly `load` weekly hours.
    pub fn with_target_load(mut self, load: u32) -> Self {
        self.target_load = Some(load);
        self
    }
}

/// One block waiting for a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementTask {
    /// Teacher to place.
    pub teacher_id: u32,
    /// Subject to place.
    pub subject_code: String,
    /// Receiving class.
    pub class: ClassName,
    /// Consecutive periods needed.
    pub duration: u32,
    /// Ordering key (higher = attempted earlier). Equals `duration`.
    pub priority: i32,
    /// Full weekly load of the subject in this class (drives the daily limit).
    pub weekly_total: u32,
}

/// Which pass found a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementPass {
    /// Pass A: day had no lesson of this teacher in this class.
    AvoidRepeatClass,
    /// Pass B: fallback allowing a second visit on the same day.
    AllowRepeatClass,
}

/// A task and where it landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// The placed task.
    pub task: PlacementTask,
    /// Day used.
    pub day: String,
    /// Periods used, in order.
    pub periods: Vec<i32>,
    /// Pass that succeeded.
    pub pass: PlacementPass,
}

/// What one fill invocation did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillReport {
    /// Tasks placed, in attempt order.
    pub placed: Vec<Placement>,
    /// Tasks no day could take.
    pub unplaced: Vec<PlacementTask>,
}

impl FillReport {
    /// Whether every task was placed (trivially true when there were none).
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Periods filled by this invocation.
    pub fn placed_hours(&self) -> u32 {
        self.placed.iter().map(|p| p.task.duration).sum()
    }

    /// Periods left outstanding.
    pub fn unplaced_hours(&self) -> u32 {
        self.unplaced.iter().map(|t| t.duration).sum()
    }
}

/// Greedy randomized filler for one (teacher, subject) selection.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use timetable_fill::models::{SubjectLoad, Teacher, TimeGrid, WeeklySchedule};
/// use timetable_fill::scheduler::{FillRequest, SlotFiller};
///
/// let grid = TimeGrid::uniform(&["MON", "TUE", "WED"], 8, Some(4), &["X"]);
/// let teachers = vec![
///     Teacher::new(1, "Rina", "RN")
///         .with_subject(SubjectLoad::new("MTH", "Mathematics").with_load("X", 4)),
/// ];
/// let schedule = WeeklySchedule::empty(&grid);
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let filled = SlotFiller::new().fill(
///     &grid,
///     &schedule,
///     &teachers,
///     &FillRequest::new(1, "MTH"),
///     &mut rng,
/// );
/// assert_eq!(filled.placed_hours(1, "MTH", "X"), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotFiller {
    off_constraints: OffConstraints,
    split_preferences: SplitPreferences,
}

impl SlotFiller {
    /// Creates a filler with no off constraints or split preferences.
    pub fn new() -> Self {
        Self::default()
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

    /// Creates a filler from a loaded configuration.
    pub fn from_config(config: &TimetableConfig) -> Self {
        Self {
            off_constraints: config.off_constraints.clone(),
            split_preferences: config.split_preferences.clone(),
        }
    }

    /// Configured off constraints.
    pub fn off_constraints(&self) -> &OffConstraints {
        &self.off_constraints
    }

    /// Configured split preferences.
    pub fn split_preferences(&self) -> &SplitPreferences {
        &self.split_preferences
    }

    /// Fills outstanding hours of a selection, returning the new schedule.
    ///
    /// The input schedule is never modified. Unknown teachers or subjects,
    /// and selections with nothing outstanding, return an equal copy.
    /// Blocks that cannot be placed are skipped silently; recompute
    /// progress from the result to find out what is missing.
    pub fn fill<R: Rng + ?Sized>(
        &self,
        grid: &TimeGrid,
        schedule: &WeeklySchedule,
        teachers: &[Teacher],
        request: &FillRequest,
        rng: &mut R,
    ) -> WeeklySchedule {
        self.fill_with_report(grid, schedule, teachers, request, rng).0
    }

    /// Same as [`fill`](Self::fill), also reporting placed and unplaced blocks.
    pub fn fill_with_report<R: Rng + ?Sized>(
        &self,
        grid: &TimeGrid,
        schedule: &WeeklySchedule,
        teachers: &[Teacher],
        request: &FillRequest,
        rng: &mut R,
    ) -> (WeeklySchedule, FillReport) {
        let mut next = schedule.clone();
        let mut report = FillReport::default();

        let Some(teacher) = teachers.iter().find(|t| t.id == request.teacher_id) else {
            debug!("fill skipped: unknown teacher {}", request.teacher_id);
            return (next, report);
        };
        let Some(subject) = teacher.subject(&request.subject_code) else {
            debug!(
                "fill skipped: teacher {} has no subject {}",
                teacher.id, request.subject_code
            );
            return (next, report);
        };

        let tasks = self.build_tasks(&next, &grid.classes, teacher, subject, request.target_load, rng);
        if tasks.is_empty() {
            debug!(
                "fill skipped: {}/{} has no outstanding hours",
                teacher.code, subject.code
            );
            return (next, report);
        }
        debug!(
            "filling {}/{}: {} blocks, {} hours",
            teacher.code,
            subject.code,
            tasks.len(),
            tasks.iter().fold(0u32, |acc, t| acc.saturating_add(t.duration))
        );

        let constraint = self.off_constraints.get(teacher.id, &subject.code);
        let cell = ScheduleCell::class(teacher, subject);

        for task in tasks {
            match self.find_slot(grid, &next, &task, constraint, rng) {
                Some((day, periods, pass)) => {
                    for &period in &periods {
                        next.set_cell(&day, period, task.class.as_str(), cell.clone());
                    }
                    trace!(
                        "placed {}h of {} for {} on {} {:?} ({:?})",
                        task.duration,
                        task.subject_code,
                        task.class,
                        day,
                        periods,
                        pass
                    );
                    report.placed.push(Placement {
                        task,
                        day,
                        periods,
                        pass,
                    });
                }
                None => {
                    info!(
                        "no slot for {}h block of {}/{} in {}",
                        task.duration, teacher.code, task.subject_code, task.class
                    );
                    report.unplaced.push(task);
                }
            }
        }

        (next, report)
    }

    /// One task per block, longest blocks first; ties keep grid class order.
    fn build_tasks<R: Rng + ?Sized>(
        &self,
        schedule: &WeeklySchedule,
        classes: &[ClassName],
        teacher: &Teacher,
        subject: &SubjectLoad,
        target_load: Option<u32>,
        rng: &mut R,
    ) -> Vec<PlacementTask> {
        let mut tasks = Vec::new();
        for deficit in deficits(schedule, classes, teacher.id, subject, target_load) {
            let blocks = split_hours(
                deficit.remaining(),
                &subject.code,
                &self.split_preferences,
                rng,
            );
            for duration in blocks {
                tasks.push(PlacementTask {
                    teacher_id: teacher.id,
                    subject_code: subject.code.clone(),
                    class: deficit.class.clone(),
                    duration,
                    priority: i32::try_from(duration).unwrap_or(i32::MAX),
                    weekly_total: deficit.required,
                });
            }
        }
        // Stable: equal priorities keep class order
        tasks.sort_by(|a, b| b.priority.cmp(&a.priority));
        tasks
    }

    /// Searches both passes over one shuffled day order.
    fn find_slot<R: Rng + ?Sized>(
        &self,
        grid: &TimeGrid,
        schedule: &WeeklySchedule,
        task: &PlacementTask,
        constraint: Option<&OffConstraint>,
        rng: &mut R,
    ) -> Option<(String, Vec<i32>, PlacementPass)> {
        let max_daily = max_daily_hours(
            &task.subject_code,
            task.weekly_total,
            &self.split_preferences,
        );
        let mut days: Vec<&Day> = grid.days.iter().collect();
        days.shuffle(rng);

        for pass in [PlacementPass::AvoidRepeatClass, PlacementPass::AllowRepeatClass] {
            for day in &days {
                if constraint.is_some_and(|c| c.blocks_day(&day.name)) {
                    continue;
                }
                if pass == PlacementPass::AvoidRepeatClass
                    && schedule.teacher_teaches_class_on(&day.name, task.teacher_id, task.class.as_str())
                {
                    continue;
                }
                let on_day = schedule.hours_on_day(&day.name, task.class.as_str(), &task.subject_code);
                if on_day.saturating_add(task.duration) > max_daily {
                    continue;
                }
                if let Some(periods) = find_window(day, schedule, task, constraint) {
                    return Some((day.name.clone(), periods, pass));
                }
            }
        }
        None
    }
}

/// First run of `task.duration` consecutive instructional periods on `day`
/// that is free for the class and the teacher.
fn find_window(
    day: &Day,
    schedule: &WeeklySchedule,
    task: &PlacementTask,
    constraint: Option<&OffConstraint>,
) -> Option<Vec<i32>> {
    let duration = task.duration as usize;
    if duration == 0 {
        return None;
    }
    let periods = day.instructional_periods();
    periods
        .windows(duration)
        .find(|window| {
            window
                .iter()
                .all(|&period| is_period_free(day, period, schedule, task, constraint))
        })
        .map(<[i32]>::to_vec)
}

fn is_period_free(
    day: &Day,
    period: i32,
    schedule: &WeeklySchedule,
    task: &PlacementTask,
    constraint: Option<&OffConstraint>,
) -> bool {
    if constraint.is_some_and(|c| c.blocks_period(&day.name, period)) {
        return false;
    }
    let class_free = schedule
        .cell(&day.name, period, task.class.as_str())
        .is_some_and(ScheduleCell::is_empty);
    class_free && !schedule.is_teacher_busy(&day.name, period, task.teacher_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SplitOption, SubjectLoad};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::{BTreeMap, BTreeSet};

    const WEEK: [&str; 6] = ["MON", "TUE", "WED", "THU", "FRI", "SAT"];

    fn week_grid(classes: &[&str]) -> TimeGrid {
        TimeGrid::uniform(&WEEK, 8, Some(4), classes)
    }

    fn math_teacher(load: &[(&str, u32)]) -> Teacher {
        let subject = load
            .iter()
            .fold(SubjectLoad::new("MTH", "Mathematics"), |s, (class, hours)| {
                s.with_load(*class, *hours)
            });
        Teacher::new(1, "T1", "T1").with_subject(subject)
    }

    /// (day → set of periods) occupied by a teacher/subject in a class.
    fn occupancy(
        schedule: &WeeklySchedule,
        teacher_id: u32,
        code: &str,
        class: &str,
    ) -> BTreeMap<String, Vec<i32>> {
        let mut out: BTreeMap<String, Vec<i32>> = BTreeMap::new();
        for (day, period, c, cell) in schedule.lessons() {
            if c.as_str() == class && cell.is(teacher_id, code) {
                out.entry(day.to_string()).or_default().push(period);
            }
        }
        out
    }

    fn assert_no_double_booking(schedule: &WeeklySchedule) {
        let mut seen: BTreeSet<(String, i32, u32)> = BTreeSet::new();
        for (day, period, _, cell) in schedule.lessons() {
            assert!(
                seen.insert((day.to_string(), period, cell.teacher_id)),
                "teacher {} double-booked at {day} {period}",
                cell.teacher_id
            );
        }
    }

    #[test]
    fn test_end_to_end_four_hours() {
        let grid = week_grid(&["X"]);
        let teachers = vec![math_teacher(&[("X", 4)])];
        let empty = WeeklySchedule::empty(&grid);

        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let (filled, report) = SlotFiller::new().fill_with_report(
                &grid,
                &empty,
                &teachers,
                &FillRequest::new(1, "MTH"),
                &mut rng,
            );

            assert_eq!(filled.lessons().count(), 4);
            assert_eq!(report.placed.len(), 2);
            assert!(report.is_complete());

            let occ = occupancy(&filled, 1, "MTH", "X");
            assert_eq!(occ.len(), 2, "blocks must land on two different days");
            for periods in occ.values() {
                assert_eq!(periods.len(), 2);
                assert_eq!(periods[1] - periods[0], 1);
            }
            assert!(report
                .placed
                .iter()
                .all(|p| p.pass == PlacementPass::AvoidRepeatClass));
            assert_no_double_booking(&filled);
        }
    }

    #[test]
    fn test_input_schedule_untouched() {
        let grid = week_grid(&["X"]);
        let teachers = vec![math_teacher(&[("X", 4)])];
        let empty = WeeklySchedule::empty(&grid);
        let snapshot = empty.clone();

        let mut rng = SmallRng::seed_from_u64(5);
        let filled = SlotFiller::new().fill(&grid, &empty, &teachers, &FillRequest::new(1, "MTH"), &mut rng);
        assert_eq!(empty, snapshot);
        assert_ne!(filled, snapshot);
    }

    #[test]
    fn test_no_op_when_nothing_outstanding() {
        let grid = week_grid(&["X", "Y"]);
        let teachers = vec![math_teacher(&[("X", 4), ("Y", 3)])];
        let mut rng = SmallRng::seed_from_u64(11);
        let filler = SlotFiller::new();
        let request = FillRequest::new(1, "MTH");

        let once = filler.fill(&grid, &WeeklySchedule::empty(&grid), &teachers, &request, &mut rng);
        assert_eq!(once.placed_hours(1, "MTH", "X"), 4);
        assert_eq!(once.placed_hours(1, "MTH", "Y"), 3);

        let (twice, report) = filler.fill_with_report(&grid, &once, &teachers, &request, &mut rng);
        assert_eq!(twice, once);
        assert!(report.placed.is_empty() && report.unplaced.is_empty());
    }

    #[test]
    fn test_unknown_selection_returns_unchanged() {
        let grid = week_grid(&["X"]);
        let teachers = vec![math_teacher(&[("X", 4)])];
        let empty = WeeklySchedule::empty(&grid);
        let mut rng = SmallRng::seed_from_u64(0);
        let filler = SlotFiller::new();

        let r1 = filler.fill(&grid, &empty, &teachers, &FillRequest::new(99, "MTH"), &mut rng);
        let r2 = filler.fill(&grid, &empty, &teachers, &FillRequest::new(1, "BIO"), &mut rng);
        assert_eq!(r1, empty);
        assert_eq!(r2, empty);
    }

    #[test]
    fn test_target_load_filter() {
        let grid = week_grid(&["X", "Y", "Z"]);
        let teachers = vec![math_teacher(&[("X", 4), ("Y", 3), ("Z", 4)])];
        let mut rng = SmallRng::seed_from_u64(8);

        let filled = SlotFiller::new().fill(
            &grid,
            &WeeklySchedule::empty(&grid),
            &teachers,
            &FillRequest::new(1, "MTH").with_target_load(4),
            &mut rng,
        );
        assert_eq!(filled.placed_hours(1, "MTH", "X"), 4);
        assert_eq!(filled.placed_hours(1, "MTH", "Z"), 4);
        assert_eq!(filled.placed_hours(1, "MTH", "Y"), 0);
        assert_no_double_booking(&filled);
    }

    #[test]
    fn test_tasks_sorted_longest_first() {
        let grid = week_grid(&["X", "Y"]);
        let teacher = math_teacher(&[("X", 3), ("Y", 10)]);
        let mut rng = SmallRng::seed_from_u64(1);
        let tasks = SlotFiller::new().build_tasks(
            &WeeklySchedule::empty(&grid),
            &grid.classes,
            &teacher,
            &teacher.subjects[0],
            None,
            &mut rng,
        );
        let shape: Vec<(&str, u32)> = tasks.iter().map(|t| (t.class.as_str(), t.duration)).collect();
        assert_eq!(shape, vec![("Y", 4), ("Y", 4), ("X", 2), ("Y", 2), ("X", 1)]);
        assert!(tasks.iter().all(|t| t.priority == t.duration as i32));
    }

    #[test]
    fn test_equal_blocks_keep_grid_class_order() {
        let grid = week_grid(&["XII", "X"]);
        let teachers = vec![math_teacher(&[("X", 2), ("XII", 2)])];
        let mut rng = SmallRng::seed_from_u64(4);

        let tasks = SlotFiller::new().build_tasks(
            &WeeklySchedule::empty(&grid),
            &grid.classes,
            &teachers[0],
            &teachers[0].subjects[0],
            None,
            &mut rng,
        );
        let order: Vec<&str> = tasks.iter().map(|t| t.class.as_str()).collect();
        assert_eq!(order, vec!["XII", "X"]);

        let (_, report) = SlotFiller::new().fill_with_report(
            &grid,
            &WeeklySchedule::empty(&grid),
            &teachers,
            &FillRequest::new(1, "MTH"),
            &mut rng,
        );
        assert_eq!(report.placed[0].task.class.as_str(), "XII");
        assert_eq!(report.placed[1].task.class.as_str(), "X");
    }

    #[test]
    fn test_oversized_load_does_not_overflow() {
        let grid = week_grid(&["X"]);
        let teachers = vec![math_teacher(&[("X", u32::MAX)])];
        let mut rng = SmallRng::seed_from_u64(6);

        let (filled, report) = SlotFiller::new().fill_with_report(
            &grid,
            &WeeklySchedule::empty(&grid),
            &teachers,
            &FillRequest::new(1, "MTH"),
            &mut rng,
        );
        assert_eq!(report.unplaced.len(), 1);
        assert_eq!(report.unplaced[0].priority, i32::MAX);
        assert_eq!(filled, WeeklySchedule::empty(&grid));
    }

    #[test]
    fn test_only_deficit_is_split() {
        let grid = week_grid(&["X"]);
        let teacher = math_teacher(&[("X", 6)]);
        let cell = ScheduleCell::class(&teacher, &teacher.subjects[0]);
        let schedule = WeeklySchedule::empty(&grid)
            .with_cell("MON", 1, "X", cell.clone())
            .with_cell("MON", 2, "X", cell);

        let mut rng = SmallRng::seed_from_u64(1);
        let tasks = SlotFiller::new().build_tasks(&schedule, &grid.classes, &teacher, &teacher.subjects[0], None, &mut rng);
        // Deficit 4 → default 2+2, daily limit still from the weekly total 6
        let durations: Vec<u32> = tasks.iter().map(|t| t.duration).collect();
        assert_eq!(durations, vec![2, 2]);
        assert!(tasks.iter().all(|t| t.weekly_total == 6));
    }

    #[test]
    fn test_split_preference_drives_blocks() {
        let grid = week_grid(&["X"]);
        let teachers = vec![math_teacher(&[("X", 7)])];
        let prefs = SplitPreferences::new().with_options("MTH", vec![SplitOption::parse("3+4").unwrap()]);
        let mut rng = SmallRng::seed_from_u64(3);

        let (filled, report) = SlotFiller::new()
            .with_split_preferences(prefs)
            .fill_with_report(&grid, &WeeklySchedule::empty(&grid), &teachers, &FillRequest::new(1, "MTH"), &mut rng);

        let mut sizes: Vec<usize> = occupancy(&filled, 1, "MTH", "X").values().map(Vec::len).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![3, 4]);
        // Sorted by size regardless of option order
        assert_eq!(report.placed[0].task.duration, 4);
    }

    #[test]
    fn test_blocked_days_respected() {
        let grid = week_grid(&["X", "Y"]);
        let teachers = vec![math_teacher(&[("X", 8), ("Y", 8)])];
        let off = OffConstraints::new().with_constraint(
            1,
            "MTH",
            OffConstraint::new()
                .with_blocked_day("MON")
                .with_blocked_day("TUE"),
        );
        let filler = SlotFiller::new().with_off_constraints(off);

        for seed in 0..10 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let filled = filler.fill(&grid, &WeeklySchedule::empty(&grid), &teachers, &FillRequest::new(1, "MTH"), &mut rng);
            assert!(filled.lessons().all(|(day, _, _, _)| day != "MON" && day != "TUE"));
            assert_eq!(filled.lessons().count(), 16);
        }
    }

    #[test]
    fn test_blocked_periods_respected() {
        let grid = week_grid(&["X"]);
        let teachers = vec![math_teacher(&[("X", 8)])];
        let mut off = OffConstraint::new();
        for day in WEEK {
            for period in [1, 2, 3] {
                off = off.with_blocked_period(day, period);
            }
        }
        let filler = SlotFiller::new().with_off_constraints(OffConstraints::new().with_constraint(1, "MTH", off));

        let mut rng = SmallRng::seed_from_u64(21);
        let filled = filler.fill(&grid, &WeeklySchedule::empty(&grid), &teachers, &FillRequest::new(1, "MTH"), &mut rng);
        assert_eq!(filled.lessons().count(), 8);
        assert!(filled.lessons().all(|(_, period, _, _)| period >= 4));
        // Blocks of 4 start at period 4 and straddle the break
        for periods in occupancy(&filled, 1, "MTH", "X").values() {
            assert_eq!(periods, &vec![4, 5, 6, 7]);
        }
    }

    #[test]
    fn test_avoids_busy_teacher_and_occupied_cells() {
        let grid = TimeGrid::uniform(&["MON"], 4, None, &["X", "Y"]);
        let teacher = math_teacher(&[("X", 2), ("Y", 1)]);
        let cell = ScheduleCell::class(&teacher, &teacher.subjects[0]);
        // Teacher is in Y at period 1; X period 2 is manually blocked
        let schedule = WeeklySchedule::empty(&grid)
            .with_cell("MON", 1, "Y", cell)
            .with_cell("MON", 2, "X", ScheduleCell::blocked("Manual"));

        let mut rng = SmallRng::seed_from_u64(2);
        let filled = SlotFiller::new().fill(
            &grid,
            &schedule,
            &[teacher],
            &FillRequest::new(1, "MTH").with_target_load(2),
            &mut rng,
        );
        assert_eq!(occupancy(&filled, 1, "MTH", "X")["MON"], vec![3, 4]);
        assert!(filled.cell("MON", 2, "X").unwrap().is_blocked());
    }

    #[test]
    fn test_fallback_pass_allows_repeat_class() {
        let grid = TimeGrid::uniform(&["MON"], 8, None, &["X"]);
        let teacher = math_teacher(&[("X", 2)])
            .with_subject(SubjectLoad::new("PHY", "Physics").with_load("X", 2));
        let physics = ScheduleCell::class(&teacher, &teacher.subjects[1]);
        let schedule = WeeklySchedule::empty(&grid)
            .with_cell("MON", 1, "X", physics.clone())
            .with_cell("MON", 2, "X", physics);

        let mut rng = SmallRng::seed_from_u64(4);
        let (filled, report) = SlotFiller::new().fill_with_report(
            &grid,
            &schedule,
            &[teacher],
            &FillRequest::new(1, "MTH"),
            &mut rng,
        );
        assert_eq!(report.placed.len(), 1);
        assert_eq!(report.placed[0].pass, PlacementPass::AllowRepeatClass);
        assert_eq!(report.placed[0].periods, vec![3, 4]);
        assert_eq!(filled.placed_hours(1, "MTH", "X"), 2);
    }

    #[test]
    fn test_unplaceable_block_is_skipped_silently() {
        // One day, load 3 → blocks 2+1, daily limit 2: the 1-hour block cannot fit
        let grid = TimeGrid::uniform(&["MON"], 8, None, &["X"]);
        let teachers = vec![math_teacher(&[("X", 3)])];
        let mut rng = SmallRng::seed_from_u64(6);

        let (filled, report) = SlotFiller::new().fill_with_report(
            &grid,
            &WeeklySchedule::empty(&grid),
            &teachers,
            &FillRequest::new(1, "MTH"),
            &mut rng,
        );
        assert_eq!(filled.placed_hours(1, "MTH", "X"), 2);
        assert_eq!(report.unplaced.len(), 1);
        assert_eq!(report.unplaced[0].duration, 1);
        assert_eq!(report.placed_hours(), 2);
        assert_eq!(report.unplaced_hours(), 1);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_block_longer_than_day_is_unplaced() {
        let grid = TimeGrid::uniform(&["MON", "TUE"], 3, None, &["X"]);
        let teachers = vec![math_teacher(&[("X", 8)])];
        let mut rng = SmallRng::seed_from_u64(6);
        let (filled, report) = SlotFiller::new().fill_with_report(
            &grid,
            &WeeklySchedule::empty(&grid),
            &teachers,
            &FillRequest::new(1, "MTH"),
            &mut rng,
        );
        assert_eq!(filled.lessons().count(), 0);
        assert_eq!(report.unplaced.len(), 2);
    }

    #[test]
    fn test_daily_limit_counts_other_teachers_of_same_subject() {
        let grid = TimeGrid::uniform(&["MON", "TUE"], 8, None, &["X"]);
        let other = Teacher::new(2, "T2", "T2").with_subject(SubjectLoad::new("MTH", "Mathematics").with_load("X", 2));
        let t1 = math_teacher(&[("X", 2)]);
        let other_cell = ScheduleCell::class(&other, &other.subjects[0]);
        let schedule = WeeklySchedule::empty(&grid)
            .with_cell("MON", 1, "X", other_cell.clone())
            .with_cell("MON", 2, "X", other_cell);

        for seed in 0..10 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let filled = SlotFiller::new().fill(&grid, &schedule, &[t1.clone(), other.clone()], &FillRequest::new(1, "MTH"), &mut rng);
            // Monday already holds 2 MTH hours (the limit for 2) → Tuesday only
            assert_eq!(occupancy(&filled, 1, "MTH", "X").keys().collect::<Vec<_>>(), vec!["TUE"]);
        }
    }

    #[test]
    fn test_full_roster_properties() {
        let classes = ["A", "B", "C", "D"];
        let grid = week_grid(&classes);
        let teachers = vec![
            Teacher::new(1, "T1", "T1")
                .with_subject(SubjectLoad::new("MTH", "Math").with_load("A", 4).with_load("B", 4).with_load("C", 6))
                .with_subject(SubjectLoad::new("PHY", "Physics").with_load("D", 3)),
            Teacher::new(2, "T2", "T2")
                .with_subject(SubjectLoad::new("ENG", "English").with_load("A", 5).with_load("B", 5).with_load("D", 7)),
            Teacher::new(3, "T3", "T3")
                .with_subject(SubjectLoad::new("ART", "Art").with_load("A", 10).with_load("C", 8)),
        ];
        let prefs = SplitPreferences::new();
        let filler = SlotFiller::new();

        for seed in 0..10 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut schedule = WeeklySchedule::empty(&grid);
            for t in &teachers {
                for s in &t.subjects {
                    schedule = filler.fill(&grid, &schedule, &teachers, &FillRequest::new(t.id, s.code.clone()), &mut rng);
                }
            }
            assert_no_double_booking(&schedule);

            for t in &teachers {
                for s in &t.subjects {
                    for (class, total) in s.taught_classes() {
                        let limit = max_daily_hours(&s.code, total, &prefs);
                        for day in WEEK {
                            let hours = schedule.hours_on_day(day, class.as_str(), &s.code);
                            assert!(hours <= limit, "{} {} {day}: {hours} > {limit}", s.code, class);
                        }
                        assert!(schedule.placed_hours(t.id, &s.code, class.as_str()) <= total);
                    }
                }
            }
        }
    }
}
