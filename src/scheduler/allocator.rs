//! Due-date-ordered greedy slot allocation.
//!
//! The allocator walks assignments in due-date order and gives each one the
//! best still-available slot in its window. Placement is strictly
//! sequential: every placement inserts into the locally scoped used-slot
//! set before the next assignment is considered, which is what guarantees
//! the no-double-booking invariant. Running the allocator twice on
//! identical inputs yields an identical schedule.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveDate;

use crate::api::{AssignmentId, ScheduledSlot};
use crate::models::{weekday_name, Assignment, FocusPattern, SchedulingBlock};
use crate::scheduler::scoring::FocusScoreModel;
use crate::scheduler::slots::{SlotCalendar, SlotKey};

/// Aggregate counters for one allocation run, used for notes and the
/// narrative fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationStats {
    pub scheduled: usize,
    pub unscheduled: usize,
    /// Grid cells lost to blocked days inside the global horizon.
    pub blocked_slots: usize,
    /// Number of peak windows in the active focus pattern.
    pub peak_windows: usize,
}

/// Result of one allocation run.
#[derive(Debug, Clone, Default)]
pub struct Allocation {
    /// Placed assignments, in placement order.
    pub slots: Vec<ScheduledSlot>,
    /// Assignments for which no slot existed before their deadline. Not an
    /// error: the batch continues past them.
    pub unscheduled: Vec<AssignmentId>,
    pub stats: AllocationStats,
}

/// Due-date-ordered greedy allocator.
#[derive(Debug, Clone)]
pub struct GreedyAllocator {
    calendar: SlotCalendar,
}

impl GreedyAllocator {
    pub fn new(calendar: SlotCalendar) -> Self {
        Self { calendar }
    }

    /// Allocate every assignment to its best available slot inside
    /// `[horizon_start, horizon_end]`.
    ///
    /// Assignments are processed ascending by `due_at`; undated assignments
    /// come after all dated ones in input order. Each assignment's window
    /// is capped at its own due date. Ties on score keep the
    /// earlier-ordered candidate, so the result is biased toward earlier
    /// dates and times.
    pub fn allocate(
        &self,
        assignments: &[Assignment],
        pattern: Option<&FocusPattern>,
        blocks: &[SchedulingBlock],
        horizon_start: NaiveDate,
        horizon_end: NaiveDate,
    ) -> Allocation {
        let model = FocusScoreModel::new(pattern);
        let mut used: HashSet<SlotKey> = HashSet::new();
        let mut allocation = Allocation::default();

        allocation.stats.blocked_slots =
            self.calendar
                .blocked_slot_count(horizon_start, horizon_end, blocks);
        allocation.stats.peak_windows = pattern.map_or(0, |p| p.peak_windows.len());

        for index in order_by_due_date(assignments) {
            let assignment = &assignments[index];

            let window_end = match assignment.due_at {
                Some(due) => due.date_naive().min(horizon_end),
                None => horizon_end,
            };

            let candidates = self
                .calendar
                .candidates(horizon_start, window_end, blocks, &used);

            let mut best: Option<(usize, f64)> = None;
            for (i, slot) in candidates.iter().enumerate() {
                let score = model.score(
                    slot.date,
                    slot.time,
                    &assignment.subject,
                    &assignment.optimal_time_of_day,
                );
                // Strictly greater keeps the earliest candidate on ties.
                if best.map_or(true, |(_, s)| score > s) {
                    best = Some((i, score));
                }
            }

            match best {
                Some((i, score)) => {
                    let slot = candidates[i];
                    used.insert(slot.key());
                    allocation.slots.push(ScheduledSlot {
                        assignment_id: assignment.id.clone(),
                        date: slot.date,
                        time: slot.time,
                        day_of_week: weekday_name(slot.date).to_string(),
                        score,
                    });
                    allocation.stats.scheduled += 1;
                }
                None => {
                    log::debug!(
                        "no available slot for assignment {} before {}",
                        assignment.id,
                        window_end
                    );
                    allocation.unscheduled.push(assignment.id.clone());
                    allocation.stats.unscheduled += 1;
                }
            }
        }

        allocation
    }
}

/// Indices of `assignments` ascending by due date, undated last, stable
/// within ties.
fn order_by_due_date(assignments: &[Assignment]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..assignments.len()).collect();
    order.sort_by(|&a, &b| match (assignments[a].due_at, assignments[b].due_at) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MinuteOfDay, PeakWindow, TimeOfDayTag};
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn due(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 23, 0, 0).unwrap()
    }

    fn allocator() -> GreedyAllocator {
        GreedyAllocator::new(SlotCalendar::default())
    }

    #[test]
    fn test_two_assignments_take_earliest_distinct_slots() {
        // Cold start, single-day horizon: earliest slot wins, then the next.
        let assignments = vec![
            Assignment::new("a1", "Math", 30).with_due_at(due(2026, 3, 2)),
            Assignment::new("a2", "Math", 30).with_due_at(due(2026, 3, 2)),
        ];
        let allocation =
            allocator().allocate(&assignments, None, &[], date(2026, 3, 2), date(2026, 3, 2));

        assert_eq!(allocation.slots.len(), 2);
        assert_eq!(allocation.slots[0].time, MinuteOfDay::from_hm(9, 0));
        assert_eq!(allocation.slots[1].time, MinuteOfDay::from_hm(9, 30));
        assert!(allocation.unscheduled.is_empty());
    }

    #[test]
    fn test_no_double_booking() {
        let assignments: Vec<Assignment> = (0..30)
            .map(|i| Assignment::new(format!("a{i}"), "Math", 30).with_due_at(due(2026, 3, 8)))
            .collect();
        let allocation =
            allocator().allocate(&assignments, None, &[], date(2026, 3, 2), date(2026, 3, 8));

        let mut keys: Vec<_> = allocation.slots.iter().map(|s| s.key()).collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
        assert_eq!(total, 30);
    }

    #[test]
    fn test_due_date_ordering_earliest_first() {
        // One available slot; the earlier-due assignment must win it.
        let assignments = vec![
            Assignment::new("later", "Math", 30).with_due_at(due(2026, 3, 3)),
            Assignment::new("sooner", "Math", 30).with_due_at(due(2026, 3, 2)),
        ];
        // Single-day horizon with every slot but one already blocked off by
        // a near-total grid: easiest to model with a one-slot day.
        let settings = crate::config::SchedulingSettings {
            day_start: MinuteOfDay::from_hm(9, 0),
            day_end: MinuteOfDay::from_hm(9, 0),
            ..Default::default()
        };
        let allocator = GreedyAllocator::new(SlotCalendar::new(&settings));
        let allocation =
            allocator.allocate(&assignments, None, &[], date(2026, 3, 2), date(2026, 3, 2));

        assert_eq!(allocation.slots.len(), 1);
        assert_eq!(allocation.slots[0].assignment_id, AssignmentId::new("sooner"));
        assert_eq!(allocation.unscheduled, vec![AssignmentId::new("later")]);
    }

    #[test]
    fn test_undated_assignments_scheduled_after_dated_in_input_order() {
        let assignments = vec![
            Assignment::new("no-due-1", "Math", 30),
            Assignment::new("dated", "Math", 30).with_due_at(due(2026, 3, 2)),
            Assignment::new("no-due-2", "Math", 30),
        ];
        let allocation =
            allocator().allocate(&assignments, None, &[], date(2026, 3, 2), date(2026, 3, 3));

        let order: Vec<&str> = allocation
            .slots
            .iter()
            .map(|s| s.assignment_id.value())
            .collect();
        assert_eq!(order, vec!["dated", "no-due-1", "no-due-2"]);
    }

    #[test]
    fn test_window_capped_by_due_date() {
        let assignments =
            vec![Assignment::new("a1", "Math", 30).with_due_at(due(2026, 3, 4))];
        let allocation =
            allocator().allocate(&assignments, None, &[], date(2026, 3, 2), date(2026, 3, 15));
        assert!(allocation.slots[0].date <= date(2026, 3, 4));
    }

    #[test]
    fn test_fully_blocked_window_leaves_assignment_unscheduled() {
        // The only day before the due date is a blocked Friday.
        let assignments =
            vec![Assignment::new("a1", "Math", 30).with_due_at(due(2026, 3, 6))];
        let blocks = vec![SchedulingBlock::unavailable_weekly(5)];
        let allocation = allocator().allocate(
            &assignments,
            None,
            &blocks,
            date(2026, 3, 6),
            date(2026, 3, 6),
        );

        assert!(allocation.slots.is_empty());
        assert_eq!(allocation.unscheduled, vec![AssignmentId::new("a1")]);
        assert_eq!(allocation.stats.unscheduled, 1);
    }

    #[test]
    fn test_due_date_before_horizon_start_is_unschedulable() {
        let assignments =
            vec![Assignment::new("a1", "Math", 30).with_due_at(due(2026, 3, 1))];
        let allocation =
            allocator().allocate(&assignments, None, &[], date(2026, 3, 2), date(2026, 3, 8));
        assert!(allocation.slots.is_empty());
        assert_eq!(allocation.unscheduled.len(), 1);
    }

    #[test]
    fn test_peak_window_preferred_over_earlier_slot() {
        let pattern = FocusPattern::default().with_peak_window(PeakWindow::new(
            MinuteOfDay::from_hm(10, 0),
            MinuteOfDay::from_hm(11, 0),
            0.9,
        ));
        let assignments =
            vec![Assignment::new("a1", "Math", 30).with_due_at(due(2026, 3, 4))];
        let allocation = allocator().allocate(
            &assignments,
            Some(&pattern),
            &[],
            date(2026, 3, 2),
            date(2026, 3, 4),
        );

        let slot = &allocation.slots[0];
        // 0.5 + 0.9 * 0.4 = 0.86 beats the 0.5 at 09:00; first 10:00 slot
        // of the first day wins.
        assert_eq!(slot.date, date(2026, 3, 2));
        assert_eq!(slot.time, MinuteOfDay::from_hm(10, 0));
        assert!((slot.score - 0.86).abs() < 1e-12);
    }

    #[test]
    fn test_tag_preference_moves_placement() {
        let pattern = FocusPattern::default();
        let assignments = vec![Assignment::new("a1", "Reading", 30)
            .with_due_at(due(2026, 3, 2))
            .with_optimal_time_of_day(vec![TimeOfDayTag::Evening])];
        let allocation = allocator().allocate(
            &assignments,
            Some(&pattern),
            &[],
            date(2026, 3, 2),
            date(2026, 3, 2),
        );

        // First evening slot (18:00) outscores every earlier slot.
        assert_eq!(allocation.slots[0].time, MinuteOfDay::from_hm(18, 0));
    }

    #[test]
    fn test_determinism_identical_runs() {
        let pattern = FocusPattern::default()
            .with_peak_window(PeakWindow::new(
                MinuteOfDay::from_hm(10, 0),
                MinuteOfDay::from_hm(11, 0),
                0.9,
            ))
            .with_day_pattern("tuesday", 0.7);
        let assignments: Vec<Assignment> = (0..10)
            .map(|i| {
                Assignment::new(format!("a{i}"), if i % 2 == 0 { "Math" } else { "Science" }, 30)
                    .with_due_at(due(2026, 3, 2 + (i % 5) as u32))
            })
            .collect();
        let blocks = vec![SchedulingBlock::unavailable_weekly(0)];

        let run = || {
            allocator().allocate(
                &assignments,
                Some(&pattern),
                &blocks,
                date(2026, 3, 2),
                date(2026, 3, 8),
            )
        };
        let first = run();
        let second = run();

        assert_eq!(first.slots, second.slots);
        assert_eq!(first.unscheduled, second.unscheduled);
    }

    #[test]
    fn test_day_of_week_matches_date() {
        let assignments =
            vec![Assignment::new("a1", "Math", 30).with_due_at(due(2026, 3, 2))];
        let allocation =
            allocator().allocate(&assignments, None, &[], date(2026, 3, 2), date(2026, 3, 2));
        assert_eq!(allocation.slots[0].day_of_week, "monday");
    }

    #[test]
    fn test_stats_counts() {
        let assignments = vec![
            Assignment::new("a1", "Math", 30).with_due_at(due(2026, 3, 2)),
            Assignment::new("a2", "Math", 30).with_due_at(due(2026, 3, 1)),
        ];
        let blocks = vec![SchedulingBlock::unavailable_on(date(2026, 3, 3))];
        let allocation =
            allocator().allocate(&assignments, None, &blocks, date(2026, 3, 2), date(2026, 3, 4));

        assert_eq!(allocation.stats.scheduled, 1);
        assert_eq!(allocation.stats.unscheduled, 1);
        assert_eq!(allocation.stats.blocked_slots, 24);
        assert_eq!(allocation.stats.peak_windows, 0);
    }

    #[test]
    fn test_prerequisites_do_not_gate_placement() {
        // prerequisite_assignments is carried but not enforced: a dependent
        // assignment with an earlier due date is still placed first.
        let mut dependent =
            Assignment::new("dependent", "Math", 30).with_due_at(due(2026, 3, 2));
        dependent.prerequisite_assignments = vec![AssignmentId::new("base")];
        let base = Assignment::new("base", "Math", 30).with_due_at(due(2026, 3, 3));

        let allocation = allocator().allocate(
            &[dependent, base],
            None,
            &[],
            date(2026, 3, 2),
            date(2026, 3, 3),
        );
        assert_eq!(allocation.slots[0].assignment_id, AssignmentId::new("dependent"));
    }
}
