//! Candidate slot enumeration.
//!
//! The calendar produces the ordered sequence of `(date, time)` cells an
//! assignment may occupy inside a window, applying blackout rules and the
//! per-run used-slot set. The ascending ordering is load-bearing: the
//! allocator breaks score ties by keeping the earlier candidate.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::config::SchedulingSettings;
use crate::models::{MinuteOfDay, SchedulingBlock};

/// Uniqueness key for one grid cell.
pub type SlotKey = (NaiveDate, MinuteOfDay);

/// One candidate grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: MinuteOfDay,
}

impl Slot {
    pub fn key(&self) -> SlotKey {
        (self.date, self.time)
    }
}

/// Enumerates candidate slots over a date window.
///
/// Pure: every method is a function of its inputs; nothing here mutates the
/// used-slot set.
#[derive(Debug, Clone)]
pub struct SlotCalendar {
    day_start: MinuteOfDay,
    day_end: MinuteOfDay,
    slot_minutes: u16,
}

impl SlotCalendar {
    pub fn new(settings: &SchedulingSettings) -> Self {
        Self {
            day_start: settings.day_start,
            day_end: settings.day_end,
            slot_minutes: settings.slot_minutes.max(1),
        }
    }

    /// The time-of-day grid for one day, ascending.
    pub fn slot_times(&self) -> Vec<MinuteOfDay> {
        let mut times = Vec::new();
        if self.day_start > self.day_end {
            return times;
        }
        let mut t = self.day_start;
        loop {
            times.push(t);
            match t.advance(self.slot_minutes) {
                Some(next) if next <= self.day_end => t = next,
                _ => break,
            }
        }
        times
    }

    /// Number of grid cells per day.
    pub fn slots_per_day(&self) -> usize {
        self.slot_times().len()
    }

    /// Whether `date` is disqualified by an `"unavailable"` block, matching
    /// by exact date or by recurring weekday. The block's own time range is
    /// intentionally not consulted: a matching hard block excludes the
    /// whole day.
    pub fn day_blocked(date: NaiveDate, blocks: &[SchedulingBlock]) -> bool {
        blocks
            .iter()
            .any(|block| block.is_unavailable() && block.matches_date(date))
    }

    /// Candidate slots over `[window_start, window_end]` (both inclusive),
    /// skipping blocked days and already-used cells, in ascending
    /// (date, time) order. Empty when the window is inverted.
    pub fn candidates(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
        blocks: &[SchedulingBlock],
        used: &HashSet<SlotKey>,
    ) -> Vec<Slot> {
        let times = self.slot_times();
        let mut slots = Vec::new();

        let mut date = window_start;
        while date <= window_end {
            if !Self::day_blocked(date, blocks) {
                for &time in &times {
                    if !used.contains(&(date, time)) {
                        slots.push(Slot { date, time });
                    }
                }
            }
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        slots
    }

    /// Number of grid cells lost to blocked days inside the window. Feeds
    /// the "Avoided N blocked slot(s)" note.
    pub fn blocked_slot_count(
        &self,
        window_start: NaiveDate,
        window_end: NaiveDate,
        blocks: &[SchedulingBlock],
    ) -> usize {
        let per_day = self.slots_per_day();
        let mut blocked = 0;

        let mut date = window_start;
        while date <= window_end {
            if Self::day_blocked(date, blocks) {
                blocked += per_day;
            }
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }
        blocked
    }
}

impl Default for SlotCalendar {
    fn default() -> Self {
        Self::new(&SchedulingSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_grid_is_24_slots() {
        let calendar = SlotCalendar::default();
        let times = calendar.slot_times();
        assert_eq!(times.len(), 24);
        assert_eq!(times[0], MinuteOfDay::from_hm(9, 0));
        assert_eq!(times[1], MinuteOfDay::from_hm(9, 30));
        assert_eq!(*times.last().unwrap(), MinuteOfDay::from_hm(20, 30));
    }

    #[test]
    fn test_candidates_ascending_order() {
        let calendar = SlotCalendar::default();
        let slots = calendar.candidates(date(2026, 3, 2), date(2026, 3, 3), &[], &HashSet::new());
        assert_eq!(slots.len(), 48);
        assert_eq!(slots[0].date, date(2026, 3, 2));
        assert_eq!(slots[0].time, MinuteOfDay::from_hm(9, 0));
        assert_eq!(slots[23].time, MinuteOfDay::from_hm(20, 30));
        assert_eq!(slots[24].date, date(2026, 3, 3));
        assert_eq!(slots[24].time, MinuteOfDay::from_hm(9, 0));

        let mut sorted = slots.clone();
        sorted.sort_by_key(|s| s.key());
        assert_eq!(slots, sorted);
    }

    #[test]
    fn test_specific_date_block_excludes_whole_day() {
        let calendar = SlotCalendar::default();
        let blocks = vec![SchedulingBlock::unavailable_on(date(2026, 3, 2))];
        let slots = calendar.candidates(date(2026, 3, 2), date(2026, 3, 3), &blocks, &HashSet::new());
        assert_eq!(slots.len(), 24);
        assert!(slots.iter().all(|s| s.date == date(2026, 3, 3)));
    }

    #[test]
    fn test_recurring_block_excludes_every_matching_weekday() {
        let calendar = SlotCalendar::default();
        // Fridays (weekday index 5); 2026-03-06 and 2026-03-13 are Fridays.
        let blocks = vec![SchedulingBlock::unavailable_weekly(5)];
        let slots =
            calendar.candidates(date(2026, 3, 2), date(2026, 3, 15), &blocks, &HashSet::new());
        assert!(slots.iter().all(|s| s.date != date(2026, 3, 6)));
        assert!(slots.iter().all(|s| s.date != date(2026, 3, 13)));
        // 14 days minus 2 blocked Fridays.
        assert_eq!(slots.len(), 12 * 24);
    }

    #[test]
    fn test_soft_block_does_not_exclude() {
        let calendar = SlotCalendar::default();
        let mut block = SchedulingBlock::unavailable_on(date(2026, 3, 2));
        block.block_type = "field trip".to_string();
        let slots =
            calendar.candidates(date(2026, 3, 2), date(2026, 3, 2), &[block], &HashSet::new());
        assert_eq!(slots.len(), 24);
    }

    #[test]
    fn test_block_time_range_does_not_narrow_exclusion() {
        // Current scope: a hard block with a one-hour range still
        // disqualifies the entire day, not just its own hours.
        let calendar = SlotCalendar::default();
        let block = SchedulingBlock::unavailable_on(date(2026, 3, 2))
            .with_times(MinuteOfDay::from_hm(9, 0), MinuteOfDay::from_hm(10, 0));
        let slots =
            calendar.candidates(date(2026, 3, 2), date(2026, 3, 2), &[block], &HashSet::new());
        assert!(slots.is_empty());
    }

    #[test]
    fn test_used_slots_are_skipped() {
        let calendar = SlotCalendar::default();
        let mut used = HashSet::new();
        used.insert((date(2026, 3, 2), MinuteOfDay::from_hm(9, 0)));
        let slots = calendar.candidates(date(2026, 3, 2), date(2026, 3, 2), &[], &used);
        assert_eq!(slots.len(), 23);
        assert_eq!(slots[0].time, MinuteOfDay::from_hm(9, 30));
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let calendar = SlotCalendar::default();
        let slots = calendar.candidates(date(2026, 3, 3), date(2026, 3, 2), &[], &HashSet::new());
        assert!(slots.is_empty());
    }

    #[test]
    fn test_blocked_slot_count() {
        let calendar = SlotCalendar::default();
        let blocks = vec![SchedulingBlock::unavailable_weekly(5)];
        // Mon 2026-03-02 .. Sun 2026-03-08 contains one Friday.
        assert_eq!(
            calendar.blocked_slot_count(date(2026, 3, 2), date(2026, 3, 8), &blocks),
            24
        );
        assert_eq!(
            calendar.blocked_slot_count(date(2026, 3, 2), date(2026, 3, 5), &blocks),
            0
        );
    }
}
