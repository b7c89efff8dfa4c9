//! Slot desirability scoring.
//!
//! Scores a candidate `(date, time)` cell for one assignment from the
//! student's focus statistics. Weights:
//!
//! - base `0.5`
//! - first matching peak window: `+ average_score * 0.4`
//! - nearest subject start time within 60 minutes: `+ score * 0.3`
//! - weekday pattern: `+ average_score * 0.2`
//! - preferred time-of-day tag bucket: `+ 0.1`
//!
//! The result is clamped to `1.0`. Without a focus pattern every candidate
//! scores exactly the `0.5` baseline, so ordering falls back entirely to
//! the calendar's ascending slot order.

use chrono::NaiveDate;

use crate::models::{weekday_name, FocusPattern, MinuteOfDay, TimeOfDayTag};

const BASE_SCORE: f64 = 0.5;
const PEAK_WINDOW_WEIGHT: f64 = 0.4;
const SUBJECT_TIME_WEIGHT: f64 = 0.3;
const DAY_PATTERN_WEIGHT: f64 = 0.2;
const TIME_TAG_BONUS: f64 = 0.1;
/// Maximum distance (exclusive) between a slot and a subject start time for
/// the subject term to apply.
const SUBJECT_PROXIMITY_MINUTES: u16 = 60;

/// Scores candidate slots against one student's focus pattern.
#[derive(Debug, Clone, Copy)]
pub struct FocusScoreModel<'a> {
    pattern: Option<&'a FocusPattern>,
}

impl<'a> FocusScoreModel<'a> {
    pub fn new(pattern: Option<&'a FocusPattern>) -> Self {
        Self { pattern }
    }

    /// Score a candidate cell for an assignment, in [0, 1].
    pub fn score(
        &self,
        date: NaiveDate,
        time: MinuteOfDay,
        subject: &str,
        preferred: &[TimeOfDayTag],
    ) -> f64 {
        let pattern = match self.pattern {
            Some(pattern) => pattern,
            // Cold start: flat baseline, no preference terms at all.
            None => return BASE_SCORE,
        };

        let mut score = BASE_SCORE;

        // Only the first containing window counts; overlaps do not stack.
        if let Some(window) = pattern.peak_windows.iter().find(|w| w.contains(time)) {
            score += window.average_score * PEAK_WINDOW_WEIGHT;
        }

        if let Some(entries) = pattern.subject_optimal_times.get(subject) {
            let nearest = entries.iter().fold(None::<(&_, u16)>, |best, entry| {
                let distance = entry.start_time.distance(time);
                match best {
                    Some((_, d)) if distance >= d => best,
                    _ => Some((entry, distance)),
                }
            });
            if let Some((entry, distance)) = nearest {
                if distance < SUBJECT_PROXIMITY_MINUTES {
                    score += entry.score * SUBJECT_TIME_WEIGHT;
                }
            }
        }

        if let Some(day) = pattern.day_of_week_patterns.get(weekday_name(date)) {
            score += day.average_score * DAY_PATTERN_WEIGHT;
        }

        if let Some(bucket) = TimeOfDayTag::bucket_of(time) {
            if preferred.contains(&bucket) {
                score += TIME_TAG_BONUS;
            }
        }

        score.min(1.0)
    }
}
