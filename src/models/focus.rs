//! Focus-pattern statistics used by the scoring model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::time::MinuteOfDay;

/// A time-of-day range where the student historically focuses best.
///
/// Bounds are inclusive on both ends; containment is evaluated on
/// minutes-since-midnight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakWindow {
    pub start_time: MinuteOfDay,
    pub end_time: MinuteOfDay,
    /// Average focus score observed inside the window, in [0, 1].
    pub average_score: f64,
}

impl PeakWindow {
    pub fn new(start_time: MinuteOfDay, end_time: MinuteOfDay, average_score: f64) -> Self {
        Self {
            start_time,
            end_time,
            average_score,
        }
    }

    /// Inclusive-inclusive containment check.
    pub fn contains(&self, time: MinuteOfDay) -> bool {
        self.start_time <= time && time <= self.end_time
    }
}

/// A historically good start time for one subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectTime {
    pub start_time: MinuteOfDay,
    /// Focus score observed around this start time, in [0, 1].
    pub score: f64,
}

/// Per-weekday focus statistics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DayPattern {
    /// Average focus score for the weekday, in [0, 1].
    pub average_score: f64,
}

/// Per-student focus statistics snapshot; at most one is active.
///
/// Absence of a pattern is the valid cold-start case: scoring degrades to
/// the flat 0.5 baseline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FocusPattern {
    /// Ordered list of peak focus windows; ranges may overlap.
    #[serde(default)]
    pub peak_windows: Vec<PeakWindow>,
    /// Subject name to historically good start times.
    #[serde(default)]
    pub subject_optimal_times: HashMap<String, Vec<SubjectTime>>,
    /// Lowercase weekday name to day statistics.
    #[serde(default)]
    pub day_of_week_patterns: HashMap<String, DayPattern>,
}

impl FocusPattern {
    /// Add a peak window, preserving insertion order.
    pub fn with_peak_window(mut self, window: PeakWindow) -> Self {
        self.peak_windows.push(window);
        self
    }

    /// Add a subject start-time entry.
    pub fn with_subject_time(mut self, subject: impl Into<String>, entry: SubjectTime) -> Self {
        self.subject_optimal_times
            .entry(subject.into())
            .or_default()
            .push(entry);
        self
    }

    /// Set a weekday pattern (lowercase weekday name).
    pub fn with_day_pattern(mut self, weekday: impl Into<String>, average_score: f64) -> Self {
        self.day_of_week_patterns
            .insert(weekday.into(), DayPattern { average_score });
        self
    }
}
