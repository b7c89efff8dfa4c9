//! Assignment domain model.
//!
//! Assignments are created upstream when curriculum is generated and are
//! read-only input to the scheduling engine; the only fields the engine
//! ever writes back (through the repository) are `auto_scheduled_time` and
//! `day_of_week`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::AssignmentId;
use crate::models::time::MinuteOfDay;

/// Workflow status of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Assigned,
    InProgress,
    Completed,
}

/// Preferred time-of-day tag for an assignment.
///
/// Buckets: morning [06:00, 12:00), afternoon [12:00, 18:00),
/// evening [18:00, 22:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDayTag {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDayTag {
    /// The tag whose hour bucket contains `time`, if any.
    pub fn bucket_of(time: MinuteOfDay) -> Option<TimeOfDayTag> {
        match time.hour() {
            6..=11 => Some(TimeOfDayTag::Morning),
            12..=17 => Some(TimeOfDayTag::Afternoon),
            18..=21 => Some(TimeOfDayTag::Evening),
            _ => None,
        }
    }
}

/// A unit of learning work to place on the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    /// Subject name, used for subject-specific focus scoring.
    pub subject: String,
    /// Estimated duration in minutes. Informational; does not widen the
    /// 30-minute slot an assignment occupies.
    pub estimated_minutes: u32,
    /// Due timestamp; absent means no deadline (scheduled last).
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    /// Preferred time-of-day tags.
    #[serde(default)]
    pub optimal_time_of_day: Vec<TimeOfDayTag>,
    /// When true the placement is fixed externally and the assignment is
    /// excluded from scheduling.
    #[serde(default)]
    pub locked_schedule: bool,
    /// Accepted but not consumed by the allocator.
    #[serde(default)]
    pub scheduling_flexibility: Option<String>,
    /// Accepted but not consumed by the allocator.
    #[serde(default)]
    pub prerequisite_assignments: Vec<AssignmentId>,
    pub status: AssignmentStatus,
    /// Persisted placement time-of-day; `None` until scheduled.
    #[serde(default)]
    pub auto_scheduled_time: Option<MinuteOfDay>,
    /// Persisted placement weekday name (lowercase); `None` until scheduled.
    #[serde(default)]
    pub day_of_week: Option<String>,
}

impl Assignment {
    /// Create a pending assignment with the minimal required fields.
    pub fn new(id: impl Into<AssignmentId>, subject: impl Into<String>, estimated_minutes: u32) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            estimated_minutes,
            due_at: None,
            optimal_time_of_day: Vec::new(),
            locked_schedule: false,
            scheduling_flexibility: None,
            prerequisite_assignments: Vec::new(),
            status: AssignmentStatus::Assigned,
            auto_scheduled_time: None,
            day_of_week: None,
        }
    }

    /// Set the due timestamp.
    pub fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Set preferred time-of-day tags.
    pub fn with_optimal_time_of_day(mut self, tags: Vec<TimeOfDayTag>) -> Self {
        self.optimal_time_of_day = tags;
        self
    }

    /// Mark the schedule as externally fixed.
    pub fn locked(mut self) -> Self {
        self.locked_schedule = true;
        self
    }

    /// Whether this assignment is still waiting for a placement.
    ///
    /// Mirrors the repository precondition: `assigned` status, no
    /// persisted placement, not locked.
    pub fn is_pending(&self) -> bool {
        self.status == AssignmentStatus::Assigned
            && self.auto_scheduled_time.is_none()
            && !self.locked_schedule
    }
}
