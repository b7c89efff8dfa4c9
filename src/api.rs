//! Public API surface for the scheduling backend.
//!
//! This file consolidates the identifier newtypes and the DTO types shared
//! between the engine, the persistence layer and the HTTP API. All types
//! derive Serialize/Deserialize for JSON serialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::MinuteOfDay;

/// Student identifier (opaque, storage-assigned).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Assignment identifier (opaque, storage-assigned).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssignmentId(pub String);

impl StudentId {
    pub fn new(value: impl Into<String>) -> Self {
        StudentId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl AssignmentId {
    pub fn new(value: impl Into<String>) -> Self {
        AssignmentId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        StudentId(value.to_string())
    }
}
impl From<String> for StudentId {
    fn from(value: String) -> Self {
        StudentId(value)
    }
}
impl From<&str> for AssignmentId {
    fn from(value: &str) -> Self {
        AssignmentId(value.to_string())
    }
}
impl From<String> for AssignmentId {
    fn from(value: String) -> Self {
        AssignmentId(value)
    }
}

/// One placed assignment: a single (date, time) cell in the slot grid.
///
/// Invariant: within one scheduling run the `(date, time)` pairs across all
/// slots are pairwise distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSlot {
    pub assignment_id: AssignmentId,
    pub date: NaiveDate,
    pub time: MinuteOfDay,
    /// Lowercase weekday name of `date` (e.g. `"monday"`).
    pub day_of_week: String,
    /// Desirability score the slot won with, in [0, 1].
    pub score: f64,
}

impl ScheduledSlot {
    /// The uniqueness key for the per-run used-slot set.
    pub fn key(&self) -> (NaiveDate, MinuteOfDay) {
        (self.date, self.time)
    }
}

/// A persistence failure for one placed assignment. Write failures are
/// per-assignment and never abort the rest of the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotWriteError {
    pub assignment_id: AssignmentId,
    pub error: String,
}
