//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! The scheduling types themselves (`ScheduledSlot`, `SlotWriteError`,
//! `AnalysisReport`) already derive Serialize/Deserialize and are reused
//! directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use crate::api::{ScheduledSlot, SlotWriteError};
pub use crate::services::analysis::AnalysisReport;

/// Request body for a scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScheduleRunRequest {
    /// Student whose assignments should be scheduled. Required; a missing
    /// or empty value rejects the whole request.
    #[serde(default)]
    pub student_id: Option<String>,
    /// Horizon start (ISO date). Defaults to today.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Horizon end (ISO date). Defaults to `start_date` + 14 days.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Whether to attach the narrative analysis (default: false).
    #[serde(default)]
    pub include_analysis: bool,
}

/// Response body for a scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRunResponse {
    /// Placed assignments in placement order.
    pub scheduled: Vec<ScheduledSlot>,
    /// Per-assignment persistence failures.
    pub errors: Vec<SlotWriteError>,
    /// Deterministic rationale strings.
    pub notes: Vec<String>,
    /// Narrative analysis, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisReport>,
    /// Fingerprint of `scheduled`; equal across idempotent retries.
    pub checksum: String,
}

impl From<crate::services::schedule_runner::ScheduleRunOutcome> for ScheduleRunResponse {
    fn from(outcome: crate::services::schedule_runner::ScheduleRunOutcome) -> Self {
        Self {
            scheduled: outcome.scheduled,
            errors: outcome.errors,
            notes: outcome.notes,
            analysis: outcome.analysis,
            checksum: outcome.checksum,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Storage backend status
    pub database: String,
}
