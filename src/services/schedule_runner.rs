//! Smart-schedule orchestration service.
//!
//! Runs the full pipeline for one student: fetch inputs through the
//! repository, allocate slots (pure, sequential), persist placements
//! (concurrent, partial-failure), render notes, and optionally attach the
//! narrative analysis. Analysis always runs after the writes and can never
//! change or fail the scheduling result.

use std::time::Duration;

use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;

use crate::api::{ScheduledSlot, SlotWriteError, StudentId};
use crate::config::EngineConfig;
use crate::db::calculate_checksum;
use crate::db::repository::{FullRepository, RepositoryError};
use crate::scheduler::{build_notes, notes, GreedyAllocator, SlotCalendar};
use crate::services::analysis::{fallback_report, AnalysisContext, AnalysisReport, Summarizer};

/// Caller-supplied knobs for one scheduling run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleRunOptions {
    /// Horizon start; defaults to today (UTC).
    pub start_date: Option<NaiveDate>,
    /// Horizon end; defaults to `start + horizon_days` from configuration.
    pub end_date: Option<NaiveDate>,
    /// Whether to attach the narrative analysis.
    pub include_analysis: bool,
}

/// Result of one scheduling run.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRunOutcome {
    pub scheduled: Vec<ScheduledSlot>,
    /// Per-assignment persistence failures; never aborts the batch.
    pub errors: Vec<SlotWriteError>,
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisReport>,
    /// Fingerprint of the `scheduled` set, equal across idempotent retries.
    pub checksum: String,
}

/// Errors that abort a scheduling run. Everything else degrades into the
/// outcome itself (omissions, write errors, templated analysis).
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid scheduling window: {0}")]
    InvalidWindow(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("Failed to serialize run output: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Execute one smart-scheduling run for a student.
pub async fn run_smart_schedule(
    repo: &dyn FullRepository,
    summarizer: &dyn Summarizer,
    config: &EngineConfig,
    student_id: &StudentId,
    options: ScheduleRunOptions,
) -> Result<ScheduleRunOutcome, ScheduleError> {
    let horizon_start = options
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive());
    let horizon_end = match options.end_date {
        Some(end) => end,
        None => horizon_start
            .checked_add_days(Days::new(config.scheduling.horizon_days as u64))
            .ok_or_else(|| ScheduleError::InvalidWindow("horizon end overflows".to_string()))?,
    };
    if horizon_end < horizon_start {
        return Err(ScheduleError::InvalidWindow(format!(
            "end date {} precedes start date {}",
            horizon_end, horizon_start
        )));
    }

    let assignments = repo.fetch_unscheduled_assignments(student_id).await?;
    if assignments.is_empty() {
        log::info!("student {student_id}: nothing to schedule");
        let context = AnalysisContext {
            student_id: student_id.value().to_string(),
            horizon_start,
            horizon_end,
            scheduled: Vec::new(),
            unscheduled: 0,
            blocked_slots: 0,
            peak_windows: 0,
            notes: vec![notes::NO_PENDING_ASSIGNMENTS.to_string()],
        };
        return Ok(ScheduleRunOutcome {
            scheduled: Vec::new(),
            errors: Vec::new(),
            notes: vec![notes::NO_PENDING_ASSIGNMENTS.to_string()],
            analysis: options.include_analysis.then(|| fallback_report(&context)),
            checksum: calculate_checksum(&serde_json::to_string::<Vec<ScheduledSlot>>(&Vec::new())?),
        });
    }

    let pattern = repo.fetch_focus_pattern(student_id).await?;
    let blocks = repo.fetch_scheduling_blocks(student_id).await?;

    log::info!(
        "student {student_id}: scheduling {} assignment(s) over {} .. {}",
        assignments.len(),
        horizon_start,
        horizon_end
    );

    // Allocation is pure and CPU-bound; it never blocks on I/O.
    let allocator = GreedyAllocator::new(SlotCalendar::new(&config.scheduling));
    let allocation = allocator.allocate(
        &assignments,
        pattern.as_ref(),
        &blocks,
        horizon_start,
        horizon_end,
    );

    // Placement writes are independent of each other: issue them
    // concurrently and report each result individually.
    let write_results = futures::future::join_all(allocation.slots.iter().map(|slot| async {
        repo.record_placement(student_id, slot)
            .await
            .map_err(|e| SlotWriteError {
                assignment_id: slot.assignment_id.clone(),
                error: e.to_string(),
            })
    }))
    .await;
    let errors: Vec<SlotWriteError> = write_results
        .into_iter()
        .filter_map(Result::err)
        .collect();
    if !errors.is_empty() {
        log::warn!(
            "student {student_id}: {} placement write(s) failed",
            errors.len()
        );
    }

    let run_notes = build_notes(&allocation.stats);
    let checksum = calculate_checksum(&serde_json::to_string(&allocation.slots)?);

    let analysis = if options.include_analysis {
        let context = AnalysisContext {
            student_id: student_id.value().to_string(),
            horizon_start,
            horizon_end,
            scheduled: allocation.slots.clone(),
            unscheduled: allocation.stats.unscheduled,
            blocked_slots: allocation.stats.blocked_slots,
            peak_windows: allocation.stats.peak_windows,
            notes: run_notes.clone(),
        };
        let timeout = Duration::from_secs(config.analysis.timeout_secs);
        let report = match tokio::time::timeout(timeout, summarizer.summarize(&context)).await {
            Ok(Ok(report)) => report,
            Ok(Err(err)) => {
                log::warn!("narrative analysis failed, using templated summary: {err}");
                fallback_report(&context)
            }
            Err(_) => {
                log::warn!(
                    "narrative analysis timed out after {}s, using templated summary",
                    config.analysis.timeout_secs
                );
                fallback_report(&context)
            }
        };
        Some(report)
    } else {
        None
    };

    Ok(ScheduleRunOutcome {
        scheduled: allocation.slots,
        errors,
        notes: run_notes,
        analysis,
        checksum,
    })
}
