//! Narrative analysis collaborator.
//!
//! An external text-generation service may enrich a finished scheduling
//! run with a human-readable summary. The capability sits behind the
//! [`Summarizer`] trait so the deterministic core has no dependency on any
//! provider: [`TemplateSummarizer`] renders a fixed report from the run
//! counters and is also the fallback whenever the remote call fails or
//! times out. The collaborator is read-only enrichment; it can never alter
//! the computed schedule.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::ScheduledSlot;

/// Narrative report attached to a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: String,
    pub changes: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Everything a summarizer may look at: the finalized placements plus the
/// run counters. Assembled after persistence; summarizers never see
/// anything mutable.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisContext {
    pub student_id: String,
    pub horizon_start: NaiveDate,
    pub horizon_end: NaiveDate,
    pub scheduled: Vec<ScheduledSlot>,
    pub unscheduled: usize,
    pub blocked_slots: usize,
    pub peak_windows: usize,
    pub notes: Vec<String>,
}

/// Errors from the narrative collaborator. All of them are recovered
/// internally by substituting the templated report.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Narrative request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid narrative response: {0}")]
    InvalidResponse(String),
}

/// Best-effort narrative summary generation.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, context: &AnalysisContext) -> Result<AnalysisReport, AnalysisError>;
}

/// Render the deterministic report used as cold default and as fallback.
pub fn fallback_report(context: &AnalysisContext) -> AnalysisReport {
    let total = context.scheduled.len() + context.unscheduled;
    let summary = format!(
        "Scheduled {} of {} assignment(s) between {} and {}.",
        context.scheduled.len(),
        total,
        context.horizon_start,
        context.horizon_end
    );

    let changes = context
        .scheduled
        .iter()
        .map(|slot| {
            format!(
                "{} scheduled for {} {} at {}",
                slot.assignment_id, slot.day_of_week, slot.date, slot.time
            )
        })
        .collect();

    let mut recommendations = Vec::new();
    if context.unscheduled > 0 {
        recommendations.push(format!(
            "Review {} assignment(s) that could not be placed before their due date",
            context.unscheduled
        ));
    }
    if context.peak_windows > 0 {
        recommendations
            .push("Keep peak focus windows free for the most demanding subjects".to_string());
    }
    if recommendations.is_empty() {
        recommendations.push("Schedule looks balanced; no changes recommended".to_string());
    }

    AnalysisReport {
        summary,
        changes,
        recommendations,
    }
}

/// Deterministic summarizer used when no narrative endpoint is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateSummarizer;

#[async_trait]
impl Summarizer for TemplateSummarizer {
    async fn summarize(&self, context: &AnalysisContext) -> Result<AnalysisReport, AnalysisError> {
        Ok(fallback_report(context))
    }
}

/// HTTP client for an external narrative service.
///
/// Posts the run context as JSON and expects an [`AnalysisReport`]-shaped
/// body back. The request carries its own timeout on top of the
/// caller-level one, so a hung connection can never stall a scheduling
/// response.
pub struct NarrativeSummarizer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl NarrativeSummarizer {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }
}

#[async_trait]
impl Summarizer for NarrativeSummarizer {
    async fn summarize(&self, context: &AnalysisContext) -> Result<AnalysisReport, AnalysisError> {
        let mut request = self.client.post(&self.endpoint).json(context);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?.error_for_status()?;
        let report: AnalysisReport = response
            .json()
            .await
            .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))?;

        if report.summary.is_empty() {
            return Err(AnalysisError::InvalidResponse(
                "empty summary field".to_string(),
            ));
        }
        Ok(report)
    }
}
