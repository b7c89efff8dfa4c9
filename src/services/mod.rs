//! Service layer for business logic and orchestration.
//!
//! Services sit between the repository traits and the HTTP surface: the
//! schedule runner orchestrates one scheduling run end to end, and the
//! analysis module holds the best-effort narrative collaborator.

pub mod analysis;
pub mod schedule_runner;

pub use analysis::{
    fallback_report, AnalysisContext, AnalysisError, AnalysisReport, NarrativeSummarizer,
    Summarizer, TemplateSummarizer,
};
pub use schedule_runner::{
    run_smart_schedule, ScheduleError, ScheduleRunOptions, ScheduleRunOutcome,
};
