//! Deterministic rationale strings for an allocation.
//!
//! Pure function of the run counters; no randomness, no external calls.

use crate::scheduler::allocator::AllocationStats;

/// Informational note returned when the student has nothing waiting to be
/// scheduled.
pub const NO_PENDING_ASSIGNMENTS: &str = "No unscheduled assignments found";

/// Build the human-readable notes for one allocation run.
pub fn build_notes(stats: &AllocationStats) -> Vec<String> {
    let mut notes = Vec::new();

    notes.push(format!(
        "Scheduled {} assignment(s) based on due dates and learning patterns",
        stats.scheduled
    ));
    if stats.blocked_slots > 0 {
        notes.push(format!("Avoided {} blocked slot(s)", stats.blocked_slots));
    }
    if stats.peak_windows > 0 {
        notes.push("Prioritized peak focus windows".to_string());
    }
    if stats.unscheduled > 0 {
        notes.push(format!(
            "{} assignment(s) could not be scheduled before their due date",
            stats.unscheduled
        ));
    }

    notes
}
