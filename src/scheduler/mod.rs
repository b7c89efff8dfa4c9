//! Smart scheduling engine.
//!
//! Given a student's pending assignments, due dates, focus-pattern
//! statistics and calendar blackout rules, the engine computes a
//! conflict-free placement of each assignment on a `(date, time-of-day)`
//! slot grid. The pipeline is: [`slots::SlotCalendar`] enumerates
//! candidates, [`scoring::FocusScoreModel`] scores them,
//! [`allocator::GreedyAllocator`] places assignments in due-date order, and
//! [`notes`] renders the deterministic rationale strings.
//!
//! The whole phase is sequential and pure: no I/O, no shared state beyond
//! the per-run used-slot set. Identical inputs always produce identical
//! output, which is what makes retries idempotent and the engine testable.

pub mod allocator;
pub mod notes;
pub mod scoring;
pub mod slots;

pub use allocator::{Allocation, AllocationStats, GreedyAllocator};
pub use notes::build_notes;
pub use scoring::FocusScoreModel;
pub use slots::{Slot, SlotCalendar, SlotKey};
