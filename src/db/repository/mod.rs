//! Repository trait definitions.
//!
//! The scheduling engine never talks to storage directly; it goes through
//! these traits so backends can be swapped. Only the operations the engine
//! actually needs are modeled: reading a student's pending assignments,
//! focus pattern and calendar blocks, and writing placements back.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::{ScheduledSlot, StudentId};
use crate::models::{Assignment, FocusPattern, SchedulingBlock};

/// Repository operations on assignments.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Fetch the assignments eligible for scheduling, applying the
    /// precondition filter: `assigned` status, no persisted placement,
    /// `locked_schedule == false`. Order is stable (insertion order) so
    /// scheduling runs stay deterministic.
    async fn fetch_unscheduled_assignments(
        &self,
        student_id: &StudentId,
    ) -> RepositoryResult<Vec<Assignment>>;

    /// Persist one placement: writes `auto_scheduled_time` (time-of-day)
    /// and `day_of_week` (lowercase weekday name) on the assignment.
    ///
    /// Each write stands alone; callers may issue them concurrently and a
    /// failure must not affect other assignments.
    async fn record_placement(
        &self,
        student_id: &StudentId,
        slot: &ScheduledSlot,
    ) -> RepositoryResult<()>;
}

/// Repository operations on student profile data consumed by the scorer.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the student's active focus pattern snapshot, if any.
    async fn fetch_focus_pattern(
        &self,
        student_id: &StudentId,
    ) -> RepositoryResult<Option<FocusPattern>>;

    /// Fetch the student's calendar blocks (hard and soft).
    async fn fetch_scheduling_blocks(
        &self,
        student_id: &StudentId,
    ) -> RepositoryResult<Vec<SchedulingBlock>>;
}

/// Combined repository interface used by the service layer.
#[async_trait]
pub trait FullRepository: AssignmentRepository + ProfileRepository {
    /// Verify the backend is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
