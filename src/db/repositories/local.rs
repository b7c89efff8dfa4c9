//! In-memory repository for unit testing and local development.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::api::{AssignmentId, ScheduledSlot, StudentId};
use crate::db::repository::{
    AssignmentRepository, ErrorContext, FullRepository, ProfileRepository, RepositoryError,
    RepositoryResult,
};
use crate::models::{Assignment, FocusPattern, SchedulingBlock};

#[derive(Debug, Default)]
struct StudentRecord {
    assignments: Vec<Assignment>,
    pattern: Option<FocusPattern>,
    blocks: Vec<SchedulingBlock>,
}

/// In-memory implementation of the repository traits.
///
/// Backed by a `parking_lot::RwLock`; assignments keep insertion order so
/// fetches are deterministic. `fail_writes_for` lets tests exercise the
/// partial-failure path of concurrent placement writes.
#[derive(Default)]
pub struct LocalRepository {
    students: RwLock<HashMap<StudentId, StudentRecord>>,
    failing_writes: RwLock<HashSet<AssignmentId>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an assignment for a student, creating the student on first use.
    pub fn insert_assignment(&self, student_id: &StudentId, assignment: Assignment) {
        let mut students = self.students.write();
        students
            .entry(student_id.clone())
            .or_default()
            .assignments
            .push(assignment);
    }

    /// Set (or replace) the student's focus pattern snapshot.
    pub fn set_focus_pattern(&self, student_id: &StudentId, pattern: FocusPattern) {
        let mut students = self.students.write();
        students.entry(student_id.clone()).or_default().pattern = Some(pattern);
    }

    /// Add a calendar block for a student.
    pub fn add_block(&self, student_id: &StudentId, block: SchedulingBlock) {
        let mut students = self.students.write();
        students
            .entry(student_id.clone())
            .or_default()
            .blocks
            .push(block);
    }

    /// Read back one assignment, placement fields included.
    pub fn assignment(
        &self,
        student_id: &StudentId,
        assignment_id: &AssignmentId,
    ) -> Option<Assignment> {
        self.students
            .read()
            .get(student_id)
            .and_then(|record| record.assignments.iter().find(|a| &a.id == assignment_id))
            .cloned()
    }

    /// Make every subsequent `record_placement` for `assignment_id` fail
    /// with a query error. Used to test partial-failure reporting.
    pub fn fail_writes_for(&self, assignment_id: AssignmentId) {
        self.failing_writes.write().insert(assignment_id);
    }
}

#[async_trait]
impl AssignmentRepository for LocalRepository {
    async fn fetch_unscheduled_assignments(
        &self,
        student_id: &StudentId,
    ) -> RepositoryResult<Vec<Assignment>> {
        let students = self.students.read();
        let record = match students.get(student_id) {
            Some(record) => record,
            None => return Ok(Vec::new()),
        };
        Ok(record
            .assignments
            .iter()
            .filter(|a| a.is_pending())
            .cloned()
            .collect())
    }

    async fn record_placement(
        &self,
        student_id: &StudentId,
        slot: &ScheduledSlot,
    ) -> RepositoryResult<()> {
        if self.failing_writes.read().contains(&slot.assignment_id) {
            return Err(RepositoryError::query_with_context(
                "simulated storage failure",
                ErrorContext::new("record_placement")
                    .with_entity("assignment")
                    .with_entity_id(&slot.assignment_id),
            ));
        }

        let mut students = self.students.write();
        let record = students.get_mut(student_id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Student {} not found", student_id),
                ErrorContext::new("record_placement").with_entity("student"),
            )
        })?;

        let assignment = record
            .assignments
            .iter_mut()
            .find(|a| a.id == slot.assignment_id)
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Assignment {} not found", slot.assignment_id),
                    ErrorContext::new("record_placement")
                        .with_entity("assignment")
                        .with_entity_id(&slot.assignment_id),
                )
            })?;

        assignment.auto_scheduled_time = Some(slot.time);
        assignment.day_of_week = Some(slot.day_of_week.clone());
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for LocalRepository {
    async fn fetch_focus_pattern(
        &self,
        student_id: &StudentId,
    ) -> RepositoryResult<Option<FocusPattern>> {
        Ok(self
            .students
            .read()
            .get(student_id)
            .and_then(|record| record.pattern.clone()))
    }

    async fn fetch_scheduling_blocks(
        &self,
        student_id: &StudentId,
    ) -> RepositoryResult<Vec<SchedulingBlock>> {
        Ok(self
            .students
            .read()
            .get(student_id)
            .map(|record| record.blocks.clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentStatus, MinuteOfDay};
    use chrono::NaiveDate;

    fn student() -> StudentId {
        StudentId::new("s1")
    }

    fn slot_for(id: &str) -> ScheduledSlot {
        ScheduledSlot {
            assignment_id: AssignmentId::new(id),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            time: MinuteOfDay::from_hm(9, 0),
            day_of_week: "monday".to_string(),
            score: 0.5,
        }
    }

    #[tokio::test]
    async fn test_fetch_unknown_student_is_empty() {
        let repo = LocalRepository::new();
        let assignments = repo.fetch_unscheduled_assignments(&student()).await.unwrap();
        assert!(assignments.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_applies_precondition_filter() {
        let repo = LocalRepository::new();
        repo.insert_assignment(&student(), Assignment::new("pending", "Math", 30));
        repo.insert_assignment(&student(), Assignment::new("locked", "Math", 30).locked());

        let mut completed = Assignment::new("completed", "Math", 30);
        completed.status = AssignmentStatus::Completed;
        repo.insert_assignment(&student(), completed);

        let mut placed = Assignment::new("placed", "Math", 30);
        placed.auto_scheduled_time = Some(MinuteOfDay::from_hm(10, 0));
        repo.insert_assignment(&student(), placed);

        let assignments = repo.fetch_unscheduled_assignments(&student()).await.unwrap();
        let ids: Vec<&str> = assignments.iter().map(|a| a.id.value()).collect();
        assert_eq!(ids, vec!["pending"]);
    }

    #[tokio::test]
    async fn test_record_placement_writes_fields() {
        let repo = LocalRepository::new();
        repo.insert_assignment(&student(), Assignment::new("a1", "Math", 30));

        repo.record_placement(&student(), &slot_for("a1")).await.unwrap();

        let stored = repo.assignment(&student(), &AssignmentId::new("a1")).unwrap();
        assert_eq!(stored.auto_scheduled_time, Some(MinuteOfDay::from_hm(9, 0)));
        assert_eq!(stored.day_of_week.as_deref(), Some("monday"));
        // A placed assignment leaves the scheduling pool.
        assert!(!stored.is_pending());
    }

    #[tokio::test]
    async fn test_record_placement_unknown_assignment() {
        let repo = LocalRepository::new();
        repo.insert_assignment(&student(), Assignment::new("a1", "Math", 30));

        let err = repo
            .record_placement(&student(), &slot_for("missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_injected_write_failure() {
        let repo = LocalRepository::new();
        repo.insert_assignment(&student(), Assignment::new("a1", "Math", 30));
        repo.fail_writes_for(AssignmentId::new("a1"));

        let err = repo.record_placement(&student(), &slot_for("a1")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::QueryError { .. }));

        // The assignment is untouched.
        let stored = repo.assignment(&student(), &AssignmentId::new("a1")).unwrap();
        assert!(stored.auto_scheduled_time.is_none());
    }

    #[tokio::test]
    async fn test_pattern_and_blocks_roundtrip() {
        let repo = LocalRepository::new();
        assert!(repo.fetch_focus_pattern(&student()).await.unwrap().is_none());

        repo.set_focus_pattern(&student(), FocusPattern::default());
        assert!(repo.fetch_focus_pattern(&student()).await.unwrap().is_some());

        repo.add_block(&student(), SchedulingBlock::unavailable_weekly(0));
        let blocks = repo.fetch_scheduling_blocks(&student()).await.unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());
    }
}
