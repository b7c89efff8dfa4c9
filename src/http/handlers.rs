//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{extract::State, Json};

use super::dto::{HealthResponse, ScheduleRunRequest, ScheduleRunResponse};
use super::error::AppError;
use super::state::AppState;
use crate::api::StudentId;
use crate::services::schedule_runner::{self, ScheduleRunOptions};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Health check endpoint to verify the service is running and the storage
/// backend is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

/// POST /v1/schedule
///
/// Run the smart scheduler for one student. The response always carries a
/// best-effort result; only a missing `student_id` or an inverted date
/// window rejects the request.
pub async fn run_schedule(
    State(state): State<AppState>,
    Json(request): Json<ScheduleRunRequest>,
) -> HandlerResult<ScheduleRunResponse> {
    let student_id = match request.student_id.as_deref() {
        Some(id) if !id.trim().is_empty() => StudentId::new(id),
        _ => {
            return Err(AppError::BadRequest(
                "Missing required field: student_id".to_string(),
            ))
        }
    };

    let options = ScheduleRunOptions {
        start_date: request.start_date,
        end_date: request.end_date,
        include_analysis: request.include_analysis,
    };

    let outcome = schedule_runner::run_smart_schedule(
        state.repository.as_ref(),
        state.summarizer.as_ref(),
        &state.config,
        &student_id,
        options,
    )
    .await?;

    Ok(Json(outcome.into()))
}
