//! Axum-based HTTP server for the scheduling engine.
//!
//! This module exposes the REST surface of the engine: a health endpoint
//! and the scheduling-run endpoint. Everything else (assignment CRUD,
//! authentication, chat) lives in the hosting application.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
