//! # StudyFlow Rust Backend
//!
//! Smart scheduling engine for the StudyFlow homeschool-management
//! platform.
//!
//! Given a student's pending learning assignments, due dates, focus-pattern
//! statistics and calendar blackout windows, the engine computes a
//! conflict-free placement of each assignment on a `(date, time-of-day)`
//! slot grid, persists the placements through a repository seam, and
//! optionally attaches a best-effort narrative summary. The backend
//! exposes a REST API via Axum for the web frontend.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes and shared DTO types
//! - [`models`]: Assignment, focus-pattern and calendar-block domain types
//! - [`scheduler`]: The deterministic greedy allocation engine
//! - [`services`]: Run orchestration and the narrative-analysis collaborator
//! - [`db`]: Repository traits, error taxonomy and the in-memory backend
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Guarantees
//!
//! - No two assignments share a `(date, time)` slot within one run
//! - Blocked days are never scheduled on
//! - Identical inputs produce identical schedules (idempotent retries)
//! - Persistence and analysis failures degrade, they never abort a run

// Allow large error types - RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod scheduler;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
