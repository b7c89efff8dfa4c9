//! Persistence seam for the scheduling engine.
//!
//! This module provides abstractions for storage operations via the
//! Repository pattern, allowing different backends to be swapped without
//! touching the engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API)                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services::schedule_runner)              │
//! │  - Horizon resolution                                    │
//! │  - Allocation orchestration                              │
//! │  - Concurrent placement writes                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! Durable persistence (the hosted relational backend) is an external
//! collaborator: only the trait surface and the in-memory backend are part
//! of this crate.

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod checksum;
pub mod repositories;
pub mod repository;

pub use checksum::calculate_checksum;
pub use repositories::LocalRepository;
pub use repository::{
    AssignmentRepository, ErrorContext, FullRepository, ProfileRepository, RepositoryError,
    RepositoryResult,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository singleton with the in-memory backend.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo: Arc<dyn FullRepository> = Arc::new(LocalRepository::new());
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
