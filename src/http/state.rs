//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::db::repository::FullRepository;
use crate::services::analysis::Summarizer;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Narrative summarizer (templated or HTTP-backed)
    pub summarizer: Arc<dyn Summarizer>,
    /// Engine configuration
    pub config: Arc<EngineConfig>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        repository: Arc<dyn FullRepository>,
        summarizer: Arc<dyn Summarizer>,
        config: EngineConfig,
    ) -> Self {
        Self {
            repository,
            summarizer,
            config: Arc::new(config),
        }
    }
}
