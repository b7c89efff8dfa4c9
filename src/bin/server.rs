//! StudyFlow HTTP Server Binary
//!
//! This is the main entry point for the StudyFlow scheduling REST API
//! server. It initializes the repository, sets up the HTTP router, and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin studyflow-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)
//!
//! The narrative-analysis endpoint and slot-grid settings are read from
//! `engine.toml` when present.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use studyflow_rust::config::EngineConfig;
use studyflow_rust::db;
use studyflow_rust::http::{create_router, AppState};
use studyflow_rust::services::analysis::{NarrativeSummarizer, Summarizer, TemplateSummarizer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting StudyFlow scheduling server");

    let config = EngineConfig::from_default_location()?;

    // Initialize global repository once and reuse it across the app
    db::init_repository()?;
    let repository = Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    let summarizer: Arc<dyn Summarizer> = match &config.analysis.endpoint {
        Some(endpoint) => {
            let api_key = env::var(&config.analysis.api_key_env).ok();
            if api_key.is_none() {
                warn!(
                    "{} not set; narrative requests will be unauthenticated",
                    config.analysis.api_key_env
                );
            }
            Arc::new(NarrativeSummarizer::new(
                endpoint.clone(),
                api_key,
                Duration::from_secs(config.analysis.timeout_secs),
            )?)
        }
        None => {
            info!("No narrative endpoint configured; using templated summaries");
            Arc::new(TemplateSummarizer)
        }
    };

    // Create application state and router
    let state = AppState::new(repository, summarizer, config);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
