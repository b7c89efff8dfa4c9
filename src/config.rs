//! Engine configuration file support.
//!
//! This module provides utilities for reading scheduling-engine settings
//! from TOML configuration files, with serde defaults matching the
//! production slot grid.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::MinuteOfDay;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("No engine.toml found in standard locations")]
    NotFound,
}

/// Engine configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub scheduling: SchedulingSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// Slot grid and horizon settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingSettings {
    /// Default horizon length when the request omits an end date.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    /// First slot of the day.
    #[serde(default = "default_day_start")]
    pub day_start: MinuteOfDay,
    /// Last slot of the day (inclusive).
    #[serde(default = "default_day_end")]
    pub day_end: MinuteOfDay,
    /// Slot grid increment in minutes.
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u16,
}

/// Narrative-analysis collaborator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Narrative service endpoint; when absent the deterministic templated
    /// summarizer is used.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Request timeout for the narrative call.
    #[serde(default = "default_analysis_timeout_secs")]
    pub timeout_secs: u64,
    /// Environment variable holding the narrative service API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_horizon_days() -> u32 {
    14
}

fn default_day_start() -> MinuteOfDay {
    MinuteOfDay::from_hm(9, 0)
}

fn default_day_end() -> MinuteOfDay {
    MinuteOfDay::from_hm(20, 30)
}

fn default_slot_minutes() -> u16 {
    30
}

fn default_analysis_timeout_secs() -> u64 {
    10
}

fn default_api_key_env() -> String {
    "STUDYFLOW_ANALYSIS_KEY".to_string()
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            day_start: default_day_start(),
            day_end: default_day_end(),
            slot_minutes: default_slot_minutes(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_analysis_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl EngineConfig {
    /// Load engine configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load engine configuration from the default location.
    ///
    /// Searches for `engine.toml` in the current directory, `config/`, and
    /// the parent directory. Missing file yields the built-in defaults.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = vec![
            PathBuf::from("engine.toml"),
            PathBuf::from("config/engine.toml"),
            PathBuf::from("../engine.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }
}
