// src/config.rs
//! Runtime configuration for the collector service, loaded from TOML
//! with an env-var path override and sane defaults.
//!
//! Matching thresholds (24 h window, 100 km radius, 0.30 overlap) are
//! deliberately NOT configurable; they are part of the pipeline's
//! decision procedure and live as constants next to the code.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "COLLECTOR_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/collector.toml";

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_interval_secs() -> u64 {
    3600
}

/// Service configuration. Every field has a default so an absent file
/// yields a working setup.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollectorConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Run collection on a timer in addition to the HTTP trigger.
    pub schedule_enabled: bool,
    /// Seconds between scheduled runs.
    pub interval_secs: u64,
    /// Optional gazetteer override file (ordered `[[locations]]` tables).
    pub gazetteer_path: Option<PathBuf>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            schedule_enabled: false,
            interval_secs: default_interval_secs(),
            gazetteer_path: None,
        }
    }
}

impl CollectorConfig {
    /// Parse a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading collector config from {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Resolve configuration using env + fallbacks:
    /// 1) $COLLECTOR_CONFIG_PATH (must exist if set)
    /// 2) config/collector.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            return Self::load_from(&pb)
                .with_context(|| format!("{ENV_CONFIG_PATH} points to an unusable config"));
        }
        let default = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default.exists() {
            return Self::load_from(&default);
        }
        Ok(Self::default())
    }
}
