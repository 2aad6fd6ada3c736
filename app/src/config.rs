//! Application configuration with TOML file support.

use serde::{Deserialize, Serialize};

use aerosure_types::PoolParams;

use crate::error::AppError;

/// Configuration for an Aerosure deployment.
///
/// Can be loaded from a TOML file via [`AppConfig::from_toml_file`] or built
/// programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port the relay's HTTP API listens on.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Number of reporter identities the relay bootstraps.
    #[serde(default = "default_reporter_count")]
    pub reporter_count: usize,

    /// Seconds the relay waits for a resolution to reach quorum before
    /// reporting a liveness failure.
    #[serde(default = "default_quorum_deadline_secs")]
    pub quorum_deadline_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pool parameters (protocol constants, not TOML-tunable).
    #[serde(skip)]
    pub params: PoolParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_http_port() -> u16 {
    3001
}

fn default_reporter_count() -> usize {
    20
}

fn default_quorum_deadline_secs() -> u64 {
    30
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, AppError> {
        toml::from_str(s).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("AppConfig is always serializable to TOML")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            reporter_count: default_reporter_count(),
            quorum_deadline_secs: default_quorum_deadline_secs(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            params: PoolParams::default(),
        }
    }
}
