//! Monitor Configuration Module
//!
//! Service configuration loaded from TOML files with env overrides.
//!
//! ## Loading Order
//!
//! 1. `MOTOR_CONFIG` environment variable (path to TOML file)
//! 2. `motor_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The diagnosis API key may always be supplied via `GEMINI_API_KEY`, which
//! takes precedence over the TOML value.
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! // In main():
//! config::init(MonitorConfig::load());
//!
//! // Anywhere in the codebase:
//! let period = config::get().sampling.period_secs;
//! ```

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Global monitor configuration, initialized once at startup.
static MONITOR_CONFIG: OnceLock<MonitorConfig> = OnceLock::new();

/// Initialize the global configuration. Later calls are ignored with a warning.
pub fn init(config: MonitorConfig) {
    if MONITOR_CONFIG.set(config).is_err() {
        warn!("config::init() called more than once - ignoring");
    }
}

/// Get a reference to the global configuration, falling back to defaults if
/// `init()` was never called (tests, library embedding).
pub fn get() -> &'static MonitorConfig {
    MONITOR_CONFIG.get_or_init(MonitorConfig::default)
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    MONITOR_CONFIG.get().is_some()
}

// ============================================================================
// Configuration Sections
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub server: ServerConfig,
    pub sampling: SamplingConfig,
    pub diagnosis: DiagnosisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the dashboard API
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Nominal sampling period in seconds
    pub period_secs: u64,
    /// Fixed RNG seed for reproducible simulation (entropy when absent)
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            period_secs: 1,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisConfig {
    /// API key for the remote diagnosis service (empty = demo mode)
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Service base URL
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Minimum buffered samples required before analysis is allowed
    pub min_samples: usize,
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 30,
            min_samples: 5,
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

impl MonitorConfig {
    /// Load configuration using the documented precedence.
    pub fn load() -> Self {
        let mut cfg = Self::load_file().unwrap_or_else(|| {
            info!("No config file found - using built-in defaults");
            Self::default()
        });

        // Env override for the credential; never log its value.
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                cfg.diagnosis.api_key = key;
            }
        }

        cfg
    }

    fn load_file() -> Option<Self> {
        let path = std::env::var("MOTOR_CONFIG")
            .ok()
            .unwrap_or_else(|| "motor_config.toml".to_string());

        let raw = std::fs::read_to_string(&path).ok()?;
        match toml::from_str::<Self>(&raw) {
            Ok(cfg) => {
                info!(path = %path, "Loaded configuration");
                Some(cfg)
            }
            Err(e) => {
                warn!(path = %path, error = %e, "Invalid config file - using defaults");
                None
            }
        }
    }
}
