//! Application State and System Status
//!
//! Shared state for the monitoring pipeline, accessible from API handlers
//! and the sampling driver.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;

use crate::history::HistoryBuffer;
use crate::types::{AnalysisResult, OperatingMode};

/// Shared application state accessible from API handlers and the driver.
pub type SharedState = Arc<RwLock<AppState>>;

// ============================================================================
// Application State
// ============================================================================

/// State shared between the sampling driver and the API.
///
/// Wrapped in `Arc<RwLock<>>` for thread-safe access across the async
/// runtime. The driver is the only writer of `history`; mode and pause
/// transitions come from the API and take effect on the driver's next tick.
#[derive(Debug)]
pub struct AppState {
    /// Bounded telemetry history (the dashboard's data source)
    pub history: HistoryBuffer,

    /// Operating mode applied on the next simulator step
    pub mode: OperatingMode,

    /// When true the driver skips stepping; history is retained
    pub paused: bool,

    /// Current system status
    pub status: SystemStatus,

    /// Latest remote diagnosis result, if any request completed
    pub latest_analysis: Option<AnalysisResult>,

    /// Wall-clock time of the last completed diagnosis
    pub last_analysis_time: Option<chrono::DateTime<chrono::Utc>>,

    /// Number of samples the last completed diagnosis was computed over
    pub last_analysis_window: usize,

    /// Total simulator steps taken this session
    pub samples_generated: u64,

    /// Total diagnosis requests completed this session
    pub analyses_completed: u64,

    /// Process start time
    pub started_at: Instant,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            history: HistoryBuffer::new(),
            mode: OperatingMode::Normal,
            paused: false,
            status: SystemStatus::Initializing,
            latest_analysis: None,
            last_analysis_time: None,
            last_analysis_window: 0,
            samples_generated: 0,
            analyses_completed: 0,
            started_at: Instant::now(),
        }
    }
}

impl AppState {
    /// Shared default state ready for the driver and API.
    pub fn shared() -> SharedState {
        Arc::new(RwLock::new(Self::default()))
    }

    /// Switch the operating mode; applies on the next driver tick.
    pub fn set_mode(&mut self, mode: OperatingMode) {
        if self.mode != mode {
            tracing::info!(from = %self.mode, to = %mode, "Operating mode switched");
            self.mode = mode;
        }
    }

    /// Uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// System operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemStatus {
    /// System is starting up
    Initializing,
    /// Sampling is running
    Monitoring,
    /// Sampling is paused by the operator
    Paused,
}

impl std::fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SystemStatus::Initializing => write!(f, "Initializing"),
            SystemStatus::Monitoring => write!(f, "Monitoring"),
            SystemStatus::Paused => write!(f, "Paused"),
        }
    }
}
