//! API route handlers
//!
//! Request handling logic for the motor monitoring dashboard:
//! - Live telemetry and bounded history reads
//! - Operating mode and sampling control
//! - On-demand remote diagnosis with a single-flight busy guard

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::config;
use crate::diagnosis::DiagnosisClient;
use crate::history::DIAGNOSIS_WINDOW;
use crate::pipeline::{SharedState, SystemStatus};
use crate::types::{AnalysisResult, MotorSample, OperatingMode};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers.
#[derive(Clone)]
pub struct DashboardState {
    /// Application state from the pipeline
    pub app_state: SharedState,
    /// Remote diagnosis client
    pub diagnosis: Arc<DiagnosisClient>,
    /// Single-flight guard: true while a diagnosis request is outstanding
    analysis_busy: Arc<AtomicBool>,
}

impl DashboardState {
    pub fn new(app_state: SharedState, diagnosis: Arc<DiagnosisClient>) -> Self {
        Self {
            app_state,
            diagnosis,
            analysis_busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a diagnosis request is currently in flight.
    pub fn analysis_in_flight(&self) -> bool {
        self.analysis_busy.load(Ordering::SeqCst)
    }
}

/// Clears the busy flag when the analysis future completes or is dropped.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// ============================================================================
// Response Bodies
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct BufferInfo {
    pub len: usize,
    pub capacity: usize,
}

#[derive(Debug, Serialize)]
pub struct LiveData {
    pub sample: Option<MotorSample>,
    pub mode: OperatingMode,
    pub paused: bool,
    pub status: SystemStatus,
    pub buffer: BufferInfo,
}

#[derive(Debug, Serialize)]
pub struct HistoryData {
    pub samples: Vec<MotorSample>,
    pub buffer: BufferInfo,
}

#[derive(Debug, Serialize)]
pub struct ModeData {
    pub mode: OperatingMode,
}

#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub mode: OperatingMode,
}

#[derive(Debug, Serialize)]
pub struct SamplingData {
    pub paused: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalysisData {
    pub result: AnalysisResult,
    pub live: bool,
    pub window_len: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /health` - liveness probe.
pub async fn health(State(state): State<DashboardState>) -> Json<HealthResponse> {
    let app = state.app_state.read().await;
    Json(HealthResponse {
        status: "ok",
        uptime_seconds: app.uptime_secs(),
    })
}

/// `GET /api/v1/live` - latest sample plus control state and buffer fill.
pub async fn live_data(State(state): State<DashboardState>) -> Response {
    let app = state.app_state.read().await;
    ApiResponse::ok(LiveData {
        sample: app.history.latest().cloned(),
        mode: app.mode,
        paused: app.paused,
        status: app.status,
        buffer: BufferInfo {
            len: app.history.len(),
            capacity: app.history.capacity(),
        },
    })
}

/// `GET /api/v1/history` - full bounded history in append order.
pub async fn history(State(state): State<DashboardState>) -> Response {
    let app = state.app_state.read().await;
    ApiResponse::ok(HistoryData {
        samples: app.history.snapshot(),
        buffer: BufferInfo {
            len: app.history.len(),
            capacity: app.history.capacity(),
        },
    })
}

/// `GET /api/v1/mode` - currently selected operating mode.
pub async fn get_mode(State(state): State<DashboardState>) -> Response {
    let app = state.app_state.read().await;
    ApiResponse::ok(ModeData { mode: app.mode })
}

/// `POST /api/v1/mode` - switch operating mode (effective next tick).
pub async fn set_mode(
    State(state): State<DashboardState>,
    Json(req): Json<SetModeRequest>,
) -> Response {
    let mut app = state.app_state.write().await;
    app.set_mode(req.mode);
    ApiResponse::ok(ModeData { mode: app.mode })
}

/// `POST /api/v1/sampling/pause` - suspend stepping, keep history.
pub async fn pause_sampling(State(state): State<DashboardState>) -> Response {
    let mut app = state.app_state.write().await;
    if !app.paused {
        app.paused = true;
        app.status = SystemStatus::Paused;
        info!("Sampling paused");
    }
    ApiResponse::ok(SamplingData { paused: app.paused })
}

/// `POST /api/v1/sampling/resume` - resume stepping.
pub async fn resume_sampling(State(state): State<DashboardState>) -> Response {
    let mut app = state.app_state.write().await;
    if app.paused {
        app.paused = false;
        info!("Sampling resumed");
    }
    ApiResponse::ok(SamplingData { paused: app.paused })
}

/// `POST /api/v1/analysis` - run a remote diagnosis over the recent window.
///
/// Rejects with 409 while a previous request is outstanding (explicit
/// single-flight guard) and with 400 until enough samples have accumulated.
pub async fn run_analysis(State(state): State<DashboardState>) -> Response {
    if state
        .analysis_busy
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return ApiErrorResponse::conflict("An analysis request is already in flight");
    }
    let _guard = BusyGuard(state.analysis_busy.clone());

    let min_samples = config::get().diagnosis.min_samples;
    let window = {
        let app = state.app_state.read().await;
        if app.history.len() < min_samples {
            return ApiErrorResponse::bad_request(format!(
                "Need at least {} samples before analysis ({} buffered)",
                min_samples,
                app.history.len()
            ));
        }
        app.history.tail(DIAGNOSIS_WINDOW)
    };

    let window_len = window.len();
    let result = state.diagnosis.analyze(&window).await;

    {
        let mut app = state.app_state.write().await;
        app.latest_analysis = Some(result.clone());
        app.last_analysis_time = Some(chrono::Utc::now());
        app.last_analysis_window = window_len;
        app.analyses_completed += 1;
    }

    ApiResponse::ok(AnalysisData {
        result,
        live: state.diagnosis.is_live(),
        window_len,
    })
}

/// `GET /api/v1/analysis` - latest completed diagnosis.
pub async fn latest_analysis(State(state): State<DashboardState>) -> Response {
    let app = state.app_state.read().await;
    match &app.latest_analysis {
        Some(result) => ApiResponse::ok(AnalysisData {
            result: result.clone(),
            live: state.diagnosis.is_live(),
            // Window size the stored result was computed over, not the
            // current history tail
            window_len: app.last_analysis_window,
        }),
        None => ApiErrorResponse::not_found("No analysis has been run yet"),
    }
}

// ============================================================================
// Tests
// ============================================================================
