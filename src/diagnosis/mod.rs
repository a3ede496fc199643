//! Remote Diagnosis Client
//!
//! Sends a window of recent telemetry to a remote LLM service and returns a
//! qualitative health assessment. The consumer-facing contract is total:
//! `analyze()` always yields a well-formed [`AnalysisResult`]. Transport and
//! parse failures are normalized into an `At Risk` result with a diagnostic
//! message, and a missing credential yields a fixed demo-mode `Healthy`
//! result. Callers never handle a distinct "analysis failed" case.
//!
//! The HTTP transport lives behind the [`AnalysisBackend`] trait so tests can
//! inject canned or failing backends without a network.

mod gemini;

pub use gemini::GeminiBackend;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DiagnosisConfig;
use crate::types::{AnalysisResult, AnalysisStatus, MotorSample};
use crate::types::thresholds::{TEMP_CRITICAL, TEMP_WARNING, VIBRATION_CRITICAL, VIBRATION_WARNING};

// ============================================================================
// Error Types
// ============================================================================

/// Errors internal to the diagnosis transport. These never cross the
/// `analyze()` boundary - they are folded into the fallback result.
#[derive(Error, Debug)]
pub enum DiagnosisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned status {0}")]
    ServerError(reqwest::StatusCode),

    #[error("Response contained no analysis text")]
    MissingContent,

    #[error("Failed to parse analysis: {0}")]
    Parse(#[from] serde_json::Error),
}

// ============================================================================
// Backend Trait
// ============================================================================

/// Transport for one diagnosis round-trip.
///
/// Takes the rendered prompt and returns the model's raw JSON text, which
/// the client parses into an [`AnalysisResult`].
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn request(&self, prompt: &str) -> Result<String, DiagnosisError>;
}

// ============================================================================
// Diagnosis Client
// ============================================================================

/// Client for the remote diagnosis collaborator.
///
/// Constructed without a backend (no credential configured) the client runs
/// in demo mode and returns a fixed `Healthy` result.
pub struct DiagnosisClient {
    backend: Option<Arc<dyn AnalysisBackend>>,
}

impl DiagnosisClient {
    /// Build from configuration. An empty API key selects demo mode.
    pub fn from_config(cfg: &DiagnosisConfig) -> Self {
        if cfg.api_key.is_empty() {
            info!("No diagnosis API key configured - running in demo mode");
            Self { backend: None }
        } else {
            Self {
                backend: Some(Arc::new(GeminiBackend::new(cfg))),
            }
        }
    }

    /// Demo-mode client with no remote backend.
    pub fn demo() -> Self {
        Self { backend: None }
    }

    /// Client over an explicit backend (used by tests).
    pub fn with_backend(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Whether a remote backend is configured.
    pub fn is_live(&self) -> bool {
        self.backend.is_some()
    }

    /// Request an assessment for the given sample window.
    ///
    /// Always returns a well-formed result; see the module docs for the
    /// demo-mode and failure-normalization behavior.
    pub async fn analyze(&self, window: &[MotorSample]) -> AnalysisResult {
        let Some(backend) = &self.backend else {
            return demo_result();
        };

        let prompt = build_prompt(window);

        match self.run(backend.as_ref(), &prompt).await {
            Ok(result) => {
                info!(status = %result.status, "Diagnosis completed");
                result
            }
            Err(e) => {
                warn!(error = %e, "Diagnosis request failed - returning fallback result");
                fallback_result()
            }
        }
    }

    async fn run(
        &self,
        backend: &dyn AnalysisBackend,
        prompt: &str,
    ) -> Result<AnalysisResult, DiagnosisError> {
        let text = backend.request(prompt).await?;
        let result: AnalysisResult = serde_json::from_str(text.trim())?;
        Ok(result)
    }
}

/// Fixed result when no credential is configured.
fn demo_result() -> AnalysisResult {
    AnalysisResult {
        status: AnalysisStatus::Healthy,
        explanation: "API key not configured. Running in demonstration mode.".to_string(),
        recommendation: "Configure an API key to receive live analysis.".to_string(),
    }
}

/// Fallback result for any transport or parse failure.
fn fallback_result() -> AnalysisResult {
    AnalysisResult {
        status: AnalysisStatus::AtRisk,
        explanation: "Could not obtain an assessment from the AI diagnosis service.".to_string(),
        recommendation: "Check network connectivity and the API key, then retry.".to_string(),
    }
}

/// Render the prompt for a telemetry window.
///
/// Embeds the serialized samples and the reference thresholds so the model
/// grades against the same rules the classifier uses.
fn build_prompt(window: &[MotorSample]) -> String {
    // Serialization of plain numeric/string fields cannot fail
    let data = serde_json::to_string(window).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"Act as an expert predictive-maintenance and mechatronics engineer.
Analyze the following telemetry from an industrial motor (most recent seconds).

Data: {data}

Reference thresholds:
- Temperature > {TEMP_WARNING}°C is a warning, > {TEMP_CRITICAL}°C is critical.
- Vibration > {VIBRATION_WARNING} mm/s is a warning, > {VIBRATION_CRITICAL} mm/s is critical (possible imbalance).

Respond strictly as JSON with fields "status" ("Healthy", "At Risk" or
"Critical Failure"), "explanation" and "recommendation"."#
    )
}

// ============================================================================
// Tests
// ============================================================================
