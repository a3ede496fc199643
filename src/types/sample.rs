//! Motor telemetry sample and diagnosis result types

use serde::{Deserialize, Serialize};

/// One telemetry snapshot produced by a simulator step.
///
/// Values are rounded for display at construction time; the simulator keeps
/// the unrounded state internally. A sample is never mutated after creation
/// and `status` is classified from the unrounded temperature/vibration at
/// generation time, before display rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorSample {
    /// Wall-clock time of generation, formatted `HH:MM:SS`
    pub timestamp: String,
    /// Winding temperature (°C), 1 decimal place
    pub temperature: f64,
    /// Vibration velocity (mm/s), 2 decimal places
    pub vibration: f64,
    /// Shaft speed (RPM), nearest integer
    pub rpm: i64,
    /// Electrical power draw (W), derived as `rpm * 0.15`, 1 decimal place
    pub power: f64,
    /// Threshold classification at generation time
    pub status: MotorStatus,
}

/// Discrete health status derived from fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotorStatus {
    Normal,
    Warning,
    Critical,
}

impl std::fmt::Display for MotorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MotorStatus::Normal => write!(f, "Normal"),
            MotorStatus::Warning => write!(f, "Warning"),
            MotorStatus::Critical => write!(f, "Critical"),
        }
    }
}

/// Operating mode selecting which update rule governs the next step.
///
/// Exactly one mode is active at a time. Switching modes does not reset the
/// carried physical state, so transitions stay continuous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatingMode {
    /// Self-stabilizing behavior around nominal setpoints
    Normal,
    /// Runaway temperature growth with efficiency loss
    Overheat,
    /// Rotor imbalance - runaway vibration with frictional heating
    Unbalanced,
}

impl Default for OperatingMode {
    fn default() -> Self {
        OperatingMode::Normal
    }
}

impl std::fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatingMode::Normal => write!(f, "normal"),
            OperatingMode::Overheat => write!(f, "overheat"),
            OperatingMode::Unbalanced => write!(f, "unbalanced"),
        }
    }
}

/// Qualitative assessment returned by the remote diagnosis collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisStatus {
    Healthy,
    #[serde(rename = "At Risk")]
    AtRisk,
    #[serde(rename = "Critical Failure")]
    CriticalFailure,
}

impl std::fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisStatus::Healthy => write!(f, "Healthy"),
            AnalysisStatus::AtRisk => write!(f, "At Risk"),
            AnalysisStatus::CriticalFailure => write!(f, "Critical Failure"),
        }
    }
}

/// Structured result of a remote diagnosis request.
///
/// The diagnosis client guarantees this shape is always returned - transport
/// and parse failures are normalized into an `AtRisk` result rather than
/// surfaced as errors (see [`crate::diagnosis`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: AnalysisStatus,
    /// Free-text explanation of the findings
    pub explanation: String,
    /// Free-text recommended action
    pub recommendation: String,
}
