//! MechaMind: Industrial Motor Condition Monitoring
//!
//! Simulated motor telemetry with threshold classification, bounded history,
//! a periodic sampling driver, and an AI-backed remote diagnosis client.
//!
//! ## Architecture
//!
//! - **Simulator**: advances the motor's physical state one step per tick
//!   under the selected operating mode and classifies each snapshot
//! - **History**: capacity-bounded FIFO buffer of recent samples
//! - **Pipeline**: shared state plus the 1 Hz sampling driver
//! - **Diagnosis**: remote LLM assessment over the recent sample window
//! - **API**: axum dashboard surface for telemetry reads and control

pub mod api;
pub mod config;
pub mod diagnosis;
pub mod history;
pub mod pipeline;
pub mod simulator;
pub mod types;

// Re-export commonly used types
pub use history::{HistoryBuffer, DIAGNOSIS_WINDOW, HISTORY_CAPACITY};
pub use pipeline::{AppState, SamplingDriver, SharedState, SystemStatus};
pub use simulator::{MotorSimulator, NoiseSource, RngNoise, SimulatorState};
pub use types::{
    AnalysisResult, AnalysisStatus, MotorSample, MotorStatus, OperatingMode,
};

// Re-export the diagnosis client
pub use diagnosis::DiagnosisClient;
