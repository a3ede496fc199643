//! Shared data structures for the motor condition monitoring pipeline
//!
//! This module defines the core types flowing through the system:
//! - MotorSample (one rounded telemetry snapshot per simulator step)
//! - OperatingMode (which physical update rule governs the next step)
//! - MotorStatus (threshold classification of a sample)
//! - AnalysisResult / AnalysisStatus (remote diagnosis contract)

mod sample;
pub mod thresholds;

pub use sample::*;
pub use thresholds::classify;
