//! Fixed classification thresholds for motor health status

use super::MotorStatus;

/// Temperature above this is a warning (°C)
pub const TEMP_WARNING: f64 = 65.0;
/// Temperature above this is critical (°C)
pub const TEMP_CRITICAL: f64 = 80.0;
/// Vibration above this is a warning (mm/s)
pub const VIBRATION_WARNING: f64 = 6.0;
/// Vibration above this is critical (mm/s) - likely rotor imbalance
pub const VIBRATION_CRITICAL: f64 = 10.0;

/// Classify a temperature/vibration pair against the fixed thresholds.
///
/// The critical check takes precedence over warning. Thresholds are
/// exclusive: a value exactly at a threshold does not cross it. The
/// simulator calls this with the unrounded values of the current step.
pub fn classify(temperature: f64, vibration: f64) -> MotorStatus {
    if temperature > TEMP_CRITICAL || vibration > VIBRATION_CRITICAL {
        MotorStatus::Critical
    } else if temperature > TEMP_WARNING || vibration > VIBRATION_WARNING {
        MotorStatus::Warning
    } else {
        MotorStatus::Normal
    }
}
