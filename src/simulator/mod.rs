//! Motor State Simulator
//!
//! Advances a simulated industrial motor one step per invocation according to
//! the selected [`OperatingMode`], classifies the updated state against the
//! fixed thresholds, and returns a rounded snapshot.
//!
//! The physical state (temperature, vibration, rpm) is carried **unrounded**
//! between steps; rounding happens only when constructing the returned
//! [`MotorSample`]. Switching modes never resets the state, so transitions
//! between operating regimes stay physically continuous.
//!
//! Randomness is abstracted behind the [`NoiseSource`] trait so tests can
//! inject a fixed or seeded generator and assert exact outputs.

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{classify, MotorSample, OperatingMode};

// ============================================================================
// Noise Source
// ============================================================================

/// Injectable source of uniform random draws.
///
/// Each call is an independent draw over `[low, high)`; the simulator makes
/// independent draws per field per step.
pub trait NoiseSource: Send {
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

/// Production noise source backed by a seedable PRNG.
pub struct RngNoise {
    rng: StdRng,
}

impl RngNoise {
    /// Create from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create with a fixed seed for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for RngNoise {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..high)
    }
}

// ============================================================================
// Simulator State
// ============================================================================

/// Unrounded physical state carried between steps.
///
/// Mutated only by [`MotorSimulator::step`]. Initialized once per simulator
/// instance; never reset on mode switches.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorState {
    /// Winding temperature (°C)
    pub temperature: f64,
    /// Vibration velocity (mm/s)
    pub vibration: f64,
    /// Shaft speed (RPM)
    pub rpm: f64,
}

impl Default for SimulatorState {
    /// Nominal cold-start operating point.
    fn default() -> Self {
        Self {
            temperature: 45.0,
            vibration: 2.5,
            rpm: 1500.0,
        }
    }
}

// ============================================================================
// Motor Simulator
// ============================================================================

/// Owns the physical state of one simulated motor and advances it on demand.
///
/// `step()` is the only mutating operation and always succeeds - every mode
/// is valid input and every random draw is unconditioned. The caller (the
/// sampling driver) serializes invocations; the simulator itself needs no
/// synchronization.
pub struct MotorSimulator<N: NoiseSource = RngNoise> {
    state: SimulatorState,
    noise: N,
    steps_taken: u64,
}

impl MotorSimulator<RngNoise> {
    /// Create a simulator at the nominal starting point with entropy-seeded noise.
    pub fn new() -> Self {
        Self::with_noise(RngNoise::from_entropy())
    }

    /// Create a simulator with a fixed RNG seed for reproducible output.
    pub fn seeded(seed: u64) -> Self {
        Self::with_noise(RngNoise::seeded(seed))
    }
}

impl Default for MotorSimulator<RngNoise> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NoiseSource> MotorSimulator<N> {
    /// Create a simulator at the nominal starting point with the given noise source.
    pub fn with_noise(noise: N) -> Self {
        Self {
            state: SimulatorState::default(),
            noise,
            steps_taken: 0,
        }
    }

    /// Create a simulator from an explicit starting state (state injection
    /// for tests and independent motor instances).
    pub fn from_state(state: SimulatorState, noise: N) -> Self {
        Self {
            state,
            noise,
            steps_taken: 0,
        }
    }

    /// Current unrounded physical state.
    pub fn state(&self) -> &SimulatorState {
        &self.state
    }

    /// Number of steps taken since construction.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Advance the motor one step under `mode` and return a rounded snapshot.
    ///
    /// Applies the mode's update rule to the unrounded state, classifies the
    /// updated values, and stamps the sample with the current wall-clock
    /// time-of-day.
    pub fn step(&mut self, mode: OperatingMode) -> MotorSample {
        self.advance(mode);
        self.steps_taken += 1;

        let timestamp = Local::now().format("%H:%M:%S").to_string();
        self.snapshot(timestamp)
    }

    /// Apply one physical update under `mode`.
    fn advance(&mut self, mode: OperatingMode) {
        let s = &mut self.state;
        match mode {
            OperatingMode::Normal => {
                // Exponential smoothing toward a noisy nominal setpoint -
                // the motor seeks its stable operating band.
                s.temperature = s.temperature * 0.95 + (45.0 + self.noise.uniform(0.0, 5.0)) * 0.05;
                s.vibration = s.vibration * 0.9 + (2.0 + self.noise.uniform(0.0, 1.5)) * 0.1;
                s.rpm = s.rpm * 0.9 + (1500.0 + self.noise.uniform(0.0, 50.0)) * 0.1;
            }
            OperatingMode::Overheat => {
                // Runaway thermal growth; rpm decays toward a lower band as
                // the motor loses efficiency under thermal stress.
                s.temperature += self.noise.uniform(0.0, 1.5);
                s.rpm = s.rpm * 0.95 + (1400.0 + self.noise.uniform(0.0, 20.0)) * 0.05;
            }
            OperatingMode::Unbalanced => {
                // Runaway vibration; friction adds a small fixed heat load.
                s.vibration += self.noise.uniform(0.0, 0.8);
                s.temperature += 0.1;
            }
        }
    }

    /// Build the rounded display sample from the current unrounded state.
    ///
    /// The status is classified from the unrounded temperature/vibration;
    /// rounding only affects the displayed readings.
    fn snapshot(&self, timestamp: String) -> MotorSample {
        let s = &self.state;
        MotorSample {
            timestamp,
            temperature: round_to(s.temperature, 1),
            vibration: round_to(s.vibration, 2),
            rpm: s.rpm.round() as i64,
            // Power derives from the unrounded rpm, not the display value
            power: round_to(s.rpm * 0.15, 1),
            status: classify(s.temperature, s.vibration),
        }
    }
}

/// Round to `decimals` decimal places.
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

// ============================================================================
// Tests
// ============================================================================
