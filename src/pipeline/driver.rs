//! Sampling Driver
//!
//! Periodic timer loop that advances the motor simulator at a fixed cadence
//! and feeds results into the shared history buffer. Steps are strictly
//! serialized - the driver owns the simulator and at most one step is ever
//! in flight. Pausing suspends stepping without discarding history;
//! cancellation shuts the loop down cleanly.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::state::{SharedState, SystemStatus};
use crate::simulator::{MotorSimulator, NoiseSource, RngNoise};

/// Drives [`MotorSimulator::step`] on a fixed interval.
pub struct SamplingDriver<N: NoiseSource = RngNoise> {
    simulator: MotorSimulator<N>,
    state: SharedState,
    period: Duration,
    cancel_token: CancellationToken,
}

impl<N: NoiseSource> SamplingDriver<N> {
    pub fn new(
        simulator: MotorSimulator<N>,
        state: SharedState,
        period: Duration,
        cancel_token: CancellationToken,
    ) -> Self {
        Self {
            simulator,
            state,
            period,
            cancel_token,
        }
    }

    /// Run the sampling loop until cancellation. Returns total samples generated.
    pub async fn run(mut self) -> u64 {
        info!(period_ms = self.period.as_millis() as u64, "Sampling driver started");

        let mut interval = tokio::time::interval(self.period);
        // A stalled tick should not cause a burst of catch-up steps
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    info!("Sampling driver shutting down");
                    break;
                }
                _ = interval.tick() => {
                    self.tick_once().await;
                }
            }
        }

        let generated = {
            let state = self.state.read().await;
            state.samples_generated
        };
        info!(samples = generated, "Sampling driver stopped");
        generated
    }

    /// Perform one driver tick: read mode/pause, step, append.
    ///
    /// Public so tests can drive the pipeline without a running timer.
    pub async fn tick_once(&mut self) {
        // Snapshot control flags; mode switches apply from this tick onward
        let (paused, mode) = {
            let state = self.state.read().await;
            (state.paused, state.mode)
        };

        if paused {
            let mut state = self.state.write().await;
            state.status = SystemStatus::Paused;
            return;
        }

        let sample = self.simulator.step(mode);

        let mut state = self.state.write().await;
        state.history.append(sample.clone());
        state.samples_generated += 1;
        state.status = SystemStatus::Monitoring;

        if state.samples_generated % 10 == 0 {
            debug!(
                samples = state.samples_generated,
                buffer = format!("{}/{}", state.history.len(), state.history.capacity()),
                temp = sample.temperature,
                vib = sample.vibration,
                rpm = sample.rpm,
                status = %sample.status,
                "Sampling progress"
            );
        }
    }
}
