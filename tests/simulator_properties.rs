//! Long-run behavioral properties of the motor simulator.
//!
//! These exercise the simulator over many steps to check monotone
//! trends under fault modes, recovery under normal operation, and the
//! consistency of derived fields.

use mechamind::history::{HistoryBuffer, HISTORY_CAPACITY};
use mechamind::simulator::{MotorSimulator, NoiseSource, SimulatorState};
use mechamind::types::{classify, OperatingMode};

/// Noise fixed at the midpoint of every requested range.
struct MidpointNoise;

impl NoiseSource for MidpointNoise {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (low + high) / 2.0
    }
}

#[test]
fn overheat_temperature_rises_monotonically() {
    let mut sim = MotorSimulator::with_noise(MidpointNoise);
    let mut prev = sim.state().temperature;
    for _ in 0..120 {
        let sample = sim.step(OperatingMode::Overheat);
        assert!(
            sample.temperature > prev - 0.05,
            "temperature fell during overheat: {} -> {}",
            prev,
            sample.temperature
        );
        prev = sample.temperature;
    }
    // After two minutes of overheating the motor must be critical.
    assert!(prev > 80.0, "expected critical temperature, got {prev}");
}

#[test]
fn unbalanced_vibration_rises_monotonically() {
    let mut sim = MotorSimulator::with_noise(MidpointNoise);
    let mut prev = sim.state().vibration;
    for _ in 0..120 {
        let sample = sim.step(OperatingMode::Unbalanced);
        assert!(
            sample.vibration >= prev - 0.01,
            "vibration fell while unbalanced: {} -> {}",
            prev,
            sample.vibration
        );
        prev = sample.vibration;
    }
    assert!(prev > 10.0, "expected critical vibration, got {prev}");
}

#[test]
fn normal_mode_recovers_from_extreme_temperature() {
    let hot = SimulatorState {
        temperature: 200.0,
        vibration: 2.5,
        rpm: 1500.0,
    };
    let mut sim = MotorSimulator::from_state(hot, MidpointNoise);
    for _ in 0..300 {
        sim.step(OperatingMode::Normal);
    }
    let settled = sim.state().temperature;
    assert!(
        (settled - 47.5).abs() < 1.0,
        "temperature did not converge toward baseline: {settled}"
    );
}

#[test]
fn normal_mode_recovers_from_extreme_vibration() {
    let shaky = SimulatorState {
        temperature: 45.0,
        vibration: 50.0,
        rpm: 1500.0,
    };
    let mut sim = MotorSimulator::from_state(shaky, MidpointNoise);
    for _ in 0..300 {
        sim.step(OperatingMode::Normal);
    }
    let settled = sim.state().vibration;
    assert!(
        settled < 3.5,
        "vibration did not converge toward baseline: {settled}"
    );
}

#[test]
fn history_never_exceeds_capacity() {
    let mut sim = MotorSimulator::seeded(7);
    let mut history = HistoryBuffer::new();
    for i in 0..500 {
        history.append(sim.step(OperatingMode::Overheat));
        assert!(history.len() <= HISTORY_CAPACITY);
        assert_eq!(history.len(), (i + 1).min(HISTORY_CAPACITY));
    }
}

#[test]
fn sample_status_matches_threshold_classification() {
    // Drive the motor through a full fault-and-recovery cycle and check
    // that every emitted status agrees with the published thresholds
    // applied to the unrounded state of that step.
    let mut sim = MotorSimulator::seeded(99);
    let schedule = [
        (OperatingMode::Normal, 30),
        (OperatingMode::Overheat, 60),
        (OperatingMode::Normal, 60),
        (OperatingMode::Unbalanced, 60),
        (OperatingMode::Normal, 60),
    ];
    for (mode, steps) in schedule {
        for _ in 0..steps {
            let sample = sim.step(mode);
            let state = sim.state();
            assert_eq!(
                sample.status,
                classify(state.temperature, state.vibration),
                "status disagrees with thresholds at temp={} vib={}",
                state.temperature,
                state.vibration
            );
        }
    }
}

#[test]
fn power_tracks_rpm() {
    let mut sim = MotorSimulator::seeded(3);
    for _ in 0..100 {
        let sample = sim.step(OperatingMode::Normal);
        let expected = sample.rpm as f64 * 0.15;
        // Power derives from the unrounded rpm, so allow the rounding slack.
        assert!(
            (sample.power - expected).abs() < 0.2,
            "power {} far from rpm-derived {}",
            sample.power,
            expected
        );
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let mut a = MotorSimulator::seeded(1234);
    let mut b = MotorSimulator::seeded(1234);
    for _ in 0..50 {
        let sa = a.step(OperatingMode::Unbalanced);
        let sb = b.step(OperatingMode::Unbalanced);
        assert_eq!(sa.temperature, sb.temperature);
        assert_eq!(sa.vibration, sb.vibration);
        assert_eq!(sa.rpm, sb.rpm);
    }
}
