//! MechaMind - Industrial Motor Condition Monitor
//!
//! Runs the 1 Hz sampling driver against a simulated motor and serves the
//! dashboard API.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: bind 0.0.0.0:8080, 1 s sampling period
//! cargo run --release
//!
//! # Reproducible simulation
//! cargo run --release -- --seed 42
//! ```
//!
//! # Environment Variables
//!
//! - `MOTOR_CONFIG`: path to the TOML config file
//! - `GEMINI_API_KEY`: credential for the remote diagnosis service
//! - `RUST_LOG`: logging level (default: info)

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use mechamind::api::{create_app, DashboardState};
use mechamind::config::{self, MonitorConfig};
use mechamind::diagnosis::DiagnosisClient;
use mechamind::pipeline::{AppState, SamplingDriver};
use mechamind::simulator::MotorSimulator;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "mechamind")]
#[command(about = "MechaMind motor condition monitoring service")]
#[command(version)]
struct CliArgs {
    /// Override the server bind address (default from config: "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Override the sampling period in seconds
    #[arg(long)]
    period: Option<u64>,

    /// Fixed RNG seed for reproducible simulation
    #[arg(long)]
    seed: Option<u64>,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = CliArgs::parse();

    config::init(MonitorConfig::load());
    let cfg = config::get();

    let addr = args.addr.clone().unwrap_or_else(|| cfg.server.addr.clone());
    let period = Duration::from_secs(args.period.unwrap_or(cfg.sampling.period_secs).max(1));
    let seed = args.seed.or(cfg.sampling.seed);

    info!("MechaMind starting");
    info!(addr = %addr, period_secs = period.as_secs(), seed = ?seed, "Configuration resolved");

    // Shared state between the driver and the API
    let app_state = AppState::shared();
    let cancel_token = CancellationToken::new();

    // Simulated motor at the nominal cold-start operating point
    let simulator = match seed {
        Some(s) => MotorSimulator::seeded(s),
        None => MotorSimulator::new(),
    };

    let driver = SamplingDriver::new(
        simulator,
        app_state.clone(),
        period,
        cancel_token.clone(),
    );
    let driver_handle = tokio::spawn(driver.run());

    // Remote diagnosis client (demo mode without a credential)
    let diagnosis = Arc::new(DiagnosisClient::from_config(&cfg.diagnosis));
    if diagnosis.is_live() {
        info!(model = %cfg.diagnosis.model, "Remote diagnosis enabled");
    }

    let dashboard = DashboardState::new(app_state, diagnosis);
    let app = create_app(dashboard);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(addr = %addr, "Dashboard API listening");

    let shutdown_token = cancel_token.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            shutdown_token.cancel();
        })
        .await
        .context("Server error")?;

    // Wait for the driver to drain before exiting
    let generated = driver_handle.await.unwrap_or(0);
    info!(samples = generated, "MechaMind stopped");

    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
