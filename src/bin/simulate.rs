//! Offline Motor Telemetry Simulation
//!
//! Generates motor telemetry samples without running the service, for
//! testing dashboards and replaying scenarios.
//!
//! # Usage
//! ```bash
//! ./simulate --mode overheat --steps 60 --seed 42
//! ./simulate --format csv --steps 120 > telemetry.csv
//! ```

use std::io::{self, Write};

use clap::Parser;

use mechamind::simulator::MotorSimulator;
use mechamind::types::OperatingMode;

#[derive(Parser, Debug)]
#[command(name = "simulate")]
#[command(about = "Motor telemetry generator for MechaMind testing")]
#[command(version)]
struct Args {
    /// Operating mode for every step
    #[arg(long, default_value = "normal")]
    mode: String,

    /// Number of samples to generate
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u32).range(1..=100_000))]
    steps: u32,

    /// Output format: json or csv
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Csv,
}

fn parse_mode(s: &str) -> Result<OperatingMode, String> {
    match s.to_lowercase().as_str() {
        "normal" => Ok(OperatingMode::Normal),
        "overheat" => Ok(OperatingMode::Overheat),
        "unbalanced" => Ok(OperatingMode::Unbalanced),
        other => Err(format!(
            "Unknown mode '{other}' (expected normal, overheat or unbalanced)"
        )),
    }
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "json" => Ok(OutputFormat::Json),
        "csv" => Ok(OutputFormat::Csv),
        other => Err(format!("Unknown format '{other}' (expected json or csv)")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let mode = parse_mode(&args.mode)?;
    let format = parse_format(&args.format)?;

    let mut sim = match args.seed {
        Some(s) => MotorSimulator::seeded(s),
        None => MotorSimulator::new(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if format == OutputFormat::Csv {
        writeln!(out, "timestamp,temperature,vibration,rpm,power,status")?;
    }

    for _ in 0..args.steps {
        let sample = sim.step(mode);
        match format {
            OutputFormat::Csv => writeln!(
                out,
                "{},{:.1},{:.2},{},{:.1},{}",
                sample.timestamp,
                sample.temperature,
                sample.vibration,
                sample.rpm,
                sample.power,
                sample.status,
            )?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&sample)?)?,
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("Overheat"), Ok(OperatingMode::Overheat));
        assert!(parse_mode("melting").is_err());
    }

    #[test]
    fn test_parse_format_rejects_unknown() {
        assert_eq!(parse_format("CSV"), Ok(OutputFormat::Csv));
        assert_eq!(parse_format("json"), Ok(OutputFormat::Json));
        assert!(parse_format("xml").is_err());
    }
}
