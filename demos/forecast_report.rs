//! Forecast report for a CSV export of hourly readings.
//!
//! ```text
//! cargo run --example forecast_report -- readings.csv 2025-12-30 14 [engine.json]
//! ```
//!
//! Set `RUST_LOG=debug` to see the availability assessment.

use ecosphere::usage_forecast::data::parse_date;
use ecosphere::usage_forecast::{DataLoader, EngineConfig, Forecaster};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "Usage: {} <readings.csv> <anchor YYYY-MM-DD> <horizon days> [config.json]",
            args[0]
        );
        std::process::exit(2);
    }

    let series = DataLoader::from_csv(&args[1])?;
    let anchor = parse_date(&args[2])?;
    let horizon: usize = args[3].parse()?;
    let config = match args.get(4) {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    info!(points = series.len(), %anchor, horizon, "Loaded readings");

    let forecaster = Forecaster::new(config)?;
    let result = forecaster.generate_forecast(anchor, horizon, &series);

    println!("{}", serde_json::to_string_pretty(&result)?);

    let summary = result.summary();
    println!();
    println!(
        "{} ({}% confidence)",
        result.metadata.display_name, result.metadata.confidence
    );
    if let Some(warning) = &result.metadata.warning {
        println!("Warning: {}", warning);
    }
    println!(
        "Total {:.2} over {} days, peak {:.2}, average {:.2}/day",
        summary.total, summary.days, summary.peak, summary.average_per_day
    );

    Ok(())
}
