//! Thermal effect command line tool.
//!
//! Loads a station record, derives the deck temperature profile over a date
//! range and prints the thermal response of one point with known per-degree
//! unit responses as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin thermal-effect --features cli -- \
//!   holly-springs 2019-07-01T00:00 2019-07-02T00:00 \
//!   --kind strain --uniform 1e-5 --linear 4e-6
//! ```
//!
//! # Options
//!
//! - `--config <path>`: TOML configuration (default: `thermal.toml` search)
//! - `--kind <kind>`: Response kind (default: strain)
//! - `--uniform <value>`: Per-degree uniform load response (default: 1)
//! - `--linear <value>`: Per-degree linear load response (default: 0)
//! - `--year <year>`: Rescale air temperature onto that year's envelope
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bridge_thermal::algorithms::ConstantResponse;
use bridge_thermal::config::ThermalConfig;
use bridge_thermal::core::{Point, ResponseKind};
use bridge_thermal::pipeline::ThermalPipeline;
use bridge_thermal::transformations::TemperatureYear;

struct Args {
    station: String,
    from: NaiveDateTime,
    to: NaiveDateTime,
    config: Option<String>,
    kind: ResponseKind,
    uniform: f64,
    linear: f64,
    year: Option<i32>,
}

fn parse_time(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .with_context(|| format!("Invalid timestamp '{}', expected YYYY-MM-DDTHH:MM", value))
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut kind = ResponseKind::Strain;
    let mut uniform: f64 = 1.0;
    let mut linear: f64 = 0.0;
    let mut year: Option<i32> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .with_context(|| format!("Missing value for {}", name))
        };
        match arg.as_str() {
            "--config" => config = Some(value("--config")?),
            "--kind" => kind = value("--kind")?.parse()?,
            "--uniform" => uniform = value("--uniform")?.parse().context("Invalid --uniform")?,
            "--linear" => linear = value("--linear")?.parse().context("Invalid --linear")?,
            "--year" => year = Some(value("--year")?.parse().context("Invalid --year")?),
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            other => positional.push(other.to_string()),
        }
    }

    let [station, from, to]: [String; 3] = positional
        .try_into()
        .map_err(|_| anyhow::anyhow!("Usage: thermal-effect <station> <from> <to> [options]"))?;
    Ok(Args {
        station,
        from: parse_time(&from)?,
        to: parse_time(&to)?,
        config,
        kind,
        uniform,
        linear,
        year,
    })
}

fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => ThermalConfig::from_file(path)?,
        None => ThermalConfig::global().clone(),
    };
    info!("Data directory: {}", config.loader.data_dir.display());

    let mut pipeline = ThermalPipeline::with_config(config);
    if let Some(year) = args.year {
        let (tmin, tmax) = TemperatureYear::from_year(year)?.range();
        pipeline = pipeline.with_envelope(tmin, tmax);
    }

    let run = pipeline.run(
        &args.station,
        args.kind,
        &[Point::new(0.0, 0.0, 0.0)],
        args.from,
        args.to,
        &ConstantResponse::new(args.kind, args.uniform),
        &ConstantResponse::new(args.kind, args.linear),
    )?;

    let profile = run
        .profile()
        .context("Pipeline did not return a temperature profile")?;
    let response = run
        .synthesis
        .result
        .row(0)
        .context("Pipeline returned no response")?;

    let response_column = match args.kind.units() {
        "" => "response".to_string(),
        units => format!("response_{}", units),
    };
    println!(
        "datetime,air_temp,solar,bottom,top,uniform_load,gradient,{}",
        response_column
    );
    for (i, sample) in run.weather.iter().enumerate() {
        println!(
            "{},{:.4},{:.2},{:.4},{:.4},{:.4},{:.4},{:.6e}",
            sample.timestamp.format("%Y-%m-%dT%H:%M"),
            sample.air_temp,
            sample.solar,
            profile.bottom()[i],
            profile.top()[i],
            run.synthesis.uniform_load[i],
            run.synthesis.gradient[i],
            response[i]
        );
    }
    info!("Wrote {} rows", run.weather.len());
    Ok(())
}
