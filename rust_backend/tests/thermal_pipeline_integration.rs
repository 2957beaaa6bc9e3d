//! Integration tests for the station file to thermal response pipeline.
//!
//! These tests ensure that:
//! 1. Station files are parsed, cleaned, cached and filtered on load
//! 2. Loaded records resample onto an exact per-minute grid
//! 3. Raw FE output becomes per-degree unit responses
//! 4. Synthesized responses combine both load cases as expected

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fs;
use tempfile::TempDir;

use bridge_thermal::algorithms::{
    fit_and_residuals, ConstantResponse, ProfileSource, ThermalEffectSynthesizer,
    UnitResponseProvider,
};
use bridge_thermal::config::ThermalConfig;
use bridge_thermal::core::{Point, ResponseKind, ThermalError};
use bridge_thermal::io::{TemperatureLoader, TemperatureSource};
use bridge_thermal::pipeline::ThermalPipeline;
use bridge_thermal::time::{from_to_indices, minute_grid, resample};

// ==================== Helper Functions ====================

fn day_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 7, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// USCRN sub-hourly line with the given UTC time and readings
fn station_line(at: NaiveDateTime, temp: f64, solar: f64) -> String {
    format!(
        "23803 {} {} 20190630 1905      3  -89.43   34.82 {:>7.1} 0.0 {:>6.0} 0    10.9 C 0    88 0 -99.000 -9999.0  1115 0   0.79 0\n",
        at.format("%Y%m%d"),
        at.format("%H%M"),
        temp,
        solar
    )
}

/// One day of five-minute readings: 15 °C +- 8 °C and daytime irradiance
fn write_station_day(dir: &TempDir, name: &str) {
    let content: String = (0..288)
        .map(|i| {
            let at = day_start() + Duration::minutes(5 * i);
            let phase = i as f64 / 288.0 * std::f64::consts::TAU;
            station_line(at, 15.0 + 8.0 * phase.sin(), (700.0 * phase.sin()).max(0.0))
        })
        .collect();
    fs::write(dir.path().join(format!("{}.txt", name)), content).unwrap();
}

fn config_for(dir: &TempDir) -> ThermalConfig {
    let mut config = ThermalConfig::default();
    config.loader.data_dir = dir.path().to_path_buf();
    config.loader.temp_quantile = (0.0, 1.0);
    config
}

// ==================== Loading and Resampling ====================

#[test]
fn test_loaded_record_resamples_to_exact_minutes() {
    let dir = TempDir::new().unwrap();
    write_station_day(&dir, "site");

    let samples = TemperatureLoader::new(dir.path())
        .with_quantiles((0.0, 1.0))
        .load("site")
        .unwrap();
    assert_eq!(samples.len(), 288);

    let from = day_start() + Duration::hours(2);
    let to = day_start() + Duration::hours(10);
    let minutes = resample(&samples, from, to, true).unwrap();
    assert_eq!(minutes.len(), 8 * 60 + 1);
    assert_eq!(minutes[0].timestamp, from);
    assert_eq!(minutes.last().unwrap().timestamp, to);
    assert!(minutes.iter().all(|s| s.air_temp > 6.0 && s.air_temp < 24.0));

    let timestamps: Vec<_> = minutes.iter().map(|s| s.timestamp).collect();
    let (i0, i1) = from_to_indices(&timestamps, from + Duration::hours(1), to).unwrap();
    assert_eq!((i0, i1), (60, 480));
}

#[test]
fn test_minute_grid_length_matches_duration() {
    let from = day_start();
    for minutes in [0i64, 1, 59, 1440] {
        let grid = minute_grid(from, from + Duration::minutes(minutes)).unwrap();
        assert_eq!(grid.len() as i64, minutes + 1);
    }
}

// ==================== Pipeline ====================

#[test]
fn test_pipeline_from_station_file_to_response() {
    let dir = TempDir::new().unwrap();
    write_station_day(&dir, "site");
    let pipeline = ThermalPipeline::with_config(config_for(&dir));

    let kind = ResponseKind::Stress;
    let points = [Point::new(0.0, 0.0, 0.0), Point::new(10.0, 0.0, 1.0)];
    let uniform_raw = points.iter().map(|p| (*p, 2.0 + p.x)).collect::<Vec<_>>();
    let linear_raw = points.iter().map(|p| (*p, -p.z)).collect::<Vec<_>>();
    let (uniform, linear) = pipeline.unit_fields(kind, uniform_raw, linear_raw).unwrap();

    let from = day_start() + Duration::hours(1);
    let to = day_start() + Duration::hours(20);
    let run = pipeline
        .run("site", kind, &points, from, to, &uniform, &linear)
        .unwrap();

    let steps = 19 * 60 + 1;
    assert_eq!(run.synthesis.result.shape(), (2, steps));
    let profile = run.profile().unwrap();
    assert_eq!(profile.len(), steps);

    // Point 0 has no gradient response; its stress follows the uniform load
    let e = config_for(&dir).bridge.youngs_modulus_mpa;
    let per_degree = uniform.lookup(&points[0]).unwrap();
    assert!((per_degree - 2.0e-6 * e).abs() < 1e-12);
    let row = run.synthesis.result.row(0).unwrap();
    for (r, ul) in row.iter().zip(&run.synthesis.uniform_load) {
        assert!((r - per_degree * ul).abs() < 1e-9);
    }

    // The response regresses perfectly on the uniform load
    let (fit, residuals) = fit_and_residuals(&run.synthesis.uniform_load, row).unwrap();
    assert!((fit.slope - per_degree).abs() < 1e-9);
    assert!(residuals.iter().all(|r| *r < 1e-9));
}

#[test]
fn test_pipeline_reports_unknown_station() {
    let dir = TempDir::new().unwrap();
    let pipeline = ThermalPipeline::with_config(config_for(&dir));
    let err = pipeline
        .weather("missing", day_start(), day_start() + Duration::hours(1))
        .unwrap_err();
    assert!(format!("{:#}", err).contains("missing"));
}

#[test]
fn test_pipeline_rejects_point_outside_fields() {
    let dir = TempDir::new().unwrap();
    write_station_day(&dir, "site");
    let pipeline = ThermalPipeline::with_config(config_for(&dir));
    let kind = ResponseKind::Strain;
    let (uniform, linear) = pipeline
        .unit_fields(
            kind,
            vec![(Point::new(0.0, 0.0, 0.0), 1.0)],
            vec![(Point::new(0.0, 0.0, 0.0), 1.0)],
        )
        .unwrap();

    let err = pipeline
        .run(
            "site",
            kind,
            &[Point::new(5.0, 0.0, 0.0)],
            day_start(),
            day_start() + Duration::hours(1),
            &uniform,
            &linear,
        )
        .unwrap_err();
    let core = err.downcast_ref::<ThermalError>().unwrap();
    assert!(matches!(core, ThermalError::PointUnavailable { .. }));
}

// ==================== Synthesis Properties ====================

#[test]
fn test_weather_source_matches_precomputed_profile() {
    let kind = ResponseKind::YTranslation;
    let air: Vec<f64> = (0..500).map(|i| 10.0 + (i as f64 * 0.05).sin()).collect();
    let solar: Vec<f64> = (0..500).map(|i| (i % 100) as f64).collect();
    let points = [Point::new(1.0, 2.0, 3.0)];
    let uniform = ConstantResponse::new(kind, 0.7);
    let linear = ConstantResponse::new(kind, -0.2);
    let synthesizer = ThermalEffectSynthesizer::new(kind, 12.0);

    let derived = synthesizer
        .synthesize(
            &points,
            ProfileSource::weather(air, solar, 60),
            &uniform,
            &linear,
        )
        .unwrap();
    let profile = derived.profile.clone().unwrap();
    let (bottom, top) = profile.into_parts();
    let supplied = synthesizer
        .synthesize(
            &points,
            ProfileSource::profile(bottom, top).unwrap(),
            &uniform,
            &linear,
        )
        .unwrap();

    assert_eq!(derived.result, supplied.result);
    assert!(supplied.profile.is_none());
}

#[test]
fn test_empty_inputs() {
    let kind = ResponseKind::Strain;
    let synthesizer = ThermalEffectSynthesizer::new(kind, 0.0);
    let out = synthesizer
        .synthesize(
            &[],
            ProfileSource::weather(vec![1.0; 4], vec![0.0; 4], 60),
            &ConstantResponse::new(kind, 1.0),
            &ConstantResponse::new(kind, 1.0),
        )
        .unwrap();
    assert_eq!(out.result.shape(), (0, 4));

    let out = synthesizer
        .synthesize(
            &[Point::new(0.0, 0.0, 0.0)],
            ProfileSource::weather(Vec::new(), Vec::new(), 60),
            &ConstantResponse::new(kind, 1.0),
            &ConstantResponse::new(kind, 1.0),
        )
        .unwrap();
    assert_eq!(out.result.shape(), (1, 0));
}
