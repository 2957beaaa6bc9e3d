//! End-to-end thermal response pipeline.
//!
//! Loads a station record, resamples it onto a per-minute grid, optionally
//! rescales it onto a temperature envelope, and synthesizes the thermal
//! response at the requested points.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::info;

use crate::algorithms::synthesis::{ProfileSource, ThermalEffectSynthesizer, ThermalSynthesis};
use crate::algorithms::thickness::estimate_with;
use crate::algorithms::unit_response::{LoadCase, UnitResponseField, UnitResponseProvider};
use crate::config::ThermalConfig;
use crate::core::{Point, ResponseKind, TemperatureSample, ThermalResult, ThroughThicknessProfile};
use crate::io::loaders::{TemperatureLoader, TemperatureSource};
use crate::time::resample::resample_with;
use crate::transformations::rescale::rescale_to_range;

/// Samples per hour of the per-minute grid.
const MINUTE_SAMPLES_PER_HOUR: u32 = 60;

/// Output of a pipeline run.
#[derive(Debug, Clone)]
pub struct ThermalRun {
    /// Per-minute weather the response was computed from
    pub weather: Vec<TemperatureSample>,
    pub synthesis: ThermalSynthesis,
}

impl ThermalRun {
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.weather.iter().map(|s| s.timestamp).collect()
    }

    /// Profile derived from the weather.
    pub fn profile(&self) -> Option<&ThroughThicknessProfile> {
        self.synthesis.profile.as_ref()
    }
}

/// Main thermal pipeline
pub struct ThermalPipeline<S: TemperatureSource = TemperatureLoader> {
    config: ThermalConfig,
    source: S,
    envelope: Option<(f64, f64)>,
}

impl ThermalPipeline<TemperatureLoader> {
    /// Create a pipeline from the process-wide configuration
    pub fn new() -> Self {
        Self::with_config(ThermalConfig::global().clone())
    }

    /// Create a pipeline with custom configuration, loading station files
    /// from its data directory
    pub fn with_config(config: ThermalConfig) -> Self {
        let source = TemperatureLoader::from_settings(&config.loader);
        Self::with_source(config, source)
    }
}

impl Default for ThermalPipeline<TemperatureLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TemperatureSource> ThermalPipeline<S> {
    pub fn with_source(config: ThermalConfig, source: S) -> Self {
        Self {
            config,
            source,
            envelope: None,
        }
    }

    /// Rescale resampled air temperatures onto `[tmin, tmax]` before synthesis.
    pub fn with_envelope(mut self, tmin: f64, tmax: f64) -> Self {
        self.envelope = Some((tmin, tmax));
        self
    }

    pub fn config(&self) -> &ThermalConfig {
        &self.config
    }

    /// Per-minute weather of `name` between `from` and `to`.
    pub fn weather(
        &self,
        name: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<TemperatureSample>> {
        // Step 1: Load and clean the station record
        let samples = self
            .source
            .load(name)
            .with_context(|| format!("Failed to load temperatures of {}", name))?;

        // Step 2: Resample onto the minute grid
        let filter = self.config.resample.filter()?;
        let mut weather = resample_with(&samples, from, to, filter.as_ref())
            .with_context(|| format!("Failed to resample {} from {} to {}", name, from, to))?;

        // Step 3: Rescale onto the target envelope (if requested)
        if let Some((tmin, tmax)) = self.envelope {
            let temps: Vec<f64> = weather.iter().map(|s| s.air_temp).collect();
            let rescaled = rescale_to_range(&temps, tmin, tmax)?;
            for (sample, t) in weather.iter_mut().zip(rescaled) {
                sample.air_temp = t;
            }
        }

        info!(
            "Prepared {} minutes of weather from {} ({} to {})",
            weather.len(),
            name,
            from,
            to
        );
        Ok(weather)
    }

    /// Bottom and top deck temperatures between `from` and `to`.
    pub fn profile(
        &self,
        name: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<ThroughThicknessProfile> {
        let weather = self.weather(name, from, to)?;
        let (air, solar) = split_weather(&weather);
        Ok(estimate_with(&air, &solar, MINUTE_SAMPLES_PER_HOUR, &self.config.lag)?)
    }

    /// Unit response fields of both load cases from raw FE output, using the
    /// configured unit temperature deltas and material.
    pub fn unit_fields<U, L>(
        &self,
        kind: ResponseKind,
        uniform_raw: U,
        linear_raw: L,
    ) -> ThermalResult<(UnitResponseField, UnitResponseField)>
    where
        U: IntoIterator<Item = (Point, f64)>,
        L: IntoIterator<Item = (Point, f64)>,
    {
        let bridge = &self.config.bridge;
        let material = bridge.material();
        let uniform = UnitResponseField::from_raw(
            kind,
            LoadCase::Uniform,
            bridge.unit_axial_delta_temp_c,
            uniform_raw,
            &material,
        )?;
        let linear = UnitResponseField::from_raw(
            kind,
            LoadCase::Linear,
            bridge.unit_moment_delta_temp_c,
            linear_raw,
            &material,
        )?;
        Ok((uniform, linear))
    }

    /// Thermal response of `kind` at `points` between `from` and `to`.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &self,
        name: &str,
        kind: ResponseKind,
        points: &[Point],
        from: NaiveDateTime,
        to: NaiveDateTime,
        uniform: &dyn UnitResponseProvider,
        linear: &dyn UnitResponseProvider,
    ) -> Result<ThermalRun> {
        let weather = self.weather(name, from, to)?;
        let (air, solar) = split_weather(&weather);

        let synthesizer =
            ThermalEffectSynthesizer::new(kind, self.config.bridge.ref_temp_c).with_lag(self.config.lag);
        let synthesis = synthesizer
            .synthesize(
                points,
                ProfileSource::weather(air, solar, MINUTE_SAMPLES_PER_HOUR),
                uniform,
                linear,
            )
            .with_context(|| format!("Failed to synthesize {} response", kind))?;

        info!(
            "Synthesized {} response with shape {:?}",
            kind,
            synthesis.result.shape()
        );
        Ok(ThermalRun { weather, synthesis })
    }
}

fn split_weather(weather: &[TemperatureSample]) -> (Vec<f64>, Vec<f64>) {
    weather.iter().map(|s| (s.air_temp, s.solar)).unzip()
}
