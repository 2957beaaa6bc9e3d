//! Domain models for weather samples, deck temperature profiles and responses.
//!
//! This module provides the core data structures that flow through the thermal
//! pipeline: raw station samples, the through-thickness profile estimated from
//! them, query points on the deck, and the response kinds that decide how unit
//! FE output is post-processed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{ThermalError, ThermalResult};

/// A position in bridge-local coordinates, in metres.
///
/// # Examples
///
/// ```
/// use bridge_thermal::core::domain::Point;
///
/// let p = Point::new(21.0, 0.0, -8.4);
/// assert_eq!(p.distance(&Point::new(21.0, 0.0, -8.4)), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// One weather station reading.
///
/// * `air_temp` - air temperature in °C
/// * `solar` - solar irradiance in W/m²
///
/// Sequences of samples handed to the core are sorted by strictly increasing
/// timestamp and contain no NaN; the loader establishes this once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSample {
    pub timestamp: NaiveDateTime,
    pub air_temp: f64,
    pub solar: f64,
}

impl TemperatureSample {
    pub fn new(timestamp: NaiveDateTime, air_temp: f64, solar: f64) -> Self {
        Self {
            timestamp,
            air_temp,
            solar,
        }
    }
}

/// Estimated bottom and top deck surface temperatures over time.
///
/// The two series are aligned one-to-one with the time index of the air
/// temperature they were derived from. A profile is never mutated in place:
/// regenerate it when the source series changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughThicknessProfile {
    bottom: Vec<f64>,
    top: Vec<f64>,
    samples_per_hour: Option<u32>,
}

impl ThroughThicknessProfile {
    /// Build a profile from precomputed bottom and top series.
    ///
    /// Fails with [`ThermalError::LengthMismatch`] when the series differ in length.
    pub fn new(bottom: Vec<f64>, top: Vec<f64>) -> ThermalResult<Self> {
        if bottom.len() != top.len() {
            return Err(ThermalError::length_mismatch(
                "bottom/top temperature",
                bottom.len(),
                top.len(),
            ));
        }
        Ok(Self {
            bottom,
            top,
            samples_per_hour: None,
        })
    }

    /// Attach the time base of the series (samples per hour).
    pub fn with_samples_per_hour(mut self, samples_per_hour: u32) -> Self {
        self.samples_per_hour = Some(samples_per_hour);
        self
    }

    pub fn bottom(&self) -> &[f64] {
        &self.bottom
    }

    pub fn top(&self) -> &[f64] {
        &self.top
    }

    pub fn samples_per_hour(&self) -> Option<u32> {
        self.samples_per_hour
    }

    pub fn len(&self) -> usize {
        self.bottom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bottom.is_empty()
    }

    /// Mean of bottom and top at each time step.
    pub fn half(&self) -> Vec<f64> {
        self.bottom
            .iter()
            .zip(&self.top)
            .map(|(b, t)| (b + t) / 2.0)
            .collect()
    }

    /// Top minus bottom at each time step, the linear (moment) thermal load.
    pub fn gradient(&self) -> Vec<f64> {
        self.bottom.iter().zip(&self.top).map(|(b, t)| t - b).collect()
    }

    /// Mean deck temperature relative to the reference temperature, the uniform
    /// (axial) thermal load.
    pub fn uniform_load(&self, ref_temp: f64) -> Vec<f64> {
        self.half().into_iter().map(|h| h - ref_temp).collect()
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.bottom, self.top)
    }
}

/// Deck material constants needed to post-process unit responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Young's modulus in MPa
    pub youngs_modulus_mpa: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            youngs_modulus_mpa: 37_500.0,
        }
    }
}

/// Post-processing applied to raw unit FE output of a given [`ResponseKind`].
///
/// Raw strain output of the FE layer is in microstrain. Strain kinds are scaled
/// to strain (x 1e-6); stress additionally multiplies by Young's modulus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitTransform {
    Identity,
    MicrostrainToStrain,
    MicrostrainToStress { youngs_modulus_mpa: f64 },
}

impl UnitTransform {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            UnitTransform::Identity => value,
            UnitTransform::MicrostrainToStrain => value * 1e-6,
            UnitTransform::MicrostrainToStress { youngs_modulus_mpa } => {
                value * 1e-6 * youngs_modulus_mpa
            }
        }
    }
}

/// The sensor response being synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseKind {
    XTranslation,
    YTranslation,
    ZTranslation,
    /// Longitudinal strain at the bottom of the deck
    Strain,
    /// Longitudinal strain at the top of the deck
    StrainT,
    /// Transverse strain at the bottom of the deck
    StrainZZB,
    Stress,
}

impl ResponseKind {
    pub const ALL: [ResponseKind; 7] = [
        ResponseKind::XTranslation,
        ResponseKind::YTranslation,
        ResponseKind::ZTranslation,
        ResponseKind::Strain,
        ResponseKind::StrainT,
        ResponseKind::StrainZZB,
        ResponseKind::Stress,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResponseKind::XTranslation => "X translation",
            ResponseKind::YTranslation => "Y translation",
            ResponseKind::ZTranslation => "Z translation",
            ResponseKind::Strain => "Strain",
            ResponseKind::StrainT => "Strain T",
            ResponseKind::StrainZZB => "Strain ZZB",
            ResponseKind::Stress => "Stress",
        }
    }

    pub fn units(&self) -> &'static str {
        match self {
            ResponseKind::XTranslation | ResponseKind::YTranslation | ResponseKind::ZTranslation => {
                "m"
            }
            ResponseKind::Strain | ResponseKind::StrainT | ResponseKind::StrainZZB => "",
            ResponseKind::Stress => "MPa",
        }
    }

    pub fn is_strain(&self) -> bool {
        matches!(
            self,
            ResponseKind::Strain | ResponseKind::StrainT | ResponseKind::StrainZZB
        )
    }

    /// The post-processing for raw unit FE output of this kind.
    pub fn transform(&self, material: &Material) -> UnitTransform {
        match self {
            ResponseKind::Strain | ResponseKind::StrainT | ResponseKind::StrainZZB => {
                UnitTransform::MicrostrainToStrain
            }
            ResponseKind::Stress => UnitTransform::MicrostrainToStress {
                youngs_modulus_mpa: material.youngs_modulus_mpa,
            },
            _ => UnitTransform::Identity,
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ResponseKind {
    type Err = ThermalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(&['_', '-', ' '][..], "");
        match normalized.as_str() {
            "xtranslation" => Ok(ResponseKind::XTranslation),
            "ytranslation" => Ok(ResponseKind::YTranslation),
            "ztranslation" => Ok(ResponseKind::ZTranslation),
            "strain" => Ok(ResponseKind::Strain),
            "straint" => Ok(ResponseKind::StrainT),
            "strainzzb" => Ok(ResponseKind::StrainZZB),
            "stress" => Ok(ResponseKind::Stress),
            _ => Err(ThermalError::ConfigurationError(format!(
                "Unknown response kind: {}",
                s
            ))),
        }
    }
}

/// Synthesized response time series, one row per query point.
///
/// Shape is `(num_points, num_time_steps)`, row-major by point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalEffectResult {
    rows: Vec<Vec<f64>>,
    num_steps: usize,
}

impl ThermalEffectResult {
    /// Every row must hold `num_steps` values.
    pub(crate) fn from_rows(rows: Vec<Vec<f64>>, num_steps: usize) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == num_steps));
        Self { rows, num_steps }
    }

    /// `(num_points, num_time_steps)`, also when there are no points
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.num_steps)
    }

    /// Time series at the point with the given index.
    pub fn row(&self, point_index: usize) -> Option<&[f64]> {
        self.rows.get(point_index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Response of every point at one time step.
    pub fn at_time(&self, time_index: usize) -> Option<Vec<f64>> {
        if time_index >= self.num_steps {
            return None;
        }
        self.rows.iter().map(|row| row.get(time_index).copied()).collect()
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}
