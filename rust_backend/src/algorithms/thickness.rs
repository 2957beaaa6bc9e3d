//! Deck temperature through its thickness, estimated from air temperature and
//! solar irradiance.
//!
//! Both surfaces are modelled as first-order exponential lags of the weather:
//!
//! ```text
//! bottom[i] = (1 - β) · bottom[i-1] + β · air[i]
//! top[i]    = (1 - α - γ) · top[i-1] + α · air[i] + γ · solar[i]
//! ```
//!
//! with both series starting at `air[0]`.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{ThermalError, ThermalResult, ThroughThicknessProfile};

/// Lag coefficients of the bottom and top surface filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LagCoefficients {
    /// β: weight of air temperature at the bottom surface
    #[serde(default = "default_bottom_air")]
    pub bottom_air: f64,
    /// α: weight of air temperature at the top surface
    #[serde(default = "default_top_air")]
    pub top_air: f64,
    /// γ: weight of solar irradiance at the top surface
    #[serde(default = "default_top_solar")]
    pub top_solar: f64,
}

fn default_bottom_air() -> f64 {
    0.001
}

fn default_top_air() -> f64 {
    0.008
}

fn default_top_solar() -> f64 {
    0.0001
}

impl Default for LagCoefficients {
    fn default() -> Self {
        Self {
            bottom_air: default_bottom_air(),
            top_air: default_top_air(),
            top_solar: default_top_solar(),
        }
    }
}

impl LagCoefficients {
    /// Each weight lies in `[0, 1]` and the top weights sum to at most 1.
    pub fn validate(&self) -> ThermalResult<()> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.bottom_air) || !in_unit(self.top_air) || !in_unit(self.top_solar) {
            return Err(ThermalError::ConfigurationError(format!(
                "lag coefficients must lie in [0, 1]: {:?}",
                self
            )));
        }
        if self.top_air + self.top_solar > 1.0 {
            return Err(ThermalError::ConfigurationError(format!(
                "top surface weights sum above 1: {} + {}",
                self.top_air, self.top_solar
            )));
        }
        Ok(())
    }

    /// Steady-state top temperature for constant air temperature and irradiance.
    pub fn top_fixed_point(&self, air_temp: f64, solar: f64) -> f64 {
        (self.top_air * air_temp + self.top_solar * solar) / (self.top_air + self.top_solar)
    }
}

/// Estimate bottom and top deck temperatures with the default coefficients.
///
/// # Examples
///
/// ```
/// use bridge_thermal::algorithms::thickness::estimate;
///
/// let profile = estimate(&[12.0, 12.0, 12.0], &[0.0, 0.0, 0.0], 60).unwrap();
/// assert_eq!(profile.len(), 3);
/// assert_eq!(profile.bottom()[2], 12.0);
/// ```
pub fn estimate(
    air_temp: &[f64],
    solar: &[f64],
    samples_per_hour: u32,
) -> ThermalResult<ThroughThicknessProfile> {
    estimate_with(air_temp, solar, samples_per_hour, &LagCoefficients::default())
}

/// Estimate bottom and top deck temperatures.
///
/// `samples_per_hour` is the time base of the input series and is carried on
/// the returned profile.
pub fn estimate_with(
    air_temp: &[f64],
    solar: &[f64],
    samples_per_hour: u32,
    lag: &LagCoefficients,
) -> ThermalResult<ThroughThicknessProfile> {
    if air_temp.len() != solar.len() {
        return Err(ThermalError::length_mismatch(
            "air temperature/solar",
            air_temp.len(),
            solar.len(),
        ));
    }
    lag.validate()?;

    let Some((&first, _)) = air_temp.split_first() else {
        return Ok(ThroughThicknessProfile::new(Vec::new(), Vec::new())?
            .with_samples_per_hour(samples_per_hour));
    };

    let (b, a, g) = (lag.bottom_air, lag.top_air, lag.top_solar);
    let mut bottom = Vec::with_capacity(air_temp.len());
    let mut top = Vec::with_capacity(air_temp.len());
    let (mut prev_bottom, mut prev_top) = (first, first);
    bottom.push(first);
    top.push(first);

    for (&air, &sun) in air_temp.iter().zip(solar).skip(1) {
        prev_bottom = (1.0 - b) * prev_bottom + b * air;
        prev_top = (1.0 - a - g) * prev_top + a * air + g * sun;
        bottom.push(prev_bottom);
        top.push(prev_top);
    }

    debug!(
        "Through-thickness profile over {} samples: bottom {:?}.., top {:?}..",
        bottom.len(),
        &bottom[..bottom.len().min(3)],
        &top[..top.len().min(3)]
    );

    Ok(ThroughThicknessProfile::new(bottom, top)?.with_samples_per_hour(samples_per_hour))
}
