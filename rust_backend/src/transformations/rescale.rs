use serde::{Deserialize, Serialize};

use crate::core::{ThermalError, ThermalResult};

/// Yearly temperature envelopes observed at the bridge site, in °C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureYear {
    Y2018,
    Y2019,
}

impl TemperatureYear {
    /// `(min, max)` temperature of the year.
    pub fn range(&self) -> (f64, f64) {
        match self {
            TemperatureYear::Y2018 => (-2.0, 32.0),
            TemperatureYear::Y2019 => (-5.0, 35.0),
        }
    }

    pub fn from_year(year: i32) -> ThermalResult<Self> {
        match year {
            2018 => Ok(TemperatureYear::Y2018),
            2019 => Ok(TemperatureYear::Y2019),
            _ => Err(ThermalError::ConfigurationError(format!(
                "No temperature range known for year {}",
                year
            ))),
        }
    }
}

/// Linearly map the `[min, max]` span of `temps` onto `[tmin, tmax]`.
///
/// Used to transplant the shape of a station record onto the temperature
/// envelope of another site or year.
pub fn rescale_to_range(temps: &[f64], tmin: f64, tmax: f64) -> ThermalResult<Vec<f64>> {
    if temps.is_empty() {
        return Ok(Vec::new());
    }
    if tmin > tmax {
        return Err(ThermalError::InvalidRange(format!(
            "target range min {} is above max {}",
            tmin, tmax
        )));
    }
    let (lo, hi) = temps
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| (lo.min(t), hi.max(t)));
    if hi <= lo {
        return Err(ThermalError::InvalidRange(format!(
            "cannot rescale a series with zero span (all values {})",
            lo
        )));
    }
    let scale = (tmax - tmin) / (hi - lo);
    Ok(temps.iter().map(|t| tmin + (t - lo) * scale).collect())
}

/// [`rescale_to_range`] onto the envelope of a known year.
pub fn rescale_to_year(temps: &[f64], year: TemperatureYear) -> ThermalResult<Vec<f64>> {
    let (tmin, tmax) = year.range();
    rescale_to_range(temps, tmin, tmax)
}
