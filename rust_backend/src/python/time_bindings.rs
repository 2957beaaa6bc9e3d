use chrono::NaiveDateTime;
use pyo3::prelude::*;

use crate::core::TemperatureSample;
use crate::time::resample::resample;

use super::to_py_err;

/// ISO 8601 formats accepted for timestamps passed from Python.
const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

pub(crate) fn parse_timestamp(value: &str) -> PyResult<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| {
            pyo3::exceptions::PyValueError::new_err(format!("Invalid timestamp: {}", value))
        })
}

pub(crate) fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Interpolate a temperature record onto a per-minute grid
///
/// Args:
///     timestamps: ISO 8601 timestamps of the record, ascending
///     air_temp: Air temperature per timestamp (°C)
///     solar: Solar irradiance per timestamp (W/m²)
///     from_: First minute of the grid
///     to: Last minute of the grid
///     smooth: Apply Savitzky-Golay smoothing to air temperature (default False)
///
/// Returns:
///     tuple: (timestamps, air_temp, solar) on the minute grid
///
/// Example:
///     >>> import bridge_thermal
///     >>> ts, temp, solar = bridge_thermal.resample_minutes(
///     ...     ["2019-07-01T00:00", "2019-07-01T01:00"], [10.0, 16.0], [0.0, 0.0],
///     ...     "2019-07-01T00:00", "2019-07-01T01:00", smooth=False)
///     >>> len(ts)
///     61
#[pyfunction]
#[pyo3(signature = (timestamps, air_temp, solar, from_, to, smooth=false))]
pub fn resample_minutes(
    timestamps: Vec<String>,
    air_temp: Vec<f64>,
    solar: Vec<f64>,
    from_: &str,
    to: &str,
    smooth: bool,
) -> PyResult<(Vec<String>, Vec<f64>, Vec<f64>)> {
    if timestamps.len() != air_temp.len() || timestamps.len() != solar.len() {
        return Err(pyo3::exceptions::PyValueError::new_err(format!(
            "timestamps, air_temp and solar differ in length ({}, {}, {})",
            timestamps.len(),
            air_temp.len(),
            solar.len()
        )));
    }
    let samples = timestamps
        .iter()
        .zip(air_temp)
        .zip(solar)
        .map(|((ts, t), s)| Ok(TemperatureSample::new(parse_timestamp(ts)?, t, s)))
        .collect::<PyResult<Vec<_>>>()?;

    let resampled = resample(&samples, parse_timestamp(from_)?, parse_timestamp(to)?, smooth)
        .map_err(to_py_err)?;

    let mut out_ts = Vec::with_capacity(resampled.len());
    let mut out_temp = Vec::with_capacity(resampled.len());
    let mut out_solar = Vec::with_capacity(resampled.len());
    for sample in resampled {
        out_ts.push(format_timestamp(&sample.timestamp));
        out_temp.push(sample.air_temp);
        out_solar.push(sample.solar);
    }
    Ok((out_ts, out_temp, out_solar))
}
