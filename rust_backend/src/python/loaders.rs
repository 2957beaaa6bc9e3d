use pyo3::prelude::*;

use crate::io::loaders::{TemperatureLoader, TemperatureSource};

use super::time_bindings::format_timestamp;

/// Load a cleaned USCRN station record
///
/// Reads `<data_dir>/<name>.txt`, caching the parsed record next to it.
///
/// Args:
///     data_dir: Directory holding station files
///     name: Station file name without extension
///     temp_quantile: Air temperature quantiles to keep
///
/// Returns:
///     tuple: (timestamps, air_temp, solar)
///
/// Example:
///     >>> import bridge_thermal
///     >>> ts, temp, solar = bridge_thermal.load_temperatures("data/temperature", "holly-springs")
#[pyfunction]
#[pyo3(signature = (data_dir, name, temp_quantile=(0.001, 0.999)))]
pub fn load_temperatures(
    data_dir: &str,
    name: &str,
    temp_quantile: (f64, f64),
) -> PyResult<(Vec<String>, Vec<f64>, Vec<f64>)> {
    let samples = TemperatureLoader::new(data_dir)
        .with_quantiles(temp_quantile)
        .load(name)
        .map_err(|e| {
            pyo3::exceptions::PyRuntimeError::new_err(format!("Failed to load temperatures: {:#}", e))
        })?;

    let timestamps = samples.iter().map(|s| format_timestamp(&s.timestamp)).collect();
    let air_temp = samples.iter().map(|s| s.air_temp).collect();
    let solar = samples.iter().map(|s| s.solar).collect();
    Ok((timestamps, air_temp, solar))
}
