use pyo3::prelude::*;

use crate::algorithms::regression::fit_and_residuals;
use crate::algorithms::synthesis::{ProfileSource, ThermalEffectSynthesizer};
use crate::algorithms::thickness::estimate;
use crate::algorithms::unit_response::{LoadCase, UnitResponseField};
use crate::core::{Point, ResponseKind};

use super::to_py_err;

/// Estimate bottom and top deck temperatures from weather
///
/// Args:
///     air_temp: Air temperature per sample (°C)
///     solar: Solar irradiance per sample (W/m²)
///     samples_per_hour: Time base of the input series
///
/// Returns:
///     tuple: (bottom, top) temperatures per sample
#[pyfunction]
#[pyo3(signature = (air_temp, solar, samples_per_hour=60))]
pub fn estimate_bottom_top(
    air_temp: Vec<f64>,
    solar: Vec<f64>,
    samples_per_hour: u32,
) -> PyResult<(Vec<f64>, Vec<f64>)> {
    let profile = estimate(&air_temp, &solar, samples_per_hour).map_err(to_py_err)?;
    Ok(profile.into_parts())
}

/// Thermal response at points over time
///
/// Give either `temps_bt` or all of `air_temp`, `solar` and
/// `samples_per_hour`.
///
/// Args:
///     response_kind: e.g. "strain", "stress", "y-translation"
///     points: (x, y, z) query points
///     uniform: Per-degree uniform load response at each point
///     linear: Per-degree linear load response at each point
///     ref_temp: Stress free deck temperature (°C)
///     temps_bt: (bottom, top) deck temperatures
///     air_temp, solar, samples_per_hour: Weather to derive them from
///
/// Returns:
///     list: One response time series per point
///
/// Raises:
///     ValueError: When both or neither temperature inputs are given
#[pyfunction]
#[pyo3(signature = (
    response_kind, points, uniform, linear, ref_temp,
    temps_bt=None, air_temp=None, solar=None, samples_per_hour=None
))]
#[allow(clippy::too_many_arguments)]
pub fn thermal_effect(
    response_kind: &str,
    points: Vec<(f64, f64, f64)>,
    uniform: Vec<f64>,
    linear: Vec<f64>,
    ref_temp: f64,
    temps_bt: Option<(Vec<f64>, Vec<f64>)>,
    air_temp: Option<Vec<f64>>,
    solar: Option<Vec<f64>>,
    samples_per_hour: Option<u32>,
) -> PyResult<Vec<Vec<f64>>> {
    let kind: ResponseKind = response_kind.parse().map_err(to_py_err)?;
    if uniform.len() != points.len() || linear.len() != points.len() {
        return Err(pyo3::exceptions::PyValueError::new_err(format!(
            "expected one unit response per point ({}), got {} uniform and {} linear",
            points.len(),
            uniform.len(),
            linear.len()
        )));
    }
    let points: Vec<Point> = points.into_iter().map(|(x, y, z)| Point::new(x, y, z)).collect();
    let field = |load_case, values: Vec<f64>| {
        UnitResponseField::from_values(
            kind,
            load_case,
            points.iter().copied().zip(values).collect(),
        )
    };
    let uniform = field(LoadCase::Uniform, uniform);
    let linear = field(LoadCase::Linear, linear);

    let source = ProfileSource::from_parts(temps_bt, air_temp, solar, samples_per_hour)
        .map_err(to_py_err)?;
    let synthesis = ThermalEffectSynthesizer::new(kind, ref_temp)
        .synthesize(&points, source, &uniform, &linear)
        .map_err(to_py_err)?;
    Ok(synthesis.result.into_rows())
}

/// Least squares fit of y against x
///
/// Returns:
///     tuple: (slope, intercept, absolute residuals)
#[pyfunction]
pub fn regress_and_errors(x: Vec<f64>, y: Vec<f64>) -> PyResult<(f64, f64, Vec<f64>)> {
    let (fit, residuals) = fit_and_residuals(&x, &y).map_err(to_py_err)?;
    Ok((fit.slope, fit.intercept, residuals))
}
