//! Bridge thermal response synthesis.
//!
//! Converts weather station records into deck temperature profiles and
//! synthesizes the sensor responses they cause by superposing the unit
//! responses of a finite element model.
//!
//! # Modules
//!
//! - [`core`]: Domain types and errors
//! - [`config`]: TOML configuration
//! - [`parsing`]: Station file parsing
//! - [`io`]: Cached, cleaned station record loading
//! - [`transformations`]: Interpolation, smoothing, cleaning and rescaling of series
//! - [`time`]: Per-minute resampling and sensor time bases
//! - [`algorithms`]: Deck temperature estimation, response synthesis and regression
//! - [`pipeline`]: Load, resample and synthesize in one call

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod algorithms;
pub mod config;
pub mod core;
pub mod io;
pub mod parsing;
pub mod pipeline;
#[cfg(feature = "python")]
pub mod python;
pub mod time;
pub mod transformations;

/// Bridge thermal response synthesis for Python
#[cfg(feature = "python")]
#[pymodule]
fn bridge_thermal(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Register temperature and response functions
    m.add_function(wrap_pyfunction!(python::estimate_bottom_top, m)?)?;
    m.add_function(wrap_pyfunction!(python::thermal_effect, m)?)?;
    m.add_function(wrap_pyfunction!(python::regress_and_errors, m)?)?;

    // Register data loading and resampling functions
    m.add_function(wrap_pyfunction!(python::load_temperatures, m)?)?;
    m.add_function(wrap_pyfunction!(python::resample_minutes, m)?)?;

    Ok(())
}
