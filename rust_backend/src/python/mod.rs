//! Python bindings for the thermal response pipeline.
//!
//! This module exposes Rust functions to Python via PyO3. Timestamps cross the
//! boundary as ISO 8601 strings and series as lists of floats.
//!
//! # Modules
//!
//! - [`loaders`]: Station record loading
//! - [`algorithms`]: Deck temperature estimation, response synthesis and regression
//! - [`time_bindings`]: Per-minute resampling
//!
//! # Python API
//!
//! All functions are available in the `bridge_thermal` Python module after installation.
//! See individual module documentation for usage examples.

pub mod algorithms;
pub mod loaders;
pub mod time_bindings;

pub use algorithms::*;
pub use loaders::*;
pub use time_bindings::*;

use pyo3::PyErr;

use crate::core::ThermalError;

/// Every core error is a bad argument from the caller's point of view.
pub(crate) fn to_py_err(err: ThermalError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}
