//! Series transformation and cleaning utilities.
//!
//! This module provides the numeric building blocks applied to temperature
//! records and synthesized responses: NaN repair, de-duplication and outlier
//! filtering of raw samples, linear interpolation, Savitzky-Golay smoothing,
//! range rescaling, trend removal and stretching onto a sensor time base.
//!
//! # Modules
//!
//! - [`cleaning`]: Forward-fill missing values, remove duplicates, quantile filtering
//! - [`interpolation`]: Piecewise-linear interpolation with linear extrapolation
//! - [`smoothing`]: Savitzky-Golay polynomial smoothing
//! - [`rescale`]: Map a series onto a temperature envelope
//! - [`detrend`]: Piecewise-mean trend estimation
//! - [`stretch`]: Interpolate per-minute effects across sensor samples
//!
//! # Example
//!
//! ```
//! use bridge_thermal::transformations::{rescale_to_range, stretch_effect};
//!
//! let temps = rescale_to_range(&[10.0, 12.0, 14.0], 0.0, 30.0).unwrap();
//! assert_eq!(temps, vec![0.0, 15.0, 30.0]);
//!
//! let per_sample = stretch_effect(&temps, 5).unwrap();
//! assert_eq!(per_sample.len(), 5);
//! ```

pub mod cleaning;
pub mod detrend;
pub mod interpolation;
pub mod rescale;
pub mod smoothing;
pub mod stretch;

pub use cleaning::{
    fill_missing_forward, filter_by_temperature_quantiles, quantile, sort_and_deduplicate,
    FillReport,
};
pub use detrend::{remove_sampled, SampledTrend};
pub use interpolation::{linspace, LinearInterpolator};
pub use rescale::{rescale_to_range, rescale_to_year, TemperatureYear};
pub use smoothing::{smooth_default, SavitzkyGolay};
pub use stretch::{stretch_effect, stretch_result};
