//! Time grids and resampling of temperature records.
//!
//! - [`resample`]: per-minute interpolation of irregular station records
//! - [`sensor`]: conversions between the per-minute temperature time base and
//!   sensor sampling rates

pub mod resample;
pub mod sensor;

pub use resample::{from_to_indices, minute_grid, resample, resample_with, to_epoch_seconds};
pub use sensor::{samples_per_hour, samples_per_minute};
