//! High-level data loading utilities.
//!
//! This module combines station file parsing with record cleaning and a
//! checksum-validated cache, producing temperature records ready for
//! resampling.
//!
//! # Example
//!
//! ```no_run
//! use bridge_thermal::io::loaders::{TemperatureLoader, TemperatureSource};
//!
//! let loader = TemperatureLoader::new("data/temperature");
//! let samples = loader.load("holly-springs").expect("Failed to load");
//! println!("Loaded {} samples", samples.len());
//! ```

pub mod loaders;


pub use loaders::{calculate_checksum, clean_record, CacheStatus, TemperatureLoader, TemperatureSource};
