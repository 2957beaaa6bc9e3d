//! Parsers for weather station records.
//!
//! # Parsers
//!
//! - [`station`]: Parse USCRN sub-hourly station files into temperature samples
//!
//! # Example
//!
//! ```no_run
//! use bridge_thermal::parsing::station::parse_station_file;
//! use std::path::Path;
//!
//! let samples = parse_station_file(Path::new("data/temperature/holly-springs.txt"))
//!     .expect("Failed to parse station file");
//! ```

pub mod station;

#[cfg(test)]
mod station_tests;

pub use station::{parse_line, parse_station_file, parse_station_str};
