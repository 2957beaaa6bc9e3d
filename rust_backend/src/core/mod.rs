//! Core domain models for bridge thermal response synthesis.
//!
//! This module defines the fundamental data structures used throughout the crate,
//! representing weather samples, deck temperature profiles, query points on the
//! bridge and the synthesized response time series, together with the error
//! taxonomy shared by every component.

pub mod domain;
pub mod error;

pub use domain::{
    Material, Point, ResponseKind, TemperatureSample, ThermalEffectResult,
    ThroughThicknessProfile, UnitTransform,
};
pub use error::{ThermalError, ThermalResult};
