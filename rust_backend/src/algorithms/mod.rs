//! Thermal response algorithms.
//!
//! This module estimates deck temperatures from weather records and turns
//! them into sensor responses by superposing unit FE responses.
//!
//! # Components
//!
//! - [`thickness`]: Bottom and top deck temperatures from air temperature and solar irradiance
//! - [`unit_response`]: Per-degree responses of the uniform and linear unit load cases
//! - [`synthesis`]: Superposition of the unit responses over a temperature profile
//! - [`regression`]: Least squares fit and residuals between two series
//!
//! # Example
//!
//! ```
//! use bridge_thermal::algorithms::{ConstantResponse, ProfileSource, ThermalEffectSynthesizer};
//! use bridge_thermal::core::{Point, ResponseKind};
//!
//! let kind = ResponseKind::YTranslation;
//! let synthesizer = ThermalEffectSynthesizer::new(kind, 17.0);
//! let source = ProfileSource::weather(vec![17.0, 18.0, 19.0], vec![0.0, 200.0, 400.0], 60);
//! let out = synthesizer
//!     .synthesize(
//!         &[Point::new(21.0, 0.0, -8.4)],
//!         source,
//!         &ConstantResponse::new(kind, 1e-5),
//!         &ConstantResponse::new(kind, 2e-5),
//!     )
//!     .unwrap();
//! assert_eq!(out.result.shape(), (1, 3));
//! assert!(out.profile.is_some());
//! ```

pub mod regression;
pub mod synthesis;
pub mod thickness;
pub mod unit_response;

pub use regression::{fit_and_residuals, LinearFit};
pub use synthesis::{synthesize, ProfileSource, ThermalEffectSynthesizer, ThermalSynthesis};
pub use thickness::{estimate, estimate_with, LagCoefficients};
pub use unit_response::{
    ConstantResponse, LoadCase, UnitResponseField, UnitResponseProvider, POINT_TOLERANCE,
};
