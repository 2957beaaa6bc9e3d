//! Thermal effect synthesis by superposition of unit responses.
//!
//! The deck temperature at each time step is split into a uniform part (mean
//! of bottom and top, relative to the reference temperature) and a linear part
//! (top minus bottom). Each part scales the unit response of the matching FE
//! load case, and the two contributions are summed per point and time step.

use log::debug;

use super::thickness::{estimate_with, LagCoefficients};
use super::unit_response::UnitResponseProvider;
use crate::core::{
    Point, ResponseKind, ThermalEffectResult, ThermalError, ThermalResult, ThroughThicknessProfile,
};

/// Where the deck temperature profile comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileSource {
    /// Precomputed bottom and top temperatures
    Profile(ThroughThicknessProfile),
    /// Air temperature and solar irradiance, converted with the lag filters
    Weather {
        air_temp: Vec<f64>,
        solar: Vec<f64>,
        samples_per_hour: u32,
    },
}

impl ProfileSource {
    pub fn profile(bottom: Vec<f64>, top: Vec<f64>) -> ThermalResult<Self> {
        Ok(ProfileSource::Profile(ThroughThicknessProfile::new(bottom, top)?))
    }

    pub fn weather(air_temp: Vec<f64>, solar: Vec<f64>, samples_per_hour: u32) -> Self {
        ProfileSource::Weather {
            air_temp,
            solar,
            samples_per_hour,
        }
    }

    /// Build a source from loosely supplied optional parts.
    ///
    /// Exactly one complete group must be given: either `bottom_top`, or all of
    /// `air_temp`, `solar` and `samples_per_hour`.
    pub fn from_parts(
        bottom_top: Option<(Vec<f64>, Vec<f64>)>,
        air_temp: Option<Vec<f64>>,
        solar: Option<Vec<f64>>,
        samples_per_hour: Option<u32>,
    ) -> ThermalResult<Self> {
        let any_weather = air_temp.is_some() || solar.is_some() || samples_per_hour.is_some();
        match (bottom_top, air_temp, solar, samples_per_hour) {
            (Some(_), _, _, _) if any_weather => Err(ThermalError::AmbiguousInput(
                "give either bottom/top temperatures or air temperature, solar and \
                 samples per hour, not both"
                    .to_string(),
            )),
            (Some((bottom, top)), None, None, None) => Self::profile(bottom, top),
            (None, Some(air), Some(solar), Some(sph)) => Ok(Self::weather(air, solar, sph)),
            (None, None, None, None) => Err(ThermalError::AmbiguousInput(
                "no temperature input given".to_string(),
            )),
            _ => Err(ThermalError::AmbiguousInput(
                "air temperature, solar and samples per hour must be given together".to_string(),
            )),
        }
    }
}

/// Result of a synthesis together with the loads that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalSynthesis {
    /// Mean deck temperature minus the reference temperature, per time step
    pub uniform_load: Vec<f64>,
    /// Top minus bottom temperature, per time step
    pub gradient: Vec<f64>,
    pub result: ThermalEffectResult,
    /// Profile derived from weather input, `None` when one was supplied
    pub profile: Option<ThroughThicknessProfile>,
}

impl ThermalSynthesis {
    pub fn into_result(self) -> ThermalEffectResult {
        self.result
    }

    /// `(uniform_load, gradient, result)`
    pub fn into_decomposition(self) -> (Vec<f64>, Vec<f64>, ThermalEffectResult) {
        (self.uniform_load, self.gradient, self.result)
    }
}

/// Combines temperature profiles with unit responses of one [`ResponseKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalEffectSynthesizer {
    kind: ResponseKind,
    ref_temp: f64,
    lag: LagCoefficients,
}

impl ThermalEffectSynthesizer {
    pub fn new(kind: ResponseKind, ref_temp: f64) -> Self {
        Self {
            kind,
            ref_temp,
            lag: LagCoefficients::default(),
        }
    }

    /// Use custom lag coefficients for weather input.
    pub fn with_lag(mut self, lag: LagCoefficients) -> Self {
        self.lag = lag;
        self
    }

    pub fn kind(&self) -> ResponseKind {
        self.kind
    }

    pub fn ref_temp(&self) -> f64 {
        self.ref_temp
    }

    /// Response at every point and time step.
    ///
    /// Fails with [`ThermalError::ResponseKindMismatch`] when a provider holds
    /// another kind, and propagates [`ThermalError::PointUnavailable`] from
    /// the providers.
    pub fn synthesize(
        &self,
        points: &[Point],
        source: ProfileSource,
        uniform: &dyn UnitResponseProvider,
        linear: &dyn UnitResponseProvider,
    ) -> ThermalResult<ThermalSynthesis> {
        for provider in [uniform, linear] {
            if provider.response_kind() != self.kind {
                return Err(ThermalError::ResponseKindMismatch {
                    expected: self.kind,
                    actual: provider.response_kind(),
                });
            }
        }

        let (profile, derived) = match source {
            ProfileSource::Profile(profile) => (profile, false),
            ProfileSource::Weather {
                air_temp,
                solar,
                samples_per_hour,
            } => (
                estimate_with(&air_temp, &solar, samples_per_hour, &self.lag)?,
                true,
            ),
        };

        let uniform_load = profile.uniform_load(self.ref_temp);
        let gradient = profile.gradient();
        debug!(
            "{} synthesis over {} points x {} steps, uniform load {:?}.., gradient {:?}..",
            self.kind,
            points.len(),
            profile.len(),
            &uniform_load[..uniform_load.len().min(3)],
            &gradient[..gradient.len().min(3)]
        );

        let rows = points
            .iter()
            .map(|point| {
                let u = uniform.lookup(point)?;
                let l = linear.lookup(point)?;
                Ok(uniform_load
                    .iter()
                    .zip(&gradient)
                    .map(|(ul, g)| u * ul + l * g)
                    .collect())
            })
            .collect::<ThermalResult<Vec<Vec<f64>>>>()?;

        Ok(ThermalSynthesis {
            uniform_load,
            gradient,
            result: ThermalEffectResult::from_rows(rows, profile.len()),
            profile: derived.then_some(profile),
        })
    }
}

/// One-shot synthesis with default lag coefficients.
///
/// # Examples
///
/// ```
/// use bridge_thermal::algorithms::synthesis::{synthesize, ProfileSource};
/// use bridge_thermal::algorithms::unit_response::ConstantResponse;
/// use bridge_thermal::core::{Point, ResponseKind};
///
/// let kind = ResponseKind::Strain;
/// let source = ProfileSource::profile(vec![10.0, 10.0], vec![30.0, 30.0]).unwrap();
/// let result = synthesize(
///     kind,
///     &[Point::new(1.0, 0.0, 0.0)],
///     source,
///     &ConstantResponse::new(kind, 2.0),
///     &ConstantResponse::new(kind, 0.5),
///     10.0,
/// )
/// .unwrap();
/// assert_eq!(result.row(0).unwrap(), &[30.0, 30.0]);
/// ```
pub fn synthesize(
    kind: ResponseKind,
    points: &[Point],
    source: ProfileSource,
    uniform: &dyn UnitResponseProvider,
    linear: &dyn UnitResponseProvider,
    ref_temp: f64,
) -> ThermalResult<ThermalEffectResult> {
    ThermalEffectSynthesizer::new(kind, ref_temp)
        .synthesize(points, source, uniform, linear)
        .map(ThermalSynthesis::into_result)
}
