//! Unit thermal responses of the deck at query points.
//!
//! The FE layer simulates two unit load cases: a uniform temperature change
//! (axial) and a linear through-thickness gradient (moment). Their per-degree
//! responses are looked up here by point and scaled by the synthesizer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::{Material, Point, ResponseKind, ThermalError, ThermalResult};

/// Tolerance when matching a query point to a simulated point, in metres.
pub const POINT_TOLERANCE: f64 = 1e-9;

/// Which unit thermal load produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadCase {
    /// Uniform temperature change across the deck thickness
    Uniform,
    /// Linear temperature gradient from bottom to top surface
    Linear,
}

/// Source of per-degree unit responses.
pub trait UnitResponseProvider: Send + Sync {
    /// Response kind every value of this provider is expressed in.
    fn response_kind(&self) -> ResponseKind;

    /// Per-degree response at `point`.
    ///
    /// Fails with [`ThermalError::PointUnavailable`] when the point is not
    /// covered.
    fn lookup(&self, point: &Point) -> ThermalResult<f64>;
}

/// Unit responses at a fixed set of simulated points.
#[derive(Debug, Clone)]
pub struct UnitResponseField {
    kind: ResponseKind,
    load_case: LoadCase,
    entries: Vec<(Point, f64)>,
    exact: HashMap<[u64; 3], usize>,
}

fn point_key(point: &Point) -> [u64; 3] {
    // -0.0 and 0.0 share a key
    [
        (point.x + 0.0).to_bits(),
        (point.y + 0.0).to_bits(),
        (point.z + 0.0).to_bits(),
    ]
}

impl UnitResponseField {
    /// Field from values that are already per degree and post-processed.
    pub fn from_values(
        kind: ResponseKind,
        load_case: LoadCase,
        entries: Vec<(Point, f64)>,
    ) -> Self {
        let mut exact = HashMap::with_capacity(entries.len());
        for (i, (point, _)) in entries.iter().enumerate() {
            exact.entry(point_key(point)).or_insert(i);
        }
        Self {
            kind,
            load_case,
            entries,
            exact,
        }
    }

    /// Field from raw FE output of a unit load case.
    ///
    /// Each raw value is divided by `unit_delta_temp` (the temperature change
    /// the FE run simulated) and then post-processed with the transform of
    /// `kind`, so lookups return the response to one degree.
    pub fn from_raw<I>(
        kind: ResponseKind,
        load_case: LoadCase,
        unit_delta_temp: f64,
        raw: I,
        material: &Material,
    ) -> ThermalResult<Self>
    where
        I: IntoIterator<Item = (Point, f64)>,
    {
        if !unit_delta_temp.is_finite() || unit_delta_temp == 0.0 {
            return Err(ThermalError::ConfigurationError(format!(
                "unit temperature delta must be finite and non-zero, got {}",
                unit_delta_temp
            )));
        }
        let transform = kind.transform(material);
        let entries = raw
            .into_iter()
            .map(|(point, value)| (point, transform.apply(value / unit_delta_temp)))
            .collect();
        Ok(Self::from_values(kind, load_case, entries))
    }

    pub fn kind(&self) -> ResponseKind {
        self.kind
    }

    pub fn load_case(&self) -> LoadCase {
        self.load_case
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.entries.iter().map(|(p, _)| p)
    }
}

impl UnitResponseProvider for UnitResponseField {
    fn response_kind(&self) -> ResponseKind {
        self.kind
    }

    fn lookup(&self, point: &Point) -> ThermalResult<f64> {
        if let Some(&i) = self.exact.get(&point_key(point)) {
            return Ok(self.entries[i].1);
        }
        self.entries
            .iter()
            .find(|(p, _)| {
                (p.x - point.x).abs() <= POINT_TOLERANCE
                    && (p.y - point.y).abs() <= POINT_TOLERANCE
                    && (p.z - point.z).abs() <= POINT_TOLERANCE
            })
            .map(|(_, v)| *v)
            .ok_or_else(|| ThermalError::PointUnavailable {
                point: *point,
                reason: format!("no {:?} {} response at this point", self.load_case, self.kind),
            })
    }
}

/// The same per-degree response at every point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantResponse {
    pub kind: ResponseKind,
    pub value: f64,
}

impl ConstantResponse {
    pub fn new(kind: ResponseKind, value: f64) -> Self {
        Self { kind, value }
    }
}

impl UnitResponseProvider for ConstantResponse {
    fn response_kind(&self) -> ResponseKind {
        self.kind
    }

    fn lookup(&self, _point: &Point) -> ThermalResult<f64> {
        Ok(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> Vec<(Point, f64)> {
        vec![
            (Point::new(0.0, 0.0, 0.0), 10.0),
            (Point::new(21.0, 0.0, -8.4), -4.0),
        ]
    }

    #[test]
    fn test_from_raw_divides_by_unit_delta() {
        let field = UnitResponseField::from_raw(
            ResponseKind::YTranslation,
            LoadCase::Uniform,
            2.0,
            raw(),
            &Material::default(),
        )
        .unwrap();
        assert_eq!(field.lookup(&Point::new(0.0, 0.0, 0.0)).unwrap(), 5.0);
        assert_eq!(field.lookup(&Point::new(21.0, 0.0, -8.4)).unwrap(), -2.0);
        assert_eq!(field.len(), 2);
        let points: Vec<Point> = field.points().copied().collect();
        assert_eq!(points, raw().into_iter().map(|(p, _)| p).collect::<Vec<_>>());
    }

    #[test]
    fn test_from_raw_applies_kind_transform_once() {
        let material = Material {
            youngs_modulus_mpa: 30_000.0,
        };
        let strain =
            UnitResponseField::from_raw(ResponseKind::Strain, LoadCase::Linear, 1.0, raw(), &material)
                .unwrap();
        let stress =
            UnitResponseField::from_raw(ResponseKind::Stress, LoadCase::Linear, 1.0, raw(), &material)
                .unwrap();
        let p = Point::new(0.0, 0.0, 0.0);
        assert!((strain.lookup(&p).unwrap() - 10.0e-6).abs() < 1e-18);
        assert!((stress.lookup(&p).unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_lookup_within_tolerance() {
        let field =
            UnitResponseField::from_values(ResponseKind::Strain, LoadCase::Uniform, raw());
        let near = Point::new(21.0 + 1e-10, 0.0, -8.4);
        assert_eq!(field.lookup(&near).unwrap(), -4.0);
        assert_eq!(field.lookup(&Point::new(-0.0, 0.0, 0.0)).unwrap(), 10.0);
    }

    #[test]
    fn test_lookup_miss_names_point() {
        let field =
            UnitResponseField::from_values(ResponseKind::Strain, LoadCase::Uniform, raw());
        let err = field.lookup(&Point::new(1.0, 2.0, 3.0)).unwrap_err();
        match err {
            ThermalError::PointUnavailable { point, .. } => {
                assert_eq!(point, Point::new(1.0, 2.0, 3.0))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_unit_delta_rejected() {
        let result = UnitResponseField::from_raw(
            ResponseKind::Strain,
            LoadCase::Uniform,
            0.0,
            raw(),
            &Material::default(),
        );
        assert!(matches!(result, Err(ThermalError::ConfigurationError(_))));
    }
}
