//! Ordinary least squares fit of one series against another.
//!
//! Used to compare synthesized thermal responses with measured ones: the fit
//! gives the scale and offset between the two and the residuals give the
//! per-sample error.

use serde::{Deserialize, Serialize};

use crate::core::{ThermalError, ThermalResult};

/// `y = slope · x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Least squares fit of `y` against `x`.
    ///
    /// When every `x` is the same the slope is 0 and the intercept is the mean
    /// of `y`.
    pub fn fit(x: &[f64], y: &[f64]) -> ThermalResult<Self> {
        if x.len() != y.len() {
            return Err(ThermalError::length_mismatch("regression x/y", x.len(), y.len()));
        }
        if x.len() < 2 {
            return Err(ThermalError::insufficient("linear regression", 2, x.len()));
        }
        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;
        let (sxy, sxx) = x.iter().zip(y).fold((0.0, 0.0), |(sxy, sxx), (xi, yi)| {
            let dx = xi - mean_x;
            (sxy + dx * (yi - mean_y), sxx + dx * dx)
        });
        if sxx == 0.0 {
            return Ok(Self {
                slope: 0.0,
                intercept: mean_y,
            });
        }
        let slope = sxy / sxx;
        Ok(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Absolute distance of each `y` from the fitted line.
    pub fn residuals(&self, x: &[f64], y: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(y)
            .map(|(xi, yi)| (yi - self.predict(*xi)).abs())
            .collect()
    }
}

/// Fit `y` against `x` and return the fit with its absolute residuals.
///
/// # Examples
///
/// ```
/// use bridge_thermal::algorithms::regression::fit_and_residuals;
///
/// let (fit, residuals) = fit_and_residuals(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!((fit.intercept - 1.0).abs() < 1e-12);
/// assert!(residuals.iter().all(|r| *r < 1e-12));
/// ```
pub fn fit_and_residuals(x: &[f64], y: &[f64]) -> ThermalResult<(LinearFit, Vec<f64>)> {
    let fit = LinearFit::fit(x, y)?;
    let residuals = fit.residuals(x, y);
    Ok((fit, residuals))
}
