//! Savitzky-Golay polynomial smoothing.
//!
//! Each interior sample is replaced by the value of a least-squares polynomial
//! of degree `degree` fitted to a window of `window` neighbouring samples. The
//! window may have even length, in which case the fit is evaluated half a
//! sample to the right of the window centre. The first and last half-windows
//! are taken from polynomials fitted to the first and last full windows.

use crate::core::{ThermalError, ThermalResult};

/// Window length used when smoothing resampled air temperature.
pub const DEFAULT_WINDOW: usize = 20;
/// Polynomial degree used when smoothing resampled air temperature.
pub const DEFAULT_DEGREE: usize = 3;

/// Savitzky-Golay filter with cached interior weights.
#[derive(Debug, Clone)]
pub struct SavitzkyGolay {
    window: usize,
    degree: usize,
    weights: Vec<f64>,
}

impl SavitzkyGolay {
    /// Create a filter; the polynomial degree must be lower than the window length.
    pub fn new(window: usize, degree: usize) -> ThermalResult<Self> {
        if window == 0 || degree >= window {
            return Err(ThermalError::ConfigurationError(format!(
                "Savitzky-Golay degree {} must be lower than window length {}",
                degree, window
            )));
        }
        let pos = (window - 1) as f64 / 2.0;
        let offsets: Vec<f64> = (0..window).map(|k| k as f64 - pos).collect();
        let inverse = normal_matrix_inverse(&offsets, degree)?;
        // Value of the fitted polynomial at offset 0 is its constant term
        let weights = offsets
            .iter()
            .map(|&x| {
                let mut xm = 1.0;
                let mut w = 0.0;
                for inv in inverse[0].iter() {
                    w += inv * xm;
                    xm *= x;
                }
                w
            })
            .collect();
        Ok(Self {
            window,
            degree,
            weights,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Smooth `data`; requires at least one full window of samples.
    pub fn smooth(&self, data: &[f64]) -> ThermalResult<Vec<f64>> {
        let n = data.len();
        if n < self.window {
            return Err(ThermalError::insufficient(
                "Savitzky-Golay smoothing",
                self.window,
                n,
            ));
        }
        let half = self.window / 2;
        let lead = (self.window - 1) / 2;
        let mut output = vec![0.0; n];

        for i in half..n - half {
            let start = i - lead;
            output[i] = self
                .weights
                .iter()
                .zip(&data[start..start + self.window])
                .map(|(w, v)| w * v)
                .sum();
        }

        self.fit_edge(data, 0, 0..half, &mut output)?;
        self.fit_edge(data, n - self.window, n - half..n, &mut output)?;
        Ok(output)
    }

    /// Fit a polynomial to the full window starting at `window_start` and
    /// evaluate it at the sample indices in `targets`.
    fn fit_edge(
        &self,
        data: &[f64],
        window_start: usize,
        targets: std::ops::Range<usize>,
        output: &mut [f64],
    ) -> ThermalResult<()> {
        let pos = (self.window - 1) as f64 / 2.0;
        let offsets: Vec<f64> = (0..self.window).map(|k| k as f64 - pos).collect();
        let values = &data[window_start..window_start + self.window];
        let coeffs = fit_polynomial(&offsets, values, self.degree)?;
        for i in targets {
            let x = (i - window_start) as f64 - pos;
            output[i] = eval_polynomial(&coeffs, x);
        }
        Ok(())
    }
}

/// Smooth with the default window and degree.
pub fn smooth_default(data: &[f64]) -> ThermalResult<Vec<f64>> {
    SavitzkyGolay::new(DEFAULT_WINDOW, DEFAULT_DEGREE)?.smooth(data)
}

/// Least-squares polynomial coefficients (constant term first).
pub fn fit_polynomial(xs: &[f64], ys: &[f64], degree: usize) -> ThermalResult<Vec<f64>> {
    let inverse = normal_matrix_inverse(xs, degree)?;
    let p = degree + 1;
    // J^T y
    let mut jty = vec![0.0; p];
    for (&x, &y) in xs.iter().zip(ys) {
        let mut xm = 1.0;
        for entry in jty.iter_mut() {
            *entry += xm * y;
            xm *= x;
        }
    }
    Ok(inverse
        .iter()
        .map(|row| row.iter().zip(&jty).map(|(a, b)| a * b).sum())
        .collect())
}

pub fn eval_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Inverse of J^T J for the Vandermonde matrix J[i][k] = xs[i]^k.
fn normal_matrix_inverse(xs: &[f64], degree: usize) -> ThermalResult<Vec<Vec<f64>>> {
    let p = degree + 1;
    let mut jtj = vec![vec![0.0; p]; p];
    for &x in xs {
        let powers: Vec<f64> = (0..2 * p - 1).map(|k| x.powi(k as i32)).collect();
        for (row, jtj_row) in jtj.iter_mut().enumerate() {
            for (col, entry) in jtj_row.iter_mut().enumerate() {
                *entry += powers[row + col];
            }
        }
    }
    invert(jtj).ok_or_else(|| {
        ThermalError::ConfigurationError(format!(
            "singular normal matrix for degree {} polynomial over {} samples",
            degree,
            xs.len()
        ))
    })
}

/// Gauss-Jordan inversion with partial pivoting.
fn invert(matrix: Vec<Vec<f64>>) -> Option<Vec<Vec<f64>>> {
    let p = matrix.len();
    let mut aug: Vec<Vec<f64>> = matrix
        .into_iter()
        .enumerate()
        .map(|(i, mut row)| {
            row.extend((0..p).map(|j| if i == j { 1.0 } else { 0.0 }));
            row
        })
        .collect();

    for col in 0..p {
        let pivot_row = (col..p).max_by(|&a, &b| aug[a][col].abs().total_cmp(&aug[b][col].abs()))?;
        aug.swap(col, pivot_row);
        let pivot = aug[col][col];
        if pivot.abs() < 1e-12 {
            return None;
        }
        for entry in aug[col].iter_mut() {
            *entry /= pivot;
        }
        for row in 0..p {
            if row != col {
                let factor = aug[row][col];
                if factor != 0.0 {
                    for j in 0..2 * p {
                        aug[row][j] -= factor * aug[col][j];
                    }
                }
            }
        }
    }

    Some(aug.into_iter().map(|row| row[p..].to_vec()).collect())
}
