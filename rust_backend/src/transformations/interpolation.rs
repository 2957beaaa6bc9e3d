use crate::core::{ThermalError, ThermalResult};

/// Piecewise-linear interpolation over strictly increasing knots.
///
/// Queries outside the knot range are extrapolated linearly from the first or
/// last segment.
#[derive(Debug, Clone)]
pub struct LinearInterpolator<'a> {
    xs: &'a [f64],
    ys: &'a [f64],
}

impl<'a> LinearInterpolator<'a> {
    /// Create an interpolator; requires at least two knots and strictly
    /// increasing `xs`.
    pub fn new(xs: &'a [f64], ys: &'a [f64]) -> ThermalResult<Self> {
        if xs.len() != ys.len() {
            return Err(ThermalError::length_mismatch(
                "interpolation knots x/y",
                xs.len(),
                ys.len(),
            ));
        }
        if xs.len() < 2 {
            return Err(ThermalError::insufficient("linear interpolation", 2, xs.len()));
        }
        if let Some(i) = xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ThermalError::InvalidRange(format!(
                "interpolation knots must be strictly increasing (index {} -> {})",
                i,
                i + 1
            )));
        }
        Ok(Self { xs, ys })
    }

    /// Value at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        // Index of the segment's right knot, clamped so that the end segments
        // are reused for extrapolation.
        let hi = self.xs.partition_point(|&k| k < x).clamp(1, self.xs.len() - 1);
        self.segment(hi - 1, x)
    }

    /// Values at each of `queries`.
    pub fn eval_many(&self, queries: &[f64]) -> Vec<f64> {
        queries.iter().map(|&x| self.eval(x)).collect()
    }

    fn segment(&self, lo: usize, x: f64) -> f64 {
        let (x0, x1) = (self.xs[lo], self.xs[lo + 1]);
        let (y0, y1) = (self.ys[lo], self.ys[lo + 1]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

/// Evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}
