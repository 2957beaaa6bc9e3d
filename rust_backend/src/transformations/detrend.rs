use crate::core::{ThermalError, ThermalResult};

use super::interpolation::{linspace, LinearInterpolator};

/// Slow trend of a signal sampled as piecewise means.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledTrend {
    /// Trend at every index of the signal
    pub trend: Vec<f64>,
    /// The trend shifted so that it starts at zero
    pub offset_trend: Vec<f64>,
}

/// Estimate the trend of `signal` from `num_segments` segment means.
///
/// The signal is split by `num_segments + 1` evenly spaced indices; each
/// segment's mean is placed at the segment centre and the trend is linearly
/// interpolated (and extrapolated at the ends) over every index. Subtracting
/// `offset_trend` removes the drift while keeping the starting level.
pub fn remove_sampled(num_samples: usize, signal: &[f64]) -> ThermalResult<SampledTrend> {
    if num_samples < 2 {
        return Err(ThermalError::insufficient("trend segments", 2, num_samples));
    }
    if signal.len() < 2 * num_samples + 1 {
        return Err(ThermalError::insufficient(
            format!("trend over {} segments", num_samples),
            2 * num_samples + 1,
            signal.len(),
        ));
    }

    let bounds: Vec<usize> = linspace(0.0, (signal.len() - 1) as f64, num_samples + 1)
        .into_iter()
        .map(|b| b as usize)
        .collect();

    let mut centres = Vec::with_capacity(num_samples);
    let mut means = Vec::with_capacity(num_samples);
    for pair in bounds.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        let segment = &signal[lo..hi];
        means.push(segment.iter().sum::<f64>() / segment.len() as f64);
        centres.push(((lo + hi) / 2) as f64);
    }

    let interp = LinearInterpolator::new(&centres, &means)?;
    let trend: Vec<f64> = (0..signal.len()).map(|i| interp.eval(i as f64)).collect();
    let start = trend[0];
    let offset_trend = trend.iter().map(|t| t - start).collect();
    Ok(SampledTrend {
        trend,
        offset_trend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_signal_trend_is_linear() {
        let signal: Vec<f64> = (0..101).map(|i| 0.5 * i as f64).collect();
        let sampled = remove_sampled(4, &signal).unwrap();
        assert_eq!(sampled.trend.len(), signal.len());
        let slope = (sampled.trend[100] - sampled.trend[0]) / 100.0;
        assert!((slope - 0.5).abs() < 1e-9);
        assert_eq!(sampled.offset_trend[0], 0.0);
    }

    #[test]
    fn test_constant_signal_has_flat_trend() {
        let signal = vec![3.0; 30];
        let sampled = remove_sampled(3, &signal).unwrap();
        assert!(sampled.trend.iter().all(|t| (t - 3.0).abs() < 1e-12));
        assert!(sampled.offset_trend.iter().all(|t| t.abs() < 1e-12));
    }

    #[test]
    fn test_requires_enough_samples() {
        assert!(remove_sampled(1, &[1.0; 10]).is_err());
        assert!(remove_sampled(5, &[1.0; 10]).is_err());
    }
}
