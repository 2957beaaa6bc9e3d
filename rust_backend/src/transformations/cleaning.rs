use log::info;

use crate::core::{TemperatureSample, ThermalError, ThermalResult};

/// Number of values repaired per channel by [`fill_missing_forward`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    pub air_temp_filled: usize,
    pub solar_filled: usize,
}

/// Replace non-finite air temperature and solar values by the previous valid
/// sample of the same channel.
///
/// Leading gaps have no previous sample and take the first valid value after
/// them. A channel without any finite value cannot be repaired.
pub fn fill_missing_forward(
    samples: &mut [TemperatureSample],
    source: &str,
) -> ThermalResult<FillReport> {
    let air_temp_filled = fill_channel(samples, |s| &mut s.air_temp, "air temperature")?;
    let solar_filled = fill_channel(samples, |s| &mut s.solar, "solar irradiance")?;

    if air_temp_filled > 0 {
        info!("Filled {} NaN air temperatures in {}", air_temp_filled, source);
    }
    if solar_filled > 0 {
        info!("Filled {} NaN solar irradiance values in {}", solar_filled, source);
    }

    Ok(FillReport {
        air_temp_filled,
        solar_filled,
    })
}

fn fill_channel<F>(samples: &mut [TemperatureSample], mut channel: F, name: &str) -> ThermalResult<usize>
where
    F: FnMut(&mut TemperatureSample) -> &mut f64,
{
    if samples.is_empty() {
        return Ok(0);
    }
    let first_valid = samples
        .iter_mut()
        .map(|s| *channel(s))
        .find(|v| v.is_finite())
        .ok_or_else(|| ThermalError::insufficient(format!("finite {}", name), 1, 0))?;

    let mut filled = 0;
    let mut previous = first_valid;
    for sample in samples.iter_mut() {
        let value = channel(sample);
        if value.is_finite() {
            previous = *value;
        } else {
            *value = previous;
            filled += 1;
        }
    }
    Ok(filled)
}

/// Sort samples by timestamp and drop repeated timestamps, keeping the sample
/// that came first in the input.
///
/// Returns the cleaned samples and the number of duplicates removed.
pub fn sort_and_deduplicate(mut samples: Vec<TemperatureSample>) -> (Vec<TemperatureSample>, usize) {
    let len_before = samples.len();
    // Stable sort keeps input order among equal timestamps
    samples.sort_by_key(|s| s.timestamp);
    samples.dedup_by_key(|s| s.timestamp);
    let removed = len_before - samples.len();
    (samples, removed)
}

/// Quantile of `values` with linear interpolation between order statistics.
///
/// Returns `None` for empty input or `q` outside `[0, 1]`.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Keep only samples whose air temperature lies within the given quantiles
/// (inclusive) of the record's air temperature distribution.
pub fn filter_by_temperature_quantiles(
    samples: &[TemperatureSample],
    quantiles: (f64, f64),
) -> ThermalResult<Vec<TemperatureSample>> {
    let (q_lo, q_hi) = quantiles;
    if !(0.0..=1.0).contains(&q_lo) || !(0.0..=1.0).contains(&q_hi) || q_lo > q_hi {
        return Err(ThermalError::InvalidRange(format!(
            "temperature quantiles must satisfy 0 <= low <= high <= 1, got ({}, {})",
            q_lo, q_hi
        )));
    }
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let temps: Vec<f64> = samples.iter().map(|s| s.air_temp).collect();
    // Both quantiles exist: input is non-empty and bounds were checked above
    let (lo, hi) = match (quantile(&temps, q_lo), quantile(&temps, q_hi)) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => return Ok(samples.to_vec()),
    };
    info!("Temperature {:?} quantiles = {}, {}", quantiles, lo, hi);

    Ok(samples
        .iter()
        .filter(|s| s.air_temp >= lo && s.air_temp <= hi)
        .copied()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(minute: u32, air_temp: f64, solar: f64) -> TemperatureSample {
        let ts = NaiveDate::from_ymd_opt(2019, 1, 1)
            .unwrap()
            .and_hms_opt(0, minute, 0)
            .unwrap();
        TemperatureSample::new(ts, air_temp, solar)
    }

    #[test]
    fn test_forward_fill_uses_previous_sample() {
        let mut samples = vec![
            sample(0, 1.0, 10.0),
            sample(5, f64::NAN, 20.0),
            sample(10, 3.0, f64::NAN),
            sample(15, f64::NAN, f64::NAN),
        ];
        let report = fill_missing_forward(&mut samples, "test").unwrap();
        assert_eq!(report.air_temp_filled, 2);
        assert_eq!(report.solar_filled, 2);
        let temps: Vec<f64> = samples.iter().map(|s| s.air_temp).collect();
        let solar: Vec<f64> = samples.iter().map(|s| s.solar).collect();
        assert_eq!(temps, vec![1.0, 1.0, 3.0, 3.0]);
        assert_eq!(solar, vec![10.0, 20.0, 20.0, 20.0]);
    }

    #[test]
    fn test_forward_fill_leading_gap() {
        let mut samples = vec![sample(0, f64::NAN, 0.0), sample(5, 4.0, 0.0)];
        fill_missing_forward(&mut samples, "test").unwrap();
        assert_eq!(samples[0].air_temp, 4.0);
    }

    #[test]
    fn test_forward_fill_all_missing_fails() {
        let mut samples = vec![sample(0, f64::NAN, 0.0), sample(5, f64::NAN, 0.0)];
        let err = fill_missing_forward(&mut samples, "test").unwrap_err();
        assert!(matches!(err, ThermalError::InsufficientData { .. }));
    }

    #[test]
    fn test_sort_and_deduplicate_keeps_first() {
        let samples = vec![
            sample(10, 3.0, 0.0),
            sample(0, 1.0, 0.0),
            sample(10, 99.0, 0.0),
            sample(5, 2.0, 0.0),
        ];
        let (cleaned, removed) = sort_and_deduplicate(samples);
        assert_eq!(removed, 1);
        let temps: Vec<f64> = cleaned.iter().map(|s| s.air_temp).collect();
        assert_eq!(temps, vec![1.0, 2.0, 3.0]);
        assert!(cleaned.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert!((quantile(&values, 0.1).unwrap() - 1.3).abs() < 1e-12);
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&values, 1.5), None);
    }

    #[test]
    fn test_quantile_filter_drops_outliers() {
        let mut samples: Vec<TemperatureSample> =
            (0..50).map(|i| sample(i, 10.0 + (i % 5) as f64, 0.0)).collect();
        samples.push(sample(55, 80.0, 0.0));
        samples.push(sample(56, -60.0, 0.0));

        let filtered = filter_by_temperature_quantiles(&samples, (0.01, 0.99)).unwrap();
        assert_eq!(filtered.len(), 50);
        assert!(filtered.iter().all(|s| s.air_temp >= 10.0 && s.air_temp <= 14.0));
    }

    #[test]
    fn test_quantile_filter_rejects_bad_bounds() {
        let samples = vec![sample(0, 1.0, 0.0)];
        assert!(filter_by_temperature_quantiles(&samples, (0.9, 0.1)).is_err());
        assert!(filter_by_temperature_quantiles(&samples, (-0.1, 0.5)).is_err());
    }
}
