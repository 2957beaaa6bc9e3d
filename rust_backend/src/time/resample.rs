use chrono::{Duration, NaiveDateTime};
use log::debug;

use crate::core::{TemperatureSample, ThermalError, ThermalResult};
use crate::transformations::interpolation::LinearInterpolator;
use crate::transformations::smoothing::SavitzkyGolay;
use crate::transformations::smoothing::{DEFAULT_DEGREE, DEFAULT_WINDOW};

/// Seconds since the Unix epoch, with millisecond resolution.
pub fn to_epoch_seconds(timestamp: &NaiveDateTime) -> f64 {
    timestamp.and_utc().timestamp_millis() as f64 / 1000.0
}

/// Timestamps from `from` to `to` inclusive, one minute apart.
///
/// The grid starts exactly at `from`; its last entry is the latest whole
/// minute step not after `to`.
///
/// # Examples
///
/// ```
/// use bridge_thermal::time::minute_grid;
/// use chrono::NaiveDate;
///
/// let from = NaiveDate::from_ymd_opt(2019, 7, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let to = NaiveDate::from_ymd_opt(2019, 7, 1).unwrap().and_hms_opt(1, 0, 0).unwrap();
/// let grid = minute_grid(from, to).unwrap();
/// assert_eq!(grid.len(), 61);
/// assert_eq!(grid[60], to);
/// ```
pub fn minute_grid(from: NaiveDateTime, to: NaiveDateTime) -> ThermalResult<Vec<NaiveDateTime>> {
    if from > to {
        return Err(ThermalError::InvalidRange(format!(
            "start {} is after end {}",
            from, to
        )));
    }
    let steps = (to - from).num_minutes();
    Ok((0..=steps).map(|m| from + Duration::minutes(m)).collect())
}

/// Interpolate `samples` onto a per-minute grid covering `[from, to]`.
///
/// Air temperature and solar irradiance are interpolated linearly between the
/// input timestamps. Grid minutes before the first or after the last input
/// sample are extrapolated linearly from the first or last pair of samples.
/// With `smooth`, the air temperature channel is passed through a
/// Savitzky-Golay filter (window 20, degree 3).
pub fn resample(
    samples: &[TemperatureSample],
    from: NaiveDateTime,
    to: NaiveDateTime,
    smooth: bool,
) -> ThermalResult<Vec<TemperatureSample>> {
    let smoothing = if smooth {
        Some(SavitzkyGolay::new(DEFAULT_WINDOW, DEFAULT_DEGREE)?)
    } else {
        None
    };
    resample_with(samples, from, to, smoothing.as_ref())
}

/// [`resample`] with an explicit smoothing filter (or none).
pub fn resample_with(
    samples: &[TemperatureSample],
    from: NaiveDateTime,
    to: NaiveDateTime,
    smoothing: Option<&SavitzkyGolay>,
) -> ThermalResult<Vec<TemperatureSample>> {
    let grid = minute_grid(from, to)?;

    let times: Vec<f64> = samples.iter().map(|s| to_epoch_seconds(&s.timestamp)).collect();
    let temps: Vec<f64> = samples.iter().map(|s| s.air_temp).collect();
    let solar: Vec<f64> = samples.iter().map(|s| s.solar).collect();
    let grid_times: Vec<f64> = grid.iter().map(to_epoch_seconds).collect();

    let mut grid_temps = LinearInterpolator::new(&times, &temps)?.eval_many(&grid_times);
    let grid_solar = LinearInterpolator::new(&times, &solar)?.eval_many(&grid_times);

    if let Some(filter) = smoothing {
        grid_temps = filter.smooth(&grid_temps)?;
    }

    debug!(
        "Resampled {} samples onto {} minutes ({} to {})",
        samples.len(),
        grid.len(),
        from,
        to
    );

    let resampled: Vec<TemperatureSample> = grid
        .into_iter()
        .zip(grid_temps)
        .zip(grid_solar)
        .map(|((timestamp, air_temp), solar)| TemperatureSample::new(timestamp, air_temp, solar))
        .collect();
    debug_assert!(resampled.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    Ok(resampled)
}

/// Indices of the first timestamp at or after `from` and the first at or
/// after `to`.
///
/// Fails with [`ThermalError::InvalidRange`] when no timestamp reaches `to`.
pub fn from_to_indices(
    timestamps: &[NaiveDateTime],
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> ThermalResult<(usize, usize)> {
    let mut start = None;
    for (i, ts) in timestamps.iter().enumerate() {
        if start.is_none() && *ts >= from {
            start = Some(i);
        }
        if *ts >= to {
            // `to` reached implies `from` reached when from <= to
            return start.map(|s| (s, i)).ok_or_else(|| {
                ThermalError::InvalidRange(format!("start {} is after end {}", from, to))
            });
        }
    }
    Err(ThermalError::InvalidRange(format!(
        "end date {} not found",
        to
    )))
}
