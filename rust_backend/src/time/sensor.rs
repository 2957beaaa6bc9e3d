use qtty::{Minutes, Second, Seconds};

use crate::core::{ThermalError, ThermalResult};

/// Number of sensor samples that cover one minute of temperature data.
///
/// * `sensor_period` - time between two sensor samples
/// * `speed_up` - factor by which the simulated time series is compressed
///
/// # Examples
///
/// ```
/// use bridge_thermal::time::samples_per_minute;
/// use qtty::Seconds;
///
/// assert_eq!(samples_per_minute(Seconds::new(0.01), 1.0).unwrap(), 6000);
/// assert_eq!(samples_per_minute(Seconds::new(0.01), 4.0).unwrap(), 1500);
/// ```
pub fn samples_per_minute(sensor_period: Seconds, speed_up: f64) -> ThermalResult<usize> {
    if !(sensor_period.value() > 0.0) {
        return Err(ThermalError::ConfigurationError(format!(
            "sensor period must be positive, got {} s",
            sensor_period.value()
        )));
    }
    if !(speed_up > 0.0) {
        return Err(ThermalError::ConfigurationError(format!(
            "speed-up must be positive, got {}",
            speed_up
        )));
    }
    let minute = Minutes::new(1.0).to::<Second>();
    Ok((minute.value() / sensor_period.value() / speed_up).round() as usize)
}

/// Number of samples per hour of a series sampled every `period`.
pub fn samples_per_hour(period: Minutes) -> ThermalResult<u32> {
    if !(period.value() > 0.0) {
        return Err(ThermalError::ConfigurationError(format!(
            "sample period must be positive, got {} min",
            period.value()
        )));
    }
    Ok((60.0 / period.value()).round() as u32)
}
