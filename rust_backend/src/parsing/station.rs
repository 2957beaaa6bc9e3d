use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::path::Path;

use crate::core::TemperatureSample;

/// Readings at or below this value are station placeholders for missing data.
pub const MISSING_SENTINEL: f64 = -9999.0;

/// Position of the air temperature counted from the end of a line.
const AIR_TEMP_FROM_END: usize = 15;
/// Position of the solar irradiance counted from the end of a line.
const SOLAR_FROM_END: usize = 13;

/// Parse the UTC `YYYYMMDD` date and `HHMM` time fields of a station line.
pub fn parse_timestamp(date: &str, time: &str) -> Result<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, "%Y%m%d")
        .with_context(|| format!("Invalid UTC date '{}'", date))?;
    let time = NaiveTime::parse_from_str(time, "%H%M")
        .with_context(|| format!("Invalid UTC time '{}'", time))?;
    Ok(date.and_time(time))
}

fn parse_reading(fields: &[&str], from_end: usize, name: &str) -> Result<f64> {
    let raw = fields[fields.len() - from_end];
    let value: f64 = raw
        .parse()
        .with_context(|| format!("Invalid {} '{}'", name, raw))?;
    if !value.is_finite() || value <= MISSING_SENTINEL {
        Ok(f64::NAN)
    } else {
        Ok(value)
    }
}

/// Parse one line of a USCRN sub-hourly station file.
///
/// Missing readings come back as NaN.
///
/// # Examples
///
/// ```
/// use bridge_thermal::parsing::station::parse_line;
///
/// let line = "23803 20190101 0005 20181231 1805      3  -89.43   34.82    12.4 \
///             0.0      0 0    10.9 C 0    88 0 -99.000 -9999.0  1115 0   0.79 0";
/// let sample = parse_line(line).unwrap();
/// assert_eq!(sample.air_temp, 12.4);
/// assert_eq!(sample.solar, 0.0);
/// ```
pub fn parse_line(line: &str) -> Result<TemperatureSample> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let required = AIR_TEMP_FROM_END.max(3);
    if fields.len() < required {
        bail!(
            "Expected at least {} fields, found {}",
            required,
            fields.len()
        );
    }
    let timestamp = parse_timestamp(fields[1], fields[2])?;
    let air_temp = parse_reading(&fields, AIR_TEMP_FROM_END, "air temperature")?;
    let solar = parse_reading(&fields, SOLAR_FROM_END, "solar irradiance")?;
    Ok(TemperatureSample::new(timestamp, air_temp, solar))
}

/// Parse the contents of a station file, skipping blank lines.
pub fn parse_station_str(content: &str) -> Result<Vec<TemperatureSample>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            parse_line(line).with_context(|| format!("Failed to parse line {}", i + 1))
        })
        .collect()
}

/// Read and parse a station file.
pub fn parse_station_file(path: &Path) -> Result<Vec<TemperatureSample>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read station file: {}", path.display()))?;
    let samples = parse_station_str(&content)
        .with_context(|| format!("Failed to parse station file: {}", path.display()))?;
    if samples.is_empty() {
        return Err(anyhow!("Station file {} has no records", path.display()));
    }
    Ok(samples)
}
