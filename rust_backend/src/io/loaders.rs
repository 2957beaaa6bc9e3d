use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::LoaderSettings;
use crate::core::TemperatureSample;
use crate::parsing::station;
use crate::transformations::cleaning::{
    fill_missing_forward, filter_by_temperature_quantiles, sort_and_deduplicate,
};

/// Suffix appended to a station file name for its parsed cache.
pub const CACHE_SUFFIX: &str = ".parsed";

/// Anything that can produce a cleaned temperature record by name.
pub trait TemperatureSource {
    fn load(&self, name: &str) -> Result<Vec<TemperatureSample>>;
}

/// Calculate the SHA-256 checksum of raw station file content.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Parsed and cleaned station record, stored next to the raw file.
#[derive(Debug, Serialize, Deserialize)]
struct ParsedCache {
    /// Checksum of the raw file the samples were parsed from
    checksum: String,
    samples: Vec<TemperatureSample>,
}

/// Outcome of reading a record before quantile filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Samples came from a valid cache
    Hit,
    /// No cache existed
    Created,
    /// The cache was stale or unreadable and has been rebuilt
    Rebuilt,
}

/// Loads USCRN station records from `<data_dir>/<name>.txt`.
#[derive(Debug, Clone)]
pub struct TemperatureLoader {
    data_dir: PathBuf,
    temp_quantile: (f64, f64),
}

impl TemperatureLoader {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
            temp_quantile: LoaderSettings::default().temp_quantile,
        }
    }

    pub fn from_settings(settings: &LoaderSettings) -> Self {
        Self {
            data_dir: settings.data_dir.clone(),
            temp_quantile: settings.temp_quantile,
        }
    }

    /// Air temperature quantiles applied on every load.
    pub fn with_quantiles(mut self, temp_quantile: (f64, f64)) -> Self {
        self.temp_quantile = temp_quantile;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn raw_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.txt", name))
    }

    pub fn cache_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.txt{}", name, CACHE_SUFFIX))
    }

    /// Parsed, repaired, sorted and de-duplicated record, without quantile
    /// filtering.
    pub fn load_unfiltered(&self, name: &str) -> Result<(Vec<TemperatureSample>, CacheStatus)> {
        let raw_path = self.raw_path(name);
        let content = fs::read_to_string(&raw_path)
            .with_context(|| format!("Failed to read station file: {}", raw_path.display()))?;
        let checksum = calculate_checksum(&content);

        let cache_path = self.cache_path(name);
        let status = if cache_path.exists() {
            match read_cache(&cache_path) {
                Ok(cache) if cache.checksum == checksum => {
                    info!("Loaded {} samples of {} from cache", cache.samples.len(), name);
                    return Ok((cache.samples, CacheStatus::Hit));
                }
                Ok(_) => {
                    warn!("Station file {} changed, rebuilding cache", raw_path.display());
                    CacheStatus::Rebuilt
                }
                Err(e) => {
                    warn!("Ignoring unreadable cache {}: {:#}", cache_path.display(), e);
                    CacheStatus::Rebuilt
                }
            }
        } else {
            CacheStatus::Created
        };

        let samples = clean_record(
            station::parse_station_str(&content)
                .with_context(|| format!("Failed to parse station file: {}", raw_path.display()))?,
            name,
        )?;

        let cache = ParsedCache { checksum, samples };
        if let Err(e) = write_cache(&cache_path, &cache) {
            warn!("Could not write cache {}: {:#}", cache_path.display(), e);
        }
        Ok((cache.samples, status))
    }
}

impl TemperatureSource for TemperatureLoader {
    /// Cleaned record of `name`, limited to the configured air temperature
    /// quantiles.
    fn load(&self, name: &str) -> Result<Vec<TemperatureSample>> {
        let (samples, _) = self.load_unfiltered(name)?;
        let filtered = filter_by_temperature_quantiles(&samples, self.temp_quantile)
            .with_context(|| format!("Failed to filter temperatures of {}", name))?;
        info!(
            "Loaded {} of {} samples of {} within quantiles {:?}",
            filtered.len(),
            samples.len(),
            name,
            self.temp_quantile
        );
        Ok(filtered)
    }
}

/// Repair NaN readings, sort and drop duplicate timestamps.
pub fn clean_record(mut samples: Vec<TemperatureSample>, name: &str) -> Result<Vec<TemperatureSample>> {
    // Fill in file order so a gap takes the reading logged just before it
    fill_missing_forward(&mut samples, name)
        .with_context(|| format!("Failed to repair missing values in {}", name))?;
    let (samples, removed) = sort_and_deduplicate(samples);
    if removed > 0 {
        info!("Removed {} duplicate timestamps from {}", removed, name);
    }
    Ok(samples)
}

fn read_cache(path: &Path) -> Result<ParsedCache> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read cache: {}", path.display()))?;
    let deserializer = &mut serde_json::Deserializer::from_str(&content);
    serde_path_to_error::deserialize(deserializer)
        .with_context(|| format!("Failed to parse cache: {}", path.display()))
}

fn write_cache(path: &Path, cache: &ParsedCache) -> Result<()> {
    let json = serde_json::to_string(cache).context("Failed to serialize cache")?;
    fs::write(path, json).with_context(|| format!("Failed to write cache: {}", path.display()))
}
