//! Thermal pipeline configuration file support.
//!
//! This module reads bridge constants, lag coefficients, loader and resampling
//! settings from a TOML file. Every field has a default, so a partial file (or
//! no file at all) is valid.
//!
//! ```toml
//! [bridge]
//! ref_temp_c = 17.0
//!
//! [lag]
//! bottom_air = 0.001
//!
//! [loader]
//! data_dir = "data/temperature"
//! temp_quantile = [0.001, 0.999]
//! ```

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::algorithms::thickness::LagCoefficients;
use crate::core::{Material, ThermalError, ThermalResult};
use crate::transformations::smoothing::{SavitzkyGolay, DEFAULT_DEGREE, DEFAULT_WINDOW};

static DEFAULT_CONFIG: OnceCell<ThermalConfig> = OnceCell::new();

/// Complete configuration of the thermal pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThermalConfig {
    #[serde(default)]
    pub bridge: BridgeSettings,
    #[serde(default)]
    pub lag: LagCoefficients,
    #[serde(default)]
    pub loader: LoaderSettings,
    #[serde(default)]
    pub resample: ResampleSettings,
}

/// Constants of the bridge and of its unit thermal FE runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeSettings {
    /// Temperature at which the deck is stress free, °C
    #[serde(default = "default_ref_temp")]
    pub ref_temp_c: f64,
    /// Temperature change simulated by the uniform unit load case, °C
    #[serde(default = "default_unit_delta")]
    pub unit_axial_delta_temp_c: f64,
    /// Temperature gradient simulated by the linear unit load case, °C
    #[serde(default = "default_unit_delta")]
    pub unit_moment_delta_temp_c: f64,
    #[serde(default = "default_youngs_modulus")]
    pub youngs_modulus_mpa: f64,
}

/// Location and filtering of station records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Air temperature quantiles outside of which samples are dropped
    #[serde(default = "default_temp_quantile")]
    pub temp_quantile: (f64, f64),
}

/// Smoothing applied after per-minute resampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampleSettings {
    /// Off unless asked for; smoothing needs at least `smooth_window` minutes
    #[serde(default)]
    pub smooth: bool,
    #[serde(default = "default_smooth_window")]
    pub smooth_window: usize,
    #[serde(default = "default_smooth_degree")]
    pub smooth_degree: usize,
}

fn default_ref_temp() -> f64 {
    17.0
}

fn default_unit_delta() -> f64 {
    1.0
}

fn default_youngs_modulus() -> f64 {
    Material::default().youngs_modulus_mpa
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/temperature")
}

fn default_temp_quantile() -> (f64, f64) {
    (0.001, 0.999)
}

fn default_smooth_window() -> usize {
    DEFAULT_WINDOW
}

fn default_smooth_degree() -> usize {
    DEFAULT_DEGREE
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            ref_temp_c: default_ref_temp(),
            unit_axial_delta_temp_c: default_unit_delta(),
            unit_moment_delta_temp_c: default_unit_delta(),
            youngs_modulus_mpa: default_youngs_modulus(),
        }
    }
}

impl BridgeSettings {
    pub fn material(&self) -> Material {
        Material {
            youngs_modulus_mpa: self.youngs_modulus_mpa,
        }
    }
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            temp_quantile: default_temp_quantile(),
        }
    }
}

impl Default for ResampleSettings {
    fn default() -> Self {
        Self {
            smooth: false,
            smooth_window: default_smooth_window(),
            smooth_degree: default_smooth_degree(),
        }
    }
}

impl ResampleSettings {
    /// The configured smoothing filter, `None` when smoothing is off.
    pub fn filter(&self) -> ThermalResult<Option<SavitzkyGolay>> {
        if !self.smooth {
            return Ok(None);
        }
        SavitzkyGolay::new(self.smooth_window, self.smooth_degree).map(Some)
    }
}

impl ThermalConfig {
    /// Parse a configuration from TOML text.
    ///
    /// Errors name the path of the offending field, e.g. `lag.top_air`.
    pub fn from_toml_str(content: &str) -> ThermalResult<Self> {
        let deserializer = toml::Deserializer::new(content);
        let config: ThermalConfig = serde_path_to_error::deserialize(deserializer).map_err(|e| {
            ThermalError::ConfigurationError(format!(
                "Failed to parse config at '{}': {}",
                e.path(),
                e.inner()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ThermalResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ThermalError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `thermal.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> ThermalResult<Self> {
        let search_paths = [
            PathBuf::from("thermal.toml"),
            PathBuf::from("rust_backend/thermal.toml"),
            PathBuf::from("../thermal.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ThermalError::ConfigurationError(
            "No thermal.toml found in standard locations".to_string(),
        ))
    }

    /// Process-wide configuration: the default location when a file is found
    /// there, built-in defaults otherwise.
    pub fn global() -> &'static ThermalConfig {
        DEFAULT_CONFIG.get_or_init(|| match Self::from_default_location() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Using built-in thermal config: {}", e);
                ThermalConfig::default()
            }
        })
    }

    pub fn validate(&self) -> ThermalResult<()> {
        self.lag.validate()?;
        let (lo, hi) = self.loader.temp_quantile;
        if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
            return Err(ThermalError::ConfigurationError(format!(
                "loader.temp_quantile must satisfy 0 <= low <= high <= 1, got ({}, {})",
                lo, hi
            )));
        }
        for (name, delta) in [
            ("unit_axial_delta_temp_c", self.bridge.unit_axial_delta_temp_c),
            ("unit_moment_delta_temp_c", self.bridge.unit_moment_delta_temp_c),
        ] {
            if !delta.is_finite() || delta == 0.0 {
                return Err(ThermalError::ConfigurationError(format!(
                    "bridge.{} must be finite and non-zero",
                    name
                )));
            }
        }
        self.resample.filter()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ThermalConfig::from_toml_str("").unwrap();
        assert_eq!(config, ThermalConfig::default());
        assert_eq!(config.lag, LagCoefficients::default());
        assert_eq!(config.loader.temp_quantile, (0.001, 0.999));
        assert_eq!(config.resample.smooth_window, 20);
        assert!(!config.resample.smooth);
        assert!(config.resample.filter().unwrap().is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = ThermalConfig::from_toml_str(
            r#"
            [bridge]
            ref_temp_c = 12.5
            unit_moment_delta_temp_c = 10.0

            [lag]
            top_solar = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.bridge.ref_temp_c, 12.5);
        assert_eq!(config.bridge.unit_axial_delta_temp_c, 1.0);
        assert_eq!(config.bridge.unit_moment_delta_temp_c, 10.0);
        assert_eq!(config.lag.top_solar, 0.0);
        assert_eq!(config.lag.top_air, 0.008);
    }

    #[test]
    fn test_error_names_field_path() {
        let err = ThermalConfig::from_toml_str("[lag]\ntop_air = \"fast\"\n").unwrap_err();
        assert!(err.to_string().contains("lag.top_air"), "{}", err);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ThermalConfig::from_toml_str("[loader]\ntemp_quantile = [0.9, 0.1]\n").is_err());
        assert!(ThermalConfig::from_toml_str("[bridge]\nunit_axial_delta_temp_c = 0.0\n").is_err());
        assert!(ThermalConfig::from_toml_str("[resample]\nsmooth_window = 3\nsmooth_degree = 3\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[loader]\ndata_dir = \"/tmp/weather\"\n").unwrap();
        let config = ThermalConfig::from_file(file.path()).unwrap();
        assert_eq!(config.loader.data_dir, PathBuf::from("/tmp/weather"));
    }

    #[test]
    fn test_missing_file() {
        let err = ThermalConfig::from_file("/nonexistent/thermal.toml").unwrap_err();
        assert!(matches!(err, ThermalError::ConfigurationError(_)));
    }
}
