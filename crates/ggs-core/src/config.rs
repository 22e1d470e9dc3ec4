use crate::error::{GgsError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Operational constants for point resolution.
///
/// These are fixed deployment parameters, not runtime-negotiated: the merge
/// radius below which two readings are considered the same physical marker,
/// and the decimal precisions used when rounding stored coordinates and
/// tie-break distances.
#[derive(Debug, Clone)]
pub struct GeoConfig {
    /// Maximum distance in meters between two readings of the same marker
    pub merge_radius_m: ConfigValue<f64>,
    /// Decimal places kept on stored latitude/longitude values
    pub coordinate_decimals: ConfigValue<i32>,
    /// Decimal places used when comparing candidate distances
    pub distance_decimals: ConfigValue<i32>,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl GeoConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            merge_radius_m: ConfigValue::new(30.0, ConfigSource::Default),
            coordinate_decimals: ConfigValue::new(10, ConfigSource::Default),
            distance_decimals: ConfigValue::new(2, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| GgsError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GgsError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(radius) = file_config.merge_radius_m {
            validate_merge_radius(radius)?;
            self.merge_radius_m.update(radius, ConfigSource::File);
        }

        if let Some(decimals) = file_config.coordinate_decimals {
            self.coordinate_decimals.update(decimals, ConfigSource::File);
        }

        if let Some(decimals) = file_config.distance_decimals {
            self.distance_decimals.update(decimals, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(radius_str) = env::var("GGS_MERGE_RADIUS_M") {
            match radius_str.parse::<f64>() {
                Ok(radius) if validate_merge_radius(radius).is_ok() => {
                    self.merge_radius_m.update(radius, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid GGS_MERGE_RADIUS_M value '{}': expected a positive number of meters",
                    radius_str
                ),
            }
        }

        if let Ok(decimals_str) = env::var("GGS_COORDINATE_DECIMALS") {
            match decimals_str.parse::<i32>() {
                Ok(decimals) => self.coordinate_decimals.update(decimals, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GGS_COORDINATE_DECIMALS value '{}': expected an integer",
                    decimals_str
                ),
            }
        }

        if let Ok(decimals_str) = env::var("GGS_DISTANCE_DECIMALS") {
            match decimals_str.parse::<i32>() {
                Ok(decimals) => self.distance_decimals.update(decimals, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GGS_DISTANCE_DECIMALS value '{}': expected an integer",
                    decimals_str
                ),
            }
        }

        self
    }
}

fn validate_merge_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(GgsError::ConfigInvalid {
            key: "merge_radius_m".to_string(),
            reason: format!("merge radius must be a positive number of meters, got {}", radius),
        })
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    merge_radius_m: Option<f64>,
    coordinate_decimals: Option<i32>,
    distance_decimals: Option<i32>,
}
