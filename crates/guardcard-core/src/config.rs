use crate::error::{GuardCardError, Result};
use crate::models::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_RADIUS_MILES: &str = "GUARDCARD_RADIUS_MILES";
pub const ENV_DEFAULT_REGION: &str = "GUARDCARD_DEFAULT_REGION";
pub const ENV_LOCATION_TIMEOUT: &str = "GUARDCARD_LOCATION_TIMEOUT";
pub const ENV_DATA_DIR: &str = "GUARDCARD_DATA_DIR";

/// Default nearby search radius in miles
pub const DEFAULT_RADIUS_MILES: f64 = 50.0;

/// Default time to wait for a location fix, in seconds
pub const DEFAULT_LOCATION_TIMEOUT_SECS: u64 = 10;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
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

/// Layered configuration for Guard Card
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub search_radius_miles: ConfigValue<f64>,
    /// Origin used when no location is available
    pub default_region: ConfigValue<Coordinate>,
    pub location_timeout_secs: ConfigValue<u64>,
    /// Directory overriding the bundled facility and quiz data
    pub data_dir: ConfigValue<Option<PathBuf>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            search_radius_miles: ConfigValue::new(DEFAULT_RADIUS_MILES, ConfigSource::Default),
            default_region: ConfigValue::new(Coordinate::los_angeles(), ConfigSource::Default),
            location_timeout_secs: ConfigValue::new(
                DEFAULT_LOCATION_TIMEOUT_SECS,
                ConfigSource::Default,
            ),
            data_dir: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GuardCardError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GuardCardError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(radius) = file_config.search_radius_miles {
            self.search_radius_miles.update(validate_radius(radius)?, ConfigSource::File);
        }

        if let Some(region) = file_config.default_region {
            self.default_region.update(region.validated()?, ConfigSource::File);
        }

        if let Some(timeout) = file_config.location_timeout_secs {
            self.location_timeout_secs.update(timeout, ConfigSource::File);
        }

        if let Some(data_dir) = file_config.data_dir {
            self.data_dir.update(Some(data_dir), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(radius_str) = env::var(ENV_RADIUS_MILES) {
            match parse_radius(&radius_str) {
                Ok(radius) => self.search_radius_miles.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid {} value '{}': expected a positive number of miles",
                    ENV_RADIUS_MILES,
                    radius_str
                ),
            }
        }

        if let Ok(region_str) = env::var(ENV_DEFAULT_REGION) {
            match region_str.parse::<Coordinate>() {
                Ok(region) => self.default_region.update(region, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid {} value '{}': expected 'lat,lng'",
                    ENV_DEFAULT_REGION,
                    region_str
                ),
            }
        }

        if let Ok(timeout_str) = env::var(ENV_LOCATION_TIMEOUT) {
            match timeout_str.parse::<u64>() {
                Ok(timeout) => {
                    self.location_timeout_secs.update(timeout, ConfigSource::Environment)
                }
                Err(_) => tracing::warn!(
                    "Invalid {} value '{}': expected whole seconds",
                    ENV_LOCATION_TIMEOUT,
                    timeout_str
                ),
            }
        }

        if let Ok(data_dir) = env::var(ENV_DATA_DIR) {
            if !data_dir.is_empty() {
                self.data_dir.update(Some(PathBuf::from(data_dir)), ConfigSource::Environment);
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(radius) = overrides.search_radius_miles {
            self.search_radius_miles.update(radius, ConfigSource::Cli);
        }

        if let Some(region) = overrides.default_region {
            self.default_region.update(region, ConfigSource::Cli);
        }

        if let Some(timeout) = overrides.location_timeout_secs {
            self.location_timeout_secs.update(timeout, ConfigSource::Cli);
        }

        if let Some(data_dir) = overrides.data_dir {
            self.data_dir.update(Some(data_dir), ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "search_radius_miles".to_string(),
            (self.search_radius_miles.value.to_string(), self.search_radius_miles.source),
        );

        map.insert(
            "default_region".to_string(),
            (self.default_region.value.to_string(), self.default_region.source),
        );

        map.insert(
            "location_timeout_secs".to_string(),
            (self.location_timeout_secs.value.to_string(), self.location_timeout_secs.source),
        );

        let data_dir = match &self.data_dir.value {
            Some(dir) => dir.display().to_string(),
            None => "(bundled)".to_string(),
        };
        map.insert("data_dir".to_string(), (data_dir, self.data_dir.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    search_radius_miles: Option<f64>,
    default_region: Option<Coordinate>,
    location_timeout_secs: Option<u64>,
    data_dir: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub search_radius_miles: Option<f64>,
    pub default_region: Option<Coordinate>,
    pub location_timeout_secs: Option<u64>,
    pub data_dir: Option<PathBuf>,
}

/// Parse a search radius in miles
pub fn parse_radius(s: &str) -> Result<f64> {
    let radius: f64 = s.trim().parse().map_err(|_| invalid_radius(s))?;
    validate_radius(radius)
}

/// A search radius must be finite and positive
pub fn validate_radius(radius: f64) -> Result<f64> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(invalid_radius(&radius.to_string()));
    }
    Ok(radius)
}

fn invalid_radius(value: &str) -> GuardCardError {
    GuardCardError::ConfigInvalid {
        key: "search_radius_miles".to_string(),
        reason: format!("Invalid radius: {}. Use a positive number of miles", value.trim()),
    }
}
