//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the tariff
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{HolidaysFileConfig, TariffConfig, TariffFileConfig};

/// Loads and provides access to the tariff configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// exposes the validated [`TariffConfig`] the splitter consumes.
///
/// # Directory Structure
///
/// ```text
/// config/engine/
/// ├── tariff.yaml    # Time-of-day band boundaries
/// └── holidays.yaml  # Recognized public holidays
/// ```
///
/// # Example
///
/// ```no_run
/// use grant_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine").unwrap();
/// let config = loader.config();
/// println!("Evening starts at {}", config.bands().evening_start);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TariffConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory
    ///   (e.g., "./config/engine")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either required file is missing
    /// - Either file contains invalid YAML
    /// - The band boundaries are not strictly increasing
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tariff_path = path.join("tariff.yaml");
        let tariff = Self::load_yaml::<TariffFileConfig>(&tariff_path)?;

        let holidays_path = path.join("holidays.yaml");
        let holidays = Self::load_yaml::<HolidaysFileConfig>(&holidays_path)?;

        let config = TariffConfig::new(tariff.bands, holidays.holidays)?;
        info!(
            path = %path.display(),
            holidays = config.holidays().len(),
            "Loaded tariff configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded tariff configuration.
    pub fn config(&self) -> &TariffConfig {
        &self.config
    }
}
