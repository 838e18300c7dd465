//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the site
//! settings and organization directory from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{DirectoryFile, SiteConfig, SiteSettings};

/// Loads and provides access to the site configuration.
///
/// # Directory Structure
///
/// ```text
/// config/fwf/
/// ├── site.yaml       # Site settings (timezone, export settings)
/// └── directory.yaml  # Organizations and their recurring meetups
/// ```
///
/// # Example
///
/// ```no_run
/// use meetup_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/fwf").unwrap();
/// println!("Loaded {} recurring events", loader.config().events().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SiteConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `site.yaml` or `directory.yaml` is missing (`ConfigNotFound`)
    /// - Either file contains invalid YAML (`ConfigParseError`)
    /// - The timezone is unknown (`UnknownTimezone`)
    /// - Any recurrence rule is invalid (`InvalidRule`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<SiteSettings>(&path.join("site.yaml"))?;
        let directory = Self::load_yaml::<DirectoryFile>(&path.join("directory.yaml"))?;

        let config = SiteConfig::new(settings, directory.sections)?;
        info!(
            path = %path.display(),
            organizations = config.directory().organizations().count(),
            events = config.events().len(),
            timezone = %config.timezone().name(),
            "Loaded site configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: SiteConfig) -> Self {
        Self { config }
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

    /// Returns the underlying site configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Returns the site settings.
    pub fn settings(&self) -> &SiteSettings {
        self.config.settings()
    }
}
