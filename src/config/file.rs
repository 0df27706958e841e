//! Configuration file loading
//!
//! Handles loading configuration from TOML files.

use crate::config::Config;
use crate::error::ConfigError;

use std::path::{Path, PathBuf};

/// Configuration file handler
pub struct ConfigFile;

/// Outcome of searching the default locations
#[derive(Debug, Default)]
pub struct DefaultSearch {
    /// First file that loaded
    pub found: Option<(PathBuf, Config)>,
    /// Files that exist but failed to load
    pub skipped: Vec<(PathBuf, ConfigError)>,
}

impl DefaultSearch {
    /// Report the search result through the logger
    pub fn log(&self) {
        for (path, e) in &self.skipped {
            log::warn!("Skipping {}: {}", path.display(), e);
        }
        if let Some((path, _)) = &self.found {
            log::info!("Loaded config from {}", path.display());
        }
    }
}

impl ConfigFile {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Option<Config> {
        let search = Self::search_default();
        search.log();
        search.found.map(|(_, config)| config)
    }

    /// Search the default locations without logging
    ///
    /// Stops at the first file that loads; files that exist but fail to
    /// load are recorded as skipped.
    pub fn search_default() -> DefaultSearch {
        let mut search = DefaultSearch::default();
        for path in Self::default_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => {
                    search.found = Some((path, config));
                    break;
                }
                Err(e) => search.skipped.push((path, e)),
            }
        }
        search
    }

    /// Get default configuration file paths in search order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // System-wide config
        paths.push(PathBuf::from("/etc/glucalert/config.toml"));

        // User config
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("glucalert").join("config.toml"));
        }

        // Current directory
        paths.push(PathBuf::from("glucalert.toml"));
        paths.push(PathBuf::from(".glucalert.toml"));

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GlucoseUnit;
    use std::io::Write;

    #[test]
    fn test_default_paths_not_empty() {
        let paths = ConfigFile::default_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p.to_string_lossy().contains("glucalert")));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigFile::load("/nonexistent/path/config.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\nunit = \"mmol\"\ninterval_seconds = 300").unwrap();

        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(config.general.unit, GlucoseUnit::MmolL);
        assert_eq!(config.general.interval_seconds, 300);
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general\nunit = ").unwrap();

        let result = ConfigFile::load(file.path());
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }
}
