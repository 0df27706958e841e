//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::config::{Config, ConfigFile, DefaultSearch};
use crate::domain::{GlucoseUnit, TransmitterType};
use crate::error::ConfigError;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
    search: Option<DefaultSearch>,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            search: None,
        }
    }

    /// Load configuration from a file
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// locations are searched and defaults are kept if none is found.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => self.config = ConfigFile::load(path)?,
            None => {
                let search = ConfigFile::search_default();
                if let Some((_, config)) = &search.found {
                    self.config = config.clone();
                }
                self.search = Some(search);
            }
        }

        Ok(self)
    }

    /// Configuration merged so far
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Log which default location was used and which were skipped
    pub fn log_sources(&self) {
        if let Some(search) = &self.search {
            search.log();
        }
    }

    /// Override with CLI verbose flag
    pub fn with_verbose(mut self, verbose: Option<bool>) -> Self {
        if let Some(v) = verbose {
            self.config.general.verbose = v;
        }
        self
    }

    /// Override with CLI display unit
    pub fn with_unit(mut self, unit: Option<GlucoseUnit>) -> Self {
        if let Some(u) = unit {
            self.config.general.unit = u;
        }
        self
    }

    /// Override with CLI transmitter type
    pub fn with_transmitter(mut self, transmitter: Option<TransmitterType>) -> Self {
        if let Some(t) = transmitter {
            self.config.general.transmitter = Some(t);
        }
        self
    }

    /// Override with CLI interval
    pub fn with_interval(mut self, interval: Option<u64>) -> Self {
        if let Some(i) = interval {
            self.config.general.interval_seconds = i;
        }
        self
    }

    /// Override with CLI retry flag
    pub fn with_retry(mut self, retry: Option<bool>) -> Self {
        if let Some(r) = retry {
            self.config.general.retry = r;
        }
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
