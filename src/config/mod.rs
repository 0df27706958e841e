//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::{ConfigFile, DefaultSearch};

use crate::alerts::AlertConfig;
use crate::domain::{GlucoseUnit, TransmitterType};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Alert types and entries, seeded from defaults when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alerts: Option<AlertConfig>,
}

impl Config {
    /// Alert configuration in effect
    ///
    /// Falls back to the first-run configuration for the configured
    /// transmitter when the file has no alert section.
    pub fn alert_config(&self) -> AlertConfig {
        self.alerts
            .clone()
            .unwrap_or_else(|| AlertConfig::seeded(self.general.transmitter))
    }
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
    /// Display unit for alert text
    pub unit: GlucoseUnit,
    /// Transmitter model in use
    pub transmitter: Option<TransmitterType>,
    /// Evaluation loop interval in seconds
    pub interval_seconds: u64,
    /// Enable retry on errors
    pub retry: bool,
    /// Retry interval in seconds
    pub retry_interval_seconds: u64,
}

impl GeneralConfig {
    /// Evaluation interval
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// Delay before retrying a failed tick
    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_seconds)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            unit: GlucoseUnit::MgDl,
            transmitter: None,
            interval_seconds: 60,
            retry: true,
            retry_interval_seconds: 10,
        }
    }
}
