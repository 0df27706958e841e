//! Unified error types for glucalert
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.
//!
//! Alert evaluation itself never fails: missing or invalid inputs are
//! encoded as "no alert needed". Errors only arise around it, when loading
//! configuration or snapshots and when building schedules.

use crate::alerts::AlertKind;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from domain type validation
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// Error reading glucose/device data
    #[error("Data source error: {0}")]
    Source(#[from] SourceError),

    /// IO error writing command output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A schedule needs at least one entry
    #[error("Alert schedule for {0} has no entries")]
    EmptySchedule(AlertKind),

    /// The first entry of a day must start at midnight
    #[error("First {kind} entry must start at minute 0, found {start}")]
    FirstEntryNotAtMidnight { kind: AlertKind, start: u16 },

    /// Entry starts must be strictly ascending
    #[error("{kind} entries must have strictly ascending start times ({previous} then {start})")]
    UnsortedSchedule {
        kind: AlertKind,
        previous: u16,
        start: u16,
    },

    /// Entry start outside of a day
    #[error("Invalid entry start: minute {0} (must be 0-1439)")]
    InvalidStart(u16),

    /// Entry configures a different kind than its schedule
    #[error("Entry for {found} placed in {expected} schedule")]
    KindMismatch {
        expected: AlertKind,
        found: AlertKind,
    },

    /// Unknown alert kind name
    #[error("Unknown alert kind: {0}")]
    UnknownKind(String),

    /// Unknown glucose unit name
    #[error("Unknown glucose unit: {0} (expected mgdl or mmol)")]
    UnknownUnit(String),

    /// Unknown transmitter type name
    #[error("Unknown transmitter type: {0}")]
    UnknownTransmitter(String),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),
}

/// Errors from snapshot sources
#[derive(Error, Debug)]
pub enum SourceError {
    /// Snapshot file missing or unreadable
    #[error("Snapshot not found: {0}")]
    NotFound(String),

    /// Snapshot content could not be decoded
    #[error("Failed to parse snapshot {path}: {message}")]
    Parse { path: String, message: String },
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display() {
        let err = DomainError::FirstEntryNotAtMidnight {
            kind: AlertKind::Low,
            start: 60,
        };
        assert_eq!(
            err.to_string(),
            "First low entry must start at minute 0, found 60"
        );
    }

    #[test]
    fn test_unit_error_display() {
        let err = DomainError::UnknownUnit("mg".to_string());
        assert!(err.to_string().contains("mgdl or mmol"));
    }

    #[test]
    fn test_source_error_display() {
        let err = SourceError::Parse {
            path: "snap.json".to_string(),
            message: "expected value".to_string(),
        };
        assert!(err.to_string().contains("snap.json"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_error_conversion() {
        let domain_err = DomainError::InvalidStart(1500);
        let app_err: AppError = domain_err.into();
        assert!(matches!(app_err, AppError::Domain(_)));
    }

    #[test]
    fn test_output_write_failure_conversion() {
        fn write_report() -> Result<()> {
            let written: std::io::Result<()> = Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "stdout closed",
            ));
            written?;
            Ok(())
        }

        let err = write_report().unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().contains("stdout closed"));
    }
}
