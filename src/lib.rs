//! glucalert - CGM alert decision engine
//!
//! This library decides, for one evaluation tick, whether each configured
//! alert (low, high, very low, very high, missed reading, calibration and
//! transmitter battery low) must be raised, what its notification says and
//! how long to wait before showing it.
//!
//! # Modules
//!
//! - [`alerts`]: Alert kinds, schedules, the evaluator and the alert manager
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`display`]: Text rendering of readings for alert titles and bodies
//! - [`domain`]: Domain models (readings, calibrations, transmitters, time)
//! - [`error`]: Error types
//! - [`services`]: Evaluation loop
//! - [`source`]: Snapshot sources

pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod domain;
pub mod error;
pub mod services;
pub mod source;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
