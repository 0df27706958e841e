//! CLI argument parsing and output formatting
//!
//! Uses clap for ergonomic CLI argument definitions.

pub mod args;
pub mod output;

pub use args::{Cli, Commands};

use log::LevelFilter;

/// Logger configuration for the binary
///
/// Filters come from `env` (normally `RUST_LOG`, defaulting to `warn`);
/// verbose mode raises the default level to debug.
pub fn logger_builder(env: env_logger::Env<'_>, verbose: bool) -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(env);
    builder.format_timestamp(None);
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder
}
