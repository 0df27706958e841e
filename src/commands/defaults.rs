//! Defaults command implementation
//!
//! Prints the first-run alert configuration so it can be pasted into a
//! config file.

use crate::alerts::AlertConfig;
use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, DefaultsOutput};
use crate::config::Config;
use crate::error::Result;

/// Execute the defaults command
pub fn run_defaults(config: &Config, format: OutputFormat) -> Result<()> {
    let seeded = AlertConfig::seeded(config.general.transmitter);
    let output = DefaultsOutput {
        toml: seeded.to_toml()?,
        config: seeded,
    };

    print_output(&output, format)?;

    Ok(())
}
