//! Kinds command implementation
//!
//! Lists the alert kinds with their default thresholds.

use crate::alerts::AlertKind;
use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, KindEntry, KindList};
use crate::config::Config;
use crate::error::Result;

/// Execute the kinds command
pub fn run_kinds(config: &Config, format: OutputFormat) -> Result<()> {
    let list = KindList {
        kinds: AlertKind::ALL
            .iter()
            .map(|kind| KindEntry::new(*kind, config.general.transmitter))
            .collect(),
    };

    print_output(&list, format)?;

    Ok(())
}
