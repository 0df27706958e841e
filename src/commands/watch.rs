//! Watch command implementation
//!
//! Re-evaluates a snapshot file in a loop and prints the alerts needed.

use super::build_manager;
use crate::cli::args::{OutputFormat, WatchArgs};
use crate::cli::output::{print_output, Message};
use crate::config::Config;
use crate::error::Result;
use crate::services::{Monitor, MonitorConfig};
use crate::source::{FileSource, SnapshotSource};

/// Execute the watch command
pub fn run_watch(args: &WatchArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let mut manager = build_manager(config)?;
    let source = FileSource::new(&args.snapshot);

    let monitor = Monitor::new(MonitorConfig {
        interval: config.general.interval(),
        single_use: args.single_use,
        retry: config.general.retry,
        retry_interval: config.general.retry_interval(),
    });

    log::info!("Watching {}", source.describe());
    log::info!("  Interval: {:?}", monitor.config().interval);
    log::info!("  Single use: {}", monitor.config().single_use);
    log::info!("  Retry: {}", monitor.config().retry);

    monitor.run(&source, &mut manager, |outcomes| {
        let mut needed = outcomes.iter().filter(|o| o.decision.is_needed()).peekable();
        if needed.peek().is_none() {
            log::info!("No alerts needed");
        }
        for outcome in needed {
            if let Err(e) = print_output(outcome, format) {
                log::error!("Failed to print alert: {}", e);
            }
        }
    })?;

    if args.single_use {
        let msg = Message {
            message: "Evaluation completed (single-use mode)".to_string(),
            success: true,
        };
        print_output(&msg, format)?;
    }

    Ok(())
}
