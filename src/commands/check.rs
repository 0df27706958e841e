//! Check command implementation
//!
//! Validates the alert configuration and reports the resulting schedules.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, ScheduleInfo, ScheduleReport};
use crate::config::Config;
use crate::error::Result;

/// Execute the check command
pub fn run_check(config: &Config, config_path: Option<&str>, format: OutputFormat) -> Result<()> {
    let alerts = config.alert_config();
    let schedules = alerts.to_schedules()?;
    let rejected = alerts
        .rejected_schedules()?
        .iter()
        .map(ToString::to_string)
        .collect();

    let source = match (config_path, config.alerts.is_some()) {
        (Some(path), _) => path.to_string(),
        (None, true) => "default locations".to_string(),
        (None, false) => "first-run defaults".to_string(),
    };

    let unconfigured = alerts.unconfigured_kinds();
    for kind in &unconfigured {
        log::warn!("No entries for {} alerts", kind.logging_label());
    }

    let report = ScheduleReport {
        source,
        schedules: schedules.iter().map(ScheduleInfo::from).collect(),
        unconfigured,
        rejected,
    };

    print_output(&report, format)?;

    Ok(())
}
