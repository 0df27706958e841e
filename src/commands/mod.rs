//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod check;
pub mod defaults;
pub mod evaluate;
pub mod kinds;
pub mod watch;

pub use check::run_check;
pub use defaults::run_defaults;
pub use evaluate::run_evaluate;
pub use kinds::run_kinds;
pub use watch::run_watch;

use crate::alerts::AlertManager;
use crate::config::Config;
use crate::display::StandardFormatter;
use crate::error::Result;

/// Build an alert manager from the alert configuration in effect
pub(crate) fn build_manager(config: &Config) -> Result<AlertManager> {
    let schedules = config.alert_config().to_schedules()?;
    log::debug!("Loaded {} alert schedules", schedules.len());

    let mut manager = AlertManager::default()
        .with_formatter(Box::new(StandardFormatter::new(config.general.unit)));
    manager.add_schedules(schedules);
    Ok(manager)
}
