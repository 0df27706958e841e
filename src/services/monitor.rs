//! Evaluation loop monitor
//!
//! Reads a snapshot at regular intervals and runs the alert manager on it.

use crate::alerts::{AlertManager, AlertOutcome};
use crate::error::AppError;
use crate::source::SnapshotSource;

use std::time::Duration;

/// Configuration for the monitor
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Interval between evaluation ticks
    pub interval: Duration,
    /// Whether to exit after one tick
    pub single_use: bool,
    /// Whether to retry on errors
    pub retry: bool,
    /// Interval between retries
    pub retry_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            single_use: false,
            retry: true,
            retry_interval: Duration::from_secs(10),
        }
    }
}

/// Evaluation loop monitor
pub struct Monitor {
    config: MonitorConfig,
}

impl Monitor {
    /// Create a new monitor with the given configuration
    pub fn new(config: MonitorConfig) -> Self {
        Self { config }
    }

    /// Execute a single evaluation tick
    ///
    /// Entries are selected by the local time of day of the snapshot's
    /// evaluation time.
    pub fn tick<S: SnapshotSource + ?Sized>(
        &self,
        source: &S,
        manager: &mut AlertManager,
    ) -> Result<Vec<AlertOutcome>, AppError> {
        let snapshot = source.snapshot()?;
        let minute = snapshot.now_or_current().local_minute_of_day();
        Ok(manager.evaluate_all(&snapshot, minute))
    }

    /// Run the evaluation loop, handing each tick's outcomes to `on_tick`
    pub fn run<S, F>(
        &self,
        source: &S,
        manager: &mut AlertManager,
        mut on_tick: F,
    ) -> Result<(), AppError>
    where
        S: SnapshotSource + ?Sized,
        F: FnMut(&[AlertOutcome]),
    {
        loop {
            match self.tick(source, manager) {
                Ok(outcomes) => on_tick(&outcomes),
                Err(e) => {
                    log::error!("Evaluation tick on {} failed: {}", source.describe(), e);
                    if self.config.retry {
                        log::info!("Retrying in {:?}...", self.config.retry_interval);
                        std::thread::sleep(self.config.retry_interval);
                        continue;
                    }
                    return Err(e);
                }
            }

            if self.config.single_use {
                log::info!("Single-use mode: exiting after one tick");
                break;
            }

            std::thread::sleep(self.config.interval);
        }

        Ok(())
    }

    /// Get the monitor configuration
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}
