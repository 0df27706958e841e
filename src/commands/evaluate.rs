//! Evaluate command implementation
//!
//! Runs every configured alert once against a snapshot file.

use super::build_manager;
use crate::cli::args::{EvaluateArgs, OutputFormat};
use crate::cli::output::{print_output, EvaluationReport};
use crate::config::Config;
use crate::domain::Timestamp;
use crate::error::Result;
use crate::source::{FileSource, SnapshotSource};

/// Execute the evaluate command
pub fn run_evaluate(args: &EvaluateArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let mut manager = build_manager(config)?;
    let source = FileSource::new(&args.snapshot);

    let mut snapshot = source.snapshot()?;
    if let Some(millis) = args.now {
        snapshot.now = Some(Timestamp::from_millis(millis));
    }

    let now = snapshot.now_or_current();
    let minute = args.minute.unwrap_or_else(|| now.local_minute_of_day());
    log::info!("Evaluating {} at minute {}", source.describe(), minute);

    let outcomes = manager.evaluate_all(&snapshot, minute);
    print_output(&EvaluationReport::new(outcomes, now, minute), format)?;

    Ok(())
}
