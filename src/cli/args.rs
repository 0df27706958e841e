//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use crate::domain::{GlucoseUnit, TransmitterType};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// CGM alert decision engine
///
/// Evaluate glucose, missed-reading, calibration and transmitter battery
/// alerts against a snapshot of sensor data.
#[derive(Parser, Debug)]
#[command(name = "glucalert")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "GLUCALERT_CONFIG")]
    pub config: Option<String>,

    /// Display unit for alert text (mgdl or mmol)
    #[arg(long, global = true)]
    pub unit: Option<GlucoseUnit>,

    /// Transmitter model, used for the default battery threshold
    #[arg(long, global = true)]
    pub transmitter: Option<TransmitterType>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List alert kinds and their defaults
    Kinds,

    /// Print the first-run alert configuration as TOML
    Defaults,

    /// Validate the configuration and show the resulting schedules
    Check,

    /// Evaluate all alerts once against a snapshot file
    Evaluate(EvaluateArgs),

    /// Re-evaluate a snapshot file periodically
    Watch(WatchArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the evaluate command
#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// Snapshot JSON file
    pub snapshot: String,

    /// Evaluation time in epoch milliseconds (overrides the snapshot)
    #[arg(long)]
    pub now: Option<i64>,

    /// Minute of the day used to pick schedule entries (0-1439)
    #[arg(long, value_parser = clap::value_parser!(u16).range(0..1440))]
    pub minute: Option<u16>,
}

/// Arguments for the watch command
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Snapshot JSON file, re-read on every tick
    pub snapshot: String,

    /// Evaluation interval in seconds
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Run once and exit (single-use mode)
    #[arg(long)]
    pub single_use: bool,

    /// Enable retry on errors
    #[arg(long)]
    pub retry: bool,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_kinds() {
        let args = Cli::try_parse_from(["glucalert", "kinds"]).unwrap();
        assert!(matches!(args.command, Commands::Kinds));
    }

    #[test]
    fn test_cli_parse_verbose() {
        let args = Cli::try_parse_from(["glucalert", "-v", "kinds"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn test_cli_parse_unit_and_transmitter() {
        let args = Cli::try_parse_from([
            "glucalert",
            "--unit",
            "mmol",
            "--transmitter",
            "dexcom-g6",
            "defaults",
        ])
        .unwrap();
        assert_eq!(args.unit, Some(GlucoseUnit::MmolL));
        assert_eq!(args.transmitter, Some(TransmitterType::DexcomG6));
    }

    #[test]
    fn test_cli_rejects_unknown_unit() {
        let result = Cli::try_parse_from(["glucalert", "--unit", "furlongs", "kinds"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_evaluate() {
        let args = Cli::try_parse_from([
            "glucalert",
            "evaluate",
            "snapshot.json",
            "--now",
            "1700000000000",
            "--minute",
            "480",
        ])
        .unwrap();

        if let Commands::Evaluate(eval) = args.command {
            assert_eq!(eval.snapshot, "snapshot.json");
            assert_eq!(eval.now, Some(1_700_000_000_000));
            assert_eq!(eval.minute, Some(480));
        } else {
            panic!("Expected Evaluate command");
        }
    }

    #[test]
    fn test_cli_minute_validation() {
        let result = Cli::try_parse_from(["glucalert", "evaluate", "s.json", "--minute", "1440"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_watch_args() {
        let args = Cli::try_parse_from([
            "glucalert",
            "watch",
            "snapshot.json",
            "--interval",
            "30",
            "--single-use",
        ])
        .unwrap();

        if let Commands::Watch(watch) = args.command {
            assert_eq!(watch.interval, Some(30));
            assert!(watch.single_use);
            assert!(!watch.retry);
        } else {
            panic!("Expected Watch command");
        }
    }
}
