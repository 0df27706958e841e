//! glucalert - CGM alert decision engine
//!
//! A command-line tool for evaluating glucose, missed-reading, calibration
//! and transmitter battery alerts against snapshots of sensor data.

use clap::Parser;
use env_logger::Env;
use glucalert::cli::args::{generate_completions, Cli, Commands};
use glucalert::cli::logger_builder;
use glucalert::commands::{run_check, run_defaults, run_evaluate, run_kinds, run_watch};
use glucalert::config::{Config, ConfigBuilder};
use glucalert::error::{AppError, ConfigError, SourceError};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        generate_completions(*shell);
        return;
    }

    let builder = load_config(&cli);

    // Initialize logging once the verbose setting is known
    let verbose = match &builder {
        Ok(builder) => builder.config().general.verbose,
        Err(_) => cli.verbose,
    };
    logger_builder(Env::default().default_filter_or("warn"), verbose).init();

    // Run the appropriate command
    let result = builder.and_then(|builder| {
        builder.log_sources();
        if let Some(path) = &cli.config {
            log::info!("Loaded config from {}", path);
        }
        run(&cli, &builder.build())
    });

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    log::debug!("Display unit: {}", config.general.unit);

    match &cli.command {
        Commands::Kinds => run_kinds(config, cli.format),

        Commands::Defaults => run_defaults(config, cli.format),

        Commands::Check => run_check(config, cli.config.as_deref(), cli.format),

        Commands::Evaluate(args) => run_evaluate(args, config, cli.format),

        Commands::Watch(args) => run_watch(args, config, cli.format),

        Commands::Completions { .. } => Ok(()),
    }
}

/// Merge the config file with CLI overrides
fn load_config(cli: &Cli) -> Result<ConfigBuilder, AppError> {
    let mut builder = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_verbose(cli.verbose.then_some(true))
        .with_unit(cli.unit)
        .with_transmitter(cli.transmitter);

    if let Commands::Watch(args) = &cli.command {
        builder = builder
            .with_interval(args.interval)
            .with_retry(args.retry.then_some(true));
    }

    Ok(builder)
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Config(ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Check the --config path or GLUCALERT_CONFIG.");
            eprintln!("      Run 'glucalert defaults' for a starting configuration.");
        }
        AppError::Config(ConfigError::TomlError(_)) | AppError::Domain(_) => {
            eprintln!();
            eprintln!("Hint: Run 'glucalert check' to validate the alert configuration.");
        }
        AppError::Source(SourceError::Parse { .. }) => {
            eprintln!();
            eprintln!("Hint: Snapshots are JSON with 'readings', 'calibrations',");
            eprintln!("      'battery_level' and an optional 'now' in epoch milliseconds.");
        }
        _ => {}
    }
}
