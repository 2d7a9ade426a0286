//! Taskvault CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use taskvault::cli::args::{CacheCommands, Cli, Commands};
use taskvault::cli::output::Output;
use taskvault::cli::{cache, query, stats};
use taskvault::config::Config;
use taskvault::error::{ExitCode as TaskExitCode, TaskError};
use taskvault::vault::Vault;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code().code() as u8)
        }
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over `-v`, which wins over
/// the config file.
fn init_tracing(cli: &Cli, config: &Config) -> Result<(), TaskError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = cli.verbosity_filter().unwrap_or(config.log_level.as_str());
            EnvFilter::try_new(level).map_err(|e| {
                TaskError::ConfigError(format!("invalid log_level '{}': {}", level, e))
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn run(cli: &Cli) -> Result<TaskExitCode, TaskError> {
    let config = Config::load()?;
    init_tracing(cli, &config)?;

    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    tracing::debug!(vault = %vault_path.display(), "opening vault");
    let vault = Vault::new(vault_path, config)?;

    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Query(args) => query::run(&vault, args, &output),
        Commands::Stats(args) => stats::run(&vault, args, &output),
        Commands::Cache(args) => match &args.command {
            CacheCommands::Status => cache::status(&vault, &output),
            CacheCommands::Clear => cache::clear(&vault, &output),
        },
    }
}
