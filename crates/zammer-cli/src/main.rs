mod cli;
mod commands;
mod completions;
mod config;
mod error;
mod output;
mod setup;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use zammer_core::paths;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error::handle_error(err);
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        completions::generate_completions(shell);
        return Ok(());
    }

    let _guard = init_logging(cli.verbose)?;

    let config = config::CliConfig::load();
    config
        .tracker
        .validate()
        .context("Invalid tracker configuration")?;

    let db_path = setup::resolve_db_path(cli.db_path, &config)?;

    match cli.command {
        Commands::Recent { command } => {
            let mut tracker = setup::open_tracker(&db_path, config.tracker)?;
            commands::recent::run(&mut tracker, command, cli.format)
        }
        Commands::Config { command } => {
            commands::config::run(&config.tracker, command, cli.format)
        }
        Commands::Info => commands::info::run(&db_path, cli.format),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Verbose runs log to stderr; otherwise logs go to a daily file in the data dir.
fn init_logging(verbose: bool) -> Result<Option<WorkerGuard>> {
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter("debug"))
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
        return Ok(None);
    }

    let log_dir = paths::logs_dir()?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "zammer.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    Ok(Some(guard))
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
