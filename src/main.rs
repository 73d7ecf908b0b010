//! memodisk - persistent function-result cache
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use memodisk::cli::{Cli, Commands};
use memodisk::config::schema::LoggingConfig;
use memodisk::config::{Config, ConfigManager};
use memodisk::error::MemoResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> MemoResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    match cli.command {
        Commands::Key(args) => {
            load_config(&config_manager, cli.verbose)?;
            memodisk::cli::commands::key(args)
        }
        Commands::List(args) => {
            let config = load_config(&config_manager, cli.verbose)?;
            memodisk::cli::commands::list(args, &config)
        }
        Commands::Inspect(args) => {
            let config = load_config(&config_manager, cli.verbose)?;
            memodisk::cli::commands::inspect(args, &config)
        }
        // Must work on a file that does not parse, so it can be repaired
        Commands::Config(args) => {
            let logging = config_manager
                .load()
                .map(|config| config.logging)
                .unwrap_or_default();
            init_logging(cli.verbose, &logging);
            memodisk::cli::commands::config(args, &config_manager)
        }
    }
}

/// Load configuration and initialize logging from it
fn load_config(manager: &ConfigManager, verbose: u8) -> MemoResult<Config> {
    let config = manager.load()?;
    init_logging(verbose, &config.logging);
    Ok(config)
}

/// Initialize logging: -v = info, -vv+ = debug, otherwise the configured level
fn init_logging(verbose: u8, logging: &LoggingConfig) {
    let filter = match verbose {
        0 => EnvFilter::new(format!("memodisk={}", logging.level)),
        1 => EnvFilter::new("memodisk=info"),
        _ => EnvFilter::new("memodisk=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
