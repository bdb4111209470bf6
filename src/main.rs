//! Position sizing CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use sizer_config::{load_config_or_default, AppConfig, ConfigError};
use sizer_monitor::setup_logging;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging settings come from the config when it loads
    let loaded = load_config_or_default(&cli.config);
    let logging = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    let log_level = cli
        .log_level
        .map(|l| l.as_str())
        .unwrap_or(logging.level.as_str());
    let _guard = setup_logging(
        log_level,
        cli.json_logs || logging.is_json(),
        !cli.command.owns_terminal(),
        logging.file.as_deref().map(Path::new),
    );

    // Execute command
    match cli.command {
        Commands::Single(args) => cli::commands::single::run(args, &require(loaded, &cli.config)?),
        Commands::Table(args) => cli::commands::table::run(args, &require(loaded, &cli.config)?),
        Commands::Dashboard(args) => {
            cli::commands::dashboard::run(args, &require(loaded, &cli.config)?)
        }
        Commands::Watchlist(args) => {
            cli::commands::watchlist::run(args, &require(loaded, &cli.config)?)
        }
        Commands::ValidateConfig(args) => cli::commands::validate::run(args, &cli.config),
    }
}

fn require(loaded: Result<AppConfig, ConfigError>, path: &Path) -> Result<AppConfig> {
    loaded.with_context(|| format!("Failed to load configuration from {}", path.display()))
}
