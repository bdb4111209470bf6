//! Validate configuration command.

use anyhow::Result;
use sizer_config::load_config;
use sizer_monitor::{format_currency, format_fraction_pct};
use std::path::Path;

use crate::cli::ValidateArgs;

pub fn run(args: ValidateArgs, config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.sizing.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!(
        "Risk levels: {}",
        config
            .sizing
            .risk_levels
            .iter()
            .map(|l| format_fraction_pct(*l))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Heat cap: {}", format_fraction_pct(config.sizing.heat_cap_pct));
    println!("Position cap: {}", format_fraction_pct(config.sizing.position_cap_pct));
    println!("Portfolio value: {}", format_currency(config.sizing.portfolio_value));

    if args.dump {
        println!();
        println!("{}", config.to_toml()?);
    }

    Ok(())
}
