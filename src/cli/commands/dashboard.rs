//! Interactive dashboard command.

use anyhow::{Context, Result};
use sizer_config::AppConfig;
use sizer_monitor::{Dashboard, DashboardState};
use tracing::info;

use super::table::table_request;
use crate::cli::DashboardArgs;

pub fn run(args: DashboardArgs, config: &AppConfig) -> Result<()> {
    let request = table_request(&args.inputs, config);
    let mut state = DashboardState::new(
        request,
        args.inputs.view.into(),
        config.dashboard.price_step,
    );

    info!("Starting dashboard");
    Dashboard::new(config.dashboard.refresh_ms)
        .run(&mut state)
        .context("Dashboard terminal error")?;
    info!("Dashboard closed");

    Ok(())
}
