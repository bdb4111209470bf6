//! Single-level sizing command.

use anyhow::Result;
use sizer_config::AppConfig;
use sizer_monitor::SizeReport;
use sizer_risk::single_size;
use tracing::{info, warn};

use crate::cli::{ReportFormat, SingleArgs};

pub fn run(args: SingleArgs, config: &AppConfig) -> Result<()> {
    let balance = args.balance.unwrap_or(config.single.account_balance);
    let risk_percent = args.risk_percent.unwrap_or(config.single.risk_percent);

    info!(%balance, %risk_percent, entry = %args.entry, stop = %args.stop, "Sizing single position");

    let result = match single_size(balance, risk_percent, args.entry, args.stop) {
        Ok(result) => result,
        Err(e) => {
            warn!(kind = ?e.kind(), "Sizing rejected: {}", e);
            return Err(e.into());
        }
    };

    let report = SizeReport::new(balance, risk_percent, args.entry, args.stop, result);
    match args.output {
        ReportFormat::Json => println!("{}", report.to_json()?),
        ReportFormat::Text => println!("{}", report.summary()),
    }

    Ok(())
}
