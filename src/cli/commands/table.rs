//! Capped sizing table command.

use anyhow::{Context, Result};
use sizer_config::AppConfig;
use sizer_core::{TableRequest, TradeParameters};
use sizer_monitor::TableReport;
use sizer_risk::PositionSizer;
use tracing::{info, warn};

use crate::cli::{TableArgs, TableFormat, TableInputs};

pub fn run(args: TableArgs, config: &AppConfig) -> Result<()> {
    let request = table_request(&args.inputs, config);
    info!(
        entry = %request.trade.entry_price,
        stop = %request.trade.stop_price,
        levels = request.risk_levels.len(),
        "Building sizing table"
    );

    let table = match PositionSizer::from_request(&request).capped_table(&request.trade) {
        Ok(table) => table,
        Err(e) => {
            warn!(kind = ?e.kind(), "Sizing rejected: {}", e);
            return Err(e.into());
        }
    };

    let report = TableReport::new(request, args.inputs.view.into(), table);
    let rendered = match args.output {
        TableFormat::Text => report.summary(),
        TableFormat::Json => report.to_json()?,
        TableFormat::Csv => report.to_csv()?,
    };
    println!("{}", rendered);

    if let Some(save_path) = &args.save {
        std::fs::write(save_path, &rendered)
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}

/// Merge command-line inputs over the configured sizing defaults.
pub fn table_request(inputs: &TableInputs, config: &AppConfig) -> TableRequest {
    let sizing = &config.sizing;
    let trade = TradeParameters::new(
        inputs.portfolio.unwrap_or(sizing.portfolio_value),
        inputs.entry,
        inputs.stop,
    );
    let levels = if inputs.levels.is_empty() {
        sizing.risk_levels.clone()
    } else {
        inputs.levels.clone()
    };

    TableRequest::new(
        trade,
        inputs.heat_cap.unwrap_or(sizing.heat_cap_pct),
        inputs.position_cap.unwrap_or(sizing.position_cap_pct),
    )
    .with_risk_levels(levels)
}
