//! Watchlist command.

use anyhow::{Context, Result};
use serde::Serialize;
use sizer_config::AppConfig;
use sizer_watchlist::{ChartLink, Watchlist};
use std::io;
use tracing::info;

use crate::cli::{ReportFormat, WatchlistArgs};

#[derive(Serialize)]
struct WatchlistOutput<'a> {
    original: Vec<&'a str>,
    charts: Vec<ChartLink>,
    buffer: String,
}

fn output<'a>(list: &'a Watchlist, drop_original: bool, template: &str) -> WatchlistOutput<'a> {
    let buffer = if drop_original {
        list.drop_original()
    } else {
        list.current().to_string()
    };
    WatchlistOutput {
        original: list.original_symbols(),
        charts: list.chart_links(template),
        buffer,
    }
}

pub fn run(args: WatchlistArgs, config: &AppConfig) -> Result<()> {
    let text = match &args.buffer {
        Some(path) if path.exists() => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        Some(_) => String::new(),
        None => io::read_to_string(io::stdin()).context("Failed to read stdin")?,
    };

    let mut list = Watchlist::from_buffer(text.trim_end_matches(['\r', '\n']));
    for symbol in &args.add {
        list.add(symbol)?;
    }

    let output = output(&list, args.drop_original, &config.watchlist.chart_url_template);

    match args.output {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        ReportFormat::Text => {
            println!("Original symbols: {}", output.original.join(", "));
            for link in &output.charts {
                println!("  {:<8} {}", link.symbol, link.url);
            }
            println!("Current buffer:   {}", output.buffer);
        }
    }

    if let Some(path) = &args.buffer {
        if output.buffer != list.original() {
            std::fs::write(path, &output.buffer)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Buffer saved to {:?}", path);
        }
    }

    Ok(())
}
