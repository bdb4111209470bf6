//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use sizer_monitor::TableView;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sizer")]
#[command(author, version, about = "Risk-based position sizing calculator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Size one position from a balance and a risk percentage
    Single(SingleArgs),
    /// Size a trade at several risk levels under heat, cash and position caps
    Table(TableArgs),
    /// Interactive sizing table
    Dashboard(DashboardArgs),
    /// Edit a comma-separated symbol watchlist and list chart links
    Watchlist(WatchlistArgs),
    /// Validate configuration
    ValidateConfig(ValidateArgs),
}

impl Commands {
    /// Whether the command draws on the terminal, so console logs must stay off it.
    pub fn owns_terminal(&self) -> bool {
        matches!(self, Commands::Dashboard(_))
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TableFormat {
    Text,
    Json,
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ViewArg {
    /// Ascending risk percentage
    Risk,
    /// Descending heat percentage
    Heat,
}

impl From<ViewArg> for TableView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Risk => TableView::ByRisk,
            ViewArg::Heat => TableView::ByHeat,
        }
    }
}

#[derive(clap::Args)]
pub struct SingleArgs {
    /// Account balance (defaults to the config value)
    #[arg(short, long)]
    pub balance: Option<Decimal>,

    /// Percent of the account to risk, 0-100 scale (defaults to the config value)
    #[arg(short, long)]
    pub risk_percent: Option<Decimal>,

    /// Entry price
    #[arg(short, long)]
    pub entry: Decimal,

    /// Stop loss price
    #[arg(short, long)]
    pub stop: Decimal,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: ReportFormat,
}

/// Inputs shared by `table` and `dashboard`.
#[derive(clap::Args)]
pub struct TableInputs {
    /// Entry price
    #[arg(short, long)]
    pub entry: Decimal,

    /// Stop price
    #[arg(short, long)]
    pub stop: Decimal,

    /// Portfolio value (defaults to the config value)
    #[arg(short, long)]
    pub portfolio: Option<Decimal>,

    /// Risk levels as fractions, comma-separated (e.g. 0.0025,0.01)
    #[arg(long, value_delimiter = ',')]
    pub levels: Vec<Decimal>,

    /// Heat cap as a fraction of portfolio value
    #[arg(long)]
    pub heat_cap: Option<Decimal>,

    /// Position cap as a fraction of portfolio value
    #[arg(long)]
    pub position_cap: Option<Decimal>,

    /// Row order
    #[arg(long, value_enum, default_value = "risk")]
    pub view: ViewArg,
}

#[derive(clap::Args)]
pub struct TableArgs {
    #[command(flatten)]
    pub inputs: TableInputs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: TableFormat,

    /// Also write the output to a file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub inputs: TableInputs,
}

#[derive(clap::Args)]
pub struct WatchlistArgs {
    /// Buffer file (reads stdin when omitted)
    #[arg(short, long)]
    pub buffer: Option<PathBuf>,

    /// Symbol to append (repeatable)
    #[arg(short, long)]
    pub add: Vec<String>,

    /// Remove the symbols that were in the buffer before this run
    #[arg(long)]
    pub drop_original: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: ReportFormat,
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Print the effective configuration as TOML
    #[arg(long)]
    pub dump: bool,
}
