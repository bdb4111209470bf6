//! Logging, reports and the interactive sizing dashboard.

mod dashboard;
mod format;
mod logging;
mod report;
mod view;

pub use dashboard::{Dashboard, DashboardState, KeyOutcome};
pub use format::{format_currency, format_fraction_pct, format_pct, format_shares};
pub use logging::setup_logging;
pub use report::{ReportError, SizeReport, TableReport};
pub use view::TableView;
