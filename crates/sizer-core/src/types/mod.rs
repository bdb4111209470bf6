//! Core data types for position sizing.

mod caps;
mod sizing;
mod trade;

pub use caps::{CapKind, CapsApplied, LimitingCaps, NO_LIMITING_CAP};
pub use sizing::{CappedTable, RowResult, SizeResult};
pub use trade::{default_risk_levels, Direction, TableRequest, TradeParameters};
