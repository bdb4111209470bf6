//! Risk-based position sizing.
//!
//! Provides simple single-level sizing and a multi-level table capped by
//! heat (risk), available cash and position value.

mod checked;
mod position_sizer;
mod single;

pub use position_sizer::{capped_table, PositionSizer};
pub use single::single_size;
