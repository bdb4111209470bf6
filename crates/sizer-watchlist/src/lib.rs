//! Symbol watchlist kept in a plain comma-separated text buffer.
//!
//! The buffer is owned by the caller (a file, stdin, a system clipboard);
//! this crate only edits text.

mod buffer;

pub use buffer::{chart_url, ChartLink, Watchlist, SYMBOL_PLACEHOLDER};
