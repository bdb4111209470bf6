//! Core types and errors for position sizing.
//!
//! This crate provides the foundational building blocks including:
//! - Trade inputs (TradeParameters, TableRequest)
//! - Sizing outputs (SizeResult, RowResult, CappedTable)
//! - Cap identities and binding-cap labels
//! - The error taxonomy shared by the calculators and the watchlist

pub mod types;
pub mod error;

pub use error::{ErrorKind, SizingError, WatchlistError};
pub use types::*;
