//! CLI command implementations.

pub mod dashboard;
pub mod single;
pub mod table;
pub mod validate;
pub mod watchlist;
