//! Error types for position sizing.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by the position sizing calculators.
///
/// Every variant is recoverable: the caller renders the message and skips
/// the calculation. No rows are ever produced alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizingError {
    #[error("Invalid input: {field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Stop loss price cannot be equal to entry price ({price}). Please adjust.")]
    ZeroRiskDistance { price: Decimal },

    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

/// Coarse classification of a [`SizingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    ZeroRiskDistance,
    Overflow,
}

impl SizingError {
    /// Build an `InvalidInput` error for a value that must be strictly positive.
    pub fn not_positive(field: &'static str, value: Decimal) -> Self {
        SizingError::InvalidInput {
            field,
            reason: format!("must be positive (got {})", value),
        }
    }

    /// Build an `InvalidInput` error for a value outside an allowed range.
    pub fn out_of_range(field: &'static str, value: Decimal, range: &str) -> Self {
        SizingError::InvalidInput {
            field,
            reason: format!("must be in {} (got {})", range, value),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SizingError::InvalidInput { .. } => ErrorKind::InvalidInput,
            SizingError::ZeroRiskDistance { .. } => ErrorKind::ZeroRiskDistance,
            SizingError::Overflow(_) => ErrorKind::Overflow,
        }
    }
}

/// Errors from editing a watchlist buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchlistError {
    #[error("Symbol must not be empty")]
    EmptySymbol,

    #[error("Invalid symbol '{0}': symbols cannot contain commas")]
    InvalidSymbol(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SizingError::not_positive("entry_price", dec!(0)).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            SizingError::ZeroRiskDistance { price: dec!(100) }.kind(),
            ErrorKind::ZeroRiskDistance
        );
        assert_eq!(SizingError::Overflow("heat").kind(), ErrorKind::Overflow);
    }

    #[test]
    fn test_messages_name_the_field() {
        let err = SizingError::not_positive("portfolio_value", dec!(-5));
        assert_eq!(
            err.to_string(),
            "Invalid input: portfolio_value must be positive (got -5)"
        );

        let err = SizingError::out_of_range("heat_cap_pct", dec!(1.5), "[0, 1]");
        assert_eq!(
            err.to_string(),
            "Invalid input: heat_cap_pct must be in [0, 1] (got 1.5)"
        );
    }
}
