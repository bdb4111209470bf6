//! Trade input types.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The default set of risk levels, as fractions of portfolio value
/// (0.25%, 0.50%, 0.75%, 1.00%, 2.00%).
pub fn default_risk_levels() -> Vec<Decimal> {
    vec![dec!(0.0025), dec!(0.005), dec!(0.0075), dec!(0.01), dec!(0.02)]
}

/// Trade direction implied by where the stop sits relative to the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Stop below entry
    Long,
    /// Stop above entry
    Short,
}

impl Direction {
    /// Direction for an entry/stop pair. Equal prices read as long.
    pub fn from_prices(entry_price: Decimal, stop_price: Decimal) -> Self {
        if stop_price > entry_price {
            Direction::Short
        } else {
            Direction::Long
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "Long"),
            Direction::Short => write!(f, "Short"),
        }
    }
}

/// Price and portfolio inputs for a single trade.
///
/// Not validated on construction; the sizer validates before computing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeParameters {
    /// Total portfolio (account) value
    pub portfolio_value: Decimal,
    /// Planned entry price
    pub entry_price: Decimal,
    /// Protective stop price
    pub stop_price: Decimal,
}

impl TradeParameters {
    pub fn new(portfolio_value: Decimal, entry_price: Decimal, stop_price: Decimal) -> Self {
        Self {
            portfolio_value,
            entry_price,
            stop_price,
        }
    }

    /// Absolute price distance between entry and stop.
    pub fn per_share_risk(&self) -> Decimal {
        (self.entry_price - self.stop_price).abs()
    }

    pub fn direction(&self) -> Direction {
        Direction::from_prices(self.entry_price, self.stop_price)
    }
}

/// Everything needed to build a capped sizing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRequest {
    pub trade: TradeParameters,
    /// Risk levels as fractions of portfolio value, in display order
    pub risk_levels: Vec<Decimal>,
    /// Fraction of portfolio value that may be risked on one trade
    pub heat_cap_pct: Decimal,
    /// Fraction of portfolio value that may be invested in one position
    pub position_cap_pct: Decimal,
}

impl TableRequest {
    /// Request using the default risk levels.
    pub fn new(trade: TradeParameters, heat_cap_pct: Decimal, position_cap_pct: Decimal) -> Self {
        Self {
            trade,
            risk_levels: default_risk_levels(),
            heat_cap_pct,
            position_cap_pct,
        }
    }

    pub fn with_risk_levels(mut self, levels: Vec<Decimal>) -> Self {
        self.risk_levels = levels;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_share_risk_is_symmetric() {
        let long = TradeParameters::new(dec!(10000), dec!(100), dec!(98.5));
        let short = TradeParameters::new(dec!(10000), dec!(98.5), dec!(100));
        assert_eq!(long.per_share_risk(), dec!(1.5));
        assert_eq!(short.per_share_risk(), long.per_share_risk());
    }

    #[test]
    fn test_direction() {
        assert_eq!(Direction::from_prices(dec!(100), dec!(95)), Direction::Long);
        assert_eq!(Direction::from_prices(dec!(100), dec!(105)), Direction::Short);
        assert_eq!(Direction::Short.to_string(), "Short");
    }

    #[test]
    fn test_default_risk_levels() {
        let levels = default_risk_levels();
        assert_eq!(levels.len(), 5);
        assert_eq!(levels[0], dec!(0.0025));
        assert_eq!(levels[4], dec!(0.02));
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_table_request_overrides_levels() {
        let trade = TradeParameters::new(dec!(50000), dec!(100), dec!(98));
        let request = TableRequest::new(trade, dec!(0.01), dec!(0.05))
            .with_risk_levels(vec![dec!(0.01)]);
        assert_eq!(request.risk_levels, vec![dec!(0.01)]);
    }
}
