//! Sizing result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CapsApplied, Direction, LimitingCaps};

/// Result of simple single-level sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeResult {
    /// Money at risk (balance * risk% / 100)
    pub risk_amount: Decimal,
    /// Absolute entry/stop distance
    pub per_share_risk: Decimal,
    /// Exact, real-valued position size
    pub position_size: Decimal,
    /// Capital needed to buy `position_size` at the entry price
    pub capital_needed: Decimal,
    pub direction: Direction,
}

impl SizeResult {
    /// Position size rounded down to whole units.
    pub fn whole_units(&self) -> Decimal {
        self.position_size.floor()
    }

    /// Capital needed for the whole-unit position, `None` on overflow.
    pub fn whole_units_capital(&self, entry_price: Decimal) -> Option<Decimal> {
        self.whole_units().checked_mul(entry_price)
    }
}

/// One row of the capped sizing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowResult {
    /// Risk level as a fraction of portfolio value
    pub risk_pct: Decimal,
    pub risk_budget: Decimal,
    pub per_share_risk: Decimal,
    /// Uncapped size for this risk level
    pub intended_shares: Decimal,
    pub heat_cap_shares: Decimal,
    pub cash_cap_shares: Decimal,
    pub position_cap_shares: Decimal,
    /// Minimum of the three cap counts
    pub final_shares: Decimal,
    pub position_value: Decimal,
    /// Capital at risk for `final_shares`
    pub heat: Decimal,
    /// Heat as a percentage (0-100) of portfolio value
    pub heat_pct: Decimal,
    pub limiting: LimitingCaps,
    pub caps_applied: CapsApplied,
}

/// Full output of the capped table calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CappedTable {
    pub direction: Direction,
    pub per_share_risk: Decimal,
    /// Stop distance as a percentage of the entry price
    pub stop_distance_pct: Decimal,
    pub heat_cap_budget: Decimal,
    pub position_value_cap: Decimal,
    pub cash_cap_shares: Decimal,
    pub position_cap_shares: Decimal,
    /// One row per requested risk level, in request order
    pub rows: Vec<RowResult>,
    /// True if any row sized to zero shares
    pub any_zero_shares: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_whole_units() {
        let result = SizeResult {
            risk_amount: dec!(100),
            per_share_risk: dec!(3),
            position_size: dec!(33.333333),
            capital_needed: dec!(3333.3333),
            direction: Direction::Long,
        };
        assert_eq!(result.whole_units(), dec!(33));
        assert_eq!(result.whole_units_capital(dec!(100)), Some(dec!(3300)));
        assert_eq!(result.whole_units_capital(Decimal::MAX), None);
    }
}
