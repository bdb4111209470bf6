//! Multi-level position sizing with heat, cash and position caps.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sizer_core::{
    default_risk_levels, CappedTable, CapsApplied, LimitingCaps, RowResult, SizingError,
    TableRequest, TradeParameters,
};
use tracing::{debug, warn};

use crate::checked::{
    div, mul, require_cap_fraction, require_positive, require_risk_fraction,
};

/// Position sizer producing one capped row per risk level.
#[derive(Debug, Clone)]
pub struct PositionSizer {
    risk_levels: Vec<Decimal>,
    heat_cap_pct: Decimal,
    position_cap_pct: Decimal,
}

impl Default for PositionSizer {
    fn default() -> Self {
        Self::new(dec!(0.01), dec!(0.25))
    }
}

/// Values that are the same for every row of a table.
struct TableConstants {
    per_share_risk: Decimal,
    heat_cap_budget: Decimal,
    cash_cap_shares: Decimal,
    position_cap_shares: Decimal,
}

impl PositionSizer {
    /// Create a sizer with the default risk levels.
    pub fn new(heat_cap_pct: Decimal, position_cap_pct: Decimal) -> Self {
        Self {
            risk_levels: default_risk_levels(),
            heat_cap_pct,
            position_cap_pct,
        }
    }

    /// Create a sizer from a table request.
    pub fn from_request(request: &TableRequest) -> Self {
        Self::new(request.heat_cap_pct, request.position_cap_pct)
            .with_risk_levels(request.risk_levels.clone())
    }

    /// Replace the risk levels. Rows come back in this order.
    pub fn with_risk_levels(mut self, levels: Vec<Decimal>) -> Self {
        self.risk_levels = levels;
        self
    }

    pub fn risk_levels(&self) -> &[Decimal] {
        &self.risk_levels
    }

    pub fn heat_cap_pct(&self) -> Decimal {
        self.heat_cap_pct
    }

    pub fn position_cap_pct(&self) -> Decimal {
        self.position_cap_pct
    }

    /// Check every precondition once, before any row is computed.
    pub fn validate(&self, trade: &TradeParameters) -> Result<(), SizingError> {
        require_positive("portfolio_value", trade.portfolio_value)?;
        require_positive("entry_price", trade.entry_price)?;
        require_positive("stop_price", trade.stop_price)?;

        if trade.entry_price == trade.stop_price {
            return Err(SizingError::ZeroRiskDistance {
                price: trade.entry_price,
            });
        }

        self.validate_settings()
    }

    /// Check the risk levels and cap fractions on their own.
    pub fn validate_settings(&self) -> Result<(), SizingError> {
        if self.risk_levels.is_empty() {
            return Err(SizingError::InvalidInput {
                field: "risk_levels",
                reason: "must contain at least one level".to_string(),
            });
        }
        for level in &self.risk_levels {
            require_risk_fraction("risk_levels", *level)?;
        }

        require_cap_fraction("heat_cap_pct", self.heat_cap_pct)?;
        require_cap_fraction("position_cap_pct", self.position_cap_pct)?;

        Ok(())
    }

    /// Size the trade at every risk level.
    pub fn capped_table(&self, trade: &TradeParameters) -> Result<CappedTable, SizingError> {
        self.validate(trade)?;

        let per_share_risk = trade.per_share_risk();
        let stop_distance_pct = mul(
            div(per_share_risk, trade.entry_price, "stop distance")?,
            dec!(100),
            "stop distance",
        )?;
        let position_value_cap = mul(trade.portfolio_value, self.position_cap_pct, "position cap")?;
        let heat_cap_budget = mul(trade.portfolio_value, self.heat_cap_pct, "heat cap")?;

        let constants = TableConstants {
            per_share_risk,
            heat_cap_budget,
            cash_cap_shares: div(trade.portfolio_value, trade.entry_price, "cash cap")?.floor(),
            position_cap_shares: div(position_value_cap, trade.entry_price, "position cap")?
                .floor(),
        };

        debug!(
            %per_share_risk,
            %stop_distance_pct,
            %heat_cap_budget,
            %position_value_cap,
            cash_cap_shares = %constants.cash_cap_shares,
            position_cap_shares = %constants.position_cap_shares,
            "Computed table constants"
        );

        let rows = self
            .risk_levels
            .iter()
            .map(|&pct| size_row(trade, &constants, pct))
            .collect::<Result<Vec<_>, _>>()?;

        let any_zero_shares = rows.iter().any(|r| r.final_shares.is_zero());
        if any_zero_shares {
            warn!("One or more risk levels size to zero shares");
        }

        Ok(CappedTable {
            direction: trade.direction(),
            per_share_risk,
            stop_distance_pct,
            heat_cap_budget,
            position_value_cap,
            cash_cap_shares: constants.cash_cap_shares,
            position_cap_shares: constants.position_cap_shares,
            rows,
            any_zero_shares,
        })
    }
}

/// Build a capped table from loose arguments.
pub fn capped_table(
    portfolio_value: Decimal,
    entry_price: Decimal,
    stop_price: Decimal,
    risk_levels: &[Decimal],
    heat_cap_pct: Decimal,
    position_cap_pct: Decimal,
) -> Result<CappedTable, SizingError> {
    PositionSizer::new(heat_cap_pct, position_cap_pct)
        .with_risk_levels(risk_levels.to_vec())
        .capped_table(&TradeParameters::new(portfolio_value, entry_price, stop_price))
}

fn size_row(
    trade: &TradeParameters,
    constants: &TableConstants,
    risk_pct: Decimal,
) -> Result<RowResult, SizingError> {
    let per_share_risk = constants.per_share_risk;
    let cash_cap_shares = constants.cash_cap_shares;
    let position_cap_shares = constants.position_cap_shares;

    let risk_budget = mul(trade.portfolio_value, risk_pct, "risk budget")?;
    let effective_heat_budget = risk_budget.min(constants.heat_cap_budget);

    let intended_shares = div(risk_budget, per_share_risk, "intended shares")?.floor();
    let heat_cap_shares = div(effective_heat_budget, per_share_risk, "heat cap shares")?.floor();
    let final_shares = heat_cap_shares.min(cash_cap_shares).min(position_cap_shares);

    let position_value = mul(final_shares, trade.entry_price, "position value")?;
    let heat = mul(final_shares, per_share_risk, "heat")?;
    let heat_pct = if trade.portfolio_value.is_zero() {
        Decimal::ZERO
    } else {
        div(heat, trade.portfolio_value, "heat percent")? * dec!(100)
    };

    let limiting = LimitingCaps::new(
        binds(heat_cap_shares, final_shares),
        binds(cash_cap_shares, final_shares),
        binds(position_cap_shares, final_shares),
    );
    let caps_applied = CapsApplied {
        heat: heat_cap_shares < intended_shares,
        cash: cash_cap_shares < heat_cap_shares,
        position: position_cap_shares < heat_cap_shares,
    };

    debug!(
        %risk_pct,
        %intended_shares,
        %final_shares,
        limiting = %limiting,
        "Sized risk level"
    );

    Ok(RowResult {
        risk_pct,
        risk_budget,
        per_share_risk,
        intended_shares,
        heat_cap_shares,
        cash_cap_shares,
        position_cap_shares,
        final_shares,
        position_value,
        heat,
        heat_pct,
        limiting,
        caps_applied,
    })
}

/// A cap binds when it sets the final count and that count is positive.
fn binds(cap_shares: Decimal, final_shares: Decimal) -> bool {
    cap_shares == final_shares && cap_shares > Decimal::ZERO
}
