//! Sizing report generation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sizer_core::{CappedTable, SizeResult, TableRequest};
use thiserror::Error;

use crate::format::{format_currency, format_fraction_pct, format_pct, format_shares};
use crate::TableView;

const RULE: &str = "═══════════════════════════════════════════════════════════\n";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────\n";

/// Report export errors.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Single-level sizing report.
#[derive(Debug, Clone, Serialize)]
pub struct SizeReport {
    pub generated_at: DateTime<Utc>,
    pub account_balance: Decimal,
    /// Percent of the account (0-100 scale)
    pub risk_percent: Decimal,
    pub entry_price: Decimal,
    pub stop_loss_price: Decimal,
    pub result: SizeResult,
}

impl SizeReport {
    pub fn new(
        account_balance: Decimal,
        risk_percent: Decimal,
        entry_price: Decimal,
        stop_loss_price: Decimal,
        result: SizeResult,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            account_balance,
            risk_percent,
            entry_price,
            stop_loss_price,
            result,
        }
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let r = &self.result;
        let mut s = String::new();

        s.push_str(RULE);
        s.push_str("                  POSITION SIZE CALCULATOR                  \n");
        s.push_str(RULE);
        s.push('\n');

        s.push_str("INPUTS\n");
        s.push_str(THIN_RULE);
        s.push_str(&format!("  Account Balance:     {}\n", format_currency(self.account_balance)));
        s.push_str(&format!("  Risk per Trade:      {}\n", format_pct(self.risk_percent)));
        s.push_str(&format!("  Entry Price:         {}\n", format_currency(self.entry_price)));
        s.push_str(&format!("  Stop Loss Price:     {}\n", format_currency(self.stop_loss_price)));
        s.push_str(&format!("  Direction:           {}\n", r.direction));
        s.push('\n');

        s.push_str("RISK METRICS\n");
        s.push_str(THIN_RULE);
        s.push_str(&format!("  Capital at Risk:     {}\n", format_currency(r.risk_amount)));
        s.push_str(&format!("  Stop Distance:       {} per unit\n", format_currency(r.per_share_risk)));
        s.push('\n');

        s.push_str("POSITION METRICS\n");
        s.push_str(THIN_RULE);
        s.push_str(&format!(
            "  Position Size:       {} units (suggested)\n",
            format_shares(r.whole_units())
        ));
        s.push_str(&format!("  Exact Size:          {:.2} units\n", r.position_size));
        s.push_str(&format!("  Capital Needed:      {}\n", format_currency(r.capital_needed)));
        let whole_capital = r
            .whole_units_capital(self.entry_price)
            .map(format_currency)
            .unwrap_or_else(|| "overflow".to_string());
        s.push_str(&format!("  Suggested Capital:   {}\n", whole_capital));
        s.push('\n');

        s.push_str(RULE);
        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Capped sizing table report.
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub generated_at: DateTime<Utc>,
    pub request: TableRequest,
    pub view: TableView,
    pub table: CappedTable,
}

/// Flat CSV record for one table row.
#[derive(Serialize)]
struct CsvRow {
    risk_pct: Decimal,
    risk_budget: Decimal,
    per_share_risk: Decimal,
    intended_shares: Decimal,
    heat_cap_shares: Decimal,
    cash_cap_shares: Decimal,
    position_cap_shares: Decimal,
    final_shares: Decimal,
    position_value: Decimal,
    heat: Decimal,
    heat_pct: Decimal,
    limiting: String,
    heat_cap_applied: bool,
    cash_cap_applied: bool,
    position_cap_applied: bool,
}

impl TableReport {
    pub fn new(request: TableRequest, view: TableView, table: CappedTable) -> Self {
        Self {
            generated_at: Utc::now(),
            request,
            view,
            table,
        }
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let t = &self.table;
        let trade = &self.request.trade;
        let mut s = String::new();

        s.push_str(RULE);
        s.push_str("                   POSITION SIZING TABLE                    \n");
        s.push_str(RULE);
        s.push('\n');

        s.push_str("TRADE\n");
        s.push_str(THIN_RULE);
        s.push_str(&format!("  Direction:           {}\n", t.direction));
        s.push_str(&format!("  Portfolio Value:     {}\n", format_currency(trade.portfolio_value)));
        s.push_str(&format!("  Entry Price:         {}\n", format_currency(trade.entry_price)));
        s.push_str(&format!("  Stop Price:          {}\n", format_currency(trade.stop_price)));
        s.push_str(&format!(
            "  Stop Distance:       {} ({})\n",
            format_currency(t.per_share_risk),
            format_pct(t.stop_distance_pct)
        ));
        s.push('\n');

        s.push_str("CAPS\n");
        s.push_str(THIN_RULE);
        s.push_str(&format!(
            "  Heat Cap:            {} ({})\n",
            format_fraction_pct(self.request.heat_cap_pct),
            format_currency(t.heat_cap_budget)
        ));
        s.push_str(&format!(
            "  Position Cap:        {} ({})\n",
            format_fraction_pct(self.request.position_cap_pct),
            format_currency(t.position_value_cap)
        ));
        s.push_str(&format!("  Cash Cap Shares:     {}\n", format_shares(t.cash_cap_shares)));
        s.push_str(&format!("  Position Cap Shares: {}\n", format_shares(t.position_cap_shares)));
        s.push('\n');

        s.push_str(&format!("SIZES (by {})\n", self.view));
        s.push_str(THIN_RULE);
        s.push_str(&format!(
            "  {:>6} {:>9} {:>9} {:>9} {:>13} {:>12} {:>7}  {}\n",
            "Risk", "Intended", "Heat Cap", "Final", "Value", "Heat", "Heat %", "Limiting"
        ));
        for row in self.view.sorted_rows(&t.rows) {
            s.push_str(&format!(
                "  {:>6} {:>9} {:>9} {:>9} {:>13} {:>12} {:>7}  {}\n",
                format_fraction_pct(row.risk_pct),
                format_shares(row.intended_shares),
                format_shares(row.heat_cap_shares),
                format_shares(row.final_shares),
                format_currency(row.position_value),
                format_currency(row.heat),
                format_pct(row.heat_pct),
                row.limiting
            ));
        }
        s.push('\n');

        if t.any_zero_shares {
            s.push_str("  WARNING: at least one risk level sizes to zero shares.\n");
            s.push_str("  Loosen the caps or widen the portfolio to trade it.\n\n");
        }

        s.push_str(RULE);
        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Export rows to CSV, in view order.
    pub fn to_csv(&self) -> Result<String, ReportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in self.view.sorted_rows(&self.table.rows) {
            writer.serialize(CsvRow {
                risk_pct: row.risk_pct,
                risk_budget: row.risk_budget,
                per_share_risk: row.per_share_risk,
                intended_shares: row.intended_shares,
                heat_cap_shares: row.heat_cap_shares,
                cash_cap_shares: row.cash_cap_shares,
                position_cap_shares: row.position_cap_shares,
                final_shares: row.final_shares,
                position_value: row.position_value,
                heat: row.heat,
                heat_pct: row.heat_pct,
                limiting: row.limiting.label(),
                heat_cap_applied: row.caps_applied.heat,
                cash_cap_applied: row.caps_applied.cash,
                position_cap_applied: row.caps_applied.position,
            })?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ReportError::Csv(e.into_error().into()))?;
        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sizer_core::TradeParameters;
    use sizer_risk::{single_size, PositionSizer};

    fn table_report(view: TableView) -> TableReport {
        let request = TableRequest::new(
            TradeParameters::new(dec!(50000), dec!(100), dec!(98)),
            dec!(0.01),
            dec!(0.05),
        );
        let table = PositionSizer::from_request(&request)
            .capped_table(&request.trade)
            .unwrap();
        TableReport::new(request, view, table)
    }

    #[test]
    fn test_size_summary() {
        let result = single_size(dec!(10000), dec!(1), dec!(100), dec!(99)).unwrap();
        let report = SizeReport::new(dec!(10000), dec!(1), dec!(100), dec!(99), result);
        let summary = report.summary();

        assert!(summary.contains("POSITION SIZE CALCULATOR"));
        assert!(summary.contains("Capital at Risk:     $100.00"));
        assert!(summary.contains("Position Size:       100 units (suggested)"));
        assert!(summary.contains("Capital Needed:      $10,000.00"));
        assert!(summary.contains("Suggested Capital:   $10,000.00"));
    }

    #[test]
    fn test_size_summary_prices_whole_units() {
        // 100 / 3 = 33.33 units; the suggestion buys 33 of them
        let result = single_size(dec!(10000), dec!(1), dec!(50), dec!(47)).unwrap();
        let report = SizeReport::new(dec!(10000), dec!(1), dec!(50), dec!(47), result);
        let summary = report.summary();

        assert!(summary.contains("Position Size:       33 units (suggested)"));
        assert!(summary.contains("Capital Needed:      $1,666.67"));
        assert!(summary.contains("Suggested Capital:   $1,650.00"));
    }

    #[test]
    fn test_size_json() {
        let result = single_size(dec!(10000), dec!(1), dec!(100), dec!(105)).unwrap();
        let report = SizeReport::new(dec!(10000), dec!(1), dec!(100), dec!(105), result);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["result"]["direction"], "short");
        let size: Decimal = json["result"]["position_size"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(size, dec!(20));
    }

    #[test]
    fn test_table_summary() {
        let summary = table_report(TableView::ByRisk).summary();

        assert!(summary.contains("POSITION SIZING TABLE"));
        assert!(summary.contains("Stop Distance:       $2.00 (2.00%)"));
        assert!(summary.contains("Position Cap Shares: 25"));
        assert!(summary.contains("Position"));
        assert!(!summary.contains("WARNING"));
    }

    #[test]
    fn test_table_summary_warns_on_zero_rows() {
        let request = TableRequest::new(
            TradeParameters::new(dec!(1000), dec!(500), dec!(400)),
            dec!(0.01),
            dec!(0.25),
        );
        let table = PositionSizer::from_request(&request)
            .capped_table(&request.trade)
            .unwrap();
        assert!(table.any_zero_shares);

        let summary = TableReport::new(request, TableView::ByRisk, table).summary();
        assert!(summary.contains("WARNING"));
    }

    #[test]
    fn test_table_csv() {
        let csv = table_report(TableView::ByRisk).to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("risk_pct,risk_budget,per_share_risk"));
        assert!(lines[1].starts_with("0.0025,"));
        assert!(lines[5].contains("Position"));
    }

    #[test]
    fn test_table_json_keeps_request_order() {
        let report = table_report(TableView::ByHeat);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["view"], "by_heat");
        assert_eq!(json["table"]["rows"][0]["risk_pct"], "0.0025");
        assert_eq!(json["table"]["any_zero_shares"], false);
    }
}
