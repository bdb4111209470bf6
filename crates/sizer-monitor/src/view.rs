//! Table ordering views.

use serde::{Deserialize, Serialize};
use sizer_core::RowResult;
use std::fmt;
use std::str::FromStr;

/// How table rows are ordered for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableView {
    /// Ascending risk percentage
    #[default]
    ByRisk,
    /// Descending heat percentage
    ByHeat,
}

impl TableView {
    /// Rows in display order. Equal keys keep their input order.
    pub fn sorted_rows<'a>(&self, rows: &'a [RowResult]) -> Vec<&'a RowResult> {
        let mut sorted: Vec<&RowResult> = rows.iter().collect();
        match self {
            TableView::ByRisk => sorted.sort_by(|a, b| a.risk_pct.cmp(&b.risk_pct)),
            TableView::ByHeat => sorted.sort_by(|a, b| b.heat_pct.cmp(&a.heat_pct)),
        }
        sorted
    }

    pub fn toggle(self) -> Self {
        match self {
            TableView::ByRisk => TableView::ByHeat,
            TableView::ByHeat => TableView::ByRisk,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TableView::ByRisk => "risk % ascending",
            TableView::ByHeat => "heat % descending",
        }
    }
}

impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TableView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "risk" => Ok(TableView::ByRisk),
            "heat" => Ok(TableView::ByHeat),
            other => Err(format!("Unknown table view '{}' (expected risk or heat)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sizer_risk::capped_table;

    fn rows() -> Vec<RowResult> {
        // Position cap clamps every level from 0.5% up to 125 shares.
        capped_table(
            dec!(50000),
            dec!(100),
            dec!(98),
            &[dec!(0.01), dec!(0.0025), dec!(0.02), dec!(0.005)],
            dec!(1),
            dec!(0.25),
        )
        .unwrap()
        .rows
    }

    #[test]
    fn test_by_risk_ascending() {
        let rows = rows();
        let order: Vec<_> = TableView::ByRisk
            .sorted_rows(&rows)
            .iter()
            .map(|r| r.risk_pct)
            .collect();
        assert_eq!(order, vec![dec!(0.0025), dec!(0.005), dec!(0.01), dec!(0.02)]);
    }

    #[test]
    fn test_by_heat_descending_is_stable() {
        let rows = rows();
        let sorted = TableView::ByHeat.sorted_rows(&rows);
        assert!(sorted.windows(2).all(|w| w[0].heat_pct >= w[1].heat_pct));
        // 0.01, 0.02 and 0.005 tie at 125 shares; input order is kept.
        assert_eq!(sorted[0].risk_pct, dec!(0.01));
        assert_eq!(sorted[1].risk_pct, dec!(0.02));
    }

    #[test]
    fn test_sorting_leaves_rows_untouched() {
        let rows = rows();
        let before = rows.clone();
        let _ = TableView::ByHeat.sorted_rows(&rows);
        assert_eq!(rows, before);
    }

    #[test]
    fn test_parse_and_toggle() {
        assert_eq!("Heat".parse::<TableView>().unwrap(), TableView::ByHeat);
        assert!("value".parse::<TableView>().is_err());
        assert_eq!(TableView::ByRisk.toggle(), TableView::ByHeat);
        assert_eq!(TableView::ByHeat.toggle(), TableView::ByRisk);
    }
}
