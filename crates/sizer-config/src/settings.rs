//! Configuration structures.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use sizer_core::{default_risk_levels, SizingError};
use sizer_risk::PositionSizer;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub sizing: SizingSettings,
    #[serde(default)]
    pub single: SingleSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub watchlist: WatchlistSettings,
}

impl AppConfig {
    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "sizer".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Defaults for the capped sizing table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingSettings {
    /// Risk levels as fractions of portfolio value
    #[serde(deserialize_with = "one_or_many")]
    pub risk_levels: Vec<Decimal>,
    /// Maximum fraction of portfolio value at risk on one trade
    pub heat_cap_pct: Decimal,
    /// Maximum fraction of portfolio value in one position
    pub position_cap_pct: Decimal,
    pub portfolio_value: Decimal,
}

impl Default for SizingSettings {
    fn default() -> Self {
        Self {
            risk_levels: default_risk_levels(),
            heat_cap_pct: dec!(0.01),
            position_cap_pct: dec!(0.25),
            portfolio_value: dec!(100000),
        }
    }
}

impl SizingSettings {
    /// Build a sizer from these settings.
    pub fn sizer(&self) -> PositionSizer {
        PositionSizer::new(self.heat_cap_pct, self.position_cap_pct)
            .with_risk_levels(self.risk_levels.clone())
    }

    /// Apply the same level and cap rules the sizer enforces.
    pub fn validate(&self) -> Result<(), SizingError> {
        if self.portfolio_value <= Decimal::ZERO {
            return Err(SizingError::not_positive(
                "sizing.portfolio_value",
                self.portfolio_value,
            ));
        }
        self.sizer().validate_settings()
    }
}

/// Accept a bare level as a one-element list; a single environment value
/// parses as a number rather than a list.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Levels {
        Many(Vec<Decimal>),
        One(Decimal),
    }

    Ok(match Levels::deserialize(deserializer)? {
        Levels::Many(levels) => levels,
        Levels::One(level) => vec![level],
    })
}

/// Defaults for single-level sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleSettings {
    pub account_balance: Decimal,
    /// Percent of the account (0-100 scale)
    pub risk_percent: Decimal,
}

impl Default for SingleSettings {
    fn default() -> Self {
        Self {
            account_balance: dec!(10000),
            risk_percent: dec!(1.0),
        }
    }
}

/// Interactive dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub refresh_ms: u64,
    /// Price change per key press
    pub price_step: Decimal,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_ms: 250,
            price_step: dec!(0.10),
        }
    }
}

/// Watchlist settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchlistSettings {
    /// Chart URL with a `{symbol}` placeholder
    pub chart_url_template: String,
}

impl Default for WatchlistSettings {
    fn default() -> Self {
        Self {
            chart_url_template: "https://finviz.com/chart.ashx?t={symbol}".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizer_core::ErrorKind;

    #[test]
    fn test_default_sizing_is_valid() {
        assert!(SizingSettings::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_sizing_settings() {
        let settings = SizingSettings {
            heat_cap_pct: dec!(2),
            ..Default::default()
        };
        assert_eq!(settings.validate().unwrap_err().kind(), ErrorKind::InvalidInput);

        let settings = SizingSettings {
            portfolio_value: Decimal::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SizingError::InvalidInput { field: "sizing.portfolio_value", .. })
        ));
    }

    #[test]
    fn test_toml_dump_contains_sections() {
        let dump = AppConfig::default().to_toml().unwrap();
        assert!(dump.contains("[sizing]"));
        assert!(dump.contains("[watchlist]"));
        assert!(dump.contains("heat_cap_pct"));
    }

    #[test]
    fn test_logging_format() {
        let mut logging = LoggingConfig::default();
        assert!(!logging.is_json());
        logging.format = "JSON".to_string();
        assert!(logging.is_json());
    }
}
