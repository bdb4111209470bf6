//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, DashboardSettings, LoggingConfig, SingleSettings, SizingSettings,
    WatchlistSettings,
};

pub use config::ConfigError;

use config::{Config, Environment, File};

use std::path::Path;

/// Load configuration from file and environment. The file must exist.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    build(path, true)
}

/// Load configuration, falling back to built-in defaults when the file is missing.
pub fn load_config_or_default(path: &Path) -> Result<AppConfig, ConfigError> {
    build(path, false)
}

fn build(path: &Path, required: bool) -> Result<AppConfig, ConfigError> {
    build_with(path, required, environment())
}

/// `SIZER__SECTION__KEY` variables; list keys take comma-separated values.
fn environment() -> Environment {
    Environment::with_prefix("SIZER")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("sizing.risk_levels")
        .try_parsing(true)
}

fn build_with(path: &Path, required: bool, env: Environment) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(env)
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Map;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    fn with_env(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        build_with(
            Path::new("does/not/exist.toml"),
            false,
            environment().source(Some(vars)),
        )
    }

    fn fixture(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("sizer-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_required() {
        let path = Path::new("does/not/exist.toml");
        assert!(load_config(path).is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config_or_default(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config.sizing.heat_cap_pct, dec!(0.01));
        assert_eq!(config.sizing.risk_levels.len(), 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = fixture(
            "partial.toml",
            "[sizing]\nheat_cap_pct = \"0.02\"\nposition_cap_pct = \"0.1\"\n",
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.sizing.heat_cap_pct, dec!(0.02));
        assert_eq!(config.sizing.position_cap_pct, dec!(0.1));
        assert_eq!(config.sizing.portfolio_value, dec!(100000));
        assert_eq!(config.single.risk_percent, dec!(1));
        assert_eq!(config.app.name, "sizer");
    }

    #[test]
    fn test_shipped_default_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/default.toml");
        let config = load_config(&path).unwrap();
        assert!(config.sizing.validate().is_ok());
        assert_eq!(config.sizing.risk_levels[0], dec!(0.0025));
    }

    #[test]
    fn test_env_overrides_risk_levels() {
        let config = with_env(&[("SIZER__SIZING__RISK_LEVELS", "0.005,0.01,0.03")]).unwrap();
        assert_eq!(
            config.sizing.risk_levels,
            vec![dec!(0.005), dec!(0.01), dec!(0.03)]
        );
        assert!(config.sizing.validate().is_ok());
    }

    #[test]
    fn test_env_single_risk_level() {
        let config = with_env(&[("SIZER__SIZING__RISK_LEVELS", "0.02")]).unwrap();
        assert_eq!(config.sizing.risk_levels, vec![dec!(0.02)]);
    }

    #[test]
    fn test_env_overrides_scalars() {
        let config = with_env(&[
            ("SIZER__SIZING__HEAT_CAP_PCT", "0.02"),
            ("SIZER__DASHBOARD__REFRESH_MS", "500"),
        ])
        .unwrap();
        assert_eq!(config.sizing.heat_cap_pct, dec!(0.02));
        assert_eq!(config.dashboard.refresh_ms, 500);
        assert_eq!(config.sizing.risk_levels.len(), 5);
    }
}
