//! Analysis parameters read from configuration.
//!
//! ```ini
//! [data]
//! dir = ./data, ./backup-data
//! date_column = Date
//!
//! [analysis]
//! sma_period = 20
//! ema_period = 20
//! volatility_period = 20
//! momentum_period = 10
//! trend_period = 20
//! risk_free_rate = 0.02
//! ```

use crate::domain::error::TradestatError;
use crate::domain::indicator::table::{
    DEFAULT_EMA_PERIOD, DEFAULT_SMA_PERIOD, DEFAULT_VOLATILITY_PERIOD,
};
use crate::domain::indicator::momentum::DEFAULT_MOMENTUM_PERIOD;
use crate::domain::indicator::IndicatorParams;
use crate::domain::risk::DEFAULT_RISK_FREE_RATE;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATE_COLUMN: &str = "Date";
pub const DEFAULT_TREND_PERIOD: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub indicators: IndicatorParams,
    pub trend_period: usize,
    pub risk_free_rate: f64,
    /// Directories searched in order for `<SYMBOL>.csv`.
    pub data_dirs: Vec<PathBuf>,
    pub date_column: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorParams::default(),
            trend_period: DEFAULT_TREND_PERIOD,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            data_dirs: Vec::new(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Build and validate from `[data]` and `[analysis]`; missing keys take
    /// their defaults.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TradestatError> {
        let sma_period = read_period(config, "sma_period", DEFAULT_SMA_PERIOD, 1)?;
        let ema_period = read_period(config, "ema_period", DEFAULT_EMA_PERIOD, 1)?;
        let volatility_period =
            read_period(config, "volatility_period", DEFAULT_VOLATILITY_PERIOD, 2)?;
        let momentum_period =
            read_period(config, "momentum_period", DEFAULT_MOMENTUM_PERIOD, 1)?;
        let trend_period = read_period(config, "trend_period", DEFAULT_TREND_PERIOD, 2)?;

        let risk_free_rate = read_value(config, "risk_free_rate", DEFAULT_RISK_FREE_RATE)?;
        validate_risk_free_rate(risk_free_rate)?;

        let date_column = config
            .get_string("data", "date_column")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DATE_COLUMN.to_string());

        Ok(Self {
            indicators: IndicatorParams::new(sma_period, ema_period, volatility_period)
                .with_momentum_period(momentum_period),
            trend_period,
            risk_free_rate,
            data_dirs: config
                .get_string("data", "dir")
                .map(|dirs| parse_dir_list(&dirs))
                .unwrap_or_default(),
            date_column,
        })
    }
}

/// Comma-separated directory list; blank entries are dropped.
pub fn parse_dir_list(input: &str) -> Vec<PathBuf> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn invalid(key: &str, reason: String) -> TradestatError {
    TradestatError::ConfigInvalid {
        section: "analysis".to_string(),
        key: key.to_string(),
        reason,
    }
}

/// `[analysis] key` parsed as `T`; `default` when absent or blank, an error
/// when present but unparseable.
fn read_value<T: FromStr>(
    config: &dyn ConfigPort,
    key: &str,
    default: T,
) -> Result<T, TradestatError> {
    match config.get_string("analysis", key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| invalid(key, format!("'{}' is not a valid value for {}", raw.trim(), key))),
        _ => Ok(default),
    }
}

fn read_period(
    config: &dyn ConfigPort,
    key: &str,
    default: usize,
    minimum: usize,
) -> Result<usize, TradestatError> {
    let value: usize = read_value(config, key, default)?;
    if value < minimum {
        return Err(invalid(key, format!("{} must be at least {}", key, minimum)));
    }
    Ok(value)
}

/// Any finite rate is accepted, including negative ones.
pub fn validate_risk_free_rate(value: f64) -> Result<(), TradestatError> {
    if !value.is_finite() {
        return Err(invalid(
            "risk_free_rate",
            "risk_free_rate must be a finite number".to_string(),
        ));
    }
    Ok(())
}
