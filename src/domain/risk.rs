//! Risk metrics over the simple-return distribution of a price series.

use crate::domain::indicator_helpers::{mean, percentile, sample_std_dev};
use crate::domain::price_series::PriceSeries;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;
pub const DEFAULT_VAR_CONFIDENCE: f64 = 0.05;

/// Fixed set of risk statistics. `None` marks a metric that is undefined for
/// the series (too few returns, zero volatility).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RiskMetrics {
    #[cfg_attr(feature = "serde", serde(rename = "Sharpe_Ratio"))]
    pub sharpe_ratio: Option<f64>,
    #[cfg_attr(feature = "serde", serde(rename = "Value_at_Risk_5pct"))]
    pub value_at_risk_5pct: Option<f64>,
    #[cfg_attr(feature = "serde", serde(rename = "Maximum_Drawdown"))]
    pub maximum_drawdown: Option<f64>,
    #[cfg_attr(feature = "serde", serde(rename = "Avg_Return_Annualized"))]
    pub avg_return_annualized: Option<f64>,
    #[cfg_attr(feature = "serde", serde(rename = "Volatility_Annualized"))]
    pub volatility_annualized: Option<f64>,
}

impl RiskMetrics {
    /// Metrics in their fixed order, keyed by canonical name.
    pub fn entries(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("Sharpe_Ratio", self.sharpe_ratio),
            ("Value_at_Risk_5pct", self.value_at_risk_5pct),
            ("Maximum_Drawdown", self.maximum_drawdown),
            ("Avg_Return_Annualized", self.avg_return_annualized),
            ("Volatility_Annualized", self.volatility_annualized),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct RiskEngine {
    returns: Vec<f64>,
}

impl RiskEngine {
    pub fn new(series: &PriceSeries) -> Self {
        Self::from_returns(series.simple_returns().iter().map(|r| r.value).collect())
    }

    pub fn from_returns(returns: Vec<f64>) -> Self {
        Self { returns }
    }

    pub fn returns(&self) -> &[f64] {
        &self.returns
    }

    /// (annualized return - rf) / annualized volatility.
    pub fn sharpe_ratio(&self, risk_free_rate: f64) -> Option<f64> {
        let avg_return = self.annualized_return()?;
        let volatility = self.annualized_volatility()?;
        if volatility == 0.0 {
            tracing::debug!("sharpe ratio undefined: zero volatility");
            return None;
        }
        Some((avg_return - risk_free_rate) / volatility).filter(|s| s.is_finite())
    }

    /// Historical VaR: the `confidence_level` quantile of raw daily returns.
    pub fn value_at_risk(&self, confidence_level: f64) -> Option<f64> {
        percentile(&self.returns, confidence_level)
    }

    /// Worst peak-to-trough decline of the cumulative growth curve, as a
    /// non-positive fraction.
    ///
    /// The curve starts at the first return, which is its first peak. The
    /// ratio of the curve to its running peak is tracked directly so that
    /// extreme returns cannot overflow the cumulative product.
    pub fn maximum_drawdown(&self) -> Option<f64> {
        if self.returns.is_empty() {
            return None;
        }

        let mut level = 1.0_f64;
        let mut max_dd = 0.0_f64;

        for r in self.returns.iter().skip(1) {
            // f64::min ignores NaN, so an undefined step counts as a new peak.
            level = (level * (1.0 + r)).min(1.0);
            max_dd = max_dd.min(level - 1.0);
        }

        Some(max_dd)
    }

    pub fn annualized_return(&self) -> Option<f64> {
        mean(&self.returns)
            .map(|m| m * TRADING_DAYS_PER_YEAR)
            .filter(|r| r.is_finite())
    }

    pub fn annualized_volatility(&self) -> Option<f64> {
        sample_std_dev(&self.returns)
            .map(|sd| sd * TRADING_DAYS_PER_YEAR.sqrt())
            .filter(|v| v.is_finite())
    }

    pub fn all_metrics(&self, risk_free_rate: f64) -> RiskMetrics {
        RiskMetrics {
            sharpe_ratio: self.sharpe_ratio(risk_free_rate),
            value_at_risk_5pct: self.value_at_risk(DEFAULT_VAR_CONFIDENCE),
            maximum_drawdown: self.maximum_drawdown(),
            avg_return_annualized: self.annualized_return(),
            volatility_annualized: self.annualized_volatility(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::from_closes(
            "TEST",
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| (start + chrono::Duration::days(i as i64), p)),
        )
        .unwrap()
    }

    #[test]
    fn flat_prices() {
        let engine = RiskEngine::new(&series(&[50.0; 10]));

        assert!(engine.returns().iter().all(|&r| r == 0.0));
        assert_eq!(engine.annualized_volatility(), Some(0.0));
        assert_eq!(engine.sharpe_ratio(DEFAULT_RISK_FREE_RATE), None);
        assert_eq!(engine.maximum_drawdown(), Some(0.0));
        assert_eq!(engine.annualized_return(), Some(0.0));
    }

    #[test]
    fn single_bar_has_no_metrics() {
        let engine = RiskEngine::new(&series(&[50.0]));
        let metrics = engine.all_metrics(DEFAULT_RISK_FREE_RATE);

        assert!(metrics.entries().iter().all(|(_, v)| v.is_none()));
    }

    #[test]
    fn single_return_drawdown_is_zero() {
        let engine = RiskEngine::new(&series(&[50.0, 40.0]));
        assert_eq!(engine.maximum_drawdown(), Some(0.0));
        assert_eq!(engine.annualized_volatility(), None);
        assert_eq!(engine.sharpe_ratio(0.0), None);
    }

    #[test]
    fn maximum_drawdown_peak_to_trough() {
        // Curve starts at the first return: 110, 90, 95, 80, 100 relative to 100.
        let engine = RiskEngine::new(&series(&[100.0, 110.0, 90.0, 95.0, 80.0, 100.0]));
        let dd = engine.maximum_drawdown().unwrap();
        assert!((dd - (80.0 - 110.0) / 110.0).abs() < 1e-12);
    }

    #[test]
    fn maximum_drawdown_monotonic_is_zero() {
        let engine = RiskEngine::new(&series(&[100.0, 101.0, 101.0, 105.0]));
        assert_eq!(engine.maximum_drawdown(), Some(0.0));
    }

    #[test]
    fn annualized_return_and_volatility() {
        let engine = RiskEngine::from_returns(vec![0.01, -0.01, 0.02, 0.0]);
        let ann_ret = engine.annualized_return().unwrap();
        assert!((ann_ret - 0.005 * 252.0).abs() < 1e-12);

        let sd = sample_std_dev(&[0.01, -0.01, 0.02, 0.0]).unwrap();
        let ann_vol = engine.annualized_volatility().unwrap();
        assert!((ann_vol - sd * 252.0_f64.sqrt()).abs() < 1e-12);

        let sharpe = engine.sharpe_ratio(0.02).unwrap();
        assert!((sharpe - (ann_ret - 0.02) / ann_vol).abs() < 1e-12);
    }

    #[test]
    fn value_at_risk_is_lower_quantile() {
        let returns: Vec<f64> = (0..=100).map(|i| (i as f64 - 50.0) / 1000.0).collect();
        let engine = RiskEngine::from_returns(returns);
        assert!((engine.value_at_risk(0.05).unwrap() - (-0.045)).abs() < 1e-12);
        assert!(engine.value_at_risk(0.5).unwrap().abs() < 1e-12);
        assert_eq!(engine.value_at_risk(1.5), None);
    }

    #[test]
    fn empty_returns_are_absent() {
        let engine = RiskEngine::from_returns(vec![]);
        assert_eq!(engine.sharpe_ratio(0.02), None);
        assert_eq!(engine.value_at_risk(0.05), None);
        assert_eq!(engine.maximum_drawdown(), None);
        assert_eq!(engine.annualized_return(), None);
        assert_eq!(engine.annualized_volatility(), None);
    }

    #[test]
    fn extreme_closes_never_produce_non_finite_metrics() {
        let engine = RiskEngine::new(&series(&[1e-300, 1e300, 1.0]));
        let metrics = engine.all_metrics(DEFAULT_RISK_FREE_RATE);

        for (key, value) in metrics.entries() {
            assert!(value.is_none_or(f64::is_finite), "{} = {:?}", key, value);
        }
        assert_eq!(metrics.avg_return_annualized, None);
        assert_eq!(metrics.sharpe_ratio, None);
        let dd = metrics.maximum_drawdown.unwrap();
        assert!((dd + 1.0).abs() < 1e-9);
    }

    #[test]
    fn entries_fixed_order() {
        let metrics = RiskEngine::new(&series(&[100.0, 101.0, 99.0, 102.0]))
            .all_metrics(DEFAULT_RISK_FREE_RATE);
        let keys: Vec<&str> = metrics.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "Sharpe_Ratio",
                "Value_at_Risk_5pct",
                "Maximum_Drawdown",
                "Avg_Return_Annualized",
                "Volatility_Annualized"
            ]
        );
    }
}
