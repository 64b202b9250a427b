//! Analysis session: one symbol's price series plus cached results.
//!
//! Results are cached explicitly. `compute_indicators` and
//! `compute_risk_metrics` store the parameters they were called with next to
//! their output; loading a new series clears both caches. The report only
//! reads the caches and never computes anything on its own.

use crate::adapters::csv_adapter::{load_price_csv, DateRange};
use crate::domain::correlation::{correlate, CorrelationResult};
use crate::domain::error::TradestatError;
use crate::domain::indicator::{IndicatorEngine, IndicatorParams, IndicatorTable};
use crate::domain::price_series::PriceSeries;
use crate::domain::report::{render_report, ReportContext};
use crate::domain::risk::{RiskEngine, RiskMetrics};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::path::Path;

/// Risk metrics together with the risk-free rate they were computed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedRiskMetrics {
    pub risk_free_rate: f64,
    pub metrics: RiskMetrics,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    symbol: Option<String>,
    series: Option<PriceSeries>,
    indicators: Option<IndicatorTable>,
    risk: Option<CachedRiskMetrics>,
}

impl AnalysisSession {
    /// Empty session; load a series before computing anything.
    pub fn new(symbol: Option<String>) -> Self {
        Self {
            symbol,
            ..Self::default()
        }
    }

    pub fn from_series(symbol: Option<String>, series: PriceSeries) -> Self {
        let mut session = Self::new(symbol);
        session.load_series(series);
        session
    }

    /// Session over every row of a price CSV.
    pub fn from_csv(
        symbol: Option<String>,
        path: &Path,
        date_column: &str,
    ) -> Result<Self, TradestatError> {
        let mut session = Self::new(symbol);
        session.load_csv(path, date_column)?;
        Ok(session)
    }

    /// Fetch `symbol` through `port` and wrap it in a session.
    pub fn fetch(
        port: &dyn DataPort,
        symbol: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<Self, TradestatError> {
        let series = port.fetch_series(symbol, start, end)?;
        Ok(Self::from_series(Some(symbol.to_string()), series))
    }

    /// Replace the owned series and invalidate cached results.
    pub fn load_series(&mut self, series: PriceSeries) {
        tracing::info!(
            symbol = self.symbol.as_deref().unwrap_or("-"),
            bars = series.len(),
            start = %series.first_date(),
            end = %series.last_date(),
            "loaded price series"
        );
        self.series = Some(series);
        self.indicators = None;
        self.risk = None;
    }

    pub fn load_csv(&mut self, path: &Path, date_column: &str) -> Result<(), TradestatError> {
        self.load_csv_range(path, date_column, DateRange::default())
    }

    /// Load the rows of `path` inside `range`. On error the session keeps its
    /// current series and caches.
    pub fn load_csv_range(
        &mut self,
        path: &Path,
        date_column: &str,
        range: DateRange,
    ) -> Result<(), TradestatError> {
        let series = load_price_csv(path, date_column, range)?;
        self.load_series(series);
        Ok(())
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn series(&self) -> Option<&PriceSeries> {
        self.series.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.series.is_some()
    }

    fn loaded_series(&self) -> Result<&PriceSeries, TradestatError> {
        self.series.as_ref().ok_or(TradestatError::NotLoaded)
    }

    pub fn indicator_engine(&self) -> Result<IndicatorEngine, TradestatError> {
        Ok(IndicatorEngine::new(self.loaded_series()?))
    }

    pub fn risk_engine(&self) -> Result<RiskEngine, TradestatError> {
        Ok(RiskEngine::new(self.loaded_series()?))
    }

    /// Compute (or reuse) the indicator table for `params`.
    pub fn compute_indicators(
        &mut self,
        params: IndicatorParams,
    ) -> Result<&IndicatorTable, TradestatError> {
        let series = self.series.as_ref().ok_or(TradestatError::NotLoaded)?;

        let table = match self.indicators.take() {
            Some(table) if table.params == params => {
                tracing::debug!(?params, "reusing cached indicator table");
                table
            }
            _ => IndicatorEngine::new(series).all_indicators(params),
        };

        Ok(&*self.indicators.insert(table))
    }

    /// Compute (or reuse) risk metrics at `risk_free_rate`.
    pub fn compute_risk_metrics(
        &mut self,
        risk_free_rate: f64,
    ) -> Result<RiskMetrics, TradestatError> {
        let series = self.loaded_series()?;

        if let Some(cached) = self.risk.filter(|c| c.risk_free_rate == risk_free_rate) {
            tracing::debug!(risk_free_rate, "reusing cached risk metrics");
            return Ok(cached.metrics);
        }

        let metrics = RiskEngine::new(series).all_metrics(risk_free_rate);
        self.risk = Some(CachedRiskMetrics {
            risk_free_rate,
            metrics,
        });
        Ok(metrics)
    }

    pub fn cached_indicators(&self) -> Option<&IndicatorTable> {
        self.indicators.as_ref()
    }

    pub fn cached_risk_metrics(&self) -> Option<&CachedRiskMetrics> {
        self.risk.as_ref()
    }

    /// Return correlation with `other` over their common dates.
    ///
    /// `Ok(None)` when too few dates overlap or either side has no return
    /// variance; `NotLoaded` when either session is empty.
    pub fn correlation_with(
        &self,
        other: &AnalysisSession,
    ) -> Result<Option<CorrelationResult>, TradestatError> {
        let left = self.loaded_series()?;
        let right = other.loaded_series()?;
        Ok(correlate(
            left,
            right,
            self.symbol().unwrap_or("Asset1"),
            other.symbol().unwrap_or("Asset2"),
        ))
    }

    /// Deterministic text summary built from the cached results.
    pub fn generate_report(&self) -> String {
        render_report(&ReportContext {
            symbol: self.symbol(),
            series: self.series.as_ref(),
            indicators: self.indicators.as_ref(),
            risk_metrics: self.risk.as_ref().map(|c| &c.metrics),
        })
    }
}
