//! Combined indicator table aligned to the price series.

use crate::domain::indicator::momentum::DEFAULT_MOMENTUM_PERIOD;
use chrono::NaiveDate;

pub const DEFAULT_SMA_PERIOD: usize = 20;
pub const DEFAULT_EMA_PERIOD: usize = 20;
pub const DEFAULT_VOLATILITY_PERIOD: usize = 20;

/// Periods used to assemble an [`IndicatorTable`].
///
/// The momentum period is independent of the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorParams {
    pub sma_period: usize,
    pub ema_period: usize,
    pub volatility_period: usize,
    pub momentum_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_period: DEFAULT_SMA_PERIOD,
            ema_period: DEFAULT_EMA_PERIOD,
            volatility_period: DEFAULT_VOLATILITY_PERIOD,
            momentum_period: DEFAULT_MOMENTUM_PERIOD,
        }
    }
}

impl IndicatorParams {
    pub fn new(sma_period: usize, ema_period: usize, volatility_period: usize) -> Self {
        Self {
            sma_period,
            ema_period,
            volatility_period,
            momentum_period: DEFAULT_MOMENTUM_PERIOD,
        }
    }

    pub fn with_momentum_period(mut self, period: usize) -> Self {
        self.momentum_period = period;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub close: f64,
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub volatility: Option<f64>,
    pub momentum: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorTable {
    pub params: IndicatorParams,
    pub rows: Vec<IndicatorRow>,
}

impl IndicatorTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }

    /// The last `n` rows (all rows when `n` exceeds the table length).
    pub fn tail(&self, n: usize) -> &[IndicatorRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }
}
