//! Indicator engine over a private copy of a price series.

use crate::domain::indicator::ema::calculate_ema;
use crate::domain::indicator::momentum::calculate_momentum;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::stddev::calculate_stddev;
use crate::domain::indicator::table::{IndicatorParams, IndicatorRow, IndicatorTable};
use crate::domain::indicator::trend::calculate_trend;
use crate::domain::indicator::volatility::calculate_volatility;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::price_series::PriceSeries;

/// Computes rolling indicators. Every output has one point per bar.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    bars: Vec<OhlcvBar>,
}

impl IndicatorEngine {
    pub fn new(series: &PriceSeries) -> Self {
        Self {
            bars: series.bars().to_vec(),
        }
    }

    pub fn simple_moving_average(&self, period: usize) -> IndicatorSeries {
        calculate_sma(&self.bars, period)
    }

    pub fn exponential_moving_average(&self, period: usize) -> IndicatorSeries {
        calculate_ema(&self.bars, period)
    }

    pub fn rolling_volatility(&self, period: usize) -> IndicatorSeries {
        calculate_volatility(&self.bars, period)
    }

    pub fn rolling_std_dev(&self, period: usize) -> IndicatorSeries {
        calculate_stddev(&self.bars, period)
    }

    pub fn trend_regression(&self, period: usize) -> IndicatorSeries {
        calculate_trend(&self.bars, period)
    }

    pub fn price_momentum(&self, period: usize) -> IndicatorSeries {
        calculate_momentum(&self.bars, period)
    }

    pub fn all_indicators(&self, params: IndicatorParams) -> IndicatorTable {
        let sma = self.simple_moving_average(params.sma_period).simple_values();
        let ema = self
            .exponential_moving_average(params.ema_period)
            .simple_values();
        let volatility = self
            .rolling_volatility(params.volatility_period)
            .simple_values();
        let momentum = self.price_momentum(params.momentum_period).simple_values();

        let rows = self
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| IndicatorRow {
                date: bar.date,
                close: bar.close,
                sma: sma[i],
                ema: ema[i],
                volatility: volatility[i],
                momentum: momentum[i],
            })
            .collect();

        tracing::debug!(
            bars = self.bars.len(),
            sma = params.sma_period,
            ema = params.ema_period,
            volatility = params.volatility_period,
            momentum = params.momentum_period,
            "assembled indicator table"
        );

        IndicatorTable { params, rows }
    }
}
