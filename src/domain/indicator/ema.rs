//! Exponential Moving Average.
//!
//! k = 2/(n+1), EMA[0] = C[0], then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! No warmup: the first bar seeds the average.

use crate::domain::indicator::{build_series, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_ema(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = 0.0;

    build_series(
        IndicatorType::Ema(period),
        bars.iter().map(|b| b.date),
        |i| {
            if period == 0 {
                return None;
            }
            let close = bars[i].close;
            ema = if i == 0 {
                close
            } else {
                close * k + ema * (1.0 - k)
            };
            Some(IndicatorValue::Simple(ema))
        },
    )
}
