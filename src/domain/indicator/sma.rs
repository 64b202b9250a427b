//! Simple Moving Average.
//!
//! SMA(n)[i] = sum(C[i-n+1..=i]) / n
//! Warmup: first (n-1) bars are undefined.

use crate::domain::indicator::{build_series, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    build_series(
        IndicatorType::Sma(period),
        bars.iter().map(|b| b.date),
        |i| {
            if period == 0 || i + 1 < period {
                return None;
            }
            let window = &bars[i + 1 - period..=i];
            let sum: f64 = window.iter().map(|b| b.close).sum();
            Some(IndicatorValue::Simple(sum / period as f64))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;

    #[test]
    fn sma_warmup_and_values() {
        let bars = make_bars(&[100.0, 102.0, 101.0, 105.0, 103.0]);
        let series = calculate_sma(&bars, 3);
        let values = series.simple_values();

        assert_eq!(values.len(), 5);
        assert_eq!(values[0], None);
        assert_eq!(values[1], None);
        assert!((values[2].unwrap() - 101.0).abs() < 1e-12);
        assert!((values[3].unwrap() - 308.0 / 3.0).abs() < 1e-12);
        assert!((values[4].unwrap() - 103.0).abs() < 1e-12);
    }

    #[test]
    fn sma_overflow_is_undefined() {
        let big = f64::MAX / 2.0;
        let bars = make_bars(&[big, big, big]);
        assert_eq!(calculate_sma(&bars, 3).simple_values(), vec![None, None, None]);
        assert_eq!(calculate_sma(&bars, 1).simple_values()[2], Some(big));
    }

    #[test]
    fn sma_period_1_is_close() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let values = calculate_sma(&bars, 1).simple_values();
        assert_eq!(values, vec![Some(10.0), Some(20.0), Some(30.0)]);
    }

    #[test]
    fn sma_period_longer_than_series() {
        let bars = make_bars(&[10.0, 20.0]);
        let series = calculate_sma(&bars, 5);
        assert_eq!(series.len(), 2);
        assert!(series.values.iter().all(|p| !p.is_defined()));
    }

    #[test]
    fn sma_period_0_is_undefined() {
        let bars = make_bars(&[10.0, 20.0]);
        let series = calculate_sma(&bars, 0);
        assert_eq!(series.len(), 2);
        assert!(series.values.iter().all(|p| !p.is_defined()));
    }

    #[test]
    fn sma_indicator_type() {
        let bars = make_bars(&[10.0]);
        assert_eq!(calculate_sma(&bars, 7).indicator_type, IndicatorType::Sma(7));
    }
}
