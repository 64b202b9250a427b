//! Price momentum (percentage rate of change).
//!
//! MOMENTUM(n)[i] = C[i] / C[i-n] - 1
//! Warmup: first n bars are undefined.

use crate::domain::indicator::{build_series, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub const DEFAULT_MOMENTUM_PERIOD: usize = 10;

pub fn calculate_momentum(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    build_series(
        IndicatorType::Momentum(period),
        bars.iter().map(|b| b.date),
        |i| {
            if period == 0 || i < period {
                return None;
            }
            let prev = bars[i - period].close;
            Some(IndicatorValue::Simple(bars[i].simple_return(prev)))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;

    #[test]
    fn momentum_warmup() {
        let bars = make_bars(&[100.0, 102.0, 101.0, 105.0, 103.0]);
        let values = calculate_momentum(&bars, 2).simple_values();

        assert_eq!(values[0], None);
        assert_eq!(values[1], None);
        assert!((values[2].unwrap() - 0.01).abs() < 1e-12);
        assert!((values[3].unwrap() - (105.0 / 102.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn momentum_default_period_needs_eleven_bars() {
        let prices: Vec<f64> = (0..11).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&prices);
        let values = calculate_momentum(&bars, DEFAULT_MOMENTUM_PERIOD).simple_values();

        assert!(values[..10].iter().all(Option::is_none));
        assert!((values[10].unwrap() - 0.10).abs() < 1e-12);
    }

    #[test]
    fn momentum_period_0_is_undefined() {
        let bars = make_bars(&[10.0, 20.0]);
        let series = calculate_momentum(&bars, 0);
        assert!(series.values.iter().all(|p| !p.is_defined()));
    }
}
