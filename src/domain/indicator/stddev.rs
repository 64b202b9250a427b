//! Rolling Standard Deviation of close.
//!
//! Sample standard deviation (n-1 divisor) over the trailing n closes.
//! Warmup: first (n-1) bars are undefined. Requires n >= 2.

use crate::domain::indicator::{build_series, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::indicator_helpers::sample_std_dev;
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_stddev(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    build_series(
        IndicatorType::Stddev(period),
        bars.iter().map(|b| b.date),
        |i| {
            if period < 2 || i + 1 < period {
                return None;
            }
            sample_std_dev(&closes[i + 1 - period..=i]).map(IndicatorValue::Simple)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::make_bars;

    #[test]
    fn stddev_warmup() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let values = calculate_stddev(&bars, 3).simple_values();

        assert_eq!(values[0], None);
        assert_eq!(values[1], None);
        assert!(values[2..].iter().all(Option::is_some));
    }

    #[test]
    fn stddev_constant_values() {
        let bars = make_bars(&[100.0; 5]);
        let values = calculate_stddev(&bars, 3).simple_values();
        assert_eq!(values[2], Some(0.0));
    }

    #[test]
    fn stddev_basic_calculation() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let values = calculate_stddev(&bars, 3).simple_values();
        // Sample variance of 10, 20, 30 is 100.
        assert!((values[2].unwrap() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn stddev_period_1_is_undefined() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_stddev(&bars, 1);
        assert_eq!(series.len(), 3);
        assert!(series.values.iter().all(|p| !p.is_defined()));
    }

    #[test]
    fn stddev_indicator_type() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        assert_eq!(
            calculate_stddev(&bars, 5).indicator_type,
            IndicatorType::Stddev(5)
        );
    }
}
