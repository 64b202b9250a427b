//! Rolling annualized volatility of simple returns.
//!
//! R[i] = C[i]/C[i-1] - 1 (undefined at i = 0)
//! VOL(n)[i] = sample_stddev(R[i-n+1..=i]) * sqrt(252)
//! Warmup: first n bars are undefined, since R[0] does not exist. Requires n >= 2.

use crate::domain::indicator::{build_series, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::indicator_helpers::sample_std_dev;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::risk::TRADING_DAYS_PER_YEAR;

pub fn calculate_volatility(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    // returns[j] is the return ending at bar j + 1.
    let returns: Vec<f64> = bars
        .windows(2)
        .map(|w| w[1].simple_return(w[0].close))
        .collect();
    let annualize = TRADING_DAYS_PER_YEAR.sqrt();

    build_series(
        IndicatorType::Volatility(period),
        bars.iter().map(|b| b.date),
        |i| {
            if period < 2 || i < period {
                return None;
            }
            let window = &returns[i - period..i];
            sample_std_dev(window).map(|sd| IndicatorValue::Simple(sd * annualize))
        },
    )
}
