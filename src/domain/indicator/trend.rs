//! Rolling linear trend regression.
//!
//! For each trailing window of n closes, fit C = a + b*x by ordinary least
//! squares with x = 0..n-1 and emit the slope b and the coefficient of
//! determination R^2. A window with no price variation has slope 0 and R^2 0.
//! Warmup: first (n-1) bars are undefined. Requires n >= 2.

use crate::domain::indicator::{build_series, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_trend(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    build_series(
        IndicatorType::Trend(period),
        bars.iter().map(|b| b.date),
        |i| {
            if period < 2 || i + 1 < period {
                return None;
            }
            let (slope, r_squared) = linear_fit(&closes[i + 1 - period..=i]);
            Some(IndicatorValue::Trend { slope, r_squared })
        },
    )
}

/// Least-squares slope and R^2 of `ys` against their index. `ys.len() >= 2`.
fn linear_fit(ys: &[f64]) -> (f64, f64) {
    let n = ys.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = ys.iter().sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for (x, &y) in ys.iter().enumerate() {
        let dx = x as f64 - x_mean;
        let dy = y - y_mean;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
        ss_xy += dx * dy;
    }

    let slope = ss_xy / ss_xx;
    let r = if ss_yy == 0.0 {
        0.0
    } else {
        (ss_xy / (ss_xx * ss_yy).sqrt()).clamp(-1.0, 1.0)
    };
    (slope, r * r)
}
