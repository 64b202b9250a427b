//! Cross-series return correlation.

use crate::domain::indicator_helpers::pearson;
use crate::domain::price_series::{PriceSeries, ReturnPoint};
use std::collections::HashMap;

/// Minimum number of common return dates before a correlation is reported.
pub const MIN_COMMON_PERIOD: usize = 30;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CorrelationResult {
    #[cfg_attr(feature = "serde", serde(rename = "Correlation"))]
    pub correlation: f64,
    #[cfg_attr(feature = "serde", serde(rename = "Common_Period"))]
    pub common_period: usize,
    #[cfg_attr(feature = "serde", serde(rename = "Symbol1"))]
    pub symbol1: String,
    #[cfg_attr(feature = "serde", serde(rename = "Symbol2"))]
    pub symbol2: String,
}

/// Pair up returns that share a date, in the left series' date order.
pub fn align_returns(left: &[ReturnPoint], right: &[ReturnPoint]) -> (Vec<f64>, Vec<f64>) {
    let right_by_date: HashMap<_, _> = right.iter().map(|r| (r.date, r.value)).collect();
    left.iter()
        .filter_map(|l| right_by_date.get(&l.date).map(|&rv| (l.value, rv)))
        .unzip()
}

/// Pearson correlation of the simple returns of two series over their common
/// dates.
///
/// `None` when fewer than [`MIN_COMMON_PERIOD`] dates overlap or either
/// aligned return series has zero variance.
pub fn correlate(
    left: &PriceSeries,
    right: &PriceSeries,
    symbol1: &str,
    symbol2: &str,
) -> Option<CorrelationResult> {
    let (xs, ys) = align_returns(&left.simple_returns(), &right.simple_returns());
    let common_period = xs.len();

    if common_period < MIN_COMMON_PERIOD {
        tracing::debug!(
            common_period,
            minimum = MIN_COMMON_PERIOD,
            "too few overlapping dates for correlation"
        );
        return None;
    }

    let Some(correlation) = pearson(&xs, &ys) else {
        tracing::debug!(common_period, "correlation undefined: zero variance");
        return None;
    };

    Some(CorrelationResult {
        correlation,
        common_period,
        symbol1: symbol1.to_string(),
        symbol2: symbol2.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series_from(start_offset: i64, prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::from_closes(
            "TEST",
            prices.iter().enumerate().map(|(i, &p)| {
                (start + chrono::Duration::days(start_offset + i as i64), p)
            }),
        )
        .unwrap()
    }

    fn wavy(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + 5.0 * (i as f64 * 0.7).sin()).collect()
    }

    #[test]
    fn self_correlation_is_one() {
        let s = series_from(0, &wavy(60));
        let result = correlate(&s, &s, "A", "B").unwrap();

        assert!((result.correlation - 1.0).abs() < 1e-12);
        assert_eq!(result.common_period, 59);
        assert_eq!(result.symbol1, "A");
        assert_eq!(result.symbol2, "B");
    }

    #[test]
    fn mirrored_returns_are_negatively_correlated() {
        let prices = wavy(60);
        let returns: Vec<f64> = prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
        let mut mirrored = vec![100.0];
        for r in &returns {
            let last = *mirrored.last().unwrap();
            mirrored.push(last * (1.0 - r));
        }

        let result = correlate(
            &series_from(0, &prices),
            &series_from(0, &mirrored),
            "A",
            "B",
        )
        .unwrap();
        assert!((result.correlation + 1.0).abs() < 1e-9);
    }

    #[test]
    fn fewer_than_thirty_common_dates_is_none() {
        let left = series_from(0, &wavy(40));
        let right = series_from(20, &wavy(40));
        // Returns overlap on days 21..=39: 19 dates.
        assert!(correlate(&left, &right, "A", "B").is_none());
    }

    #[test]
    fn exactly_thirty_common_dates_is_reported() {
        let s = series_from(0, &wavy(31));
        let result = correlate(&s, &s, "A", "B").unwrap();
        assert_eq!(result.common_period, MIN_COMMON_PERIOD);
    }

    #[test]
    fn flat_series_correlation_is_none() {
        let flat = series_from(0, &[50.0; 40]);
        let moving = series_from(0, &wavy(40));
        assert!(correlate(&flat, &moving, "A", "B").is_none());
    }

    #[test]
    fn align_returns_intersects_dates() {
        let left = series_from(0, &[1.0, 2.0, 3.0, 4.0]).simple_returns();
        let right = series_from(2, &[10.0, 20.0, 30.0]).simple_returns();
        let (xs, ys) = align_returns(&left, &right);
        // Left returns dated days 1..=3, right dated days 3..=4.
        assert_eq!(xs.len(), 1);
        assert!((xs[0] - (4.0 / 3.0 - 1.0)).abs() < 1e-12);
        assert!((ys[0] - 1.0).abs() < 1e-12);
    }
}
