//! Rolling technical indicators.
//!
//! This module provides types for representing indicator values and series:
//! - `IndicatorPoint`: A single point in an indicator time series
//! - `IndicatorValue`: Enum for different indicator output shapes
//! - `IndicatorType`: Enum for indicator identity + parameters
//! - `IndicatorSeries`: A time series of indicator values aligned to the bars
//!
//! Every calculation returns one point per input bar. Points without enough
//! history carry `value: None`, never a placeholder zero.

pub mod sma;
pub mod ema;
pub mod stddev;
pub mod volatility;
pub mod momentum;
pub mod trend;
pub mod engine;
pub mod table;

pub use engine::IndicatorEngine;
pub use table::{IndicatorParams, IndicatorRow, IndicatorTable};

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<IndicatorValue>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Trend { slope: f64, r_squared: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Volatility(usize),
    Stddev(usize),
    Momentum(usize),
    Trend(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorPoint {
    pub fn simple(&self) -> Option<f64> {
        match self.value {
            Some(IndicatorValue::Simple(v)) => Some(v),
            _ => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.value.is_some()
    }
}

impl IndicatorValue {
    pub fn is_finite(&self) -> bool {
        match *self {
            IndicatorValue::Simple(v) => v.is_finite(),
            IndicatorValue::Trend { slope, r_squared } => slope.is_finite() && r_squared.is_finite(),
        }
    }
}

impl IndicatorSeries {
    /// Scalar values in bar order; `None` for undefined or non-scalar points.
    pub fn simple_values(&self) -> Vec<Option<f64>> {
        self.values.iter().map(IndicatorPoint::simple).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Volatility(period) => write!(f, "VOLATILITY({})", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV({})", period),
            IndicatorType::Momentum(period) => write!(f, "MOMENTUM({})", period),
            IndicatorType::Trend(period) => write!(f, "TREND({})", period),
        }
    }
}

/// Build a series where each bar's value comes from `compute(i)`.
///
/// Non-finite results (overflow on extreme prices) are stored as undefined.
pub(crate) fn build_series(
    indicator_type: IndicatorType,
    dates: impl IntoIterator<Item = NaiveDate>,
    mut compute: impl FnMut(usize) -> Option<IndicatorValue>,
) -> IndicatorSeries {
    let values = dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| IndicatorPoint {
            date,
            value: compute(i).filter(IndicatorValue::is_finite),
        })
        .collect();
    IndicatorSeries {
        indicator_type,
        values,
    }
}
