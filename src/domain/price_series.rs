//! Validated, time-ordered price series and its derived return series.

use crate::domain::error::TradestatError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

/// Non-empty sequence of bars with strictly increasing dates and a finite,
/// positive close on every bar.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    bars: Vec<OhlcvBar>,
}

/// One period-over-period simple return, dated by the later bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Descriptive statistics of the close column.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PriceSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl PriceSeries {
    /// Validate `bars` and take ownership of them.
    ///
    /// `symbol` is only used to label the `NoData` error for an empty input.
    pub fn new(symbol: &str, bars: Vec<OhlcvBar>) -> Result<Self, TradestatError> {
        if bars.is_empty() {
            return Err(TradestatError::NoData {
                symbol: symbol.to_string(),
            });
        }

        for (i, bar) in bars.iter().enumerate() {
            if !bar.close.is_finite() || bar.close <= 0.0 {
                return Err(TradestatError::invalid_input(format!(
                    "close on {} must be a positive number, got {}",
                    bar.date, bar.close
                )));
            }
            if i > 0 && bar.date <= bars[i - 1].date {
                return Err(TradestatError::invalid_input(format!(
                    "dates must be strictly increasing: {} follows {}",
                    bar.date,
                    bars[i - 1].date
                )));
            }
        }

        Ok(Self { bars })
    }

    /// Build a series from `(date, close)` pairs.
    pub fn from_closes(
        symbol: &str,
        closes: impl IntoIterator<Item = (NaiveDate, f64)>,
    ) -> Result<Self, TradestatError> {
        let bars = closes
            .into_iter()
            .map(|(date, close)| OhlcvBar::from_close(date, close))
            .collect();
        Self::new(symbol, bars)
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.bars[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.bars[self.bars.len() - 1].date
    }

    /// Simple returns, one element shorter than the series.
    pub fn simple_returns(&self) -> Vec<ReturnPoint> {
        self.bars
            .windows(2)
            .map(|w| ReturnPoint {
                date: w[1].date,
                value: w[1].simple_return(w[0].close),
            })
            .collect()
    }

    pub fn close_summary(&self) -> PriceSummary {
        let count = self.bars.len();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for bar in &self.bars {
            min = min.min(bar.close);
            max = max.max(bar.close);
            sum += bar.close;
        }
        PriceSummary {
            count,
            min,
            max,
            mean: sum / count as f64,
        }
    }
}
