//! OHLCV bar representation.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    /// Bar carrying only a close; open/high/low mirror it and volume is zero.
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }

    /// close / prev_close - 1
    pub fn simple_return(&self, prev_close: f64) -> f64 {
        self.close / prev_close - 1.0
    }
}
