#![allow(dead_code)]

use chrono::NaiveDate;
pub use tradestat::domain::ohlcv::OhlcvBar;
use tradestat::domain::error::TradestatError;
use tradestat::domain::price_series::PriceSeries;
use tradestat::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<PriceSeries, TradestatError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TradestatError::DataSource {
                reason: reason.clone(),
            });
        }
        let bars = self
            .data
            .get(symbol)
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start && end.is_none_or(|e| b.date <= e))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        PriceSeries::new(symbol, bars)
    }

    fn source_name(&self) -> &str {
        "mock"
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn day(offset: usize) -> NaiveDate {
    date("2024-01-01") + chrono::Duration::days(offset as i64)
}

pub fn make_bar(date_str: &str, close: f64) -> OhlcvBar {
    OhlcvBar {
        date: date(date_str),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000.0,
    }
}

/// Consecutive daily bars starting 2024-01-01.
pub fn make_bars(prices: &[f64]) -> Vec<OhlcvBar> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar::from_close(day(i), close))
        .collect()
}

pub fn make_series(prices: &[f64]) -> PriceSeries {
    PriceSeries::new("TEST", make_bars(prices)).unwrap()
}

/// Deterministic zig-zag walk with some drift.
pub fn wavy_prices(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + i as f64 * 0.3 + ((i * 7) % 5) as f64 - 2.0)
        .collect()
}

pub fn csv_text(prices: &[f64]) -> String {
    let mut out = String::from("Date,Open,High,Low,Close,Volume\n");
    for (i, close) in prices.iter().enumerate() {
        out.push_str(&format!(
            "{},{},{},{},{},1000\n",
            day(i),
            close,
            close + 1.0,
            close - 1.0,
            close
        ));
    }
    out
}
