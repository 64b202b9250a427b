//! CSV price data adapter.
//!
//! Columns are located by header name, case-insensitively. The date column
//! (named by the caller, `Date` by default) and `Close` are required; `Open`,
//! `High` and `Low` default to the close and `Volume` to zero. Any other
//! columns (e.g. `Adj Close`) are ignored.

use crate::domain::error::TradestatError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::price_series::PriceSeries;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Directory of `<SYMBOL>.csv` files served as a [`DataPort`].
pub struct CsvAdapter {
    base_path: PathBuf,
    date_column: String,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf, date_column: impl Into<String>) -> Self {
        Self {
            base_path,
            date_column: date_column.into(),
        }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<PriceSeries, TradestatError> {
        let path = self.csv_path(symbol);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no csv file for symbol");
                return Err(TradestatError::NoData {
                    symbol: symbol.to_string(),
                });
            }
            Err(e) => {
                return Err(TradestatError::data_source(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let range = DateRange {
            start: Some(start),
            end,
        };
        parse_price_csv(file, symbol, &self.date_column, range)
    }

    fn source_name(&self) -> &str {
        "csv"
    }
}

/// Inclusive date filter; an open bound accepts everything on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// Load a CSV file, keeping rows inside `range`. The file stem labels the
/// series in errors.
pub fn load_price_csv(
    path: &Path,
    date_column: &str,
    range: DateRange,
) -> Result<PriceSeries, TradestatError> {
    let symbol = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let file = File::open(path).map_err(|e| {
        TradestatError::data_source(format!("failed to read {}: {}", path.display(), e))
    })?;
    tracing::info!(path = %path.display(), "loading price csv");
    parse_price_csv(file, &symbol, date_column, range)
}

struct ColumnIndex {
    date: usize,
    close: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    volume: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord, date_column: &str) -> Result<Self, TradestatError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let date = find(date_column).ok_or_else(|| {
            TradestatError::invalid_input(format!("missing date column '{}'", date_column))
        })?;
        let close = find("close").ok_or_else(|| {
            TradestatError::invalid_input("price data must contain a 'Close' column")
        })?;

        Ok(Self {
            date,
            close,
            open: find("open"),
            high: find("high"),
            low: find("low"),
            volume: find("volume"),
        })
    }
}

/// Parse CSV price rows from `reader`, keep those inside `range` and build a
/// validated series sorted by date.
pub fn parse_price_csv<R: Read>(
    reader: R,
    symbol: &str,
    date_column: &str,
    range: DateRange,
) -> Result<PriceSeries, TradestatError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| TradestatError::data_source(format!("CSV header error: {}", e)))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers, date_column)?;

    let mut bars = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record =
            result.map_err(|e| TradestatError::data_source(format!("CSV parse error: {}", e)))?;
        // Header is line 1.
        let line = row + 2;

        let raw_date = record.get(columns.date).unwrap_or("");
        let date = parse_date(raw_date).ok_or_else(|| {
            TradestatError::invalid_input(format!(
                "line {}: invalid date '{}'",
                line, raw_date
            ))
        })?;
        if !range.contains(date) {
            continue;
        }

        let close = parse_required(&record, columns.close, "close", line)?;
        let open = parse_optional(&record, columns.open, "open", line)?.unwrap_or(close);
        let high = parse_optional(&record, columns.high, "high", line)?.unwrap_or(close);
        let low = parse_optional(&record, columns.low, "low", line)?.unwrap_or(close);
        let volume = parse_optional(&record, columns.volume, "volume", line)?.unwrap_or(0.0);

        bars.push(OhlcvBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    bars.sort_by_key(|b| b.date);
    tracing::debug!(symbol, bars = bars.len(), "parsed price rows");
    PriceSeries::new(symbol, bars)
}

/// `YYYY-MM-DD`, optionally followed by a time part (`2024-01-02 00:00:00-05:00`).
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        raw.get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    })
}

fn parse_required(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    line: usize,
) -> Result<f64, TradestatError> {
    parse_optional(record, Some(index), name, line)?.ok_or_else(|| {
        TradestatError::invalid_input(format!("line {}: missing {} value", line, name))
    })
}

fn parse_optional(
    record: &csv::StringRecord,
    index: Option<usize>,
    name: &str,
    line: usize,
) -> Result<Option<f64>, TradestatError> {
    let Some(raw) = index.and_then(|i| record.get(i)) else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>().map(Some).map_err(|e| {
        TradestatError::invalid_input(format!(
            "line {}: invalid {} value '{}': {}",
            line, name, raw, e
        ))
    })
}
