//! Ordered chain of data providers.

use crate::domain::error::TradestatError;
use crate::domain::price_series::PriceSeries;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;

/// Tries each provider in order and returns the first series obtained.
///
/// Provider errors are logged and skipped. When every provider fails the
/// result is `NoData` for the requested symbol.
pub struct FallbackDataPort {
    providers: Vec<Box<dyn DataPort>>,
}

impl FallbackDataPort {
    pub fn new(providers: Vec<Box<dyn DataPort>>) -> Self {
        Self { providers }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl DataPort for FallbackDataPort {
    fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<PriceSeries, TradestatError> {
        for provider in &self.providers {
            match provider.fetch_series(symbol, start, end) {
                Ok(series) => {
                    tracing::debug!(symbol, source = provider.source_name(), "fetched series");
                    return Ok(series);
                }
                Err(e) => {
                    tracing::warn!(
                        symbol,
                        source = provider.source_name(),
                        error = %e,
                        "provider failed, trying next"
                    );
                }
            }
        }

        Err(TradestatError::NoData {
            symbol: symbol.to_string(),
        })
    }

    fn source_name(&self) -> &str {
        "fallback"
    }
}
