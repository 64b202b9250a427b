//! Price data access port trait.

use crate::domain::error::TradestatError;
use crate::domain::price_series::PriceSeries;
use chrono::NaiveDate;

/// Ingestion collaborator: supplies a complete, validated price series.
///
/// Implementations return `NoData` when no rows exist for the symbol in the
/// requested range; an open `end` means "up to the latest available bar".
pub trait DataPort {
    fn fetch_series(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<PriceSeries, TradestatError>;

    /// Short label used in log output.
    fn source_name(&self) -> &str {
        "data source"
    }
}
