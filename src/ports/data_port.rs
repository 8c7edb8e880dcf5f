//! Price and market-index data ports.

use crate::domain::error::CuratorError;
use crate::domain::market::IndexQuote;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

/// Daily OHLCV provider for one (suffixed) symbol.
pub trait PriceDataPort {
    /// Bars between `start_date` and `end_date` inclusive. An empty result is
    /// not an error here; the pipeline turns it into `CuratorError::NoData`.
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, CuratorError>;
}

/// Latest quotes of market-wide reference indices.
pub trait MarketDataPort {
    /// `Ok(None)` when the index has no data.
    fn latest_quote(&self, index_symbol: &str) -> Result<Option<IndexQuote>, CuratorError>;
}
