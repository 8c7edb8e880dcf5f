//! OHLCV bar representation.

use chrono::NaiveDate;

/// One trading day's quote as delivered by the price provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl OhlcvBar {
    /// close / prev_close - 1, or `None` when prev_close is zero.
    pub fn return_from(&self, prev_close: f64) -> Option<f64> {
        if prev_close == 0.0 {
            None
        } else {
            Some(self.close / prev_close - 1.0)
        }
    }
}

/// Sorts bars ascending by date and drops repeated dates, keeping the first.
pub fn normalize_bars(mut bars: Vec<OhlcvBar>) -> Vec<OhlcvBar> {
    bars.sort_by_key(|b| b.date);
    bars.dedup_by_key(|b| b.date);
    bars
}
