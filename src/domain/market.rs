//! Market-wide context fields.
//!
//! Each tracked index contributes its latest close. The S&P 500 additionally
//! contributes its latest daily change, which is multiplied by the symbol's
//! latest daily return to form `sp500_correlation`. That product is a
//! one-sample proxy, not a correlation coefficient.

use crate::domain::numeric::round_to;
use crate::ports::data_port::MarketDataPort;
use crate::ports::diagnostics_port::DiagnosticsPort;

const COMPONENT: &str = "market";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexQuote {
    pub latest_close: f64,
    pub previous_close: Option<f64>,
}

impl IndexQuote {
    /// (latest - previous) / previous, undefined without a usable previous close.
    pub fn change(&self) -> Option<f64> {
        match self.previous_close {
            Some(prev) if prev != 0.0 => Some((self.latest_close - prev) / prev),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketIndex {
    Vix,
    Dxy,
    Treasury10y,
    Sp500,
}

impl MarketIndex {
    pub const ALL: [MarketIndex; 4] = [
        MarketIndex::Vix,
        MarketIndex::Dxy,
        MarketIndex::Treasury10y,
        MarketIndex::Sp500,
    ];

    /// Key under the `[market]` config section.
    pub fn config_key(&self) -> &'static str {
        match self {
            MarketIndex::Vix => "vix",
            MarketIndex::Dxy => "dxy",
            MarketIndex::Treasury10y => "treasury_10y",
            MarketIndex::Sp500 => "sp500",
        }
    }

    pub fn default_symbol(&self) -> &'static str {
        match self {
            MarketIndex::Vix => "^VIX",
            MarketIndex::Dxy => "DX-Y.NYB",
            MarketIndex::Treasury10y => "^TNX",
            MarketIndex::Sp500 => "^GSPC",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketContext {
    pub vix: Option<f64>,
    pub dxy: Option<f64>,
    pub treasury_10y: Option<f64>,
    pub sp500: Option<f64>,
    pub sp500_change: Option<f64>,
}

impl MarketContext {
    pub fn with_quote(mut self, index: MarketIndex, quote: IndexQuote) -> Self {
        let latest = Some(round_to(quote.latest_close, 4));
        match index {
            MarketIndex::Vix => self.vix = latest,
            MarketIndex::Dxy => self.dxy = latest,
            MarketIndex::Treasury10y => self.treasury_10y = latest,
            MarketIndex::Sp500 => {
                self.sp500 = latest;
                self.sp500_change = quote.change().map(|c| round_to(c, 6));
            }
        }
        self
    }

    /// S&P 500 change times `latest_return`.
    ///
    /// Undefined when the S&P 500 quote is missing. A missing change counts
    /// as zero once the index itself was quoted.
    pub fn sp500_correlation(&self, latest_return: Option<f64>) -> Option<f64> {
        self.sp500?;
        let change = self.sp500_change.unwrap_or(0.0);
        latest_return.map(|r| change * r)
    }
}

/// Queries every index through `port`. A failed or empty lookup leaves the
/// field undefined and is reported, never fabricated.
pub fn fetch_market_context(
    port: &dyn MarketDataPort,
    symbols: &[(MarketIndex, String)],
    diagnostics: &dyn DiagnosticsPort,
) -> MarketContext {
    let mut context = MarketContext::default();
    let mut fetched = 0usize;

    for (index, symbol) in symbols {
        match port.latest_quote(symbol) {
            Ok(Some(quote)) => {
                context = context.with_quote(*index, quote);
                fetched += 1;
            }
            Ok(None) => {
                diagnostics.debug(COMPONENT, &format!("no quote for {}", symbol));
            }
            Err(e) => {
                diagnostics.warn(COMPONENT, &format!("failed to fetch {}: {}", symbol, e));
            }
        }
    }

    diagnostics.info(COMPONENT, &format!("fetched {} market indicators", fetched));
    context
}
