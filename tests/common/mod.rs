#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
pub use fincurator::domain::article::Article;
use fincurator::domain::error::CuratorError;
use fincurator::domain::market::IndexQuote;
pub use fincurator::domain::ohlcv::OhlcvBar;
use fincurator::ports::data_port::{MarketDataPort, PriceDataPort};
use fincurator::ports::diagnostics_port::{DiagnosticsPort, Level};
use fincurator::ports::news_port::NewsSource;
use fincurator::ports::sentiment_port::SentimentAnalyzer;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockPricePort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<(String, NaiveDate, NaiveDate)>>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
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

impl PriceDataPort for MockPricePort {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, CuratorError> {
        self.requests
            .borrow_mut()
            .push((symbol.to_string(), start_date, end_date));
        if let Some(reason) = self.errors.get(symbol) {
            return Err(CuratorError::source(symbol, reason.clone()));
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct MockMarketPort {
    pub quotes: HashMap<String, IndexQuote>,
    pub errors: HashMap<String, String>,
}

impl MockMarketPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, symbol: &str, latest: f64, previous: Option<f64>) -> Self {
        self.quotes.insert(
            symbol.to_string(),
            IndexQuote {
                latest_close: latest,
                previous_close: previous,
            },
        );
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketPort {
    fn latest_quote(&self, index_symbol: &str) -> Result<Option<IndexQuote>, CuratorError> {
        if let Some(reason) = self.errors.get(index_symbol) {
            return Err(CuratorError::source(index_symbol, reason.clone()));
        }
        Ok(self.quotes.get(index_symbol).copied())
    }
}

pub struct MockNewsSource {
    pub name: String,
    pub articles: Vec<Article>,
    pub error: Option<String>,
}

impl MockNewsSource {
    pub fn new(name: &str, articles: Vec<Article>) -> Self {
        Self {
            name: name.to_string(),
            articles,
            error: None,
        }
    }

    pub fn failing(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            articles: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl NewsSource for MockNewsSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, _symbol: &str, _days: usize) -> Result<Vec<Article>, CuratorError> {
        match &self.error {
            Some(reason) => Err(CuratorError::source(&self.name, reason.clone())),
            None => Ok(self.articles.clone()),
        }
    }
}

/// Returns the same polarity for every text.
pub struct FixedSentiment(pub f64);

impl SentimentAnalyzer for FixedSentiment {
    fn polarity(&self, _text: &str) -> Result<f64, CuratorError> {
        Ok(self.0)
    }
}

pub struct FailingSentiment;

impl SentimentAnalyzer for FailingSentiment {
    fn polarity(&self, _text: &str) -> Result<f64, CuratorError> {
        Err(CuratorError::Sentiment {
            reason: "model unavailable".into(),
        })
    }
}

/// Diagnostics sink that keeps every event for inspection.
#[derive(Default)]
pub struct RecordingDiagnostics {
    pub events: RefCell<Vec<(Level, String, String)>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, level: Level) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|(l, _, _)| *l == level)
            .count()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.events
            .borrow()
            .iter()
            .any(|(_, _, message)| message.contains(needle))
    }
}

impl DiagnosticsPort for RecordingDiagnostics {
    fn event(&self, level: Level, component: &str, message: &str) {
        self.events
            .borrow_mut()
            .push((level, component.to_string(), message.to_string()));
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn make_bar(date_str: &str, close: f64) -> OhlcvBar {
    OhlcvBar {
        date: date(date_str),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000,
    }
}

/// `n` consecutive daily bars ending on `last`, close rising by 1 from
/// `first_close`.
pub fn rising_bars(last: NaiveDate, n: usize, first_close: f64) -> Vec<OhlcvBar> {
    (0..n)
        .map(|i| {
            let close = first_close + i as f64;
            OhlcvBar {
                date: last - Duration::days((n - 1 - i) as i64),
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000 + i as i64,
            }
        })
        .collect()
}

pub fn make_article(headline: &str, published: NaiveDate, source: &str) -> Article {
    Article {
        headline: headline.to_string(),
        summary: format!("Summary of {}", headline),
        source: source.to_string(),
        published_date: published,
        url: format!("https://news.example/{}", headline.len()),
    }
}
