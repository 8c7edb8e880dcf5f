//! CSV file adapters for prices, index quotes and news.
//!
//! Price files live at `<dir>/<SYMBOL>.csv` with the header
//! `date,open,high,low,close,volume`. Index quotes are read from the same
//! layout, e.g. `<dir>/^VIX.csv`. The news file has the header
//! `date,headline,summary,source,url`.

use crate::domain::error::CuratorError;
use crate::domain::market::IndexQuote;
use crate::domain::ohlcv::{normalize_bars, OhlcvBar};
use crate::domain::article::Article;
use crate::ports::data_port::{MarketDataPort, PriceDataPort};
use crate::ports::diagnostics_port::DiagnosticsPort;
use crate::ports::news_port::NewsSource;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
struct BarRecord {
    date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_bars(&self, symbol: &str, path: &Path) -> Result<Vec<OhlcvBar>, CuratorError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
        let mut bars = Vec::new();

        for result in rdr.deserialize::<BarRecord>() {
            let record = result
                .map_err(|e| CuratorError::source(symbol, format!("CSV parse error: {}", e)))?;
            let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT).map_err(|e| {
                CuratorError::source(symbol, format!("invalid date {:?}: {}", record.date, e))
            })?;
            bars.push(OhlcvBar {
                date,
                open: record.open,
                high: record.high,
                low: record.low,
                close: record.close,
                volume: record.volume.round() as i64,
            });
        }

        Ok(normalize_bars(bars))
    }
}

impl PriceDataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, CuratorError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            return Err(CuratorError::NoData {
                symbol: symbol.to_string(),
            });
        }

        let bars = self
            .read_bars(symbol, &path)?
            .into_iter()
            .filter(|b| b.date >= start_date && b.date <= end_date)
            .collect();
        Ok(bars)
    }
}

impl MarketDataPort for CsvAdapter {
    fn latest_quote(&self, index_symbol: &str) -> Result<Option<IndexQuote>, CuratorError> {
        let path = self.csv_path(index_symbol);
        if !path.exists() {
            return Ok(None);
        }

        let bars = self.read_bars(index_symbol, &path)?;
        Ok(bars.last().map(|latest| IndexQuote {
            latest_close: latest.close,
            previous_close: bars.len().checked_sub(2).map(|i| bars[i].close),
        }))
    }
}

#[derive(Debug, Deserialize)]
struct NewsRecord {
    date: String,
    headline: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    url: String,
}

/// Articles from one CSV file. Rows with an unparseable date are skipped;
/// a missing or unreadable file fails the whole source.
pub struct CsvNewsSource<'a> {
    name: String,
    path: PathBuf,
    min_headline_length: usize,
    diagnostics: &'a dyn DiagnosticsPort,
}

impl<'a> CsvNewsSource<'a> {
    pub fn new(
        path: PathBuf,
        min_headline_length: usize,
        diagnostics: &'a dyn DiagnosticsPort,
    ) -> Self {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "news".to_string());
        Self {
            name,
            path,
            min_headline_length,
            diagnostics,
        }
    }
}

/// Collapses whitespace runs and swaps double quotes for single quotes.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('"', "'")
}

impl NewsSource for CsvNewsSource<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self, _symbol: &str, _days: usize) -> Result<Vec<Article>, CuratorError> {
        if !self.path.exists() {
            return Err(CuratorError::source(
                &self.name,
                format!("{} not found", self.path.display()),
            ));
        }

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| CuratorError::source(&self.name, e.to_string()))?;

        let mut articles = Vec::new();
        let mut skipped = 0usize;
        for result in rdr.deserialize::<NewsRecord>() {
            let Ok(record) = result else {
                skipped += 1;
                continue;
            };
            let Ok(published_date) = NaiveDate::parse_from_str(record.date.trim(), DATE_FORMAT)
            else {
                skipped += 1;
                continue;
            };
            let headline = clean_text(&record.headline);
            if headline.chars().count() < self.min_headline_length {
                skipped += 1;
                continue;
            }
            articles.push(Article {
                headline,
                summary: clean_text(&record.summary),
                source: if record.source.trim().is_empty() {
                    self.name.clone()
                } else {
                    clean_text(&record.source)
                },
                published_date,
                url: record.url.trim().to_string(),
            });
        }

        if skipped > 0 {
            self.diagnostics.debug(
                "news",
                &format!("{}: skipped {} unusable rows", self.name, skipped),
            );
        }
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::diagnostics_port::{Level, NoDiagnostics};
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Messages(RefCell<Vec<(Level, String)>>);

    impl DiagnosticsPort for Messages {
        fn event(&self, level: Level, _component: &str, message: &str) {
            self.0.borrow_mut().push((level, message.to_string()));
        }
    }

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "date,open,high,low,close,volume\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-17,110.0,120.0,105.0,115.0,55000.0\n";
        fs::write(path.join("AAPL.csv"), csv_content).unwrap();
        fs::write(
            path.join("^VIX.csv"),
            "date,open,high,low,close,volume\n\
             2024-01-16,14,15,13,14.5,0\n\
             2024-01-17,14.5,16,14,15.25,0\n",
        )
        .unwrap();
        fs::write(
            path.join("^TNX.csv"),
            "date,open,high,low,close,volume\n2024-01-17,4.1,4.2,4.0,4.15,0\n",
        )
        .unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_ohlcv_returns_sorted_bars() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 17).unwrap();
        let bars = adapter.fetch_ohlcv("AAPL", start, end).unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, start);
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].high, 110.0);
        assert_eq!(bars[0].low, 90.0);
        assert_eq!(bars[0].close, 105.0);
        assert_eq!(bars[0].volume, 50000);
        assert_eq!(bars[2].volume, 55000);
    }

    #[test]
    fn fetch_ohlcv_filters_range() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let day = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        let bars = adapter.fetch_ohlcv("AAPL", day, day).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 110.0);
    }

    #[test]
    fn missing_symbol_is_no_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let day = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        assert!(matches!(
            adapter.fetch_ohlcv("MSFT", day, day),
            Err(CuratorError::NoData { .. })
        ));
    }

    #[test]
    fn malformed_row_is_source_error() {
        let (_dir, path) = setup_test_data();
        fs::write(
            path.join("BAD.csv"),
            "date,open,high,low,close,volume\n2024-01-16,abc,1,1,1,1\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(path);
        let day = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        assert!(matches!(
            adapter.fetch_ohlcv("BAD", day, day),
            Err(CuratorError::Source { .. })
        ));
    }

    #[test]
    fn latest_quote_has_previous_close() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let vix = adapter.latest_quote("^VIX").unwrap().unwrap();
        assert_eq!(vix.latest_close, 15.25);
        assert_eq!(vix.previous_close, Some(14.5));

        let tnx = adapter.latest_quote("^TNX").unwrap().unwrap();
        assert_eq!(tnx.previous_close, None);

        assert_eq!(adapter.latest_quote("^GSPC").unwrap(), None);
    }

    #[test]
    fn clean_text_normalises() {
        assert_eq!(
            clean_text("  Apple   \"beats\"\n estimates "),
            "Apple 'beats' estimates"
        );
    }

    #[test]
    fn news_source_applies_hygiene() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("wire.csv");
        fs::write(
            &file,
            "date,headline,summary,source,url\n\
             2024-01-16,Apple   unveils \"Vision\" headset,Long   summary,Reuters,http://x\n\
             not-a-date,Apple stock climbs in early trade,s,Reuters,\n\
             2024-01-17,Short,s,Reuters,\n\
             2024-01-17,Markets rally on rate cut hopes,s,,\n",
        )
        .unwrap();

        let sink = Messages::default();
        let source = CsvNewsSource::new(file, 10, &sink);
        assert_eq!(source.name(), "wire");
        let articles = source.fetch("AAPL", 7).unwrap();
        assert_eq!(
            *sink.0.borrow(),
            vec![(Level::Debug, "wire: skipped 2 unusable rows".to_string())]
        );

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].headline, "Apple unveils 'Vision' headset");
        assert_eq!(articles[0].summary, "Long summary");
        assert_eq!(articles[0].url, "http://x");
        assert_eq!(articles[1].source, "wire");
        assert_eq!(
            articles[1].published_date,
            NaiveDate::from_ymd_opt(2024, 1, 17).unwrap()
        );
    }

    #[test]
    fn missing_news_file_is_source_error() {
        let source = CsvNewsSource::new(PathBuf::from("/nonexistent/news.csv"), 10, &NoDiagnostics);
        assert!(matches!(
            source.fetch("AAPL", 7),
            Err(CuratorError::Source { .. })
        ));
    }
}
