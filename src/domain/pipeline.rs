//! One collection run: validate inputs, fetch, compute, curate, merge,
//! assess.
//!
//! Only input validation, a failed or empty price fetch abort the run. A
//! failing news source or market index is reported and skipped.

use crate::domain::article::Article;
use crate::domain::config::CuratorConfig;
use crate::domain::dataset::{Dataset, DatasetMetadata};
use crate::domain::error::CuratorError;
use crate::domain::exchange::{validate_days, validate_symbol, Exchange};
use crate::domain::indicator_engine::{compute_indicators, finalize_rows};
use crate::domain::market::fetch_market_context;
use crate::domain::merge::merge;
use crate::domain::news_curator::curate;
use crate::domain::ohlcv::normalize_bars;
use crate::domain::quality::{assess, clean};
use crate::ports::data_port::{MarketDataPort, PriceDataPort};
use crate::ports::diagnostics_port::DiagnosticsPort;
use crate::ports::news_port::NewsSource;
use crate::ports::sentiment_port::SentimentAnalyzer;
use chrono::{DateTime, Days, Utc};

const COMPONENT: &str = "pipeline";

pub const DEFAULT_DAYS: i64 = 7;

/// Unvalidated user input for one run.
#[derive(Debug, Clone)]
pub struct CollectRequest {
    pub exchange: String,
    pub symbol: String,
    pub days: i64,
    pub now: DateTime<Utc>,
}

/// The external collaborators of a run.
pub struct Sources<'a> {
    pub prices: &'a dyn PriceDataPort,
    pub market: &'a dyn MarketDataPort,
    pub news: Vec<&'a dyn NewsSource>,
    pub sentiment: &'a dyn SentimentAnalyzer,
}

pub fn collect(
    request: &CollectRequest,
    sources: &Sources<'_>,
    config: &CuratorConfig,
    diagnostics: &dyn DiagnosticsPort,
) -> Result<Dataset, CuratorError> {
    let exchange: Exchange = request.exchange.parse()?;
    let symbol = validate_symbol(&request.symbol)?;
    let days = validate_days(request.days)?;
    let provider_symbol = exchange.provider_symbol(&symbol);

    diagnostics.info(
        COMPONENT,
        &format!("collecting {} days for {} on {}", days, provider_symbol, exchange),
    );

    let today = request.now.date_naive();
    let start = days
        .checked_add(config.indicators.lookback_buffer)
        .and_then(|back| today.checked_sub_days(Days::new(back as u64)))
        .ok_or(CuratorError::InvalidDays { days: request.days })?;
    let bars = normalize_bars(sources.prices.fetch_ohlcv(&provider_symbol, start, today)?);
    if bars.is_empty() {
        return Err(CuratorError::NoData {
            symbol: provider_symbol,
        });
    }
    diagnostics.debug(COMPONENT, &format!("fetched {} bars from {} to {}", bars.len(), start, today));

    let market = fetch_market_context(sources.market, &config.market_symbols, diagnostics);
    let mut rows = compute_indicators(&bars, &config.indicators, &market, diagnostics);
    if config.quality.remove_price_outliers {
        rows = clean(&rows, config.quality.outlier_method, diagnostics);
        if rows.is_empty() {
            return Err(CuratorError::NoData {
                symbol: provider_symbol,
            });
        }
    }
    let rows = finalize_rows(&rows, days, config.features.as_deref());

    let pool = fetch_news(&sources.news, &symbol, days, diagnostics);
    let curated = curate(
        pool,
        &symbol,
        days,
        today,
        &config.news,
        sources.sentiment,
        diagnostics,
    );

    let records = merge(&rows, &curated, config.news.summary_limit);
    let quality = assess(&records, config.quality.max_issues);
    diagnostics.info(
        COMPONENT,
        &format!(
            "merged {} records, quality score {:.2}",
            records.len(),
            quality.score
        ),
    );

    Ok(Dataset {
        metadata: DatasetMetadata {
            symbol,
            exchange,
            collection_timestamp: request.now,
            days_requested: days,
            days_collected: records.len(),
            quality,
        },
        records,
    })
}

/// Pools the articles of every source. A failing source is reported and
/// contributes nothing.
fn fetch_news(
    sources: &[&dyn NewsSource],
    symbol: &str,
    days: usize,
    diagnostics: &dyn DiagnosticsPort,
) -> Vec<Article> {
    let mut pool = Vec::new();
    for source in sources {
        match source.fetch(symbol, days) {
            Ok(articles) => {
                diagnostics.debug(
                    COMPONENT,
                    &format!("{} returned {} articles", source.name(), articles.len()),
                );
                pool.extend(articles);
            }
            Err(e) => {
                diagnostics.warn(COMPONENT, &format!("news source {} skipped: {}", source.name(), e));
            }
        }
    }
    pool
}
