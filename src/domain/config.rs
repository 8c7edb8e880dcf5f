//! Run configuration assembled from a [`ConfigPort`].
//!
//! Every key is optional; absent keys take the defaults of the component
//! they configure.

use crate::domain::config_validation::validate_config;
use crate::domain::error::CuratorError;
use crate::domain::field::Field;
use crate::domain::indicator_engine::IndicatorConfig;
use crate::domain::market::MarketIndex;
use crate::domain::news_curator::NewsConfig;
use crate::domain::quality::{
    OutlierMethod, DEFAULT_IQR_MULTIPLIER, DEFAULT_MAX_ISSUES, DEFAULT_ZSCORE_THRESHOLD,
};
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_NEWS_FILE: &str = "news.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct QualityConfig {
    pub outlier_method: OutlierMethod,
    pub max_issues: usize,
    /// Drop outlier bars before computing indicators.
    pub remove_price_outliers: bool,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            outlier_method: OutlierMethod::default(),
            max_issues: DEFAULT_MAX_ISSUES,
            remove_price_outliers: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CuratorConfig {
    pub indicators: IndicatorConfig,
    pub news: NewsConfig,
    pub quality: QualityConfig,
    pub market_symbols: Vec<(MarketIndex, String)>,
    pub data_dir: PathBuf,
    pub news_file: String,
    /// Structured columns to keep; `None` keeps all of them.
    pub features: Option<Vec<Field>>,
    pub json_pretty: bool,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorConfig::default(),
            news: NewsConfig::default(),
            quality: QualityConfig::default(),
            market_symbols: MarketIndex::ALL
                .iter()
                .map(|i| (*i, i.default_symbol().to_string()))
                .collect(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            news_file: DEFAULT_NEWS_FILE.to_string(),
            features: None,
            json_pretty: true,
        }
    }
}

impl CuratorConfig {
    /// Validates `config`, then reads every section over the defaults.
    pub fn from_port(config: &dyn ConfigPort) -> Result<Self, CuratorError> {
        validate_config(config)?;
        let defaults = Self::default();

        let ind = &defaults.indicators;
        let indicators = IndicatorConfig {
            ma_periods: match config.get_string("indicators", "ma_periods") {
                Some(s) => parse_periods(&s)?,
                None => ind.ma_periods.clone(),
            },
            volatility_window: get_usize(config, "indicators", "volatility_window", ind.volatility_window),
            rsi_period: get_usize(config, "indicators", "rsi_period", ind.rsi_period),
            bollinger_period: get_usize(config, "indicators", "bollinger_period", ind.bollinger_period),
            bollinger_std: config.get_double("indicators", "bollinger_std", ind.bollinger_std),
            macd_fast: get_usize(config, "indicators", "macd_fast", ind.macd_fast),
            macd_slow: get_usize(config, "indicators", "macd_slow", ind.macd_slow),
            macd_signal: get_usize(config, "indicators", "macd_signal", ind.macd_signal),
            stoch_k_period: get_usize(config, "indicators", "stoch_k_period", ind.stoch_k_period),
            stoch_d_period: get_usize(config, "indicators", "stoch_d_period", ind.stoch_d_period),
            williams_r_period: get_usize(config, "indicators", "williams_r_period", ind.williams_r_period),
            lookback_buffer: get_usize(config, "indicators", "lookback_buffer", ind.lookback_buffer),
        };

        let nws = &defaults.news;
        let news = NewsConfig {
            min_relevance: config.get_double("news", "min_relevance", nws.min_relevance),
            max_articles_per_day: get_usize(config, "news", "max_articles_per_day", nws.max_articles_per_day),
            min_headline_length: get_usize(config, "news", "min_headline_length", nws.min_headline_length),
            summary_limit: get_usize(config, "news", "summary_limit", nws.summary_limit),
        };

        let quality = QualityConfig {
            outlier_method: parse_outlier_method(config)?,
            max_issues: get_usize(config, "quality", "max_issues", DEFAULT_MAX_ISSUES),
            remove_price_outliers: config.get_bool("quality", "remove_price_outliers", false),
        };

        let market_symbols = MarketIndex::ALL
            .iter()
            .map(|index| {
                let symbol = config
                    .get_string("market", index.config_key())
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| index.default_symbol().to_string());
                (*index, symbol.trim().to_string())
            })
            .collect();

        let features = match config.get_string("features", "structured") {
            Some(s) if !s.trim().is_empty() => Some(parse_features(&s, &indicators.ma_periods)?),
            _ => None,
        };

        Ok(Self {
            indicators,
            news,
            quality,
            market_symbols,
            data_dir: config
                .get_string("data", "dir")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            news_file: config
                .get_string("data", "news_file")
                .unwrap_or(defaults.news_file),
            features,
            json_pretty: config.get_bool("output", "json_pretty", defaults.json_pretty),
        })
    }
}

fn get_usize(config: &dyn ConfigPort, section: &str, key: &str, default: usize) -> usize {
    let value = config.get_int(section, key, default as i64);
    usize::try_from(value).unwrap_or(default)
}

/// Comma-separated positive integers, e.g. `5,10,20`.
pub fn parse_periods(input: &str) -> Result<Vec<usize>, CuratorError> {
    let mut periods = Vec::new();
    for token in input.split(',') {
        let period = token
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| {
                CuratorError::config_invalid(
                    "indicators",
                    "ma_periods",
                    format!("invalid period: {:?}", token.trim()),
                )
            })?;
        if !periods.contains(&period) {
            periods.push(period);
        }
    }
    Ok(periods)
}

/// Comma-separated field names, each of which the engine must produce for
/// `ma_periods`.
pub fn parse_features(input: &str, ma_periods: &[usize]) -> Result<Vec<Field>, CuratorError> {
    let available = Field::all(ma_periods);
    input
        .split(',')
        .map(|token| {
            token
                .parse::<Field>()
                .ok()
                .filter(|f| available.contains(f))
                .ok_or_else(|| {
                    CuratorError::config_invalid(
                        "features",
                        "structured",
                        format!("unknown feature: {:?}", token.trim()),
                    )
                })
        })
        .collect()
}

pub fn parse_outlier_method(config: &dyn ConfigPort) -> Result<OutlierMethod, CuratorError> {
    let method = config
        .get_string("quality", "outlier_method")
        .unwrap_or_else(|| "iqr".to_string());
    match method.trim().to_lowercase().as_str() {
        "iqr" => Ok(OutlierMethod::Iqr {
            multiplier: config.get_double("quality", "iqr_multiplier", DEFAULT_IQR_MULTIPLIER),
        }),
        "zscore" | "z-score" => Ok(OutlierMethod::ZScore {
            threshold: config.get_double("quality", "zscore_threshold", DEFAULT_ZSCORE_THRESHOLD),
        }),
        other => Err(CuratorError::config_invalid(
            "quality",
            "outlier_method",
            format!("unknown method {:?}, expected iqr or zscore", other),
        )),
    }
}
