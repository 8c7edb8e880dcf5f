//! Configuration validation.
//!
//! Checks every known key before a run. Unset keys are always valid since
//! they fall back to defaults.

use crate::domain::config::{parse_features, parse_outlier_method, parse_periods};
use crate::domain::error::CuratorError;
use crate::domain::indicator_engine::IndicatorConfig;
use crate::ports::config_port::ConfigPort;

const PERIOD_KEYS: [&str; 9] = [
    "volatility_window",
    "rsi_period",
    "bollinger_period",
    "macd_fast",
    "macd_slow",
    "macd_signal",
    "stoch_k_period",
    "stoch_d_period",
    "williams_r_period",
];

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), CuratorError> {
    validate_periods(config)?;
    validate_macd(config)?;
    validate_bollinger(config)?;
    validate_lookback(config)?;
    validate_news(config)?;
    validate_quality(config)?;
    validate_features(config)?;
    Ok(())
}

fn validate_periods(config: &dyn ConfigPort) -> Result<(), CuratorError> {
    for key in PERIOD_KEYS {
        let value = config.get_int("indicators", key, 1);
        if value < 1 {
            return Err(CuratorError::config_invalid(
                "indicators",
                key,
                format!("{} must be a positive integer", key),
            ));
        }
    }
    if let Some(s) = config.get_string("indicators", "ma_periods") {
        parse_periods(&s)?;
    }
    Ok(())
}

fn validate_macd(config: &dyn ConfigPort) -> Result<(), CuratorError> {
    let defaults = IndicatorConfig::default();
    let fast = config.get_int("indicators", "macd_fast", defaults.macd_fast as i64);
    let slow = config.get_int("indicators", "macd_slow", defaults.macd_slow as i64);
    if fast >= slow {
        return Err(CuratorError::config_invalid(
            "indicators",
            "macd_fast",
            "macd_fast must be less than macd_slow",
        ));
    }
    Ok(())
}

fn validate_bollinger(config: &dyn ConfigPort) -> Result<(), CuratorError> {
    let value = config.get_double("indicators", "bollinger_std", 2.0);
    if value < 0.0 || !value.is_finite() {
        return Err(CuratorError::config_invalid(
            "indicators",
            "bollinger_std",
            "bollinger_std must be non-negative",
        ));
    }
    Ok(())
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), CuratorError> {
    if config.get_int("indicators", "lookback_buffer", 0) < 0 {
        return Err(CuratorError::config_invalid(
            "indicators",
            "lookback_buffer",
            "lookback_buffer must be non-negative",
        ));
    }
    Ok(())
}

fn validate_news(config: &dyn ConfigPort) -> Result<(), CuratorError> {
    let relevance = config.get_double("news", "min_relevance", 0.1);
    if !(0.0..=1.0).contains(&relevance) {
        return Err(CuratorError::config_invalid(
            "news",
            "min_relevance",
            "min_relevance must be between 0 and 1",
        ));
    }
    for key in ["max_articles_per_day", "summary_limit"] {
        if config.get_int("news", key, 1) < 1 {
            return Err(CuratorError::config_invalid(
                "news",
                key,
                format!("{} must be at least 1", key),
            ));
        }
    }
    if config.get_int("news", "min_headline_length", 0) < 0 {
        return Err(CuratorError::config_invalid(
            "news",
            "min_headline_length",
            "min_headline_length must be non-negative",
        ));
    }
    Ok(())
}

fn validate_quality(config: &dyn ConfigPort) -> Result<(), CuratorError> {
    parse_outlier_method(config)?;

    let multiplier = config.get_double("quality", "iqr_multiplier", 1.5);
    if multiplier < 0.0 || !multiplier.is_finite() {
        return Err(CuratorError::config_invalid(
            "quality",
            "iqr_multiplier",
            "iqr_multiplier must be non-negative",
        ));
    }
    let threshold = config.get_double("quality", "zscore_threshold", 3.0);
    if threshold <= 0.0 || !threshold.is_finite() {
        return Err(CuratorError::config_invalid(
            "quality",
            "zscore_threshold",
            "zscore_threshold must be positive",
        ));
    }
    if config.get_int("quality", "max_issues", 0) < 0 {
        return Err(CuratorError::config_invalid(
            "quality",
            "max_issues",
            "max_issues must be non-negative",
        ));
    }
    Ok(())
}

fn validate_features(config: &dyn ConfigPort) -> Result<(), CuratorError> {
    let Some(selection) = config.get_string("features", "structured") else {
        return Ok(());
    };
    if selection.trim().is_empty() {
        return Ok(());
    }
    let ma_periods = match config.get_string("indicators", "ma_periods") {
        Some(s) => parse_periods(&s)?,
        None => IndicatorConfig::default().ma_periods,
    };
    parse_features(&selection, &ma_periods)?;
    Ok(())
}
