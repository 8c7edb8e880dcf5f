//! Core domain types and logic.

pub mod ohlcv;
pub mod field;
pub mod numeric;
pub mod indicator;
pub mod indicator_engine;
pub mod market;
pub mod article;
pub mod relevance;
pub mod sentiment;
pub mod news_curator;
pub mod merge;
pub mod quality;
pub mod dataset;
pub mod exchange;
pub mod config;
pub mod config_validation;
pub mod pipeline;
pub mod error;
