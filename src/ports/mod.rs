//! Port traits for every external collaborator of the pipeline.

pub mod config_port;
pub mod data_port;
pub mod diagnostics_port;
pub mod export_port;
pub mod news_port;
pub mod sentiment_port;
