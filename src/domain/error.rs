//! Domain error types.

/// Top-level error type for fincurator.
#[derive(Debug, thiserror::Error)]
pub enum CuratorError {
    #[error("invalid exchange: {value} (expected NYSE, NASDAQ, PSX or CRYPTO)")]
    InvalidExchange { value: String },

    #[error("invalid symbol: {symbol:?}")]
    InvalidSymbol { symbol: String },

    #[error("days must be positive: {days}")]
    InvalidDays { days: i64 },

    #[error("no price data found for {symbol}")]
    NoData { symbol: String },

    #[error("source {source_name} failed: {reason}")]
    Source { source_name: String, reason: String },

    #[error("sentiment analysis failed: {reason}")]
    Sentiment { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("export to {path} failed: {reason}")]
    Export { path: String, reason: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CuratorError {
    pub fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        CuratorError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn source(source_name: &str, reason: impl Into<String>) -> Self {
        CuratorError::Source {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&CuratorError> for std::process::ExitCode {
    fn from(err: &CuratorError) -> Self {
        let code: u8 = match err {
            CuratorError::Io(_)
            | CuratorError::Csv(_)
            | CuratorError::Json(_)
            | CuratorError::Export { .. } => 1,
            CuratorError::ConfigParse { .. }
            | CuratorError::ConfigInvalid { .. } => 2,
            CuratorError::InvalidExchange { .. }
            | CuratorError::InvalidSymbol { .. }
            | CuratorError::InvalidDays { .. } => 3,
            CuratorError::Source { .. } | CuratorError::Sentiment { .. } => 4,
            CuratorError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
