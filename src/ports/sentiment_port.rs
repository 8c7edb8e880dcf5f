//! Polarity analyzer port.

use crate::domain::error::CuratorError;

pub trait SentimentAnalyzer {
    /// Polarity of `text` in [-1, 1].
    fn polarity(&self, text: &str) -> Result<f64, CuratorError>;
}
