//! News article types.

use chrono::NaiveDate;
use serde::Serialize;

pub const NO_NEWS_HEADLINE: &str = "No relevant news found";
pub const NO_NEWS_SOURCE: &str = "N/A";
pub const NEUTRAL_SENTIMENT: f64 = 0.5;

/// A raw article as delivered by a news collector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub headline: String,
    pub summary: String,
    pub source: String,
    #[serde(rename = "date")]
    pub published_date: NaiveDate,
    pub url: String,
}

/// An article tagged with relevance and sentiment, both in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: Article,
    pub relevance: f64,
    pub sentiment: f64,
}

/// The single article chosen to represent a day, or the "no news" placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsSummary {
    pub headline: String,
    pub summary: String,
    pub sentiment: f64,
    pub source: String,
    pub relevance: f64,
}

impl NewsSummary {
    pub fn no_news() -> Self {
        Self {
            headline: NO_NEWS_HEADLINE.to_string(),
            summary: String::new(),
            sentiment: NEUTRAL_SENTIMENT,
            source: NO_NEWS_SOURCE.to_string(),
            relevance: 0.0,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.headline.is_empty() || self.headline == NO_NEWS_HEADLINE
    }
}

/// Cuts `text` to `limit` characters, appending "..." when anything was cut.
pub fn truncate_summary(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
