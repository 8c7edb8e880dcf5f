//! Date alignment of indicator rows and curated news.
//!
//! Every row yields exactly one [`DailyRecord`], in row order, whether or not
//! any article was published that day.

use crate::domain::article::{NewsSummary, ScoredArticle};
use crate::domain::field::Field;
use crate::domain::indicator_engine::IndicatorRow;
use crate::domain::news_curator::representative;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub structured: BTreeMap<Field, f64>,
    #[serde(rename = "unstructured")]
    pub representative_news: NewsSummary,
    pub all_news: Vec<ScoredArticle>,
}

/// Groups articles by their formatted publication date, preserving order
/// within each bucket.
pub fn bucket_by_date(news: &[ScoredArticle]) -> HashMap<String, Vec<ScoredArticle>> {
    let mut buckets: HashMap<String, Vec<ScoredArticle>> = HashMap::new();
    for article in news {
        buckets
            .entry(article.article.published_date.format(DATE_FORMAT).to_string())
            .or_default()
            .push(article.clone());
    }
    buckets
}

pub fn merge(
    rows: &[IndicatorRow],
    news: &[ScoredArticle],
    summary_limit: usize,
) -> Vec<DailyRecord> {
    let buckets = bucket_by_date(news);

    rows.iter()
        .map(|row| {
            let key = row.date.format(DATE_FORMAT).to_string();
            let all_news = buckets.get(&key).cloned().unwrap_or_default();
            DailyRecord {
                date: row.date,
                structured: row.structured(),
                representative_news: representative(&all_news, summary_limit),
                all_news,
            }
        })
        .collect()
}
