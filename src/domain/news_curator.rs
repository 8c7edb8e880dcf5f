//! News curation: raw article pool → ordered, scored, deduplicated articles.
//!
//! Steps, in order:
//! 1. drop articles published before `today - days`
//! 2. drop repeated headlines, first occurrence wins
//! 3. score relevance, drop anything under `min_relevance`
//! 4. score sentiment on the headline
//! 5. sort by published date descending (stable), cap at
//!    `max_articles_per_day * days`

use crate::domain::article::{truncate_summary, Article, NewsSummary, ScoredArticle};
use crate::domain::relevance::relevance;
use crate::domain::sentiment::sentiment;
use crate::ports::diagnostics_port::DiagnosticsPort;
use crate::ports::sentiment_port::SentimentAnalyzer;
use chrono::{Days, NaiveDate};
use std::collections::HashSet;

const COMPONENT: &str = "news";

#[derive(Debug, Clone, PartialEq)]
pub struct NewsConfig {
    pub min_relevance: f64,
    pub max_articles_per_day: usize,
    pub min_headline_length: usize,
    pub summary_limit: usize,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            min_relevance: 0.1,
            max_articles_per_day: 10,
            min_headline_length: 10,
            summary_limit: 200,
        }
    }
}

pub fn curate(
    articles: Vec<Article>,
    symbol: &str,
    days: usize,
    today: NaiveDate,
    config: &NewsConfig,
    analyzer: &dyn SentimentAnalyzer,
    diagnostics: &dyn DiagnosticsPort,
) -> Vec<ScoredArticle> {
    let received = articles.len();
    // a window reaching past the calendar keeps everything
    let cutoff = today
        .checked_sub_days(Days::new(days as u64))
        .unwrap_or(NaiveDate::MIN);
    let mut seen: HashSet<String> = HashSet::new();

    let mut curated: Vec<ScoredArticle> = articles
        .into_iter()
        .filter(|a| a.published_date >= cutoff)
        .filter(|a| seen.insert(a.headline.clone()))
        .filter_map(|article| {
            let relevance = relevance(&article.headline, symbol);
            if relevance < config.min_relevance {
                return None;
            }
            let sentiment = sentiment(analyzer, &article.headline, diagnostics);
            Some(ScoredArticle {
                article,
                relevance,
                sentiment,
            })
        })
        .collect();

    curated.sort_by(|a, b| b.article.published_date.cmp(&a.article.published_date));
    curated.truncate(config.max_articles_per_day.saturating_mul(days));

    diagnostics.info(
        COMPONENT,
        &format!(
            "kept {} of {} articles for {}",
            curated.len(),
            received,
            symbol
        ),
    );
    curated
}

/// The highest-relevance article of one day, earliest on ties, with its
/// summary cut to `summary_limit` characters. Empty input yields the
/// "No relevant news found" placeholder.
pub fn representative(articles: &[ScoredArticle], summary_limit: usize) -> NewsSummary {
    let best = articles.iter().fold(None::<&ScoredArticle>, |best, a| match best {
        Some(b) if b.relevance >= a.relevance => Some(b),
        _ => Some(a),
    });

    match best {
        None => NewsSummary::no_news(),
        Some(a) => NewsSummary {
            headline: a.article.headline.clone(),
            summary: truncate_summary(&a.article.summary, summary_limit),
            sentiment: a.sentiment,
            source: a.article.source.clone(),
            relevance: a.relevance,
        },
    }
}
