//! Property tests over generated price series and news pools.

mod common;

use chrono::{Duration, NaiveDate};
use common::*;
use fincurator::domain::article::ScoredArticle;
use fincurator::domain::field::Field;
use fincurator::domain::indicator_engine::{compute_indicators, IndicatorConfig, IndicatorRow};
use fincurator::domain::market::MarketContext;
use fincurator::domain::merge::merge;
use fincurator::domain::quality::{remove_outliers, OutlierMethod};
use fincurator::ports::diagnostics_port::NoDiagnostics;
use proptest::prelude::*;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

fn bars_from(closes: &[f64], volumes: &[i64]) -> Vec<OhlcvBar> {
    closes
        .iter()
        .zip(volumes.iter().cycle())
        .enumerate()
        .map(|(i, (&close, &volume))| OhlcvBar {
            date: start() + Duration::days(i as i64),
            open: close * 0.99,
            high: close * 1.02,
            low: close * 0.97,
            close,
            volume,
        })
        .collect()
}

fn rows_for(bars: &[OhlcvBar]) -> Vec<IndicatorRow> {
    compute_indicators(
        bars,
        &IndicatorConfig::default(),
        &MarketContext::default(),
        &NoDiagnostics,
    )
}

fn closes(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..1_000.0, min_len..min_len + 50)
}

fn volumes() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..5_000_000, 1..10)
}

proptest! {
    #[test]
    fn ma_5_is_trailing_mean(closes in closes(30), volumes in volumes()) {
        let bars = bars_from(&closes, &volumes);
        let rows = rows_for(&bars);

        for (t, row) in rows.iter().enumerate() {
            let ma = row.get(Field::Ma(5));
            if t < 4 {
                prop_assert!(ma.is_none());
            } else {
                let expected = closes[t - 4..=t].iter().sum::<f64>() / 5.0;
                let ma = ma.unwrap();
                prop_assert!((ma - expected).abs() <= 1e-9 * expected.abs().max(1.0));
            }
        }
    }

    #[test]
    fn rsi_is_bounded(closes in closes(30), volumes in volumes()) {
        let rows = rows_for(&bars_from(&closes, &volumes));
        for row in &rows {
            if let Some(rsi) = row.get(Field::Rsi) {
                prop_assert!((0.0..=100.0).contains(&rsi), "rsi {}", rsi);
            }
        }
    }

    #[test]
    fn bollinger_upper_not_below_lower(closes in closes(30), volumes in volumes()) {
        let rows = rows_for(&bars_from(&closes, &volumes));
        for row in &rows {
            if let (Some(upper), Some(lower)) =
                (row.get(Field::BollingerUpper), row.get(Field::BollingerLower))
            {
                prop_assert!(upper >= lower);
            }
        }
    }

    #[test]
    fn merge_keeps_every_row_in_order(
        closes in closes(1),
        news in prop::collection::vec((0i64..90, 0.0f64..=1.0, "[a-z ]{10,30}"), 0..40),
    ) {
        let rows = rows_for(&bars_from(&closes, &[1_000]));
        let pool: Vec<ScoredArticle> = news
            .into_iter()
            .map(|(offset, relevance, headline)| ScoredArticle {
                article: make_article(&headline, start() + Duration::days(offset), "gen"),
                relevance,
                sentiment: 0.5,
            })
            .collect();

        let records = merge(&rows, &pool, 200);
        prop_assert_eq!(records.len(), rows.len());
        for (record, row) in records.iter().zip(&rows) {
            prop_assert_eq!(record.date, row.date);
            let expected = pool
                .iter()
                .filter(|a| a.article.published_date == row.date)
                .count();
            prop_assert_eq!(record.all_news.len(), expected);
        }
    }

    #[test]
    fn remove_outliers_is_idempotent(
        closes in closes(5),
        volumes in volumes(),
        use_zscore in any::<bool>(),
    ) {
        let bars = bars_from(&closes, &volumes);
        let method = if use_zscore {
            OutlierMethod::ZScore { threshold: 3.0 }
        } else {
            OutlierMethod::Iqr { multiplier: 1.5 }
        };

        let once = remove_outliers(&bars, &Field::OHLCV, method);
        let twice = remove_outliers(&once, &Field::OHLCV, method);
        prop_assert!(once.len() <= bars.len());
        prop_assert_eq!(once, twice);
    }
}
