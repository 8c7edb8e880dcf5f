//! Data quality assessment and outlier handling.
//!
//! [`assess`] scores merged records by OHLCV completeness and lists days
//! without news. [`detect_outliers`], [`remove_outliers`] and [`clean`] work
//! on any row type exposing numeric columns through [`ColumnSource`].

use crate::domain::field::Field;
use crate::domain::indicator_engine::IndicatorRow;
use crate::domain::merge::{DailyRecord, DATE_FORMAT};
use crate::domain::numeric::round_to;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::diagnostics_port::DiagnosticsPort;
use serde::Serialize;

const COMPONENT: &str = "quality";

pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_ZSCORE_THRESHOLD: f64 = 3.0;
pub const DEFAULT_MAX_ISSUES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    #[serde(rename = "quality_score")]
    pub score: f64,
    pub total_records: usize,
    pub complete_records: usize,
    pub issues: Vec<String>,
}

/// Completeness score in [0, 100] plus at most `max_issues` issue strings.
pub fn assess(records: &[DailyRecord], max_issues: usize) -> QualityReport {
    if records.is_empty() {
        return QualityReport {
            score: 0.0,
            total_records: 0,
            complete_records: 0,
            issues: vec!["No data collected".to_string()],
        };
    }

    let complete_records = records
        .iter()
        .filter(|r| {
            Field::OHLCV.iter().all(|f| {
                r.structured
                    .get(f)
                    .is_some_and(|v| v.is_finite() && *v != 0.0)
            })
        })
        .count();

    let issues = records
        .iter()
        .filter(|r| r.representative_news.is_placeholder())
        .map(|r| format!("No news found for {}", r.date.format(DATE_FORMAT)))
        .take(max_issues)
        .collect();

    QualityReport {
        score: round_to(100.0 * complete_records as f64 / records.len() as f64, 2),
        total_records: records.len(),
        complete_records,
        issues,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutlierMethod {
    /// Outside [Q1 - m*IQR, Q3 + m*IQR].
    Iqr { multiplier: f64 },
    /// |x - mean| / stddev above the threshold.
    ZScore { threshold: f64 },
}

impl Default for OutlierMethod {
    fn default() -> Self {
        OutlierMethod::Iqr {
            multiplier: DEFAULT_IQR_MULTIPLIER,
        }
    }
}

/// Read access to a row's numeric columns.
pub trait ColumnSource {
    fn column(&self, field: Field) -> Option<f64>;
}

impl ColumnSource for OhlcvBar {
    fn column(&self, field: Field) -> Option<f64> {
        match field {
            Field::Open => Some(self.open),
            Field::High => Some(self.high),
            Field::Low => Some(self.low),
            Field::Close => Some(self.close),
            Field::Volume => Some(self.volume as f64),
            _ => None,
        }
    }
}

impl ColumnSource for IndicatorRow {
    fn column(&self, field: Field) -> Option<f64> {
        self.get(field)
    }
}

/// Exclusion mask for `series`. Missing values are never flagged; empty or
/// constant series give an all-false mask.
pub fn detect_outliers(series: &[Option<f64>], method: OutlierMethod) -> Vec<bool> {
    let mut present: Vec<f64> = series
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    let no_flags = vec![false; series.len()];
    if present.is_empty() {
        return no_flags;
    }

    let is_outlier: Box<dyn Fn(f64) -> bool> = match method {
        OutlierMethod::Iqr { multiplier } => {
            present.sort_by(f64::total_cmp);
            let q1 = quantile(&present, 0.25);
            let q3 = quantile(&present, 0.75);
            let iqr = q3 - q1;
            let lower = q1 - multiplier * iqr;
            let upper = q3 + multiplier * iqr;
            Box::new(move |x| x < lower || x > upper)
        }
        OutlierMethod::ZScore { threshold } => {
            let Some(stddev) = crate::domain::indicator::sample_stddev(&present) else {
                return no_flags;
            };
            if stddev == 0.0 || !stddev.is_finite() {
                return no_flags;
            }
            let mean = present.iter().sum::<f64>() / present.len() as f64;
            Box::new(move |x| ((x - mean) / stddev).abs() > threshold)
        }
    };

    series
        .iter()
        .map(|v| v.is_some_and(|x| x.is_finite() && is_outlier(x)))
        .collect()
}

/// Drops every row flagged in any of `fields`.
///
/// This is not a single masked pass. Dropping rows moves the quartiles (or
/// the mean and deviation), so one pass can leave rows that a second call
/// would flag. The mask is recomputed on the survivors until it comes back
/// empty, which can drop more rows than one pass of [`detect_outliers`] and
/// makes a repeated call a no-op.
pub fn remove_outliers<T: ColumnSource + Clone>(
    rows: &[T],
    fields: &[Field],
    method: OutlierMethod,
) -> Vec<T> {
    let mut kept: Vec<T> = rows.to_vec();

    loop {
        let mut flagged = vec![false; kept.len()];
        for &field in fields {
            let series: Vec<Option<f64>> = kept.iter().map(|r| r.column(field)).collect();
            for (flag, hit) in flagged.iter_mut().zip(detect_outliers(&series, method)) {
                *flag |= hit;
            }
        }

        if !flagged.iter().any(|f| *f) {
            return kept;
        }

        kept = kept
            .into_iter()
            .zip(flagged)
            .filter(|(_, flag)| !flag)
            .map(|(row, _)| row)
            .collect();
    }
}

/// Outlier removal on OHLCV, then forward and backward fill of OHLCV gaps,
/// then zero fill of every other undefined value. Fills only ever copy
/// values that survived outlier removal.
pub fn clean(
    rows: &[IndicatorRow],
    method: OutlierMethod,
    diagnostics: &dyn DiagnosticsPort,
) -> Vec<IndicatorRow> {
    let mut cleaned = remove_outliers(rows, &Field::OHLCV, method);
    let removed = rows.len() - cleaned.len();
    if removed > 0 {
        diagnostics.info(COMPONENT, &format!("removed {} outlier rows", removed));
    }

    for field in Field::OHLCV {
        let mut last: Option<f64> = None;
        for row in cleaned.iter_mut() {
            match row.get(field) {
                Some(v) => last = Some(v),
                None => row.set(field, last),
            }
        }
        let mut next: Option<f64> = None;
        for row in cleaned.iter_mut().rev() {
            match row.get(field) {
                Some(v) => next = Some(v),
                None => row.set(field, next),
            }
        }
    }

    for row in cleaned.iter_mut() {
        for (field, value) in row.values.iter_mut() {
            if !field.is_ohlcv() && value.is_none() {
                *value = Some(0.0);
            }
        }
    }

    cleaned
}

/// Linear-interpolated quantile of sorted, non-empty `sorted`.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
