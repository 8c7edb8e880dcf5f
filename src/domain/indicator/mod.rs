//! Per-bar indicator calculators and the series types they produce.
//!
//! `IndicatorType` names an indicator with its parameters, `IndicatorValue`
//! carries its output shape (scalar, MACD triple, bands, stochastic pair),
//! and `IndicatorSeries` holds one `IndicatorPoint` per bar.
//!
//! Every series has exactly one point per input bar. A point whose window is
//! not yet full, or whose formula divides by zero, is marked `valid: false`.
//! All windows are trailing: the point at index `t` only reads bars `..=t`.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod returns;
pub mod rsi;
pub mod sma;
pub mod stddev;
pub mod stochastic;
pub mod williams_r;

pub use bollinger::calculate_bollinger;
pub use ema::ewm_mean;
pub use macd::calculate_macd;
pub use returns::{calculate_daily_return, calculate_volatility};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stddev::sample_stddev;
pub use stochastic::calculate_stochastic;
pub use williams_r::calculate_williams_r;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: IndicatorValue,
}

impl IndicatorPoint {
    pub fn simple(date: NaiveDate, value: Option<f64>) -> Self {
        IndicatorPoint {
            date,
            valid: value.is_some(),
            value: IndicatorValue::Simple(value.unwrap_or(0.0)),
        }
    }

    /// The scalar value when this is a valid `Simple` point.
    pub fn as_simple(&self) -> Option<f64> {
        match self.value {
            IndicatorValue::Simple(v) if self.valid => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum IndicatorValue {
    Simple(f64),
    Macd {
        line: f64,
        signal: f64,
        histogram: f64,
    },
    Stochastic {
        k: Option<f64>,
        d: Option<f64>,
    },
    Bollinger {
        upper: f64,
        middle: f64,
        lower: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorType {
    DailyReturn,
    Volatility(usize),
    Sma(usize),
    Rsi(usize),
    WilliamsR(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Stochastic {
        k_period: usize,
        d_period: usize,
    },
    Bollinger {
        period: usize,
        multiplier: f64,
    },
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Scalar values of a `Simple` series, `None` where undefined.
    pub fn simple_values(&self) -> Vec<Option<f64>> {
        self.values.iter().map(IndicatorPoint::as_simple).collect()
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|p| p.valid).count()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::DailyReturn => write!(f, "RETURN"),
            IndicatorType::Volatility(period) => write!(f, "VOLATILITY({})", period),
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::WilliamsR(period) => write!(f, "WILLIAMS_R({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Stochastic { k_period, d_period } => {
                write!(f, "STOCHASTIC({},{})", k_period, d_period)
            }
            IndicatorType::Bollinger { period, multiplier } => {
                write!(f, "BOLLINGER({},{})", period, multiplier)
            }
        }
    }
}

/// Applies `f` to every full trailing window of `values`.
///
/// The output at `t` is `None` while `t + 1 < window`, when any value in the
/// window is `None`, or when `f` itself returns `None`.
pub(crate) fn rolling<F>(values: &[Option<f64>], window: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> Option<f64>,
{
    let mut out = Vec::with_capacity(values.len());
    let mut buf: Vec<f64> = Vec::with_capacity(window);

    for t in 0..values.len() {
        if window == 0 || t + 1 < window {
            out.push(None);
            continue;
        }
        buf.clear();
        let mut complete = true;
        for v in &values[t + 1 - window..=t] {
            match v {
                Some(x) => buf.push(*x),
                None => {
                    complete = false;
                    break;
                }
            }
        }
        out.push(if complete { f(&buf) } else { None });
    }

    out
}

pub(crate) fn mean(window: &[f64]) -> Option<f64> {
    if window.is_empty() {
        None
    } else {
        Some(window.iter().sum::<f64>() / window.len() as f64)
    }
}
