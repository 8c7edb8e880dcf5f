//! Indicator engine: raw bars → enriched rows.
//!
//! [`compute_indicators`] produces one [`IndicatorRow`] per bar with every
//! derived field, leaving insufficient-history points undefined.
//! [`finalize_rows`] trims to the requested window, rounds to 4 decimals and
//! replaces whatever is still undefined with 0.

use crate::domain::field::Field;
use crate::domain::indicator::{
    calculate_bollinger, calculate_daily_return, calculate_macd, calculate_rsi, calculate_sma,
    calculate_stochastic, calculate_volatility, calculate_williams_r, IndicatorSeries,
    IndicatorValue,
};
use crate::domain::market::MarketContext;
use crate::domain::numeric::round_to;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::diagnostics_port::DiagnosticsPort;
use chrono::NaiveDate;
use std::collections::BTreeMap;

const COMPONENT: &str = "indicators";

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    pub ma_periods: Vec<usize>,
    pub volatility_window: usize,
    pub rsi_period: usize,
    pub bollinger_period: usize,
    pub bollinger_std: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub stoch_k_period: usize,
    pub stoch_d_period: usize,
    pub williams_r_period: usize,
    /// Extra calendar days fetched before the requested window.
    pub lookback_buffer: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_periods: vec![5, 10, 20],
            volatility_window: 10,
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_std: 2.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            stoch_k_period: 14,
            stoch_d_period: 3,
            williams_r_period: 14,
            lookback_buffer: 30,
        }
    }
}

impl IndicatorConfig {
    pub fn fields(&self) -> Vec<Field> {
        Field::all(&self.ma_periods)
    }
}

/// A bar extended with derived fields. `None` marks an undefined value.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub values: BTreeMap<Field, Option<f64>>,
}

impl IndicatorRow {
    pub fn from_bar(bar: &OhlcvBar) -> Self {
        let mut values = BTreeMap::new();
        values.insert(Field::Open, Some(bar.open));
        values.insert(Field::High, Some(bar.high));
        values.insert(Field::Low, Some(bar.low));
        values.insert(Field::Close, Some(bar.close));
        values.insert(Field::Volume, Some(bar.volume as f64));
        Self {
            date: bar.date,
            values,
        }
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        self.values.get(&field).copied().flatten()
    }

    pub fn set(&mut self, field: Field, value: Option<f64>) {
        self.values.insert(field, value);
    }

    /// The field map with undefined values read as 0.
    pub fn structured(&self) -> BTreeMap<Field, f64> {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.unwrap_or(0.0)))
            .collect()
    }
}

/// Derives every configured field for every bar. Output has the input's
/// length and order.
pub fn compute_indicators(
    bars: &[OhlcvBar],
    config: &IndicatorConfig,
    market: &MarketContext,
    diagnostics: &dyn DiagnosticsPort,
) -> Vec<IndicatorRow> {
    let mut rows: Vec<IndicatorRow> = bars.iter().map(IndicatorRow::from_bar).collect();

    let daily_return = calculate_daily_return(bars);
    apply_simple(&mut rows, Field::DailyReturn, &daily_return, diagnostics);
    apply_simple(
        &mut rows,
        Field::Volatility,
        &calculate_volatility(bars, config.volatility_window),
        diagnostics,
    );
    for &period in &config.ma_periods {
        apply_simple(&mut rows, Field::Ma(period), &calculate_sma(bars, period), diagnostics);
    }
    apply_simple(
        &mut rows,
        Field::Rsi,
        &calculate_rsi(bars, config.rsi_period),
        diagnostics,
    );

    let bollinger = calculate_bollinger(bars, config.bollinger_period, config.bollinger_std);
    report(&bollinger, diagnostics);
    for (row, point) in rows.iter_mut().zip(&bollinger.values) {
        let (upper, lower) = match point.value {
            IndicatorValue::Bollinger { upper, lower, .. } if point.valid => {
                (Some(upper), Some(lower))
            }
            _ => (None, None),
        };
        row.set(Field::BollingerUpper, upper);
        row.set(Field::BollingerLower, lower);
    }

    let macd = calculate_macd(bars, config.macd_fast, config.macd_slow, config.macd_signal);
    report(&macd, diagnostics);
    for (row, point) in rows.iter_mut().zip(&macd.values) {
        let (line, signal, histogram) = match point.value {
            IndicatorValue::Macd {
                line,
                signal,
                histogram,
            } if point.valid => (Some(line), Some(signal), Some(histogram)),
            _ => (None, None, None),
        };
        row.set(Field::Macd, line);
        row.set(Field::MacdSignal, signal);
        row.set(Field::MacdHistogram, histogram);
    }

    let stochastic = calculate_stochastic(bars, config.stoch_k_period, config.stoch_d_period);
    report(&stochastic, diagnostics);
    for (row, point) in rows.iter_mut().zip(&stochastic.values) {
        let (k, d) = match point.value {
            IndicatorValue::Stochastic { k, d } => (k, d),
            _ => (None, None),
        };
        row.set(Field::StochK, k);
        row.set(Field::StochD, d);
    }

    apply_simple(
        &mut rows,
        Field::WilliamsR,
        &calculate_williams_r(bars, config.williams_r_period),
        diagnostics,
    );

    let returns = daily_return.simple_values();
    let latest_return = if returns.iter().all(Option::is_none) {
        Some(0.0)
    } else {
        returns.last().copied().flatten()
    };
    let correlation = market.sp500_correlation(latest_return);
    for row in rows.iter_mut() {
        row.set(Field::Vix, market.vix);
        row.set(Field::Dxy, market.dxy);
        row.set(Field::Treasury10y, market.treasury_10y);
        row.set(Field::Sp500Correlation, correlation);
    }

    diagnostics.info(
        COMPONENT,
        &format!("calculated technical indicators for {} bars", rows.len()),
    );
    rows
}

/// Keeps the last `days` rows, restricted to `selected` fields when given,
/// rounded to 4 decimals with undefined values replaced by 0.
///
/// The zero fill is lossy: a 0 here may be a true reading or a missing one.
pub fn finalize_rows(
    rows: &[IndicatorRow],
    days: usize,
    selected: Option<&[Field]>,
) -> Vec<IndicatorRow> {
    let start = rows.len().saturating_sub(days);
    rows[start..]
        .iter()
        .map(|row| IndicatorRow {
            date: row.date,
            values: row
                .values
                .iter()
                .filter(|(field, _)| selected.is_none_or(|s| s.contains(*field)))
                .map(|(field, value)| {
                    let v = value.filter(|v| v.is_finite()).map(|v| round_to(v, 4));
                    (*field, Some(v.unwrap_or(0.0)))
                })
                .collect(),
        })
        .collect()
}

fn apply_simple(
    rows: &mut [IndicatorRow],
    field: Field,
    series: &IndicatorSeries,
    diagnostics: &dyn DiagnosticsPort,
) {
    report(series, diagnostics);
    for (row, value) in rows.iter_mut().zip(series.simple_values()) {
        row.set(field, value);
    }
}

fn report(series: &IndicatorSeries, diagnostics: &dyn DiagnosticsPort) {
    diagnostics.debug(
        COMPONENT,
        &format!(
            "{}: {}/{} points defined",
            series.indicator_type,
            series.defined_count(),
            series.values.len()
        ),
    );
}
