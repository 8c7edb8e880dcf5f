//! Stochastic Oscillator (%K / %D).
//!
//! %K[t] = 100 * (C[t] - LL(k)) / (HH(k) - LL(k))
//! %D[t] = mean(%K over the trailing d bars)
//!
//! where LL/HH are the lowest low and highest high of the trailing k bars.
//! A flat range (HH == LL) leaves %K undefined, and any %D window touching
//! an undefined %K is undefined too.

use crate::domain::indicator::{mean, rolling, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_stochastic(bars: &[OhlcvBar], k_period: usize, d_period: usize) -> IndicatorSeries {
    let k_values = percent_k(bars, k_period);
    let d_values = rolling(&k_values, d_period, mean);

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorPoint {
            date: bar.date,
            valid: k_values[i].is_some(),
            value: IndicatorValue::Stochastic {
                k: k_values[i],
                d: d_values[i],
            },
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Stochastic { k_period, d_period },
        values,
    }
}

/// Highest high and lowest low of the trailing `period` bars ending at `i`.
pub(crate) fn range_extremes(bars: &[OhlcvBar], i: usize, period: usize) -> Option<(f64, f64)> {
    if period == 0 || i + 1 < period {
        return None;
    }
    let window = &bars[i + 1 - period..=i];
    let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    Some((highest, lowest))
}

fn percent_k(bars: &[OhlcvBar], period: usize) -> Vec<Option<f64>> {
    (0..bars.len())
        .map(|i| {
            let (highest, lowest) = range_extremes(bars, i, period)?;
            let range = highest - lowest;
            if range == 0.0 {
                None
            } else {
                Some(100.0 * (bars[i].close - lowest) / range)
            }
        })
        .collect()
}
