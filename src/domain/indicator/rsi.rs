//! RSI (Relative Strength Index) indicator.
//!
//! Uses simple rolling means of gains and losses over the trailing n
//! close-to-close changes (no Wilder smoothing):
//! - avg_gain = mean(max(delta, 0)), avg_loss = mean(max(-delta, 0))
//! - RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//!
//! If avg_loss == 0 the ratio is undefined and so is the point; it is not
//! reported as 100.
//!
//! Warmup: first n bars are invalid (need n price changes).

use crate::domain::indicator::{mean, rolling, IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let deltas: Vec<Option<f64>> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            if i == 0 {
                None
            } else {
                Some(bar.close - bars[i - 1].close)
            }
        })
        .collect();

    let gains: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|v| v.max(0.0))).collect();
    let losses: Vec<Option<f64>> = deltas.iter().map(|d| d.map(|v| (-v).max(0.0))).collect();

    let avg_gain = rolling(&gains, period, mean);
    let avg_loss = rolling(&losses, period, mean);

    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let rsi = match (avg_gain[i], avg_loss[i]) {
                (Some(gain), Some(loss)) if loss > 0.0 => {
                    Some(100.0 - (100.0 / (1.0 + gain / loss)))
                }
                _ => None,
            };
            IndicatorPoint::simple(bar.date, rsi)
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}
