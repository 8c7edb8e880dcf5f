//! Simple Moving Average indicator.
//!
//! SMA(n)[t] = mean(C[t-n+1..=t]). Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{mean, rolling, IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_sma(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let closes: Vec<Option<f64>> = bars.iter().map(|b| Some(b.close)).collect();
    let sma = rolling(&closes, period, mean);

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values: bars
            .iter()
            .zip(sma)
            .map(|(bar, v)| IndicatorPoint::simple(bar.date, v))
            .collect(),
    }
}
