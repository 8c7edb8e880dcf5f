//! Williams %R.
//!
//! %R[t] = -100 * (HH(n) - C[t]) / (HH(n) - LL(n)), in [-100, 0].
//! Undefined during warmup and when the trailing range is flat.

use crate::domain::indicator::stochastic::range_extremes;
use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_williams_r(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let value = range_extremes(bars, i, period).and_then(|(highest, lowest)| {
                let range = highest - lowest;
                (range != 0.0).then(|| -100.0 * (highest - bar.close) / range)
            });
            IndicatorPoint::simple(bar.date, value)
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::WilliamsR(period),
        values,
    }
}
