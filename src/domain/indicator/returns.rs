//! Daily return and return volatility.
//!
//! RETURN[t] = C[t] / C[t-1] - 1, undefined at t = 0.
//! VOLATILITY(n)[t] = sample stddev of RETURN over the trailing n bars,
//! undefined until n consecutive returns exist (first valid index is n).

use crate::domain::indicator::{
    rolling, sample_stddev, IndicatorPoint, IndicatorSeries, IndicatorType,
};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_daily_return(bars: &[OhlcvBar]) -> IndicatorSeries {
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let value = if i == 0 {
                None
            } else {
                bar.return_from(bars[i - 1].close)
            };
            IndicatorPoint::simple(bar.date, value)
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::DailyReturn,
        values,
    }
}

pub fn calculate_volatility(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let returns = calculate_daily_return(bars).simple_values();
    let vol = rolling(&returns, period, sample_stddev);

    IndicatorSeries {
        indicator_type: IndicatorType::Volatility(period),
        values: bars
            .iter()
            .zip(vol)
            .map(|(bar, v)| IndicatorPoint::simple(bar.date, v))
            .collect(),
    }
}
