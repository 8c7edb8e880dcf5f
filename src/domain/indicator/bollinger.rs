//! Bollinger bands around a trailing mean of closes.
//!
//! `upper = mean + k * sd` and `lower = mean - k * sd`, where `sd` is the
//! sample standard deviation (n-1) of the same window. The pipeline uses a
//! 20-bar window with `k = 2`. Points before the window fills stay invalid.

use crate::domain::indicator::{
    sample_stddev, IndicatorPoint, IndicatorSeries, IndicatorType, IndicatorValue,
};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_bollinger(
    bars: &[OhlcvBar],
    period: usize,
    multiplier: f64,
) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());

    for i in 0..bars.len() {
        let date = bars[i].date;

        let bands = if period > 0 && i + 1 >= period {
            let window: Vec<f64> = bars[i + 1 - period..=i].iter().map(|b| b.close).collect();
            let middle = window.iter().sum::<f64>() / period as f64;
            sample_stddev(&window)
                .map(|sd| (middle + multiplier * sd, middle, middle - multiplier * sd))
        } else {
            None
        };

        let (upper, middle, lower) = bands.unwrap_or((0.0, 0.0, 0.0));
        values.push(IndicatorPoint {
            date,
            valid: bands.is_some(),
            value: IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
            },
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Bollinger { period, multiplier },
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(prices: &[f64]) -> Vec<OhlcvBar> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                date: NaiveDate::from_ymd_opt(2024, 1, (i + 1) as u32).unwrap(),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    fn bands(point: &IndicatorPoint) -> (f64, f64, f64) {
        match point.value {
            IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
            } => (upper, middle, lower),
            _ => panic!("Expected Bollinger value"),
        }
    }

    #[test]
    fn bollinger_warmup() {
        let bars = make_bars(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let series = calculate_bollinger(&bars, 3, 2.0);

        assert!(!series.values[0].valid);
        assert!(!series.values[1].valid);
        assert!(series.values[2].valid);
        assert!(series.values[3].valid);
        assert!(series.values[4].valid);
    }

    #[test]
    fn bollinger_constant_values() {
        let bars = make_bars(&[100.0, 100.0, 100.0, 100.0, 100.0]);
        let series = calculate_bollinger(&bars, 3, 2.0);

        let (upper, middle, lower) = bands(&series.values[2]);
        assert!((middle - 100.0).abs() < f64::EPSILON);
        assert!((upper - 100.0).abs() < f64::EPSILON);
        assert!((lower - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn bollinger_basic_calculation() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_bollinger(&bars, 3, 2.0);

        // sample variance: (100 + 0 + 100) / 2 = 100 → stddev 10
        let (upper, middle, lower) = bands(&series.values[2]);
        assert!((middle - 20.0).abs() < 1e-10);
        assert!((upper - 40.0).abs() < 1e-10);
        assert!((lower - 0.0).abs() < 1e-10);
    }

    #[test]
    fn bollinger_multiplier_variations() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_bollinger(&bars, 3, 1.5);

        let (upper, _, lower) = bands(&series.values[2]);
        assert!((upper - 35.0).abs() < 1e-10);
        assert!((lower - 5.0).abs() < 1e-10);
    }

    #[test]
    fn bollinger_period_one_is_undefined() {
        let series = calculate_bollinger(&make_bars(&[10.0, 20.0]), 1, 2.0);
        assert!(series.values.iter().all(|p| !p.valid));
    }

    #[test]
    fn bollinger_indicator_type() {
        let series = calculate_bollinger(&make_bars(&[10.0]), 20, 2.0);
        assert_eq!(
            series.indicator_type,
            IndicatorType::Bollinger {
                period: 20,
                multiplier: 2.0
            }
        );
    }

    #[test]
    fn bollinger_fractional_multiplier_is_exact() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        let series = calculate_bollinger(&bars, 3, 2.125);

        // stddev 10, so the bands sit 21.25 either side of 20
        let (upper, _, lower) = bands(&series.values[2]);
        assert!((upper - 41.25).abs() < 1e-10);
        assert!((lower + 1.25).abs() < 1e-10);
    }
}
