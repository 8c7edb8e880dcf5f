//! Sample standard deviation.
//!
//! STDDEV(x) = sqrt(sum((x[j] - mean(x))^2) / (n - 1))
//!
//! Uses the n-1 denominator so a rolling window matches the usual
//! dataframe rolling std. Fewer than two samples is undefined.

pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1) as f64;

    Some(variance.sqrt())
}
