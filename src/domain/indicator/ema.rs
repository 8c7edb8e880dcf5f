//! Exponential moving average.
//!
//! alpha = 2/(span+1). The average is the bias-adjusted weighted mean of all
//! values seen so far, with weight (1-alpha)^i on the value i bars back:
//!
//!   EMA[t] = sum(w_i * x[t-i]) / sum(w_i)
//!
//! so the series is seeded by its leading values and is defined from t = 0.

/// Bias-adjusted exponentially weighted mean of `values` for the given span.
pub fn ewm_mean(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let decay = 1.0 - alpha;
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    values
        .iter()
        .map(|&x| {
            numerator = x + decay * numerator;
            denominator = 1.0 + decay * denominator;
            numerator / denominator
        })
        .collect()
}
