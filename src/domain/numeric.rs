//! Rounding helpers shared by the finalising stages.

/// Rounds half away from zero to `places` decimal digits.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// `Some(value)` when finite, `None` for NaN or infinities.
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
