//! Numeric helpers shared by every published figure.
//!
//! Episode metrics and orchestration plans are compared field-for-field
//! against answers from a remote evaluation service, so every rounded value
//! goes through [`round_dp`] with the same precision on both sides.

/// Round `value` to `places` decimal places, halves away from zero.
///
/// Non-finite inputs are returned unchanged.
#[inline]
pub fn round_dp(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f64::clamp` this never panics: when `min > max` the lower bound
/// wins, and a NaN input is replaced by a bound instead of propagating.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}
