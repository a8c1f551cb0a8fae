use crate::{SlError, SlResult};

pub fn ensure_finite(v: f64, what: &'static str) -> SlResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SlError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: f64, what: &'static str) -> SlResult<f64> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(SlError::InvalidArg { what, value: v })
    }
}

/// Finite and not negative.
pub fn ensure_non_negative(v: f64, what: &'static str) -> SlResult<f64> {
    let v = ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(SlError::InvalidArg { what, value: v })
    }
}

/// Round to `digits` decimal places using the exact decimal expansion of `v`.
///
/// Going through the formatter avoids the double rounding of `(v * 100).round() / 100`.
pub fn round_to(v: f64, digits: usize) -> f64 {
    if !v.is_finite() {
        return v;
    }
    format!("{v:.digits$}").parse().unwrap_or(v)
}
