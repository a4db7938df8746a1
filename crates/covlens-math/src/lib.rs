//! # covlens-math
//!
//! **Tier 0 (Numeric Primitives)**
//!
//! Deterministic numeric helpers shared by the covlens microcrates.
//!
//! ## What belongs here
//! * Exact rational arithmetic ([`Fraction`]) with overflow-safe reduction
//! * Rounding and percentage helpers
//!
//! ## What does NOT belong here
//! * Metric semantics (see `covlens-types`)
//! * Locale-aware rendering (see `covlens-format`)

#![forbid(unsafe_code)]

mod fraction;

pub use fraction::{Fraction, MathError};

/// Round a floating point value to `decimals` decimal places.
#[must_use]
pub fn round_f64(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Percentage of `covered` in `total`, or `None` when `total` is zero.
#[must_use]
pub fn safe_percentage(covered: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(covered as f64 * 100.0 / total as f64)
    }
}

/// Arithmetic mean of a slice, `None` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
