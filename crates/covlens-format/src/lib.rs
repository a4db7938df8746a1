//! # covlens-format
//!
//! **Tier 1 (Formatting)**
//!
//! Renders values and deltas as text. Every function takes the [`Locale`]
//! explicitly; nothing reads process-wide locale state.
//!
//! ## What belongs here
//! * Percentage, count and delta text (`"75.00%"`, `"+5.33%"`, `"±0%"`)
//! * Parsing formatted percentages back into numbers
//! * REST-shaped JSON maps keyed by metric tag
//!
//! ## What does NOT belong here
//! * Computing values or deltas
//! * HTML rendering (see `covlens-source`)

#![forbid(unsafe_code)]

mod rest;

pub use rest::{coverage_to_json, delta_to_json, statistics_to_json};

use covlens_math::{Fraction, round_f64};
use covlens_types::{Locale, Metric, Value, ValueKind};

/// Text shown for a ratio without any items.
pub const UNDEFINED: &str = "n/a";

/// Text shown for a zero delta of a coverage metric.
pub const ZERO_DELTA: &str = "±0%";

/// Format `value` with two decimals and the locale's decimal separator.
#[must_use]
pub fn format_decimal(value: f64, locale: Locale) -> String {
    let rounded = round_f64(value, 2);
    // `{:.2}` renders negative zero as "-0.00"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{rounded:.2}");
    match locale.decimal_separator() {
        '.' => text,
        sep => text.replace('.', &sep.to_string()),
    }
}

/// `"75.00%"`.
#[must_use]
pub fn format_percentage(percentage: f64, locale: Locale) -> String {
    format!("{}%", format_decimal(percentage, locale))
}

/// Short form: percentage for ratios, amount for counts.
#[must_use]
pub fn format_value(value: &Value, locale: Locale) -> String {
    match value {
        Value::Ratio(ratio) => match ratio.percentage() {
            Some(p) => format_percentage(p, locale),
            None => UNDEFINED.to_string(),
        },
        Value::Count(amount) => amount.to_string(),
        Value::Fraction(fraction) => format_decimal(fraction.to_f64(), locale),
    }
}

/// Long form: ratios also show `(covered/total)`.
#[must_use]
pub fn format_details(value: &Value, locale: Locale) -> String {
    match value {
        Value::Ratio(ratio) if ratio.is_defined() => format!(
            "{} ({}/{})",
            format_value(value, locale),
            ratio.covered,
            ratio.total()
        ),
        _ => format_value(value, locale),
    }
}

/// `"Line Coverage: 75.00%"`.
#[must_use]
pub fn format_value_with_metric(metric: Metric, value: &Value, locale: Locale) -> String {
    format!("{}: {}", metric.display_name(), format_value(value, locale))
}

/// Signed delta text for `metric`.
///
/// Coverage deltas are percentage points with two decimals and are clamped
/// to ±100 for display only. Count deltas are signed integers.
#[must_use]
pub fn format_delta(metric: Metric, delta: Fraction, locale: Locale) -> String {
    match metric.kind() {
        ValueKind::Ratio => {
            if delta.is_zero() {
                return ZERO_DELTA.to_string();
            }
            let magnitude = delta.abs().to_f64().min(100.0);
            format!("{}{}%", sign(delta), format_decimal(magnitude, locale))
        }
        ValueKind::Count if delta.is_integer() => {
            if delta.is_zero() {
                "0".to_string()
            } else {
                format!("{}{}", sign(delta), delta.numerator().unsigned_abs())
            }
        }
        ValueKind::Count | ValueKind::Fraction => {
            if delta.is_zero() {
                return format_decimal(0.0, locale);
            }
            format!(
                "{}{}",
                sign(delta),
                format_decimal(delta.abs().to_f64(), locale)
            )
        }
    }
}

fn sign(delta: Fraction) -> &'static str {
    if delta.signum() < 0 { "-" } else { "+" }
}

/// Parse text produced by [`format_percentage`] or [`format_details`] back
/// into a number. Returns `None` for `n/a` or malformed input.
#[must_use]
pub fn parse_percentage(text: &str, locale: Locale) -> Option<f64> {
    let head = text.split_whitespace().next()?;
    let number = head.strip_suffix('%')?;
    let normalized = match locale.decimal_separator() {
        '.' => number.to_string(),
        sep => number.replace(sep, "."),
    };
    normalized.parse::<f64>().ok()
}
