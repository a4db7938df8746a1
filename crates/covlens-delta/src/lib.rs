//! # covlens-delta
//!
//! **Tier 3 (Delta Engine)**
//!
//! Signed metric changes between two builds, always current minus
//! reference.
//!
//! ## What belongs here
//! * [`compute_delta`] over two [`Statistics`]
//! * [`build_coverage_statistics`]: values and deltas of every baseline
//!
//! ## What does NOT belong here
//! * Choosing the reference build (a collaborator's job)
//! * Rendering deltas (see `covlens-format`)

#![forbid(unsafe_code)]

mod build;

pub use build::build_coverage_statistics;

use covlens_math::Fraction;
use covlens_types::{Delta, Metric, Statistics, Value};
use log::{debug, warn};

/// Difference per metric present on both sides.
///
/// * ratio metrics: exact percentage points, `100 * (c1/t1 - c2/t2)`
/// * count metrics: integer difference
/// * fraction metrics: fraction difference
///
/// A metric missing on one side, an empty ratio on either side, or values of
/// different kinds are not comparable and are left out.
#[must_use]
pub fn compute_delta(current: &Statistics, reference: &Statistics) -> Delta {
    let mut delta = Delta::new();
    for (metric, now) in current.iter() {
        let Some(before) = reference.get(metric) else {
            continue;
        };
        match difference(metric, now, before) {
            Some(change) => {
                delta.insert(metric, change);
            }
            None => debug!("{metric}: not comparable, omitted from delta"),
        }
    }
    delta
}

fn difference(metric: Metric, current: &Value, reference: &Value) -> Option<Fraction> {
    match (current, reference) {
        (Value::Ratio(now), Value::Ratio(before)) => {
            Some(now.exact_percentage()? - before.exact_percentage()?)
        }
        (Value::Count(now), Value::Count(before)) => Some(Fraction::difference(*now, *before)),
        (Value::Fraction(now), Value::Fraction(before)) => Some(*now - *before),
        _ => {
            warn!(
                "{metric}: {} value cannot be compared with {} value",
                current.kind(),
                reference.kind()
            );
            None
        }
    }
}
