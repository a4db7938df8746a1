use std::ops::Add;

use covlens_math::{Fraction, safe_percentage};
use serde::{Deserialize, Serialize};

use crate::{TypesError, ValueKind};

/// Covered and missed items of a coverage metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ratio {
    pub covered: u64,
    pub missed: u64,
}

impl Ratio {
    #[must_use]
    pub const fn new(covered: u64, missed: u64) -> Self {
        Ratio { covered, missed }
    }

    #[must_use]
    pub const fn total(self) -> u64 {
        self.covered.saturating_add(self.missed)
    }

    /// `false` for an empty ratio, which renders as `n/a`.
    #[must_use]
    pub const fn is_defined(self) -> bool {
        self.total() > 0
    }

    #[must_use]
    pub fn percentage(self) -> Option<f64> {
        safe_percentage(self.covered, self.total())
    }

    /// Exact percentage, used by the delta engine.
    #[must_use]
    pub fn exact_percentage(self) -> Option<Fraction> {
        Fraction::percentage(self.covered, self.total())
    }
}

impl Add for Ratio {
    type Output = Ratio;

    fn add(self, other: Ratio) -> Ratio {
        Ratio {
            covered: self.covered.saturating_add(other.covered),
            missed: self.missed.saturating_add(other.missed),
        }
    }
}

/// A metric value. The variant must match the metric's [`ValueKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Ratio(Ratio),
    Count(i64),
    Fraction(Fraction),
}

impl Value {
    #[must_use]
    pub const fn ratio(covered: u64, missed: u64) -> Self {
        Value::Ratio(Ratio::new(covered, missed))
    }

    #[must_use]
    pub const fn count(amount: i64) -> Self {
        Value::Count(amount)
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::Ratio(_) => ValueKind::Ratio,
            Value::Count(_) => ValueKind::Count,
            Value::Fraction(_) => ValueKind::Fraction,
        }
    }

    /// Neutral element of [`Value::combine`] for the given kind.
    #[must_use]
    pub const fn identity(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Ratio => Value::Ratio(Ratio::new(0, 0)),
            ValueKind::Count => Value::Count(0),
            ValueKind::Fraction => Value::Fraction(Fraction::ZERO),
        }
    }

    /// Combine two values of the same metric.
    ///
    /// Ratios add component-wise, counts add, fractions keep the maximum.
    pub fn combine(self, other: Value) -> Result<Value, TypesError> {
        match (self, other) {
            (Value::Ratio(a), Value::Ratio(b)) => Ok(Value::Ratio(a + b)),
            (Value::Count(a), Value::Count(b)) => Ok(Value::Count(a.saturating_add(b))),
            (Value::Fraction(a), Value::Fraction(b)) => Ok(Value::Fraction(a.max(b))),
            (a, b) => Err(TypesError::IncompatibleValues {
                left: a.kind(),
                right: b.kind(),
            }),
        }
    }

    /// The larger of two values. Ratios compare by percentage and an
    /// undefined ratio loses against any defined one.
    pub fn max(self, other: Value) -> Result<Value, TypesError> {
        match (self, other) {
            (Value::Ratio(a), Value::Ratio(b)) => {
                let pick_b = match (a.exact_percentage(), b.exact_percentage()) {
                    (Some(pa), Some(pb)) => pb > pa,
                    (None, Some(_)) => true,
                    _ => false,
                };
                Ok(Value::Ratio(if pick_b { b } else { a }))
            }
            (Value::Count(a), Value::Count(b)) => Ok(Value::Count(a.max(b))),
            (Value::Fraction(a), Value::Fraction(b)) => Ok(Value::Fraction(a.max(b))),
            (a, b) => Err(TypesError::IncompatibleValues {
                left: a.kind(),
                right: b.kind(),
            }),
        }
    }

    /// Numeric reading used by gates and charts: ratio percentage, count
    /// amount or fraction value. `None` for an undefined ratio.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Ratio(r) => r.percentage(),
            Value::Count(n) => Some(*n as f64),
            Value::Fraction(f) => Some(f.to_f64()),
        }
    }

    #[must_use]
    pub fn is_defined(&self) -> bool {
        match self {
            Value::Ratio(r) => r.is_defined(),
            _ => true,
        }
    }
}
