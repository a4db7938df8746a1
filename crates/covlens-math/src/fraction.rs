//! Exact rational numbers over `i64`.
//!
//! Every result is computed in `i128`, reduced by the greatest common divisor
//! and only then narrowed back to `i64`. A reduced result that still does not
//! fit is approximated by halving numerator and denominator (integers
//! saturate), so arithmetic near the integer boundary never wraps and never
//! panics.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`Fraction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("fraction {numerator}/0 has a zero denominator")]
    ZeroDenominator { numerator: i64 },
}

/// A reduced fraction with a strictly positive denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFraction", into = "RawFraction")]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

#[derive(Serialize, Deserialize)]
struct RawFraction {
    numerator: i64,
    denominator: i64,
}

impl TryFrom<RawFraction> for Fraction {
    type Error = MathError;

    fn try_from(raw: RawFraction) -> Result<Self, Self::Error> {
        Fraction::new(raw.numerator, raw.denominator)
    }
}

impl From<Fraction> for RawFraction {
    fn from(value: Fraction) -> Self {
        RawFraction {
            numerator: value.numerator,
            denominator: value.denominator,
        }
    }
}

impl Fraction {
    pub const ZERO: Fraction = Fraction {
        numerator: 0,
        denominator: 1,
    };

    pub const ONE: Fraction = Fraction {
        numerator: 1,
        denominator: 1,
    };

    /// Build a reduced fraction; the sign is carried by the numerator.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, MathError> {
        if denominator == 0 {
            return Err(MathError::ZeroDenominator { numerator });
        }
        Ok(Self::from_wide(i128::from(numerator), i128::from(denominator)))
    }

    /// An integer-valued fraction.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Fraction {
            numerator: value,
            denominator: 1,
        }
    }

    /// `100 * covered / total`, or `None` when `total` is zero.
    #[must_use]
    pub fn percentage(covered: u64, total: u64) -> Option<Self> {
        if total == 0 {
            return None;
        }
        Some(Self::from_wide(
            i128::from(covered) * 100,
            i128::from(total),
        ))
    }

    /// Difference of two integers, saturating at the `i64` bounds.
    #[must_use]
    pub fn difference(current: i64, reference: i64) -> Self {
        Self::from_wide(i128::from(current) - i128::from(reference), 1)
    }

    #[must_use]
    pub const fn numerator(self) -> i64 {
        self.numerator
    }

    #[must_use]
    pub const fn denominator(self) -> i64 {
        self.denominator
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.numerator == 0
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        self.denominator == 1
    }

    /// -1, 0 or 1.
    #[must_use]
    pub const fn signum(self) -> i64 {
        self.numerator.signum()
    }

    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self::from_wide(i128::from(self.numerator).abs(), i128::from(self.denominator))
    }

    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if other > self { other } else { self }
    }

    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if other < self { other } else { self }
    }

    /// Normalize sign, reduce and narrow a wide fraction. `denominator` must
    /// not be zero.
    fn from_wide(numerator: i128, denominator: i128) -> Self {
        debug_assert!(denominator != 0);
        let (mut n, mut d) = if denominator < 0 {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };
        let divisor = gcd(n.unsigned_abs(), d.unsigned_abs());
        if divisor > 1 {
            // divisor <= d <= i128::MAX, so the cast is lossless
            let divisor = divisor as i128;
            n /= divisor;
            d /= divisor;
        }

        while !fits(n) || !fits(d) {
            if d == 1 {
                n = n.clamp(-i128::from(i64::MAX), i128::from(i64::MAX));
                break;
            }
            n /= 2;
            d /= 2;
        }
        if n == 0 {
            d = 1;
        }
        let divisor = gcd(n.unsigned_abs(), d.unsigned_abs());
        if divisor > 1 {
            let divisor = divisor as i128;
            n /= divisor;
            d /= divisor;
        }

        Fraction {
            numerator: n as i64,
            denominator: d as i64,
        }
    }
}

// Symmetric bound so that negation never leaves the range.
fn fits(value: i128) -> bool {
    value.unsigned_abs() <= i64::MAX as u128
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::ZERO
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Fraction::integer(value)
    }
}

// Products of two i64 values stay below 2^126 in magnitude and a sum of two
// such products stays inside i128.
impl Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        let a = i128::from(self.numerator);
        let b = i128::from(self.denominator);
        let c = i128::from(rhs.numerator);
        let d = i128::from(rhs.denominator);
        Fraction::from_wide(a * d + c * b, b * d)
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        let a = i128::from(self.numerator);
        let b = i128::from(self.denominator);
        let c = i128::from(rhs.numerator);
        let d = i128::from(rhs.denominator);
        Fraction::from_wide(a * d - c * b, b * d)
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction::from_wide(-i128::from(self.numerator), i128::from(self.denominator))
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = i128::from(self.numerator) * i128::from(other.denominator);
        let right = i128::from(other.numerator) * i128::from(self.denominator);
        left.cmp(&right)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_reduces_and_normalizes_sign() {
        let f = Fraction::new(6, -8).unwrap();
        assert_eq!(f.numerator(), -3);
        assert_eq!(f.denominator(), 4);
    }

    #[test]
    fn new_rejects_zero_denominator() {
        assert_eq!(
            Fraction::new(3, 0),
            Err(MathError::ZeroDenominator { numerator: 3 })
        );
    }

    #[test]
    fn zero_has_unit_denominator() {
        let f = Fraction::new(0, -17).unwrap();
        assert_eq!(f, Fraction::ZERO);
        assert_eq!(f.denominator(), 1);
    }

    #[test]
    fn percentage_is_exact() {
        let f = Fraction::percentage(1, 3).unwrap();
        assert_eq!(f.numerator(), 100);
        assert_eq!(f.denominator(), 3);
        assert_eq!(Fraction::percentage(1, 0), None);
    }

    #[test]
    fn large_equal_values_reduce_to_one() {
        let f = Fraction::new(i64::MAX - 1, i64::MAX - 1).unwrap();
        assert_eq!(f, Fraction::ONE);
    }

    #[test]
    fn subtraction_near_boundary_does_not_wrap() {
        let a = Fraction::integer(i64::MAX - 1);
        let b = Fraction::integer(i64::MAX - 2);
        assert_eq!(a - b, Fraction::ONE);
        assert_eq!(b - a, -Fraction::ONE);
    }

    #[test]
    fn difference_outside_range_saturates() {
        let f = Fraction::difference(i64::MAX, i64::MIN);
        assert_eq!(f, Fraction::integer(i64::MAX));
    }

    #[test]
    fn oversized_denominator_is_approximated() {
        let tiny = Fraction::new(1, i64::MAX).unwrap();
        let other = Fraction::new(1, i64::MAX - 1).unwrap();
        let sum = tiny + other;
        assert!(sum.to_f64() > 0.0);
        assert!(sum.denominator() > 0);
    }

    #[test]
    fn mixed_denominator_sum() {
        let f = Fraction::new(1, 3).unwrap() + Fraction::new(1, 6).unwrap();
        assert_eq!(f, Fraction::new(1, 2).unwrap());
    }

    #[test]
    fn ordering_uses_value() {
        let third = Fraction::new(1, 3).unwrap();
        let half = Fraction::new(1, 2).unwrap();
        assert!(third < half);
        assert_eq!(third.max(half), half);
        assert_eq!(third.min(half), third);
    }

    #[test]
    fn display_omits_unit_denominator() {
        assert_eq!(Fraction::integer(-2558).to_string(), "-2558");
        assert_eq!(Fraction::new(100, 39).unwrap().to_string(), "100/39");
    }

    #[test]
    fn serde_rejects_zero_denominator() {
        let err = serde_json::from_str::<Fraction>(r#"{"numerator":1,"denominator":0}"#);
        assert!(err.is_err());
        let ok: Fraction = serde_json::from_str(r#"{"numerator":2,"denominator":4}"#).unwrap();
        assert_eq!(ok, Fraction::new(1, 2).unwrap());
    }
}
