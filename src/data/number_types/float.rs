//! # Floating point numbers
//!
//! Fast, and what solvers report values in. Cuts computed with floats are exact up to rounding,
//! which is why tolerances are used when comparing against reported values.
use crate::data::number_types::traits::RealField;

/// Floats outside this range don't fit in an `i64`.
const I64_RANGE_BOUND: f64 = 9_223_372_036_854_775_808_f64;

impl RealField for f64 {
    fn from_integer(value: i64) -> Self {
        value as f64
    }

    fn nearest_integer(&self) -> Option<i64> {
        let rounded = self.round_ties_even();
        if rounded.is_finite() && (-I64_RANGE_BOUND..I64_RANGE_BOUND).contains(&rounded) {
            Some(rounded as i64)
        } else {
            None
        }
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}
