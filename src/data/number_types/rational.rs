//! # Rational numbers
//!
//! Primary way to do exact computation. Cuts derived from rational points have rational
//! coefficients, so a whole refinement run can be carried out without rounding errors.
use num::{BigInt, Integer};
use num::rational::Ratio;
use num_traits::ToPrimitive;

use crate::data::number_types::traits::RealField;

/// Aliased type to ease a possible transition to own variant in the future.
pub type Rational64 = num::rational::Rational64;
/// Aliased type to ease a possible transition to own variant in the future.
pub type RationalBig = num::rational::BigRational;

/// The integer closest to `value`, half-way cases going to the even neighbour.
fn round_half_to_even<T: Clone + Integer>(value: &Ratio<T>) -> T {
    // The denominator of a reduced ratio is positive
    let (floor, remainder) = value.numer().div_mod_floor(value.denom());
    let twice_remainder = remainder.clone() + remainder;

    if twice_remainder < *value.denom() || (twice_remainder == *value.denom() && floor.is_even()) {
        floor
    } else {
        floor + T::one()
    }
}

impl RealField for Ratio<i64> {
    fn from_integer(value: i64) -> Self {
        Ratio::from_integer(value)
    }

    fn nearest_integer(&self) -> Option<i64> {
        Some(round_half_to_even(self))
    }

    fn is_finite(&self) -> bool {
        true
    }
}

impl RealField for Ratio<BigInt> {
    fn from_integer(value: i64) -> Self {
        Ratio::from_integer(BigInt::from(value))
    }

    fn nearest_integer(&self) -> Option<i64> {
        round_half_to_even(self).to_i64()
    }

    fn is_finite(&self) -> bool {
        true
    }
}

/// Shorthand for creating a rational number in tests.
#[macro_export]
macro_rules! R64 {
    ($value:expr) => {
        $crate::data::number_types::rational::Rational64::from_integer($value)
    };
    ($numer:expr, $denom:expr) => {
        $crate::data::number_types::rational::Rational64::new($numer, $denom)
    };
}

/// Shorthand for creating a rational number in tests.
#[macro_export]
macro_rules! RB {
    ($value:expr) => {
        $crate::data::number_types::rational::RationalBig::from_integer(num::BigInt::from($value))
    };
    ($numer:expr, $denom:expr) => {
        $crate::data::number_types::rational::RationalBig::new(
            num::BigInt::from($numer),
            num::BigInt::from($denom),
        )
    };
}
