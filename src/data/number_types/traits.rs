//! # Traits
//!
//! A hierarchy of number types is defined. The hierarchy is "mathematically exact", but the
//! implementations aren't. That is, the contracts that these traits define, or their names imply,
//! may not be kept precisely. This is due to finite representation of these numbers and is a
//! fundamental problem that cannot be avoided, but perhaps be dealt with differently.
use std::fmt::{Debug, Display};
use std::ops::Neg;

use num_traits::Num;

/// The cut derivations are defined over the ordered fields. All methods containing algorithmic
/// logic should be defined to work on an ordered field.
///
/// Automatically implemented for all types satisfying the trait's bounds.
pub trait OrderedField:
    Num + // Zero, One and the four field operations
    Neg<Output=Self> + // Additive inverse
    PartialOrd +
    // Practicalities
    Clone +
    Display +
    Debug
{
}
impl<T> OrderedField for T
where
    T: Num + Neg<Output=T> + PartialOrd + Clone + Display + Debug,
{
}

/// An ordered field that embeds the integers.
///
/// Outer approximations need to place cuts at the (integer) breakpoints of discrete variables and
/// need to know whether a bound is a proper number at all.
pub trait RealField: OrderedField {
    /// Embed an integer.
    fn from_integer(value: i64) -> Self;

    /// The integer closest to this value.
    ///
    /// Half-way cases are rounded to the even integer.
    ///
    /// # Return value
    ///
    /// `None` if the value is not finite or doesn't fit in an `i64`.
    fn nearest_integer(&self) -> Option<i64>;

    /// Whether this value is a finite number, i.e. not infinite and not NaN.
    fn is_finite(&self) -> bool;

    /// The square of this value.
    fn squared(&self) -> Self {
        self.clone() * self.clone()
    }
}
