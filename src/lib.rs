//! # Outer approximations of proximal terms
//!
//! Proximal terms `(x - target)^2` are linearized by introducing a variable `y` for `x^2` and
//! bounding it from below by cuts, the tangents (or, for integer variables, the secants) of the
//! parabola. Cuts are added lazily, whenever a solve reports a point that violates `y = x^2` by
//! more than a tolerance, such that the relaxation is only as tight as it needs to be.
//!
//! Computations are generic over the number type, and can be carried out exactly with rational
//! numbers.
#![warn(missing_docs)]

pub mod algorithm;
pub mod data;

#[cfg(test)]
mod tests;
