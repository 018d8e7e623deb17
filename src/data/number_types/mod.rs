//! # Number types
//!
//! Different data structures and different algorithms are defined over different spaces. This
//! module defines those spaces and provides implementations.
//!
//! A benefit of this approach is that the cut derivations can be tested well for correctness
//! using fractional numbers, while the same code is used without adaptation with floating point
//! numbers reported by a solver.
pub mod traits;
pub mod rational;
pub mod float;
