//! # Errors raised while setting up outer approximations
//!
//! Configuration problems are fatal: no manager is created for a variable that can't be
//! approximated. Failures of the solver that cuts are registered with are passed on unchanged.
use thiserror::Error;

use crate::data::linear_program::elements::BoundDirection;

/// A variable can't be approximated with the given configuration.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum ConfigurationError {
    /// The outer approximation needs cuts at both ends of a finite domain.
    #[error(
        "proximal terms can only be linearized for bounded variables, but variable {variable} \
        has no finite {direction} bound"
    )]
    MissingBound {
        /// Description of the variable.
        variable: String,
        /// The bound that is absent.
        direction: BoundDirection,
    },
    /// The domain of the variable is empty.
    #[error("variable {variable} has lower bound {lower} above its upper bound {upper}")]
    InvertedBounds {
        /// Description of the variable.
        variable: String,
        /// Value of the lower bound.
        lower: String,
        /// Value of the upper bound.
        upper: String,
    },
}

/// Errors encountered while constructing an outer approximation.
///
/// Generic over the error type `E` of the constraint sink that receives the initial cuts.
#[derive(Error, Debug)]
pub enum ApproximationError<E> {
    /// The variable isn't suitable for approximation.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The constraint sink refused an initial cut.
    #[error("registering an initial cut failed: {0}")]
    Sink(#[source] E),
}
