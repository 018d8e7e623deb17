//! # Algorithms
pub mod outer_approximation;
pub mod proximal;

/// A relaxation is either infeasible or has a finite optimum.
///
/// All variables are bounded, so unboundedness doesn't occur.
#[allow(missing_docs)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OptimizationResult<T> {
    Infeasible,
    FiniteOptimum(T),
}
