//! # Linearized proximal terms
//!
//! A proximal term `(x - target)^2` penalizes deviation from a reference point. Writing `y` for
//! `x^2`, it equals `y - 2 target x + target^2`, which is linear in `x` and `y`. Together with an
//! outer approximation of `y = x^2`, the term can be handled by a linear solver.
//!
//! The refinement loop here alternates between solving a relaxation and adding cuts, until the
//! reported point is within tolerance of the parabola.
use std::fmt::Debug;

use tracing::{debug, info, warn};

use crate::algorithm::OptimizationResult;
use crate::algorithm::outer_approximation::OuterApproximation;
use crate::algorithm::outer_approximation::storage::CutStore;
use crate::algorithm::proximal::relaxation::{Relaxation, RelaxedSolution};
use crate::data::number_types::traits::RealField;

pub mod relaxation;

/// The penalty `(x - target)^2`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProximalTerm<F> {
    target: F,
}

impl<F: RealField> ProximalTerm<F> {
    /// Penalize deviation from `target`.
    pub fn new(target: F) -> Self {
        Self { target }
    }

    /// The reference point.
    pub fn target(&self) -> &F {
        &self.target
    }

    /// Coefficient of `x` in the linearized term.
    pub fn linear_coefficient(&self) -> F {
        -(self.target.clone() + self.target.clone())
    }

    /// Constant of the linearized term.
    pub fn constant(&self) -> F {
        self.target.squared()
    }

    /// Value of the linearized term `y - 2 target x + target^2`.
    ///
    /// Equals `exact(x)` when `y = x^2`.
    pub fn linearized(&self, x: &F, y: &F) -> F {
        y.clone() + self.linear_coefficient() * x.clone() + self.constant()
    }

    /// Value of the term itself.
    pub fn exact(&self, x: &F) -> F {
        (x.clone() - self.target.clone()).squared()
    }
}

/// When to stop refining.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefinementSettings<F> {
    /// Largest acceptable value of `x^2 - y` at the reported point.
    pub tolerance: F,
    /// Maximum number of solves.
    pub max_iterations: usize,
}

impl<F: RealField> Default for RefinementSettings<F> {
    fn default() -> Self {
        Self {
            tolerance: F::one() / F::from_integer(100),
            max_iterations: 1000,
        }
    }
}

/// Outcome of a refinement run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefinementSummary<F> {
    /// Optimum of the last relaxation that was solved.
    pub solution: RelaxedSolution<F>,
    /// Number of times the relaxation was solved.
    pub nr_iterations: usize,
    /// Number of cuts of the approximation at the end.
    pub nr_cuts: usize,
    /// Whether the last solution was within tolerance.
    pub converged: bool,
}

/// Solve and add cuts until the approximation is tight enough at the optimum.
///
/// The relaxation should have received all cuts of the approximation, typically by passing it as
/// the sink when the approximation was created.
///
/// # Arguments
///
/// * `approximation`: Outer approximation of the square of the variable in the relaxation.
/// * `relaxation`: Model to solve, receives all new cuts.
/// * `term`: The proximal term that is minimized.
/// * `store`: Where the approximation keeps its cuts.
/// * `settings`: Tolerance and iteration limit.
///
/// # Return value
///
/// A summary of the run, or `Infeasible` if the relaxation has no solution.
pub fn refine<I, F, A, S>(
    approximation: &mut A,
    relaxation: &mut Relaxation<F>,
    term: &ProximalTerm<F>,
    store: &mut S,
    settings: &RefinementSettings<F>,
) -> OptimizationResult<RefinementSummary<F>>
where
    I: Debug,
    F: RealField,
    A: OuterApproximation<I, F>,
    S: CutStore<I, F>,
{
    let mut nr_iterations = 0;
    loop {
        nr_iterations += 1;
        let solution = match relaxation.solve(term) {
            OptimizationResult::FiniteOptimum(solution) => solution,
            OptimizationResult::Infeasible => {
                warn!(variable = ?approximation.variable_index(), "relaxation is infeasible");
                return OptimizationResult::Infeasible;
            },
        };
        debug!(nr_iterations, x = %solution.x, y = %solution.y, objective = %solution.objective, "solved");

        let cut_added = approximation
            .check_tolerance_and_maybe_add_cut(
                &solution.x, &solution.y, &settings.tolerance, store, relaxation,
            )
            .unwrap_or_else(|never| match never {});

        let converged = !cut_added;
        if converged || nr_iterations >= settings.max_iterations {
            if converged {
                info!(
                    variable = ?approximation.variable_index(),
                    nr_iterations,
                    nr_cuts = approximation.nr_cuts(),
                    x = %solution.x,
                    "converged"
                );
            } else {
                warn!(variable = ?approximation.variable_index(), nr_iterations, "iteration limit reached");
            }

            return OptimizationResult::FiniteOptimum(RefinementSummary {
                solution,
                nr_iterations,
                nr_cuts: approximation.nr_cuts(),
                converged,
            });
        }
    }
}
