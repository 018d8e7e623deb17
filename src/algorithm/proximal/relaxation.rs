//! # Exact relaxation of a single proximal term
//!
//! Minimizes `y - 2 target x` subject to `lower <= x <= upper`, `y >= 0` and all cuts
//! `y >= m x + b` collected so far, with `x` integral for integer variables.
//!
//! For a fixed `x`, the best `y` is the largest of zero and the cut values. The objective is then
//! a convex, piecewise linear function of `x`, so it attains its minimum at a bound or at a point
//! where two pieces meet. For integer variables, the minimum over the integers is attained next to
//! one of those points. All candidates are evaluated exactly.
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt::Debug;

use itertools::Itertools;
use num_traits::Zero;
use tracing::trace;

use crate::algorithm::OptimizationResult;
use crate::algorithm::outer_approximation::error::ConfigurationError;
use crate::algorithm::outer_approximation::storage::ConstraintSink;
use crate::algorithm::proximal::ProximalTerm;
use crate::data::linear_program::cut::{Cut, CutKey};
use crate::data::linear_program::elements::VariableType;
use crate::data::linear_program::variable::{Bounds, VariableDomain};
use crate::data::number_types::traits::RealField;

/// Optimal point of the relaxation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelaxedSolution<F> {
    /// Value of the approximated variable.
    pub x: F,
    /// Value of the variable standing in for `x^2`.
    pub y: F,
    /// Value of the linearized proximal term, `y - 2 target x + target^2`.
    pub objective: F,
}

/// A model with one variable, its square and the cuts between them.
///
/// Acts as a persistent solver: cuts are registered with it as they are created, after which it
/// can be solved again without rebuilding it. Cuts are accepted for any variable index.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Relaxation<F> {
    variable_type: VariableType,
    bounds: Bounds<F>,
    cuts: Vec<Cut<F>>,
}

impl<F: RealField> Relaxation<F> {
    /// Create a model without any cuts.
    ///
    /// # Arguments
    ///
    /// * `domain`: Bounds and type of the variable.
    /// * `variable`: Describes the variable in case of an error.
    ///
    /// # Errors
    ///
    /// If the domain isn't a finite interval.
    pub fn new<I: Debug>(domain: &VariableDomain<F>, variable: &I) -> Result<Self, ConfigurationError> {
        Ok(Self {
            variable_type: domain.variable_type,
            bounds: domain.bounds(variable)?,
            cuts: Vec::new(),
        })
    }

    /// Cuts registered so far.
    pub fn cuts(&self) -> &[Cut<F>] {
        &self.cuts
    }

    /// Smallest value of `y` for a given `x`.
    fn y_at(&self, x: &F) -> F {
        self.cuts.iter()
            .map(|cut| cut.value_at(x))
            .fold(F::zero(), |largest, value| if value > largest { value } else { largest })
    }

    /// Points at which the piecewise linear objective may be minimal.
    fn breakpoints(&self) -> Vec<F> {
        let mut points = vec![self.bounds.lower().clone(), self.bounds.upper().clone()];

        // Where two cuts cross
        for (first, second) in self.cuts.iter().tuple_combinations() {
            let slope_difference = first.slope().clone() - second.slope().clone();
            if !slope_difference.is_zero() {
                let intercept_difference = second.intercept().clone() - first.intercept().clone();
                points.push(intercept_difference / slope_difference);
            }
        }
        // Where a cut crosses y = 0
        for cut in &self.cuts {
            if !cut.slope().is_zero() {
                points.push(-cut.intercept().clone() / cut.slope().clone());
            }
        }

        points
    }

    /// Points at which the objective is evaluated.
    fn candidates(&self) -> Vec<F> {
        let breakpoints = self.breakpoints();
        let candidates = match self.variable_type {
            VariableType::Continuous => breakpoints,
            VariableType::Integer => breakpoints.iter()
                .filter_map(RealField::nearest_integer)
                .flat_map(|n| [n.checked_sub(1), Some(n), n.checked_add(1)])
                .flatten()
                .map(F::from_integer)
                .collect(),
        };

        candidates.into_iter()
            .filter(|x| self.bounds.contains(x))
            .sorted_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .dedup()
            .collect()
    }

    /// Minimize the linearized proximal term.
    ///
    /// # Return value
    ///
    /// The optimum with the smallest `x`, or `Infeasible` for an integer variable whose bounds
    /// contain no integer.
    pub fn solve(&self, term: &ProximalTerm<F>) -> OptimizationResult<RelaxedSolution<F>> {
        let best = self.candidates().into_iter()
            .map(|x| {
                let y = self.y_at(&x);
                let objective = term.linearized(&x, &y);
                RelaxedSolution { x, y, objective }
            })
            .fold(None, |best: Option<RelaxedSolution<F>>, solution| match best {
                Some(best) if best.objective <= solution.objective => Some(best),
                _ => Some(solution),
            });

        match best {
            Some(solution) => {
                trace!(x = %solution.x, y = %solution.y, objective = %solution.objective, "solved relaxation");
                OptimizationResult::FiniteOptimum(solution)
            },
            None => OptimizationResult::Infeasible,
        }
    }
}

impl<I, F: Clone> ConstraintSink<I, F> for Relaxation<F> {
    type Error = Infallible;

    fn register(&mut self, _variable: &I, _key: CutKey, cut: &Cut<F>) -> Result<(), Self::Error> {
        self.cuts.push(cut.clone());
        Ok(())
    }
}
