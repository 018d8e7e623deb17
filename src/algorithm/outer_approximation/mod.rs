//! # Outer approximation of squared variables
//!
//! A proximal term `(x - target)^2` can't be given to a linear solver directly. Instead, a
//! variable `y` is introduced that stands in for `x^2`, and `y` is bounded from below by linear
//! cuts `y >= m x + b`. Because `x^2` is convex, its tangent lines are global underestimators and
//! the cuts form a relaxation of `y = x^2` that gets tighter with every cut added.
//!
//! Each approximated variable has its own manager. A few cuts are placed when the manager is
//! created, after which more are added lazily: whenever a solve reports a point `(x, y)` at which
//! `x^2 - y` exceeds a tolerance, a cut through `(x, x^2)` is added.
//!
//! Integer variables are treated differently. Between two consecutive integers, the secant line
//! of the parabola is exact at both integers, so two cuts around each integer value suffice.
use std::fmt::Debug;

use tracing::{debug, trace};

use crate::algorithm::outer_approximation::continuous::Continuous;
use crate::algorithm::outer_approximation::discrete::Discrete;
use crate::algorithm::outer_approximation::error::ApproximationError;
use crate::algorithm::outer_approximation::storage::{ConstraintSink, CutStore};
use crate::data::linear_program::cut::{Cut, CutKey};
use crate::data::linear_program::elements::VariableType;
use crate::data::linear_program::variable::{Bounds, VariableDomain};
use crate::data::number_types::traits::RealField;

pub mod continuous;
pub mod discrete;
pub mod error;
pub mod storage;

/// Configuration of a new outer approximation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ApproximationSettings {
    /// Number of cuts placed when the approximation is created.
    ///
    /// The bounds of the variable always get a cut, values below 2 are treated as 2. Integer
    /// variables get fewer additional cuts, because each point can give two cuts.
    pub initial_cut_quantity: usize,
}

impl Default for ApproximationSettings {
    fn default() -> Self {
        Self {
            initial_cut_quantity: 2,
        }
    }
}

/// Operations shared by the continuous and the discrete approximation.
pub trait OuterApproximation<I, F: RealField> {
    /// Index under which this approximation stores its cuts.
    fn variable_index(&self) -> &I;

    /// Domain of the approximated variable.
    fn bounds(&self) -> &Bounds<F>;

    /// Number of cuts created by this approximation so far.
    fn nr_cuts(&self) -> usize;

    /// Place the cuts that the approximation starts out with.
    ///
    /// Called once, upon creation.
    ///
    /// # Return value
    ///
    /// The number of cuts created.
    ///
    /// # Errors
    ///
    /// When the constraint sink refuses a cut. Cuts created before the failure remain stored.
    fn seed_initial_cuts<S, K>(
        &mut self,
        initial_cut_quantity: usize,
        store: &mut S,
        sink: &mut K,
    ) -> Result<usize, K::Error>
    where
        S: CutStore<I, F>,
        K: ConstraintSink<I, F>,
    ;

    /// Create cuts that are tight at `value`.
    ///
    /// # Return value
    ///
    /// The number of cuts created, which can be zero when the cuts already exist.
    ///
    /// # Errors
    ///
    /// When the constraint sink refuses a cut.
    fn add_cut<S, K>(&mut self, value: &F, store: &mut S, sink: &mut K) -> Result<usize, K::Error>
    where
        S: CutStore<I, F>,
        K: ConstraintSink<I, F>,
    ;

    /// Add a cut if the reported point violates `y = x^2` by more than the tolerance.
    ///
    /// # Arguments
    ///
    /// * `x`: Value of the approximated variable, as reported by the last solve.
    /// * `y`: Value of the variable standing in for `x^2`, from the same solve.
    /// * `tolerance`: Largest acceptable value of `x^2 - y`.
    ///
    /// # Return value
    ///
    /// Whether the tolerance was exceeded, in which case the model should be solved again.
    fn check_tolerance_and_maybe_add_cut<S, K>(
        &mut self,
        x: &F,
        y: &F,
        tolerance: &F,
        store: &mut S,
        sink: &mut K,
    ) -> Result<bool, K::Error>
    where
        S: CutStore<I, F>,
        K: ConstraintSink<I, F>,
        I: Debug,
    {
        let violation = x.squared() - y.clone();
        if violation > *tolerance {
            let nr_added = self.add_cut(x, store, sink)?;
            debug!(variable = ?self.variable_index(), %x, %y, %violation, nr_added, "tolerance exceeded");
            Ok(true)
        } else {
            trace!(variable = ?self.variable_index(), %x, %y, %violation, "within tolerance");
            Ok(false)
        }
    }
}

/// Outer approximation of the square of a single variable.
///
/// The variant is chosen based on the type of the variable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ApproxManager<I, F> {
    /// Tangent cuts at arbitrary points.
    Continuous(Continuous<I, F>),
    /// Secant cuts between consecutive integers.
    Discrete(Discrete<I, F>),
}

impl<I, F> ApproxManager<I, F>
where
    I: Clone + Debug,
    F: RealField,
{
    /// Create the approximation of a variable and place its initial cuts.
    ///
    /// # Arguments
    ///
    /// * `domain`: Bounds and type of the variable. Both bounds need to be finite.
    /// * `variable_index`: Distinguishes the cuts of this variable from those of other variables
    /// in the store.
    /// * `settings`: How many cuts to start with.
    /// * `store`: Where the cuts are kept.
    /// * `sink`: Solver to register each new cut with, `NoSink` if there is none.
    ///
    /// # Errors
    ///
    /// If the domain isn't a finite interval, or if the sink refuses one of the initial cuts.
    pub fn new<S, K>(
        domain: &VariableDomain<F>,
        variable_index: I,
        settings: &ApproximationSettings,
        store: &mut S,
        sink: &mut K,
    ) -> Result<Self, ApproximationError<K::Error>>
    where
        S: CutStore<I, F>,
        K: ConstraintSink<I, F>,
    {
        let bounds = domain.bounds(&variable_index)?;

        let mut manager = match domain.variable_type {
            VariableType::Continuous => Self::Continuous(Continuous::new(variable_index, bounds)),
            VariableType::Integer => Self::Discrete(Discrete::new(variable_index, bounds)),
        };

        let nr_seeded = manager.seed_initial_cuts(settings.initial_cut_quantity, store, sink)
            .map_err(ApproximationError::Sink)?;
        debug!(
            variable = ?manager.variable_index(),
            variable_type = ?manager.variable_type(),
            nr_seeded,
            "created outer approximation"
        );

        Ok(manager)
    }

    /// Whether the approximated variable is continuous or integer.
    pub fn variable_type(&self) -> VariableType {
        match self {
            ApproxManager::Continuous(_) => VariableType::Continuous,
            ApproxManager::Discrete(_) => VariableType::Integer,
        }
    }
}

impl<I, F> OuterApproximation<I, F> for ApproxManager<I, F>
where
    I: Clone + Debug,
    F: RealField,
{
    fn variable_index(&self) -> &I {
        match self {
            ApproxManager::Continuous(inner) => inner.variable_index(),
            ApproxManager::Discrete(inner) => inner.variable_index(),
        }
    }

    fn bounds(&self) -> &Bounds<F> {
        match self {
            ApproxManager::Continuous(inner) => inner.bounds(),
            ApproxManager::Discrete(inner) => inner.bounds(),
        }
    }

    fn nr_cuts(&self) -> usize {
        match self {
            ApproxManager::Continuous(inner) => inner.nr_cuts(),
            ApproxManager::Discrete(inner) => inner.nr_cuts(),
        }
    }

    fn seed_initial_cuts<S, K>(
        &mut self,
        initial_cut_quantity: usize,
        store: &mut S,
        sink: &mut K,
    ) -> Result<usize, K::Error>
    where
        S: CutStore<I, F>,
        K: ConstraintSink<I, F>,
    {
        match self {
            ApproxManager::Continuous(inner) => inner.seed_initial_cuts(initial_cut_quantity, store, sink),
            ApproxManager::Discrete(inner) => inner.seed_initial_cuts(initial_cut_quantity, store, sink),
        }
    }

    fn add_cut<S, K>(&mut self, value: &F, store: &mut S, sink: &mut K) -> Result<usize, K::Error>
    where
        S: CutStore<I, F>,
        K: ConstraintSink<I, F>,
    {
        match self {
            ApproxManager::Continuous(inner) => inner.add_cut(value, store, sink),
            ApproxManager::Discrete(inner) => inner.add_cut(value, store, sink),
        }
    }
}

/// Store a new cut and register it with the sink.
///
/// # Return value
///
/// Whether the cut was new. Cuts that are already present are neither replaced nor registered.
fn record<I, F, S, K>(
    variable_index: &I,
    key: CutKey,
    cut: Cut<F>,
    store: &mut S,
    sink: &mut K,
) -> Result<bool, K::Error>
where
    I: Clone + Debug,
    F: RealField,
    S: CutStore<I, F>,
    K: ConstraintSink<I, F>,
{
    if !store.insert_if_absent(variable_index.clone(), key, cut.clone()) {
        return Ok(false);
    }
    debug!(variable = ?variable_index, %key, %cut, "added cut");
    sink.register(variable_index, key, &cut)?;

    Ok(true)
}
