//! # Tangent cuts for continuous variables
use std::fmt::Debug;

use num_traits::Zero;
use tracing::warn;

use crate::algorithm::outer_approximation::{OuterApproximation, record};
use crate::algorithm::outer_approximation::storage::{ConstraintSink, CutStore};
use crate::data::linear_program::cut::{Cut, CutKey};
use crate::data::linear_program::variable::Bounds;
use crate::data::number_types::traits::RealField;

/// Approximates `x^2` with tangent lines at arbitrary points of the domain.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Continuous<I, F> {
    variable_index: I,
    bounds: Bounds<F>,
    /// Key for the next tangent.
    next_key: usize,
    nr_cuts: usize,
}

impl<I, F> Continuous<I, F> {
    pub(super) fn new(variable_index: I, bounds: Bounds<F>) -> Self {
        Self {
            variable_index,
            bounds,
            next_key: 0,
            nr_cuts: 0,
        }
    }
}

impl<I, F> OuterApproximation<I, F> for Continuous<I, F>
where
    I: Clone + Debug,
    F: RealField,
{
    fn variable_index(&self) -> &I {
        &self.variable_index
    }

    fn bounds(&self) -> &Bounds<F> {
        &self.bounds
    }

    fn nr_cuts(&self) -> usize {
        self.nr_cuts
    }

    /// Tangents at both bounds and at evenly spaced points in between.
    ///
    /// A tangent at zero is `y >= 0`, which `y` satisfies anyway, so none is placed there.
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
        let lower = self.bounds.lower().clone();
        let upper = self.bounds.upper().clone();
        let mut nr_added = 0;

        if !lower.is_zero() {
            nr_added += self.add_cut(&lower, store, sink)?;
        }

        if self.bounds.is_fixed() {
            return Ok(nr_added);
        }

        if !upper.is_zero() {
            nr_added += self.add_cut(&upper, store, sink)?;
        }

        let interior = self.bounds.interior_points(initial_cut_quantity).collect::<Vec<_>>();
        for point in &interior {
            nr_added += self.add_cut(point, store, sink)?;
        }

        Ok(nr_added)
    }

    /// Tangent at `value`, `y >= 2 value x - value^2`.
    ///
    /// Creates exactly one cut for each finite value, repeated values are not detected.
    fn add_cut<S, K>(&mut self, value: &F, store: &mut S, sink: &mut K) -> Result<usize, K::Error>
    where
        S: CutStore<I, F>,
        K: ConstraintSink<I, F>,
    {
        if !value.is_finite() {
            warn!(variable = ?self.variable_index, %value, "no tangent at a value that isn't finite");
            return Ok(0);
        }

        // Skip keys taken in a store that was used before
        while store.contains(&self.variable_index, &CutKey::Sequence(self.next_key)) {
            self.next_key += 1;
        }
        let key = CutKey::Sequence(self.next_key);
        self.next_key += 1;

        // Stored even when the sink refuses it
        self.nr_cuts += 1;
        let is_new = record(&self.variable_index, key, Cut::tangent(value), store, sink)?;
        debug_assert!(is_new);

        Ok(1)
    }
}
