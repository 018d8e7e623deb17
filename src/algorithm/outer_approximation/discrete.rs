//! # Secant cuts for integer variables
//!
//! An integer variable only takes values at the integers, where the secant line through `(n, n^2)`
//! and `(n + 1, (n + 1)^2)` is exact. Between two consecutive integers a single cut is therefore
//! all that is ever needed, and a value `n` is fully described by the secants to its left and to
//! its right.
//!
//! Cuts are keyed by the right end of their segment: the cut for `(2, 3)` has key `3`, the cut
//! for `(-2, -1)` has key `-1`.
use std::fmt::Debug;

use num_traits::Zero;
use tracing::{trace, warn};

use crate::algorithm::outer_approximation::{OuterApproximation, record};
use crate::algorithm::outer_approximation::storage::{ConstraintSink, CutStore};
use crate::data::linear_program::cut::{Cut, CutKey};
use crate::data::linear_program::variable::Bounds;
use crate::data::number_types::traits::RealField;

/// Approximates `x^2` for integer `x` with secant lines between consecutive integers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Discrete<I, F> {
    variable_index: I,
    bounds: Bounds<F>,
    nr_cuts: usize,
}

impl<I, F> Discrete<I, F> {
    pub(super) fn new(variable_index: I, bounds: Bounds<F>) -> Self {
        Self {
            variable_index,
            bounds,
            nr_cuts: 0,
        }
    }
}

impl<I, F> Discrete<I, F>
where
    I: Clone + Debug,
    F: RealField,
{
    /// Add the secant through `left` and `left + 1`, unless it already exists.
    fn add_secant<S, K>(&mut self, left: i64, store: &mut S, sink: &mut K) -> Result<usize, K::Error>
    where
        S: CutStore<I, F>,
        K: ConstraintSink<I, F>,
    {
        let Some(right) = left.checked_add(1) else {
            warn!(variable = ?self.variable_index, left, "segment end doesn't fit in an i64");
            return Ok(0);
        };

        self.add_if_absent(CutKey::Breakpoint(right), || Cut::secant(left), store, sink)
    }

    /// Add the tangent at the value of a fixed variable, unless it already exists.
    fn add_tangent<S, K>(&mut self, value: &F, store: &mut S, sink: &mut K) -> Result<usize, K::Error>
    where
        S: CutStore<I, F>,
        K: ConstraintSink<I, F>,
    {
        self.add_if_absent(CutKey::Sequence(0), || Cut::tangent(value), store, sink)
    }

    fn add_if_absent<S, K>(
        &mut self,
        key: CutKey,
        cut: impl FnOnce() -> Cut<F>,
        store: &mut S,
        sink: &mut K,
    ) -> Result<usize, K::Error>
    where
        S: CutStore<I, F>,
        K: ConstraintSink<I, F>,
    {
        if store.contains(&self.variable_index, &key) {
            trace!(variable = ?self.variable_index, %key, "cut exists");
            return Ok(0);
        }

        // Stored even when the sink refuses it
        self.nr_cuts += 1;
        record(&self.variable_index, key, cut(), store, sink)?;

        Ok(1)
    }
}

impl<I, F> OuterApproximation<I, F> for Discrete<I, F>
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

    /// Cuts around both bounds and around evenly spaced points in between.
    ///
    /// Each point can give two cuts, so only `initial_cut_quantity / 2 + 1` points are used,
    /// bounds included. Rounds down: asking for 7 cuts places points for 6.
    ///
    /// A fixed variable has no segments to place secants on. It gets the tangent at its value
    /// instead, unless that value is zero.
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

        if self.bounds.is_fixed() {
            return if lower.is_zero() {
                Ok(0)
            } else {
                self.add_tangent(&lower, store, sink)
            };
        }

        let mut nr_added = self.add_cut(&lower, store, sink)?;
        nr_added += self.add_cut(&upper, store, sink)?;

        let interior = self.bounds.interior_points(initial_cut_quantity / 2 + 1).collect::<Vec<_>>();
        for point in &interior {
            nr_added += self.add_cut(point, store, sink)?;
        }

        Ok(nr_added)
    }

    /// The secants to the left and to the right of the integer nearest to `value`.
    ///
    /// The right secant is skipped when the rounded value isn't below the upper bound, the left one
    /// when it isn't above the lower bound. Existing secants are not added again.
    fn add_cut<S, K>(&mut self, value: &F, store: &mut S, sink: &mut K) -> Result<usize, K::Error>
    where
        S: CutStore<I, F>,
        K: ConstraintSink<I, F>,
    {
        let Some(n) = value.nearest_integer() else {
            warn!(variable = ?self.variable_index, %value, "can't round value to an integer");
            return Ok(0);
        };
        let point = F::from_integer(n);

        let mut nr_added = 0;
        // Segment (n, n + 1)
        if point < *self.bounds.upper() {
            nr_added += self.add_secant(n, store, sink)?;
        }
        // Segment (n - 1, n)
        if point > *self.bounds.lower() {
            match n.checked_sub(1) {
                Some(left) => nr_added += self.add_secant(left, store, sink)?,
                None => warn!(variable = ?self.variable_index, right = n, "segment end doesn't fit in an i64"),
            }
        }

        Ok(nr_added)
    }
}
