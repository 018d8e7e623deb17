//! # Where cuts go
//!
//! Cuts of all approximated variables are kept in a single store, owned by the caller, under a
//! `(variable index, cut key)` pair. Managers only ever insert into the store, and only under
//! their own variable index.
//!
//! Optionally, a solver that is kept alive between solves is informed about each new cut, such
//! that the model doesn't need to be rebuilt.
use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::hash::Hash;

use crate::data::linear_program::cut::{Cut, CutKey};

/// Storage of cuts, shared between the approximations of several variables.
pub trait CutStore<I, F> {
    /// Whether a cut is stored under this key.
    fn contains(&self, variable: &I, key: &CutKey) -> bool;

    /// Store a cut if no cut is present under its key yet.
    ///
    /// # Return value
    ///
    /// Whether the cut was stored. If `false`, the store is unchanged: cuts are never replaced.
    fn insert_if_absent(&mut self, variable: I, key: CutKey, cut: Cut<F>) -> bool;
}

impl<I: Eq + Hash + Clone, F> CutStore<I, F> for HashMap<(I, CutKey), Cut<F>> {
    fn contains(&self, variable: &I, key: &CutKey) -> bool {
        self.contains_key(&(variable.clone(), *key))
    }

    fn insert_if_absent(&mut self, variable: I, key: CutKey, cut: Cut<F>) -> bool {
        match self.entry((variable, key)) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(cut);
                true
            }
        }
    }
}

impl<I: Ord + Clone, F> CutStore<I, F> for BTreeMap<(I, CutKey), Cut<F>> {
    fn contains(&self, variable: &I, key: &CutKey) -> bool {
        self.contains_key(&(variable.clone(), *key))
    }

    fn insert_if_absent(&mut self, variable: I, key: CutKey, cut: Cut<F>) -> bool {
        match self.entry((variable, key)) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(cut);
                true
            }
        }
    }
}

/// A solver that accepts new constraints between solves.
pub trait ConstraintSink<I, F> {
    /// Why a constraint could not be registered.
    type Error;

    /// Add a cut to the model that the solver holds.
    ///
    /// Called once for each newly created cut, after it was stored.
    fn register(&mut self, variable: &I, key: CutKey, cut: &Cut<F>) -> Result<(), Self::Error>;
}

/// Absence of a solver to register cuts with.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct NoSink;

impl<I, F> ConstraintSink<I, F> for NoSink {
    type Error = Infallible;

    fn register(&mut self, _variable: &I, _key: CutKey, _cut: &Cut<F>) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<I, F, S: ConstraintSink<I, F> + ?Sized> ConstraintSink<I, F> for &mut S {
    type Error = S::Error;

    fn register(&mut self, variable: &I, key: CutKey, cut: &Cut<F>) -> Result<(), Self::Error> {
        (**self).register(variable, key, cut)
    }
}
