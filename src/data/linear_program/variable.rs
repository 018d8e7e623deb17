//! # Variables whose square is approximated
use std::fmt::Debug;

use crate::algorithm::outer_approximation::error::ConfigurationError;
use crate::data::linear_program::elements::{BoundDirection, VariableType};
use crate::data::number_types::traits::RealField;

/// Describing the accepted values for a variable.
///
/// Mirrors how a variable is described in a model: bounds may be absent, in which case the
/// variable is unbounded in that direction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VariableDomain<F> {
    /// Whether the variable is integer or not.
    pub variable_type: VariableType,
    /// If it is `None`, the variable is considered to be in (-oo, upper_bound).
    pub lower_bound: Option<F>,
    /// If it is `None`, the variable is considered to be in (lower_bound, oo).
    pub upper_bound: Option<F>,
}

impl<F> VariableDomain<F> {
    /// A continuous variable in `[lower_bound, upper_bound]`.
    pub fn continuous(lower_bound: F, upper_bound: F) -> Self {
        Self {
            variable_type: VariableType::Continuous,
            lower_bound: Some(lower_bound),
            upper_bound: Some(upper_bound),
        }
    }

    /// An integer variable in `[lower_bound, upper_bound]`.
    pub fn integer(lower_bound: F, upper_bound: F) -> Self {
        Self {
            variable_type: VariableType::Integer,
            lower_bound: Some(lower_bound),
            upper_bound: Some(upper_bound),
        }
    }
}

impl<F: RealField> VariableDomain<F> {
    /// Validate that the domain is a finite, nonempty interval.
    ///
    /// # Arguments
    ///
    /// * `variable`: Used to describe the variable in case of an error.
    ///
    /// # Errors
    ///
    /// If a bound is missing or not finite, or if the lower bound exceeds the upper bound.
    pub fn bounds<I: Debug>(&self, variable: &I) -> Result<Bounds<F>, ConfigurationError> {
        let lower = Self::finite_bound(&self.lower_bound, BoundDirection::Lower, variable)?;
        let upper = Self::finite_bound(&self.upper_bound, BoundDirection::Upper, variable)?;

        if lower > upper {
            return Err(ConfigurationError::InvertedBounds {
                variable: format!("{:?}", variable),
                lower: lower.to_string(),
                upper: upper.to_string(),
            });
        }

        Ok(Bounds { lower, upper })
    }

    fn finite_bound<I: Debug>(
        bound: &Option<F>,
        direction: BoundDirection,
        variable: &I,
    ) -> Result<F, ConfigurationError> {
        match bound {
            Some(value) if value.is_finite() => Ok(value.clone()),
            _ => Err(ConfigurationError::MissingBound {
                variable: format!("{:?}", variable),
                direction,
            }),
        }
    }
}

/// A finite interval `[lower, upper]` with `lower <= upper`.
///
/// Only constructed through `VariableDomain::bounds`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bounds<F> {
    lower: F,
    upper: F,
}

impl<F: RealField> Bounds<F> {
    /// Lower end of the interval.
    pub fn lower(&self) -> &F {
        &self.lower
    }

    /// Upper end of the interval.
    pub fn upper(&self) -> &F {
        &self.upper
    }

    /// Whether the interval consists of a single point.
    pub fn is_fixed(&self) -> bool {
        self.lower == self.upper
    }

    /// Whether `value` lies in the interval.
    pub fn contains(&self, value: &F) -> bool {
        self.lower <= *value && *value <= self.upper
    }

    /// Evenly spaced points strictly inside the interval.
    ///
    /// With `quantity` points in total, the two bounds included, the `quantity - 2` points in
    /// between are returned. Nothing is returned for a `quantity` of two or less.
    pub fn interior_points(&self, quantity: usize) -> impl Iterator<Item = F> + '_ {
        let nr_points = quantity.saturating_sub(2);
        // n + 1 points make n segments
        let delta = if nr_points > 0 {
            let nr_segments = F::from_integer((quantity - 1) as i64);
            (self.upper.clone() - self.lower.clone()) / nr_segments
        } else {
            F::zero()
        };

        (1..=nr_points).map(move |k| self.lower.clone() + F::from_integer(k as i64) * delta.clone())
    }
}
