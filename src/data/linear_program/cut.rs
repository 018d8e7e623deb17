//! # Cuts on the square of a variable
//!
//! A cut is a linear inequality `y >= slope * x + intercept`, where `y` stands in for `x^2`. The
//! cuts produced in this crate are tangent or secant lines of the parabola, so each of them is a
//! valid underestimator of `x^2` (on the integers, in the case of secants).
use std::fmt;

use crate::data::linear_program::elements::ConstraintType;
use crate::data::number_types::traits::{OrderedField, RealField};

/// Key of a cut within the cuts of a single variable.
///
/// Cuts are stored under `(variable index, CutKey)` pairs in a store shared by all variables.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CutKey {
    /// Tangent cuts of continuous variables are numbered in the order of their creation.
    Sequence(usize),
    /// Secant cuts of integer variables are keyed by the right end of their segment.
    ///
    /// The cut through `(n - 1, (n - 1)^2)` and `(n, n^2)` has key `Breakpoint(n)`.
    Breakpoint(i64),
}

impl fmt::Display for CutKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CutKey::Sequence(index) => write!(f, "#{}", index),
            CutKey::Breakpoint(n) => write!(f, "({}, {}]", n - 1, n),
        }
    }
}

/// A supporting hyperplane `y >= slope * x + intercept` of `y = x^2`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cut<F> {
    slope: F,
    intercept: F,
}

impl<F: OrderedField> Cut<F> {
    /// Create a new cut from its coefficients.
    ///
    /// No validity checks are done: any line can be represented.
    pub fn new(slope: F, intercept: F) -> Self {
        Self { slope, intercept }
    }

    /// The tangent line of `t^2` at `t = point`.
    ///
    /// From `f(t) >= f(a) + f'(a)(t - a) = 2a t - a^2`.
    pub fn tangent(point: &F) -> Self {
        Self {
            slope: point.clone() + point.clone(),
            intercept: -(point.clone() * point.clone()),
        }
    }

    /// Coefficient of `x`.
    pub fn slope(&self) -> &F {
        &self.slope
    }

    /// Constant term.
    pub fn intercept(&self) -> &F {
        &self.intercept
    }

    /// Value of the right-hand side `slope * x + intercept` at `x`.
    pub fn value_at(&self, x: &F) -> F {
        self.slope.clone() * x.clone() + self.intercept.clone()
    }

    /// By how much `y` falls below the cut at `x`.
    ///
    /// Positive values mean that `(x, y)` violates the cut.
    pub fn violation(&self, x: &F, y: &F) -> F {
        self.value_at(x) - y.clone()
    }

    /// Whether the point `(x, y)` lies on or above the cut.
    pub fn is_satisfied_by(&self, x: &F, y: &F) -> bool {
        *y >= self.value_at(x)
    }

    /// Express the cut as a constraint on concrete model variables.
    ///
    /// The constraint reads `0 <= y - slope * x - intercept`, the form in which a solver accepts
    /// it.
    ///
    /// # Arguments
    ///
    /// * `x`: The variable that is being approximated.
    /// * `y`: The variable that stands in for the square of `x`.
    pub fn to_linear_constraint<V>(&self, x: V, y: V) -> LinearConstraint<V, F> {
        LinearConstraint {
            terms: vec![(y, F::one()), (x, -self.slope.clone())],
            constant: -self.intercept.clone(),
            constraint_type: ConstraintType::Greater,
        }
    }
}

impl<F: RealField> Cut<F> {
    /// The secant line of `t^2` through the integers `left` and `left + 1`.
    ///
    /// With `(n + 1)^2 - n^2 = 2n + 1` the slope is `2n + 1`, and the intercept follows from
    /// `n^2 - (2n + 1) n = -n (n + 1)`.
    pub fn secant(left: i64) -> Self {
        let n = F::from_integer(left);
        let n_plus_one = n.clone() + F::one();

        Self {
            slope: n.clone() + n_plus_one.clone(),
            intercept: -(n * n_plus_one),
        }
    }
}

impl<F: fmt::Display> fmt::Display for Cut<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y >= {} x + {}", self.slope, self.intercept)
    }
}

/// A linear constraint `sum(coefficient * variable) + constant (relation) 0`.
///
/// Independent of any modelling library; variables are identified by an arbitrary type `V`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinearConstraint<V, F> {
    /// (variable, coefficient) tuples.
    pub terms: Vec<(V, F)>,
    /// Constant added to the left-hand side.
    pub constant: F,
    /// How the left-hand side relates to zero.
    pub constraint_type: ConstraintType,
}

impl<V: PartialEq, F: OrderedField> LinearConstraint<V, F> {
    /// Evaluate the left-hand side.
    ///
    /// # Arguments
    ///
    /// * `value_of`: Value of each variable. Variables that can't be valued count as zero.
    pub fn evaluate(&self, value_of: impl Fn(&V) -> Option<F>) -> F {
        self.terms.iter()
            .filter_map(|(variable, coefficient)| {
                value_of(variable).map(|value| coefficient.clone() * value)
            })
            .fold(self.constant.clone(), |total, term| total + term)
    }

    /// Whether the left-hand side relates to zero as required.
    pub fn is_satisfied_by(&self, value_of: impl Fn(&V) -> Option<F>) -> bool {
        let left_hand_side = self.evaluate(value_of);
        match self.constraint_type {
            ConstraintType::Equal => left_hand_side == F::zero(),
            ConstraintType::Greater => left_hand_side >= F::zero(),
            ConstraintType::Less => left_hand_side <= F::zero(),
        }
    }
}

impl<V: fmt::Display, F: fmt::Display> fmt::Display for LinearConstraint<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (variable, coefficient) in &self.terms {
            write!(f, "{} {} + ", coefficient, variable)?;
        }
        write!(f, "{} {} 0", self.constant, self.constraint_type)
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use crate::data::linear_program::cut::{Cut, CutKey};
    use crate::data::linear_program::elements::ConstraintType;
    use crate::data::number_types::rational::Rational64;
    use crate::R64;

    type T = Rational64;

    #[test]
    fn tangent() {
        let cut = Cut::<T>::tangent(&R64!(3));
        assert_eq!(cut.slope(), &R64!(6));
        assert_eq!(cut.intercept(), &R64!(-9));
        assert_eq!(cut.value_at(&R64!(3)), R64!(9));

        let cut = Cut::<T>::tangent(&R64!(-1, 2));
        assert_eq!(cut, Cut::new(R64!(-1), R64!(-1, 4)));
        assert_eq!(cut.value_at(&R64!(-1, 2)), R64!(1, 4));
    }

    #[test]
    fn secant() {
        // Through (2, 4) and (3, 9)
        let cut = Cut::<T>::secant(2);
        assert_eq!(cut, Cut::new(R64!(5), R64!(-6)));
        assert_eq!(cut.value_at(&R64!(2)), R64!(4));
        assert_eq!(cut.value_at(&R64!(3)), R64!(9));

        // Through (-3, 9) and (-2, 4)
        let cut = Cut::<T>::secant(-3);
        assert_eq!(cut, Cut::new(R64!(-5), R64!(-6)));

        let cut = Cut::<f64>::secant(-1);
        assert_relative_eq!(*cut.slope(), -1_f64);
        assert_relative_eq!(*cut.intercept(), 0_f64);
    }

    #[test]
    fn violation() {
        let cut = Cut::<T>::tangent(&R64!(2));
        assert_eq!(cut.violation(&R64!(2), &R64!(3)), R64!(1));
        assert!(!cut.is_satisfied_by(&R64!(2), &R64!(3)));
        assert!(cut.is_satisfied_by(&R64!(2), &R64!(4)));
        assert!(cut.is_satisfied_by(&R64!(0), &R64!(0)));
    }

    #[test]
    fn linear_constraint() {
        let cut = Cut::<T>::tangent(&R64!(2));
        let constraint = cut.to_linear_constraint("x", "y");
        assert_eq!(constraint.terms, vec![("y", R64!(1)), ("x", R64!(-4))]);
        assert_eq!(constraint.constant, R64!(4));
        assert_eq!(constraint.constraint_type, ConstraintType::Greater);

        assert!(constraint.is_satisfied_by(point(R64!(2), R64!(4))));
        assert!(constraint.is_satisfied_by(point(R64!(5), R64!(25))));
        assert!(!constraint.is_satisfied_by(point(R64!(1), R64!(-1))));
        assert_eq!(constraint.evaluate(point(R64!(3), R64!(10))), R64!(2));
        assert_eq!(constraint.to_string(), "1 y + -4 x + 4 >= 0");
    }

    fn point(x: T, y: T) -> impl Fn(&&str) -> Option<T> {
        move |variable: &&str| match *variable {
            "x" => Some(x),
            "y" => Some(y),
            _ => None,
        }
    }

    #[test]
    fn key_order_and_display() {
        assert!(CutKey::Breakpoint(-1) < CutKey::Breakpoint(2));
        assert_eq!(CutKey::Breakpoint(3).to_string(), "(2, 3]");
        assert_eq!(CutKey::Sequence(4).to_string(), "#4");
    }
}
