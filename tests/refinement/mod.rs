//! # Refinement of proximal terms
//!
//! A relaxation is solved repeatedly, cuts being added at the reported points, until the reported
//! point lies within tolerance of the parabola.
use std::collections::HashMap;

use approx::assert_abs_diff_eq;
use proptest::prelude::*;

use relp_prox::algorithm::OptimizationResult;
use relp_prox::algorithm::outer_approximation::{ApproximationSettings, ApproxManager, OuterApproximation};
use relp_prox::algorithm::outer_approximation::error::{ApproximationError, ConfigurationError};
use relp_prox::algorithm::proximal::{ProximalTerm, RefinementSettings, RefinementSummary, refine};
use relp_prox::algorithm::proximal::relaxation::Relaxation;
use relp_prox::data::linear_program::cut::{Cut, CutKey};
use relp_prox::data::linear_program::variable::VariableDomain;
use relp_prox::data::number_types::rational::{Rational64, RationalBig};
use relp_prox::data::number_types::traits::RealField;
use relp_prox::{R64, RB};

fn run<F: RealField>(
    domain: &VariableDomain<F>,
    target: F,
    initial_cut_quantity: usize,
) -> RefinementSummary<F> {
    let mut store: HashMap<(&str, CutKey), Cut<F>> = HashMap::new();
    let mut relaxation = Relaxation::new(domain, &"x").unwrap();
    let settings = ApproximationSettings { initial_cut_quantity };
    let mut manager = ApproxManager::new(domain, "x", &settings, &mut store, &mut relaxation).unwrap();

    match refine(&mut manager, &mut relaxation, &ProximalTerm::new(target), &mut store, &RefinementSettings::default()) {
        OptimizationResult::FiniteOptimum(summary) => summary,
        OptimizationResult::Infeasible => panic!("domain contains integers"),
    }
}

#[test]
fn floats() {
    let summary = run(&VariableDomain::continuous(-10_f64, 10_f64), 6.2, 4);

    assert!(summary.converged);
    let solution = summary.solution;
    assert!(solution.x * solution.x - solution.y <= 1e-2);
    assert_abs_diff_eq!(solution.x, 6.2, epsilon = 0.11);
}

#[test]
fn floats_and_rationals_agree_on_integers() {
    let float = run(&VariableDomain::integer(-10_f64, 10_f64), 6.2, 4);
    let exact = run(&VariableDomain::integer(RB!(-10), RB!(10)), RB!(31, 5), 4);

    assert_eq!(exact.solution.x, RB!(6));
    assert_abs_diff_eq!(float.solution.x, 6_f64);
    assert_abs_diff_eq!(float.solution.y, 36_f64, epsilon = 1e-9);
}

#[test]
fn no_integer_in_domain() {
    let domain = VariableDomain::integer(R64!(1, 3), R64!(2, 3));
    let mut store: HashMap<(&str, CutKey), Cut<Rational64>> = HashMap::new();
    let mut relaxation = Relaxation::new(&domain, &"x").unwrap();
    let mut manager = ApproxManager::new(
        &domain, "x", &ApproximationSettings::default(), &mut store, &mut relaxation,
    ).unwrap();

    let result = refine(
        &mut manager, &mut relaxation, &ProximalTerm::new(R64!(0)), &mut store,
        &RefinementSettings::default(),
    );
    assert_eq!(result, OptimizationResult::Infeasible);
}

#[test]
fn configuration_errors() {
    let domain = VariableDomain { upper_bound: Some(f64::INFINITY), ..VariableDomain::continuous(0_f64, 0_f64) };
    let mut store: HashMap<(&str, CutKey), Cut<f64>> = HashMap::new();
    let mut relaxation = Relaxation::new(&VariableDomain::continuous(0_f64, 1_f64), &"x").unwrap();

    let result = ApproxManager::new(&domain, "x", &ApproximationSettings::default(), &mut store, &mut relaxation);
    let Err(error) = result else { panic!("infinite bounds are rejected") };
    assert!(matches!(error, ApproximationError::Configuration(ConfigurationError::MissingBound { .. })));
    assert_eq!(
        error.to_string(),
        "proximal terms can only be linearized for bounded variables, but variable \"x\" has no finite upper bound",
    );

    let error = Relaxation::new(&VariableDomain::integer(R64!(3), R64!(2)), &7).unwrap_err();
    assert_eq!(error.to_string(), "variable 7 has lower bound 3 above its upper bound 2");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn integer_refinement_is_monotone_and_finds_the_nearest_integer(
        lower in -20_i64..20,
        width in 0_i64..20,
        target in -300_i64..300,
        initial_cut_quantity in 0_usize..6,
    ) {
        // No ties between two integers
        prop_assume!(target.rem_euclid(10) != 5);
        let (lower, upper) = (lower, lower + width);
        let target = R64!(target, 10);
        let domain = VariableDomain::integer(R64!(lower), R64!(upper));

        let mut store: HashMap<(&str, CutKey), Cut<Rational64>> = HashMap::new();
        let mut relaxation = Relaxation::new(&domain, &"z").unwrap();
        let settings = ApproximationSettings { initial_cut_quantity };
        let mut manager = ApproxManager::new(&domain, "z", &settings, &mut store, &mut relaxation).unwrap();
        let term = ProximalTerm::new(target);
        let tolerance = R64!(1, 100);

        let mut previous_objective = None;
        let mut nr_iterations = 0;
        let solution = loop {
            let solution = match relaxation.solve(&term) {
                OptimizationResult::FiniteOptimum(solution) => solution,
                OptimizationResult::Infeasible => panic!("domain contains integers"),
            };
            nr_iterations += 1;
            // Cuts only ever tighten the relaxation
            if let Some(previous) = previous_objective {
                prop_assert!(solution.objective >= previous);
            }
            previous_objective = Some(solution.objective);

            let nr_cuts = manager.nr_cuts();
            let new_cuts = manager.check_tolerance_and_maybe_add_cut(
                &solution.x, &solution.y, &tolerance, &mut store, &mut relaxation,
            ).unwrap();
            if !new_cuts {
                break solution;
            }
            prop_assert!(manager.nr_cuts() > nr_cuts);
        };

        // Every iteration but the last adds a secant, of which there are at most `width`
        prop_assert!(nr_iterations <= width as usize + 1);
        prop_assert_eq!(solution.y, solution.x * solution.x);
        let nearest = target.round().to_integer().clamp(lower, upper);
        prop_assert_eq!(solution.x, R64!(nearest));
    }

    #[test]
    fn continuous_refinement_converges(
        lower in -40_i64..0,
        upper in 0_i64..40,
        target in -500_i64..500,
    ) {
        let domain = VariableDomain::continuous(RB!(lower), RB!(upper));
        let summary = run(&domain, RB!(target, 10), 2);

        prop_assert!(summary.converged);
        let solution = summary.solution;
        let tolerance = RefinementSettings::<RationalBig>::default().tolerance;
        prop_assert!(solution.x.squared() - solution.y.clone() <= tolerance);
        // Lower bound on the true optimum
        let exact_optimum = ProximalTerm::new(RB!(target, 10))
            .exact(&RB!(target, 10).clamp(RB!(lower), RB!(upper)));
        prop_assert!(solution.objective <= exact_optimum);
    }
}
