//! # Properties of the cuts
//!
//! Cuts may never cut off a point of the parabola, and they need to touch it where they are
//! created. Numbers are multiples of 1/12 such that all arithmetic stays exact in `Rational64`.
use std::collections::BTreeMap;

use proptest::prelude::*;

use relp_prox::algorithm::outer_approximation::{ApproximationSettings, ApproxManager, OuterApproximation};
use relp_prox::algorithm::outer_approximation::storage::NoSink;
use relp_prox::data::linear_program::cut::{Cut, CutKey};
use relp_prox::data::linear_program::variable::VariableDomain;
use relp_prox::data::number_types::rational::Rational64;
use relp_prox::R64;

type T = Rational64;
type Store = BTreeMap<(u8, CutKey), Cut<T>>;

fn twelfths(numerator: i64) -> T {
    R64!(numerator, 12)
}

fn create(domain: &VariableDomain<T>, initial_cut_quantity: usize, store: &mut Store) -> ApproxManager<u8, T> {
    let settings = ApproximationSettings { initial_cut_quantity };
    ApproxManager::new(domain, 0, &settings, store, &mut NoSink).unwrap()
}

proptest! {
    #[test]
    fn tangents_are_sound_and_tight(
        lower in -120_i64..120,
        width in 0_i64..240,
        initial_cut_quantity in 0_usize..8,
        offsets in prop::collection::vec(0_i64..240, 0..6),
    ) {
        let (lower, upper) = (lower, lower + width);
        let domain = VariableDomain::continuous(twelfths(lower), twelfths(upper));
        let mut store = Store::new();
        let mut manager = create(&domain, initial_cut_quantity, &mut store);

        for offset in offsets {
            let value = twelfths(lower + offset % (width + 1));
            prop_assert_eq!(manager.add_cut(&value, &mut store, &mut NoSink), Ok(1));

            let newest = CutKey::Sequence(manager.nr_cuts() - 1);
            prop_assert_eq!(store[&(0, newest)].value_at(&value), value * value);
        }

        prop_assert_eq!(store.len(), manager.nr_cuts());
        for cut in store.values() {
            for numerator in lower - 12..=upper + 12 {
                let t = twelfths(numerator);
                prop_assert!(cut.is_satisfied_by(&t, &(t * t)));
            }
        }
    }

    #[test]
    fn secants_are_sound_on_integers(
        lower in -30_i64..30,
        width in 0_i64..30,
        initial_cut_quantity in 0_usize..8,
        offsets in prop::collection::vec(0_i64..360, 0..6),
    ) {
        let (lower, upper) = (lower, lower + width);
        let domain = VariableDomain::integer(R64!(lower), R64!(upper));
        let mut store = Store::new();
        let mut manager = create(&domain, initial_cut_quantity, &mut store);

        // As reported by a solve, within the bounds
        for offset in offsets {
            let value = twelfths(12 * lower + offset % (12 * width + 1));
            manager.add_cut(&value, &mut store, &mut NoSink).unwrap();
        }

        prop_assert_eq!(store.len(), manager.nr_cuts());
        for ((_, key), cut) in &store {
            for t in lower..=upper {
                let t = R64!(t);
                prop_assert!(cut.is_satisfied_by(&t, &(t * t)));
            }
            if let CutKey::Breakpoint(n) = *key {
                // Both ends of the segment lie within the bounds
                prop_assert!(lower < n && n <= upper);
                prop_assert_eq!(cut.value_at(&R64!(n - 1)), R64!((n - 1) * (n - 1)));
                prop_assert_eq!(cut.value_at(&R64!(n)), R64!(n * n));
            }
        }
    }

    #[test]
    fn secants_are_created_once(
        lower in -30_i64..0,
        upper in 0_i64..30,
        value in -360_i64..360,
    ) {
        let domain = VariableDomain::integer(R64!(lower), R64!(upper));
        let mut store = Store::new();
        let mut manager = create(&domain, 2, &mut store);

        manager.add_cut(&twelfths(value), &mut store, &mut NoSink).unwrap();
        let nr_cuts = manager.nr_cuts();
        prop_assert_eq!(manager.add_cut(&twelfths(value), &mut store, &mut NoSink), Ok(0));
        prop_assert_eq!(manager.nr_cuts(), nr_cuts);
        prop_assert_eq!(store.len(), nr_cuts);
    }
}
