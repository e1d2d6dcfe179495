//! Specificity Comparator & Ranking
//!
//! Orders the implementations of one multimethod so that the most specific
//! candidate is tried first. The comparison is three-tiered:
//!
//! ```text
//! 1. types   left to right, first ancestor/descendant pair decides
//!            (same or unrelated types give no signal)
//! 2. arity   more declared parameters is more specific
//! 3. access  left to right over identical types, `&mut T` beats `&T`
//! ```
//!
//! Type specificity always dominates access: `(&Asteroid)` ranks before
//! `(&mut Thing)`.
//!
//! Lexicographic comparison over partial orders is not always transitive, so
//! [`rank`] does not hand the comparator to a sort. It repeatedly emits the
//! earliest-registered candidate that nothing remaining beats.
//!
//! [`dominates`] is the stricter, acyclic relation underneath: same arity and
//! at least as specific at every position. When the lexicographic relation is
//! cyclic, ranking still never emits a candidate ahead of one that dominates it.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::types::{Access, ParamDesc, Relation, Signature};

/// `Less` when `a` is more specific than `b`.
pub fn compare(a: &Signature, b: &Signature) -> Ordering {
    compare_types(a.params(), b.params())
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| compare_access(a.params(), b.params()))
}

/// First position with an ancestor/descendant relation decides.
pub fn compare_types(a: &[ParamDesc], b: &[ParamDesc]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match x.ty.relation(&y.ty) {
            Relation::Descendant => return Ordering::Less,
            Relation::Ancestor => return Ordering::Greater,
            Relation::Same | Relation::Unrelated => {}
        }
    }
    Ordering::Equal
}

/// First position with the same type but different access decides.
pub fn compare_access(a: &[ParamDesc], b: &[ParamDesc]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        if x.ty != y.ty {
            continue;
        }
        match (x.access, y.access) {
            (Access::Exclusive, Access::Shared) => return Ordering::Less,
            (Access::Shared, Access::Exclusive) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

/// Position-wise dominance: same arity, and at every position `a` declares the
/// same type or a descendant, never `&T` where `b` declares `&mut T`. At least
/// one position must be strictly narrower.
///
/// Implies `compare(a, b) == Less`, but unlike `compare` it is transitive.
pub fn dominates(a: &Signature, b: &Signature) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut strict = false;
    for (x, y) in a.params().iter().zip(b.params()) {
        match x.ty.relation(&y.ty) {
            Relation::Descendant => strict = true,
            Relation::Same => match (x.access, y.access) {
                (Access::Exclusive, Access::Shared) => strict = true,
                (Access::Shared, Access::Exclusive) => return false,
                _ => {}
            },
            Relation::Ancestor | Relation::Unrelated => return false,
        }
    }
    strict
}

/// Ranked permutation of `signatures` (indices, most specific first).
///
/// Stable: ties keep registration order.
pub fn rank(signatures: &[&Signature]) -> Vec<usize> {
    let mut pending: Vec<usize> = (0..signatures.len()).collect();
    let mut order = Vec::with_capacity(signatures.len());

    fn precedes(a: &Signature, b: &Signature) -> bool {
        compare(a, b) == Ordering::Less
    }
    let beaten_by_pending = |pending: &[usize], i: usize, beats: fn(&Signature, &Signature) -> bool| {
        pending.iter().any(|&j| j != i && beats(signatures[j], signatures[i]))
    };

    while !pending.is_empty() {
        let unbeaten = pending
            .iter()
            .position(|&i| !beaten_by_pending(&pending, i, precedes));
        let pick = match unbeaten {
            Some(pick) => pick,
            None => {
                // Some candidate is always undominated: dominance is acyclic.
                let pick = pending
                    .iter()
                    .position(|&i| !beaten_by_pending(&pending, i, dominates))
                    .unwrap_or(0);
                tracing::warn!(
                    signature = %signatures[pending[pick]],
                    remaining = pending.len(),
                    "specificity cycle, taking the earliest undominated candidate"
                );
                pick
            }
        };
        order.push(pending.remove(pick));
    }

    order
}

#[cfg(all(test, feature = "derive"))]
mod tests {
    use super::*;
    use crate::types::Dispatch;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[derive(crate::Class)]
    struct Vehicle;

    #[derive(crate::Class)]
    struct Car {
        #[class(base)]
        vehicle: Vehicle,
    }

    #[derive(crate::Class)]
    struct SportsCar {
        #[class(base)]
        car: Car,
    }

    #[derive(crate::Class)]
    struct Truck {
        #[class(base)]
        vehicle: Vehicle,
    }

    #[derive(crate::Class)]
    struct Inspector;

    #[derive(crate::Class)]
    struct StateInspector {
        #[class(base)]
        inspector: Inspector,
    }

    fn shared<T: Dispatch + ?Sized>() -> ParamDesc {
        ParamDesc::new(T::describe(), Access::Shared)
    }

    fn exclusive<T: Dispatch + ?Sized>() -> ParamDesc {
        ParamDesc::new(T::describe(), Access::Exclusive)
    }

    fn sig(params: Vec<ParamDesc>) -> Signature {
        Signature::new(params)
    }

    fn ranked(signatures: &[Signature]) -> Vec<usize> {
        let refs: Vec<&Signature> = signatures.iter().collect();
        rank(&refs)
    }

    #[test]
    fn test_descendant_first() {
        let sigs = [
            sig(vec![shared::<Vehicle>()]),
            sig(vec![shared::<SportsCar>()]),
            sig(vec![shared::<Car>()]),
        ];
        assert_eq!(ranked(&sigs), vec![1, 2, 0]);
    }

    #[test]
    fn test_first_signalling_position_wins() {
        let car_vehicle = sig(vec![shared::<Car>(), shared::<Vehicle>()]);
        let vehicle_car = sig(vec![shared::<Vehicle>(), shared::<Car>()]);
        assert_eq!(compare(&car_vehicle, &vehicle_car), Ordering::Less);
        assert_eq!(compare(&vehicle_car, &car_vehicle), Ordering::Greater);
    }

    #[test]
    fn test_unrelated_position_falls_through() {
        let a = sig(vec![shared::<Car>(), shared::<Car>()]);
        let b = sig(vec![shared::<Truck>(), shared::<Vehicle>()]);
        assert_eq!(compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_arity_breaks_type_ties() {
        let none = sig(vec![]);
        let one = sig(vec![shared::<i32>()]);
        let two = sig(vec![shared::<i32>(), shared::<i32>()]);
        assert_eq!(ranked(&[none, one, two]), vec![2, 1, 0]);
    }

    #[test]
    fn test_exclusive_breaks_identical_types() {
        let sigs = [
            sig(vec![shared::<Car>()]),
            sig(vec![exclusive::<Car>()]),
        ];
        assert_eq!(ranked(&sigs), vec![1, 0]);
    }

    #[test]
    fn test_type_dominates_access() {
        let general_mut = sig(vec![exclusive::<Vehicle>()]);
        let specific_const = sig(vec![shared::<Car>()]);
        assert_eq!(compare(&specific_const, &general_mut), Ordering::Less);
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let sigs = [
            sig(vec![shared::<Car>()]),
            sig(vec![shared::<Truck>()]),
            sig(vec![shared::<Car>()]),
        ];
        assert_eq!(ranked(&sigs), vec![0, 1, 2]);
    }

    #[test]
    fn test_cycle_resolves_by_registration() {
        // a < b < c < a under lexicographic comparison
        let a = sig(vec![shared::<Inspector>(), shared::<Car>()]);
        let b = sig(vec![shared::<Car>(), shared::<Vehicle>()]);
        let c = sig(vec![shared::<Vehicle>(), shared::<SportsCar>()]);

        assert_eq!(compare(&a, &b), Ordering::Less);
        assert_eq!(compare(&b, &c), Ordering::Less);
        assert_eq!(compare(&c, &a), Ordering::Less);
        assert_eq!(ranked(&[a, b, c]), vec![0, 1, 2]);
    }

    #[test]
    fn test_root_ranks_after_classes() {
        let sigs = [
            sig(vec![shared::<dyn crate::Object>()]),
            sig(vec![shared::<Truck>()]),
        ];
        assert_eq!(ranked(&sigs), vec![1, 0]);
    }

    #[test]
    fn test_dominance() {
        let vv = sig(vec![shared::<Vehicle>(), shared::<Vehicle>()]);
        let vs = sig(vec![shared::<Vehicle>(), shared::<SportsCar>()]);
        let cv = sig(vec![shared::<Car>(), exclusive::<Vehicle>()]);
        let vv_mut = sig(vec![exclusive::<Vehicle>(), exclusive::<Vehicle>()]);

        assert!(dominates(&vs, &vv));
        assert!(dominates(&cv, &vv));
        assert!(dominates(&vv_mut, &vv));
        assert!(!dominates(&vv, &vs));
        assert!(!dominates(&vv, &vv));
        assert!(!dominates(&vv, &vv_mut));
        assert!(!dominates(&vs, &cv));
        assert!(!dominates(&cv, &vs));
        assert!(!dominates(&vv, &sig(vec![shared::<Vehicle>()])));
    }

    #[test]
    fn test_cycle_never_demotes_dominating_signature() {
        // (V,S) < (SI,C) < (C,V) < (V,S) lexicographically, and (V,V) is
        // dominated by both (V,S) and (C,V)
        let sigs = [
            sig(vec![shared::<Vehicle>(), shared::<Vehicle>()]),
            sig(vec![shared::<Vehicle>(), shared::<SportsCar>()]),
            sig(vec![shared::<Car>(), shared::<Vehicle>()]),
            sig(vec![shared::<StateInspector>(), shared::<Car>()]),
        ];
        let order = ranked(&sigs);

        assert_eq!(order, vec![1, 3, 2, 0]);
        assert_eq!(order.last(), Some(&0));
    }

    fn single_position_pool() -> Vec<Signature> {
        vec![
            sig(vec![]),
            sig(vec![shared::<dyn crate::Object>()]),
            sig(vec![shared::<Vehicle>()]),
            sig(vec![exclusive::<Vehicle>()]),
            sig(vec![shared::<Car>()]),
            sig(vec![exclusive::<Car>()]),
            sig(vec![shared::<SportsCar>()]),
            sig(vec![shared::<Truck>()]),
            sig(vec![shared::<Inspector>()]),
            sig(vec![shared::<i32>()]),
            sig(vec![exclusive::<i32>()]),
        ]
    }

    /// Pairs over the vehicle and inspector hierarchies, both orders, both accesses.
    fn two_position_pool() -> Vec<Signature> {
        let types: [fn() -> ParamDesc; 10] = [
            shared::<Vehicle>,
            shared::<Car>,
            shared::<SportsCar>,
            shared::<Truck>,
            shared::<Inspector>,
            shared::<StateInspector>,
            shared::<dyn crate::Object>,
            exclusive::<Vehicle>,
            exclusive::<Car>,
            exclusive::<StateInspector>,
        ];
        let mut pool = Vec::new();
        for first in &types {
            for second in &types {
                pool.push(sig(vec![first(), second()]));
            }
        }
        pool
    }

    fn pick(pool: &[Signature], picks: &[usize]) -> Vec<Signature> {
        picks.iter().map(|&i| pool[i % pool.len()].clone()).collect()
    }

    proptest! {
        #[test]
        fn prop_rank_is_deterministic_permutation(picks in prop::collection::vec(0..100_usize, 0..16)) {
            let sigs = pick(&two_position_pool(), &picks);

            let first = ranked(&sigs);
            let mut sorted = first.clone();
            sorted.sort_unstable();

            prop_assert_eq!(&sorted, &(0..sigs.len()).collect::<Vec<_>>());
            prop_assert_eq!(&first, &ranked(&sigs));
        }

        #[test]
        fn prop_single_position_rank_is_linear_extension(picks in prop::collection::vec(0..11_usize, 0..16)) {
            let sigs = pick(&single_position_pool(), &picks);
            let order = ranked(&sigs);

            for (pos, &earlier) in order.iter().enumerate() {
                for &later in &order[pos + 1..] {
                    prop_assert_ne!(compare(&sigs[later], &sigs[earlier]), Ordering::Less);
                    if sigs[later] == sigs[earlier] {
                        prop_assert!(earlier < later);
                    }
                }
            }
        }

        #[test]
        fn prop_rank_respects_dominance(picks in prop::collection::vec(0..100_usize, 0..24)) {
            let sigs = pick(&two_position_pool(), &picks);
            let order = ranked(&sigs);

            for (pos, &earlier) in order.iter().enumerate() {
                for &later in &order[pos + 1..] {
                    prop_assert!(
                        !dominates(&sigs[later], &sigs[earlier]),
                        "{} ranked after {}", sigs[later], sigs[earlier]
                    );
                }
            }
        }
    }
}
