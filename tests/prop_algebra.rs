use std::collections::BTreeSet;

use compact_bitvec::BitVec;
use proptest::prelude::*;

prop_compose! {
    fn arb_bitvec()
        (bits in prop::collection::btree_set(0usize..600, 0..48))
        -> BitVec
    {
        bits.into_iter().collect()
    }
}

// A vector paired with the set it was built from
prop_compose! {
    fn arb_model()
        (bits in prop::collection::btree_set(0usize..600, 0..48))
        -> (BitVec, BTreeSet<usize>)
    {
        (bits.iter().copied().collect(), bits)
    }
}

fn as_set(bv: &BitVec) -> BTreeSet<usize> {
    bv.iter().collect()
}

proptest! {
    #[test]
    fn test_operators_match_set_model(
        (a, sa) in arb_model(),
        (b, sb) in arb_model(),
    ) {
        prop_assert_eq!(as_set(&(&a & &b)), &sa & &sb);
        prop_assert_eq!(as_set(&(&a | &b)), &sa | &sb);
        prop_assert_eq!(as_set(&(&a ^ &b)), &sa ^ &sb);
        prop_assert_eq!(as_set(&(&a - &b)), &sa - &sb);
        prop_assert_eq!(a.contains(&b), sb.is_subset(&sa));
        prop_assert_eq!(a.intersects(&b), !sa.is_disjoint(&sb));
    }

    #[test]
    fn test_commutative_and_associative(
        a in arb_bitvec(),
        b in arb_bitvec(),
        c in arb_bitvec(),
    ) {
        prop_assert_eq!(&a & &b, &b & &a);
        prop_assert_eq!(&a | &b, &b | &a);
        prop_assert_eq!(&(&a & &b) & &c, &a & &(&b & &c));
        prop_assert_eq!(&(&a | &b) | &c, &a | &(&b | &c));
    }

    #[test]
    fn test_self_laws(a in arb_bitvec()) {
        prop_assert_eq!(&a & &a, a.clone());
        prop_assert_eq!(&a | &a, a.clone());
        prop_assert!((&a - &a).is_empty());
        prop_assert!((&a ^ &a).is_empty());
    }

    #[test]
    fn test_contains_and_intersects_identities(
        a in arb_bitvec(),
        b in arb_bitvec(),
    ) {
        prop_assert_eq!(a.contains(&b), &a | &b == a);
        prop_assert_eq!(a.intersects(&b), !(&a & &b).is_empty());
    }

    #[test]
    fn test_changed_flag_is_accurate(
        a in arb_bitvec(),
        b in arb_bitvec(),
    ) {
        let mut x = a.clone();
        prop_assert_eq!(x.intersect_with(&b), x != a);

        let mut x = a.clone();
        prop_assert_eq!(x.union_with(&b), x != a);

        let mut x = a.clone();
        prop_assert_eq!(x.difference_with(&b), x != a);

        let mut x = a.clone();
        prop_assert_eq!(x.symmetric_difference_with(&b), x != a);
    }

    #[test]
    fn test_iteration_matches_get(a in arb_bitvec()) {
        let forward: Vec<_> = a.iter().collect();
        let expected: Vec<_> = (0..a.capacity()).filter(|&i| a.get(i)).collect();
        prop_assert_eq!(&forward, &expected);
        prop_assert_eq!(a.count_ones(), forward.len());

        let backward: Vec<_> = a.iter().rev().collect();
        prop_assert!(backward.iter().eq(expected.iter().rev()));
    }

    #[test]
    fn test_positions_match_iteration(a in arb_bitvec()) {
        let mut pos = a.min_bit();
        let mut forward = Vec::new();
        while let Some(i) = pos.index() {
            prop_assert!(pos.get());
            forward.push(i);
            pos.advance();
        }
        prop_assert_eq!(pos, a.end());
        prop_assert!(forward.iter().copied().eq(a.iter()));

        let mut pos = a.max_bit();
        let mut backward = Vec::new();
        while let Some(i) = pos.index() {
            backward.push(i);
            pos.retreat();
        }
        prop_assert!(backward.iter().copied().eq(a.iter().rev()));
    }

    #[test]
    fn test_ordering_matches_words(a in arb_bitvec(), b in arb_bitvec()) {
        let key = |bv: &BitVec| {
            let mut words = bv.as_slice_rtrim().to_vec();
            words.reverse();
            (words.len(), words)
        };
        prop_assert_eq!(a.cmp(&b), key(&a).cmp(&key(&b)));
    }

    #[test]
    fn test_text_round_trip(a in arb_bitvec()) {
        prop_assert_eq!(a.to_string().parse::<BitVec>(), Ok(a.clone()));
        prop_assert_eq!(format!("{a:#x}").parse::<BitVec>(), Ok(a.clone()));
        prop_assert_eq!(format!("{a:#b}").parse::<BitVec>(), Ok(a.clone()));

        let mut target = BitVec::from_range(0, 1000);
        target.assign_from_str(&format!("{a:X}")).unwrap();
        prop_assert_eq!(target, a);
    }
}
