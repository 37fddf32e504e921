// HashTable property tests.
//
// Property 1: round-trip and overwrite.
//  - Invariant: after any sequence of inserts, search(k) is the last value
//    written for k, and len() is the number of distinct keys.
//
// Property 2: delete-then-search.
//  - Invariant: after delete(k), search(k) is None whether or not k was
//    present; deleting an absent key leaves len() unchanged.
//
// Property 3: probe completeness.
//  - Invariant: for any key and any prime bucket count, attempts
//    0..capacity visit capacity distinct slots.
//
// Property 4: growth preserves contents.
//  - Invariant: inserting past the grow threshold moves capacity to a
//    prime at or above twice the previous base, and every earlier key keeps
//    its value.
use dh_hashtable::{next_prime, probe, HashTable, ProbeSeq};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

proptest! {
    #[test]
    fn prop_round_trip_and_overwrite(
        pairs in proptest::collection::vec(("[a-z]{0,6}", "[a-z0-9]{0,10}"), 1..200)
    ) {
        let mut t = HashTable::new();
        let mut model = HashMap::new();
        for (k, v) in &pairs {
            t.insert(k.as_str(), v.as_str());
            model.insert(k.clone(), v.clone());
            prop_assert_eq!(t.search(k), Some(v.as_str()));
        }
        prop_assert_eq!(t.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(t.search(k), Some(v.as_str()));
        }
    }
}

proptest! {
    #[test]
    fn prop_delete_then_search(
        keys in proptest::collection::vec("[a-z]{1,4}", 1..120),
        deletes in proptest::collection::vec("[a-z]{1,4}", 1..120)
    ) {
        let mut t = HashTable::new();
        let mut present: HashSet<String> = HashSet::new();
        for k in &keys {
            t.insert(k.as_str(), "v");
            present.insert(k.clone());
        }
        for k in &deletes {
            let before = t.len();
            let removed = t.delete(k);
            prop_assert_eq!(removed.is_some(), present.remove(k));
            prop_assert_eq!(t.len(), if removed.is_some() { before - 1 } else { before });
            prop_assert!(t.search(k).is_none());
        }
        for k in &present {
            prop_assert_eq!(t.search(k), Some("v"));
        }
    }
}

proptest! {
    #[test]
    fn prop_probe_complete(key in "\\PC{0,12}", base in 2usize..600) {
        let n = next_prime(base).unwrap();
        let seen: HashSet<usize> = (0..n).map(|a| probe(&key, n, a)).collect();
        prop_assert_eq!(seen.len(), n);
        let seq: HashSet<usize> = ProbeSeq::new(&key, n).collect();
        prop_assert_eq!(seq, seen);
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_preserves_contents(extra in 0usize..300) {
        let mut t = HashTable::new();
        let total = 35 + extra;
        for i in 0..total {
            let prev_base = t.base_capacity();
            let prev_cap = t.capacity();
            t.insert(format!("key{i}"), format!("val{i}"));
            if t.capacity() != prev_cap {
                prop_assert_eq!(t.base_capacity(), prev_base * 2);
                prop_assert_eq!(t.capacity(), next_prime(prev_base * 2).unwrap());
            }
        }
        prop_assert!(t.capacity() > 47);
        for i in 0..total {
            let expected = format!("val{i}");
            prop_assert_eq!(t.search(&format!("key{i}")), Some(expected.as_str()));
        }
    }
}
