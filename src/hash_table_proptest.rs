#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can inspect
// slot states directly.

use crate::config::Config;
use crate::hash_table::HashTable;
use crate::prime::is_prime;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations: indices shrink to earlier keys, the pool
// shrinks in length, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, String),
    Delete(usize),
    Search(usize),
    SearchRaw(String),
    Resize(usize),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), "[a-z0-9]{0,8}").prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Delete),
            2 => idx.clone().prop_map(OpI::Search),
            1 => "[a-z]{0,5}".prop_map(OpI::SearchRaw),
            1 => (0usize..300).prop_map(OpI::Resize),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run(
    mut sut: HashTable,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let min = sut.config().min_base_capacity;
    let mut model: HashMap<String, String> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let prev = sut.insert(k.as_str(), v.as_str());
                prop_assert_eq!(prev, model.insert(k.clone(), v));
            }
            OpI::Delete(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.delete(k), model.remove(k));
                prop_assert!(sut.search(k).is_none());
            }
            OpI::Search(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.search(k), model.get(k).map(String::as_str));
            }
            OpI::SearchRaw(k) => {
                prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
            }
            OpI::Resize(n) => {
                let before = sut.capacity();
                if !sut.resize(n) {
                    prop_assert_eq!(sut.capacity(), before);
                } else {
                    prop_assert_eq!(sut.base_capacity(), n);
                    prop_assert_eq!(sut.tombstones(), 0);
                }
            }
        }

        // Structural invariants after every op.
        prop_assert_eq!(sut.len(), model.len());
        prop_assert!(is_prime(sut.capacity()).is_prime());
        prop_assert!(sut.base_capacity() >= min);
        prop_assert!(sut.capacity() >= sut.base_capacity());
        prop_assert!(sut.len() + sut.tombstones() <= sut.capacity());
        let occupied = sut.slots_for_test().iter().filter(|s| s.entry().is_some()).count();
        prop_assert_eq!(occupied, sut.len());
        for (k, v) in &model {
            let holders = sut.slots_for_test().iter().filter(|s| s.holds(k)).count();
            prop_assert_eq!(holders, 1, "key {:?} must occupy exactly one slot", k);
            prop_assert_eq!(sut.search(k), Some(v.as_str()));
        }
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - insert returns the model's previous value; delete returns the removed one.
// - search/contains_key parity, and deleted keys are never found.
// - Capacity stays prime and at or above the minimum base capacity.
// - Live entries occupy exactly one slot each; len matches the model.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(HashTable::new(), pool, ops)?;
    }
}

// Property: Same invariants under a tiny table with tight thresholds, so
// grows and shrinks happen every few operations.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_churn((pool, ops) in arb_scenario()) {
        let config = Config::default()
            .with_min_base_capacity(3)
            .with_grow_threshold(60)
            .with_shrink_threshold(30);
        run(HashTable::with_config(config).unwrap(), pool, ops)?;
    }
}
