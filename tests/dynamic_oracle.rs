//! Dynamic index behaviour checked against `BTreeMap` under operation
//! traces, including the merge-ordering and tombstone-lifetime cases.

#![cfg(feature = "std")]

use std::collections::BTreeMap;

use plindex::Dynamic;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, u32),
    Erase(u16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<u16>(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k % 512, v)),
        1 => any::<u16>().prop_map(|k| Op::Erase(k % 512)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn matches_btreemap_oracle(
        base in 2usize..32,
        min_indexed in 0usize..4,
        ops in prop::collection::vec(op_strategy(), 1..2000)
    ) {
        let mut index: Dynamic<u64, u32> = Dynamic::new(base, min_indexed);
        let mut oracle: BTreeMap<u64, u32> = BTreeMap::new();

        for op in &ops {
            match *op {
                Op::Insert(k, v) => {
                    index.insert_or_assign(k as u64, v);
                    oracle.insert(k as u64, v);
                }
                Op::Erase(k) => {
                    let removed = index.erase(&(k as u64));
                    prop_assert_eq!(removed, oracle.remove(&(k as u64)).is_some());
                }
            }
        }

        prop_assert_eq!(index.len(), oracle.len());

        for k in 0u64..512 {
            prop_assert_eq!(index.find(&k), oracle.get(&k), "find({})", k);
            prop_assert_eq!(index.count(&k), usize::from(oracle.contains_key(&k)));
        }

        let got: Vec<(u64, u32)> = index.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u64, u32)> = oracle.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(got, expected);

        for probe in [0u64, 17, 255, 256, 511, 512] {
            let got: Option<(u64, u32)> =
                index.lower_bound(&probe).next().map(|(k, v)| (*k, *v));
            let expected = oracle.range(probe..).next().map(|(k, v)| (*k, *v));
            prop_assert_eq!(got, expected, "lower_bound({})", probe);

            let got: Option<(u64, u32)> =
                index.upper_bound(&probe).next().map(|(k, v)| (*k, *v));
            let expected = oracle
                .range((core::ops::Bound::Excluded(probe), core::ops::Bound::Unbounded))
                .next()
                .map(|(k, v)| (*k, *v));
            prop_assert_eq!(got, expected, "upper_bound({})", probe);
        }
    }

    #[test]
    fn overwrite_always_yields_newest(
        base in 2usize..16,
        rounds in 1usize..6,
        keys in prop::collection::vec(0u64..64, 1..200)
    ) {
        let mut index: Dynamic<u64, u64> = Dynamic::new(base, 1);
        let mut oracle: BTreeMap<u64, u64> = BTreeMap::new();
        let mut stamp = 0u64;

        // Repeated overwrites of the same key set force merges where a
        // stable (key asc, version asc) merge would resurrect stale
        // values.
        for _ in 0..rounds {
            for &k in &keys {
                stamp += 1;
                index.insert_or_assign(k, stamp);
                oracle.insert(k, stamp);
            }
        }

        for (&k, &v) in &oracle {
            prop_assert_eq!(index.find(&k), Some(&v), "key {}", k);
        }
    }
}

#[test]
fn scenario_churn() {
    let mut index: Dynamic<u64, u64> = Dynamic::new(8, 2);

    for k in 1..=1000u64 {
        index.insert_or_assign(k, k);
    }
    for k in 1..=100u64 {
        index.insert_or_assign(k, 1000 + k);
    }
    for k in 50..=60u64 {
        assert!(index.erase(&k));
    }

    assert_eq!(index.find(&1), Some(&1001));
    assert_eq!(index.find(&55), None);
    assert_eq!(index.len(), 989);

    let keys: Vec<u64> = index.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys.len(), 989);
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
    assert!(!keys.contains(&55));
}

#[test]
fn erase_then_reinsert() {
    let mut index: Dynamic<u64, u32> = Dynamic::new(4, 1);

    index.insert_or_assign(10, 1);
    for i in 0..100u64 {
        index.insert_or_assign(1000 + i, 0);
    }
    assert!(index.erase(&10));
    for i in 0..100u64 {
        index.insert_or_assign(2000 + i, 0);
    }
    index.insert_or_assign(10, 2);

    assert_eq!(index.find(&10), Some(&2));
    assert_eq!(index.count(&10), 1);
}

#[test]
fn bulk_load_then_mutate() {
    let pairs: Vec<(u64, u64)> = (0..500).map(|i| (i * 2, i)).collect();
    let mut index = Dynamic::from_sorted(pairs, 8, 2).unwrap();

    assert_eq!(index.len(), 500);
    index.insert_or_assign(1, 999);
    assert!(index.erase(&0));

    assert_eq!(index.find(&0), None);
    assert_eq!(index.find(&1), Some(&999));
    assert_eq!(index.len(), 500);

    let first: Vec<u64> = index.iter().take(3).map(|(k, _)| *k).collect();
    assert_eq!(first, vec![1, 2, 4]);
}
