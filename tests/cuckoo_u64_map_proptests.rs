// Property tests for the u64-keyed table through the public surface,
// modeled against std::collections::HashMap.

use cuckoo_hashmap::{CuckooU64Map, U64TabulationFamily};
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i64),
    Remove(usize),
    Get(usize),
    CursorSweep,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<u64>, Vec<OpI>)> {
    proptest::collection::btree_set(any::<u64>(), 1..=10).prop_flat_map(|pool| {
        let pool: Vec<u64> = pool.into_iter().collect();
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i64>()).prop_map(|(i, v)| OpI::Put(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            Just(OpI::CursorSweep),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against HashMap. A fresh cursor
// sweep after any prefix of operations must enumerate exactly the model's
// entries; put/get/remove return the model's answers; len stays in parity.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: CuckooU64Map<i64, U64TabulationFamily> =
            CuckooU64Map::with_capacity(U64TabulationFamily, 1);
        let mut model: HashMap<u64, i64> = HashMap::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = pool[i];
                    let prev = sut.put(k, v).expect("tabulation reseed must succeed");
                    prop_assert_eq!(prev, model.insert(k, v));
                }
                OpI::Remove(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.remove(k), model.remove(&k));
                }
                OpI::Get(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.get(k), model.get(&k));
                }
                OpI::CursorSweep => {
                    let mut cur = sut.cursor();
                    let mut seen: Vec<(u64, i64)> = Vec::new();
                    while cur.has_next(&sut).unwrap() {
                        cur.advance(&sut).unwrap();
                        seen.push((cur.key(&sut).unwrap(), *cur.value(&sut).unwrap()));
                    }
                    seen.sort_unstable();
                    let mut expect: Vec<(u64, i64)> =
                        model.iter().map(|(&k, &v)| (k, v)).collect();
                    expect.sort_unstable();
                    prop_assert_eq!(seen, expect);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }

        // Drain through a cursor at the end; every model entry must come
        // out exactly once.
        let mut cur = sut.cursor();
        while cur.has_next(&sut).unwrap() {
            cur.advance(&sut).unwrap();
            let k = cur.key(&sut).unwrap();
            let v = cur.remove(&mut sut).unwrap();
            prop_assert_eq!(model.remove(&k), Some(v));
        }
        prop_assert!(model.is_empty());
        prop_assert!(sut.is_empty());
    }
}
