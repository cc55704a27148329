#![cfg(test)]

// Property tests for CuckooMap kept inside the crate so they can check the
// slot-level invariant without exposing internals.

use crate::map::CuckooMap;
use crate::tabulation::U64TabulationFamily;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<u64>, Vec<OpI>)> {
    proptest::collection::btree_set(any::<u64>(), 1..=12).prop_flat_map(|pool| {
        let pool: Vec<u64> = pool.into_iter().collect();
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `put` returns the model's previous value; `get`/`remove` parity.
// - After each op, every present key occupies exactly one slot across its
//   two candidate positions, and `len` matches the model.
// - `iter` yields each live entry exactly once.
// The table starts at min_capacity = 1 so doubling happens mid-sequence.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: CuckooMap<u64, i32, U64TabulationFamily> =
            CuckooMap::with_capacity(U64TabulationFamily, 1);
        let mut model: HashMap<u64, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = pool[i];
                    let prev = sut.put(k, v).expect("tabulation reseed must succeed");
                    prop_assert_eq!(prev, model.insert(k, v));
                }
                OpI::Remove(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.remove(&k), model.remove(&k));
                }
                OpI::Get(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.get(&k), model.get(&k));
                }
                OpI::Mutate(i, d) => {
                    let k = pool[i];
                    match (sut.get_mut(&k), model.get_mut(&k)) {
                        (Some(sv), Some(mv)) => {
                            *sv = sv.saturating_add(d);
                            *mv = mv.saturating_add(d);
                        }
                        (None, None) => {}
                        _ => prop_assert!(false, "get_mut parity violated"),
                    }
                }
                OpI::Iterate => {
                    let mut seen: Vec<(u64, i32)> =
                        sut.iter().map(|(&k, &v)| (k, v)).collect();
                    seen.sort_unstable();
                    let mut expect: Vec<(u64, i32)> =
                        model.iter().map(|(&k, &v)| (k, v)).collect();
                    expect.sort_unstable();
                    prop_assert_eq!(seen, expect);
                }
            }

            // Post-conditions after each op.
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            for k in &pool {
                let expected = usize::from(model.contains_key(k));
                prop_assert_eq!(
                    sut.occurrences(k),
                    expected,
                    "key {} must occupy exactly {} slot(s)",
                    k,
                    expected
                );
            }
        }
    }
}
