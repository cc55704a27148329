// Public-API tests for the generic-key table with real tabulation
// families.

use cuckoo_hashmap::{ByteTabulationFamily, CuckooMap, U64TabulationFamily};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

/// Invariant: put-then-get round trips; remove-then-get is absent.
#[test]
fn round_trip() {
    let mut m: CuckooMap<u64, String, _> = CuckooMap::new(U64TabulationFamily);
    assert_eq!(m.put(17, "seventeen".to_string()).unwrap(), None);
    assert_eq!(m.get(&17), Some(&"seventeen".to_string()));
    assert_eq!(m.remove(&17), Some("seventeen".to_string()));
    assert_eq!(m.get(&17), None);
    assert!(m.is_empty());
}

/// Invariant: overwriting returns the previous value without growing.
#[test]
fn overwrite_returns_previous() {
    let mut m: CuckooMap<u64, i32, _> = CuckooMap::new(U64TabulationFamily);
    assert_eq!(m.put(5, 1).unwrap(), None);
    assert_eq!(m.put(5, 2).unwrap(), Some(1));
    assert_eq!(m.put(5, 3).unwrap(), Some(2));
    assert_eq!(m.len(), 1);
    assert_eq!(m.get(&5), Some(&3));
}

/// Invariant: removing an absent key returns None and leaves the size
/// unchanged.
#[test]
fn idempotent_removal() {
    let mut m: CuckooMap<u64, i32, _> = CuckooMap::new(U64TabulationFamily);
    assert_eq!(m.put(1, 10).unwrap(), None);
    assert_eq!(m.remove(&2), None);
    assert_eq!(m.len(), 1);
    assert_eq!(m.remove(&1), Some(10));
    assert_eq!(m.remove(&1), None);
    assert_eq!(m.len(), 0);
}

/// Invariant: the table grows through many doublings without losing or
/// duplicating entries; every key remains reachable afterwards.
#[test]
fn growth_to_ten_thousand_keys() {
    let mut m: CuckooMap<u64, u64, _> = CuckooMap::with_capacity(U64TabulationFamily, 1);
    let keys: Vec<u64> = lcg(0xfeed).take(10_000).collect();
    for (i, &k) in keys.iter().enumerate() {
        assert_eq!(m.put(k, i as u64).unwrap(), None);
    }
    assert_eq!(m.len(), keys.len());
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(m.get(k), Some(&(i as u64)));
    }
    // Remove every other key, then re-check both halves.
    for k in keys.iter().step_by(2) {
        assert!(m.remove(k).is_some());
    }
    assert_eq!(m.len(), keys.len() / 2);
    for (i, k) in keys.iter().enumerate() {
        if i % 2 == 0 {
            assert_eq!(m.get(k), None);
        } else {
            assert_eq!(m.get(k), Some(&(i as u64)));
        }
    }
}

/// Invariant: iteration visits each live entry exactly once, in some
/// order, and agrees with len().
#[test]
fn iteration_matches_len() {
    let mut m: CuckooMap<u64, u64, _> = CuckooMap::new(U64TabulationFamily);
    for k in 0..500u64 {
        assert_eq!(m.put(k, k * k).unwrap(), None);
    }
    let mut seen: Vec<u64> = m.iter().map(|(&k, _)| k).collect();
    assert_eq!(seen.len(), m.len());
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 500);
    for (&k, &v) in m.iter() {
        assert_eq!(v, k * k);
    }
}

/// Invariant: get_mut mutates in place without structural effects.
#[test]
fn get_mut_updates_in_place() {
    let mut m: CuckooMap<u64, i32, _> = CuckooMap::new(U64TabulationFamily);
    assert_eq!(m.put(3, 30).unwrap(), None);
    let cur = m.cursor();
    *m.get_mut(&3).unwrap() += 7;
    assert_eq!(m.get(&3), Some(&37));
    assert_eq!(m.get_mut(&4), None);
    // Value mutation is not structural: the cursor stays valid.
    assert_eq!(cur.has_next(&m), Ok(true));
}

/// Invariant: byte-sequence keys at a fixed declared width behave like
/// integer keys.
#[test]
fn byte_sequence_keys() {
    let family: ByteTabulationFamily<[u8; 8]> = ByteTabulationFamily::new(8);
    let mut m: CuckooMap<[u8; 8], u32, _> = CuckooMap::new(family);
    for i in 0..200u64 {
        assert_eq!(m.put(i.to_be_bytes(), i as u32).unwrap(), None);
    }
    assert_eq!(m.len(), 200);
    for i in 0..200u64 {
        assert_eq!(m.get(&i.to_be_bytes()), Some(&(i as u32)));
    }
    assert_eq!(m.get(&1234u64.to_be_bytes()), None);
}

/// Invariant: a cursor drains the whole table through its own removals
/// while staying valid, ending at an empty table.
#[test]
fn cursor_drains_table() {
    let mut m: CuckooMap<u64, u64, _> = CuckooMap::new(U64TabulationFamily);
    for k in 0..100u64 {
        assert_eq!(m.put(k, k).unwrap(), None);
    }
    let mut cur = m.cursor();
    let mut drained = 0;
    while cur.has_next(&m).unwrap() {
        cur.advance(&m).unwrap();
        let (k, v) = cur.remove(&mut m).unwrap();
        assert_eq!(k, v);
        drained += 1;
    }
    assert_eq!(drained, 100);
    assert!(m.is_empty());
}
