//! Generic-key cuckoo table.
//!
//! One backing array of `2r` slots split into two logical sub-tables; every
//! present key occupies exactly one of its two candidate slots, one per
//! sub-table. Insertion runs a bounded kick-out chain; a chain that
//! exhausts its bound triggers a reseed (fresh hash-function pair, full
//! rehash), and crossing the load bound triggers capacity doubling.

use crate::error::{CursorError, RehashFailed};
use crate::family::{HashFamily, HashFn};
use crate::params::{Geometry, DEFAULT_EPSILON, DEFAULT_MIN_CAPACITY, DEFAULT_REHASH_TRIES};
use core::fmt;
use core::mem;

struct Entry<K, V> {
    key: K,
    value: V,
}

fn alloc_slots<K, V>(len: usize) -> Box<[Option<Entry<K, V>>]> {
    core::iter::repeat_with(|| None).take(len).collect()
}

/// Cuckoo hash map for arbitrary `Eq` keys, hashed by functions sampled
/// from `F`.
///
/// Single-threaded by design: exclusive `&mut` access is the only write
/// discipline, and detached [`Cursor`]s detect structural modification via
/// a stamp rather than any synchronization.
pub struct CuckooMap<K, V, F: HashFamily<K>> {
    family: F,
    h1: F::Hasher,
    h2: F::Hasher,
    geo: Geometry,
    rehash_tries: u32,
    n: usize,
    slots: Box<[Option<Entry<K, V>>]>,
    // Modification stamp for cursors to detect concurrent structural change.
    stamp: u64,
}

impl<K: Eq, V, F: HashFamily<K>> CuckooMap<K, V, F> {
    /// Creates a table with the default minimum capacity (58, giving
    /// r = 64) and slack 0.1.
    pub fn new(family: F) -> CuckooMap<K, V, F> {
        Self::with_capacity_and_slack(family, DEFAULT_MIN_CAPACITY, DEFAULT_EPSILON)
    }

    /// Creates a table sized for at least `min_capacity` entries before the
    /// first doubling, with slack 0.1.
    pub fn with_capacity(family: F, min_capacity: usize) -> CuckooMap<K, V, F> {
        Self::with_capacity_and_slack(family, min_capacity, DEFAULT_EPSILON)
    }

    /// Creates a table with an explicit slack. Larger slack lowers the load
    /// factor but shortens eviction chains.
    pub fn with_capacity_and_slack(
        mut family: F,
        min_capacity: usize,
        epsilon: f64,
    ) -> CuckooMap<K, V, F> {
        let geo = Geometry::new(min_capacity, epsilon);
        let h1 = family.sample();
        let h2 = family.sample();
        CuckooMap {
            family,
            h1,
            h2,
            geo,
            rehash_tries: DEFAULT_REHASH_TRIES,
            n: 0,
            slots: alloc_slots(2 * geo.r),
            stamp: 0,
        }
    }

    /// Overrides the reseed retry budget
    /// ([`DEFAULT_REHASH_TRIES`](crate::DEFAULT_REHASH_TRIES) by default).
    pub fn with_rehash_tries(mut self, tries: u32) -> CuckooMap<K, V, F> {
        self.rehash_tries = tries;
        self
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    fn slot1(&self, key: &K) -> usize {
        self.h1.hash(key) as usize & (self.geo.r - 1)
    }

    #[inline]
    fn slot2(&self, key: &K) -> usize {
        self.geo.r + (self.h2.hash(key) as usize & (self.geo.r - 1))
    }

    // Index of the slot holding `key`, if present.
    pub(crate) fn location(&self, key: &K) -> Option<usize> {
        let i = self.slot1(key);
        if let Some(e) = self.slots[i].as_ref() {
            if e.key == *key {
                return Some(i);
            }
        }
        let j = self.slot2(key);
        if let Some(e) = self.slots[j].as_ref() {
            if e.key == *key {
                return Some(j);
            }
        }
        None
    }

    /// Looks up a key: two probes, never mutates.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.location(key)
            .and_then(|i| self.slots[i].as_ref())
            .map(|e| &e.value)
    }

    /// Mutable lookup. Replacing the value through the returned reference
    /// is not a structural change and does not invalidate cursors.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let i = self.location(key)?;
        self.slots[i].as_mut().map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.location(key).is_some()
    }

    /// Inserts or overwrites, returning the previous value for an already
    /// present key. May double the table or reseed the hash family on the
    /// way; a reseed that exhausts the retry budget surfaces as
    /// [`RehashFailed`].
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>, RehashFailed> {
        self.stamp += 1;
        // Probe both homes first so the eviction path cannot duplicate a
        // present key.
        let mut i = self.slot1(&key);
        if let Some(e) = self.slots[i].as_mut() {
            if e.key == key {
                return Ok(Some(mem::replace(&mut e.value, value)));
            }
        }
        let j = self.slot2(&key);
        if let Some(e) = self.slots[j].as_mut() {
            if e.key == key {
                return Ok(Some(mem::replace(&mut e.value, value)));
            }
        }

        if self.n == self.geo.max_n {
            self.expand()?;
            i = self.slot1(&key);
        }

        if let Some(unplaced) = self.attempt_insert(Entry { key, value }, i) {
            self.reseed(unplaced)?;
        }
        self.n += 1;
        Ok(None)
    }

    /// Removes a key, returning its value. Only clears the slot; the table
    /// never shrinks, because removal through a live cursor could not
    /// survive a shrink-triggered rehash.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let i = self.location(key)?;
        self.stamp += 1;
        self.n -= 1;
        self.slots[i].take().map(|e| e.value)
    }

    // The kick-out chain: place the entry at sub-table-1 slot `i`, move the
    // displaced occupant to its sub-table-2 slot, and so on, up to max_loop
    // rounds. Returns the entry left without a nest when the bound is hit.
    fn attempt_insert(&mut self, mut e: Entry<K, V>, mut i: usize) -> Option<Entry<K, V>> {
        for _ in 0..self.geo.max_loop {
            let f = match self.slots[i].replace(e) {
                None => return None,
                Some(f) => f,
            };
            let j = self.slot2(&f.key);
            let g = match self.slots[j].replace(f) {
                None => return None,
                Some(g) => g,
            };
            i = self.slot1(&g.key);
            e = g;
        }
        Some(e)
    }

    // Doubles capacity and rehashes under the current pair; if even that
    // fails, falls through to resampling at the new size.
    fn expand(&mut self) -> Result<(), RehashFailed> {
        self.geo.grow();
        let mut spill = Vec::with_capacity(self.n);
        self.drain_into(&mut spill);
        if self.try_place_all(&mut spill) {
            return Ok(());
        }
        self.resample_until_placed(spill)
    }

    // Reseed: the chain left `pending` without a nest, so the current pair
    // is unworkable at this occupancy.
    fn reseed(&mut self, pending: Entry<K, V>) -> Result<(), RehashFailed> {
        let mut spill = Vec::with_capacity(self.n + 1);
        self.drain_into(&mut spill);
        spill.push(pending);
        self.resample_until_placed(spill)
    }

    fn resample_until_placed(&mut self, mut spill: Vec<Entry<K, V>>) -> Result<(), RehashFailed> {
        for _ in 0..self.rehash_tries {
            self.h1 = self.family.sample();
            self.h2 = self.family.sample();
            if self.try_place_all(&mut spill) {
                return Ok(());
            }
        }
        // Fatal. Park every entry back in the array so nothing is lost to
        // iteration or draining; positional lookup is meaningless from here.
        self.n = spill.len();
        for (slot, e) in self.slots.iter_mut().zip(spill.drain(..)) {
            *slot = Some(e);
        }
        Err(RehashFailed {
            tries: self.rehash_tries,
        })
    }

    // Reinserts every spilled entry into a fresh backing array under the
    // current pair. On failure the fresh array is drained back into `spill`
    // (placed, unplaced and untried entries alike) and false is returned.
    fn try_place_all(&mut self, spill: &mut Vec<Entry<K, V>>) -> bool {
        self.slots = alloc_slots(2 * self.geo.r);
        let mut queue = mem::take(spill).into_iter();
        while let Some(e) = queue.next() {
            let i = self.slot1(&e.key);
            if let Some(unplaced) = self.attempt_insert(e, i) {
                self.drain_into(spill);
                spill.push(unplaced);
                spill.extend(queue);
                return false;
            }
        }
        true
    }

    fn drain_into(&mut self, spill: &mut Vec<Entry<K, V>>) {
        for slot in self.slots.iter_mut() {
            if let Some(e) = slot.take() {
                spill.push(e);
            }
        }
    }

    /// Borrowing iterator over entries in arbitrary slot order. The shared
    /// borrow freezes the table for the iterator's lifetime, so it cannot
    /// observe structural change; use a [`Cursor`] to interleave traversal
    /// with removal.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remain: self.n,
        }
    }

    /// Detached traversal handle; see [`Cursor`].
    pub fn cursor(&self) -> Cursor {
        Cursor {
            current: None,
            remain: self.n,
            stamp: self.stamp,
        }
    }

    #[cfg(test)]
    pub(crate) fn r(&self) -> usize {
        self.geo.r
    }

    #[cfg(test)]
    pub(crate) fn max_n(&self) -> usize {
        self.geo.max_n
    }

    #[cfg(test)]
    pub(crate) fn occurrences(&self, key: &K) -> usize {
        self.slots.iter().flatten().filter(|e| e.key == *key).count()
    }
}

impl<K: Eq, V, F: HashFamily<K>> fmt::Debug for CuckooMap<K, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CuckooMap")
            .field("len", &self.n)
            .field("capacity", &self.geo.max_n)
            .finish()
    }
}

/// Iterator over `(&K, &V)` pairs of a [`CuckooMap`].
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Option<Entry<K, V>>>,
    remain: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(e) = slot.as_ref() {
                self.remain -= 1;
                return Some((&e.key, &e.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remain, Some(self.remain))
    }
}

/// Stateful traversal handle over live slots, detached from the table:
/// every operation takes the owning map by reference and first validates
/// the modification stamp captured at creation, failing fast with
/// [`CursorError::Stale`] after any structural change. Removing the
/// current entry through [`Cursor::remove`] refreshes this cursor's stamp,
/// so it (and only it) survives its own removals.
#[derive(Clone, Debug)]
pub struct Cursor {
    current: Option<usize>,
    remain: usize,
    stamp: u64,
}

impl Cursor {
    fn check<K: Eq, V, F: HashFamily<K>>(
        &self,
        map: &CuckooMap<K, V, F>,
    ) -> Result<(), CursorError> {
        if self.stamp != map.stamp {
            return Err(CursorError::Stale);
        }
        Ok(())
    }

    /// Whether another entry remains ahead of the cursor.
    pub fn has_next<K: Eq, V, F: HashFamily<K>>(
        &self,
        map: &CuckooMap<K, V, F>,
    ) -> Result<bool, CursorError> {
        self.check(map)?;
        Ok(self.remain > 0)
    }

    /// Moves to the next live slot.
    pub fn advance<K: Eq, V, F: HashFamily<K>>(
        &mut self,
        map: &CuckooMap<K, V, F>,
    ) -> Result<(), CursorError> {
        self.check(map)?;
        if self.remain == 0 {
            return Err(CursorError::Exhausted);
        }
        self.remain -= 1;
        let mut i = self.current.map_or(0, |c| c + 1);
        while map.slots[i].is_none() {
            i += 1;
        }
        self.current = Some(i);
        Ok(())
    }

    /// Key of the current entry.
    pub fn key<'a, K: Eq, V, F: HashFamily<K>>(
        &self,
        map: &'a CuckooMap<K, V, F>,
    ) -> Result<&'a K, CursorError> {
        self.check(map)?;
        let i = self.current.ok_or(CursorError::NotPositioned)?;
        map.slots[i]
            .as_ref()
            .map(|e| &e.key)
            .ok_or(CursorError::NotPositioned)
    }

    /// Value of the current entry.
    pub fn value<'a, K: Eq, V, F: HashFamily<K>>(
        &self,
        map: &'a CuckooMap<K, V, F>,
    ) -> Result<&'a V, CursorError> {
        self.check(map)?;
        let i = self.current.ok_or(CursorError::NotPositioned)?;
        map.slots[i]
            .as_ref()
            .map(|e| &e.value)
            .ok_or(CursorError::NotPositioned)
    }

    /// Replaces the current entry's value, returning the old one. Not a
    /// structural change: other cursors stay valid.
    pub fn set_value<K: Eq, V, F: HashFamily<K>>(
        &self,
        map: &mut CuckooMap<K, V, F>,
        value: V,
    ) -> Result<V, CursorError> {
        self.check(map)?;
        let i = self.current.ok_or(CursorError::NotPositioned)?;
        match map.slots[i].as_mut() {
            Some(e) => Ok(mem::replace(&mut e.value, value)),
            None => Err(CursorError::NotPositioned),
        }
    }

    /// Removes the current entry, returning it. Bumps the table's stamp
    /// (invalidating every other cursor) and then refreshes this cursor's
    /// own captured stamp so the traversal can continue.
    pub fn remove<K: Eq, V, F: HashFamily<K>>(
        &mut self,
        map: &mut CuckooMap<K, V, F>,
    ) -> Result<(K, V), CursorError> {
        self.check(map)?;
        let i = self.current.ok_or(CursorError::NotPositioned)?;
        let e = map.slots[i].take().ok_or(CursorError::NotPositioned)?;
        map.n -= 1;
        map.stamp += 1;
        self.stamp = map.stamp;
        Ok((e.key, e.value))
    }
}
