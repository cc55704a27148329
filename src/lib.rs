//! cuckoo-hashmap: single-threaded cuckoo hash maps with re-samplable
//! hash families, O(1) worst-case lookup and amortized O(1) insertion.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: build the cuckoo engine in small, verifiable layers so each
//!   piece can be reasoned about independently.
//! - Layers:
//!   - HashFn / HashFamily: the contract the tables consume, i.e. one sampled
//!     hash function, and a source that can be re-sampled arbitrarily
//!     often with independent draws.
//!   - TabulationFn + the ready-made families: simple tabulation hashing
//!     over fixed-width byte keys; a fresh random lookup table per sample
//!     is what makes draws independent.
//!   - CuckooMap<K, V, F>: the generic-key engine. One backing array of
//!     2r option slots split into two logical sub-tables; bounded
//!     kick-out insertion, capacity doubling at the load bound, family
//!     reseeding when a chain fails.
//!   - CuckooU64Map<V, F> + Cursor + GenericView: boxing-free variant for
//!     native 64-bit keys over parallel flat arrays, with an index-based
//!     cursor and a bijection adapter restoring the generic-key surface.
//!
//! Constraints
//! - Single-threaded: no locks, no atomics; exclusive `&mut` is the only
//!   write discipline. Moving a table between threads is fine; sharing
//!   one is the caller's problem.
//! - Exactly-one-location: after every completed operation each present
//!   key occupies exactly one of its two candidate slots, so lookups are
//!   two probes, worst case.
//! - Load bound n <= floor(r/(1+eps)) and chain bound
//!   min(r, ceil(3 ln r / ln(1+eps))) are recomputed on every doubling;
//!   the slack eps trades memory for shorter eviction chains.
//! - Detached cursors validate a modification stamp on every call and
//!   fail fast with a typed error instead of observing torn state;
//!   removal through a cursor re-stamps only that cursor.
//!
//! Why this split?
//! - Localize invariants: the hash contract, the geometry arithmetic and
//!   the eviction chain each have a small, precise surface.
//! - The u64 variant shares the algorithm but not the storage; keeping it
//!   separate keeps both legible instead of abstracting over slot layout.
//! - Clear failure boundaries: a reseed that exhausts its retry budget is
//!   a configuration defect (a weak or misused family) and surfaces as a
//!   fatal typed error from the triggering `put`, never an internal loop.
//!
//! Notes and non-goals
//! - No shrink-on-delete: removal through a live cursor could not survive
//!   a shrink-triggered rehash, so removal only clears a slot.
//! - Tabulation hashing is not cryptographic; it is merely well-behaved
//!   enough for the reseed protocol to terminate quickly in practice.
//! - No concurrent variant; see the constraints above.

pub mod error;
pub mod family;
pub mod map;
mod map_proptest;
mod params;
pub mod tabulation;
pub mod u64_map;
pub mod view;

// Public surface
pub use error::{CursorError, RehashFailed};
pub use family::{HashFamily, HashFn};
pub use map::CuckooMap;
pub use params::DEFAULT_REHASH_TRIES;
pub use tabulation::{
    ByteTabulationFamily, TabulationFn, U32TabulationFamily, U64TabulationFamily,
};
pub use u64_map::CuckooU64Map;
pub use view::{GenericView, IdentityBijection, U64Bijection};
