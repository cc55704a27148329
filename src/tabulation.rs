//! Simple tabulation hashing: sampled lookup-table hash functions over the
//! byte representation of fixed-width keys.
//!
//! A sampled function holds a `256 x b` table of independently drawn random
//! 32-bit words for a key width of `b` bytes; hashing XORs one word per key
//! byte. Resampling draws an entirely fresh table, which is what makes the
//! family independent across samples. Not cryptographic; just well-behaved
//! enough in practice for the tables' reseed protocol to terminate quickly.

use crate::family::{HashFamily, HashFn};
use core::marker::PhantomData;
use rand::Rng;

/// One sampled tabulation function for keys of a fixed byte width.
///
/// Usable directly through [`hash_bytes`](TabulationFn::hash_bytes) and the
/// integer helpers, or through the ready-made families below.
pub struct TabulationFn {
    key_bytes: usize,
    tab: Box<[u32]>,
}

impl TabulationFn {
    /// Draws a fresh function for keys of `key_bytes` bytes. The only side
    /// effect is consuming entropy from the thread-local generator.
    pub fn sample(key_bytes: usize) -> TabulationFn {
        let mut rng = rand::rng();
        let tab = (0..256 * key_bytes).map(|_| rng.random::<u32>()).collect();
        TabulationFn { key_bytes, tab }
    }

    /// The key width this function was sampled for.
    pub fn key_bytes(&self) -> usize {
        self.key_bytes
    }

    /// Hashes a key given as its byte representation. The slice length must
    /// equal the declared key width.
    pub fn hash_bytes(&self, key: &[u8]) -> u32 {
        assert_eq!(
            key.len(),
            self.key_bytes,
            "key width does not match the sampled table"
        );
        let mut h = 0u32;
        for (i, b) in key.iter().enumerate() {
            h ^= self.tab[i * 256 + *b as usize];
        }
        h
    }

    /// Hashes a 32-bit key, low byte first. Requires a width of at least 4.
    pub fn hash_u32(&self, key: u32) -> u32 {
        self.hash_bytes(&key.to_le_bytes())
    }

    /// Hashes a 64-bit key, low byte first. Requires a width of at least 8.
    pub fn hash_u64(&self, key: u64) -> u32 {
        self.hash_bytes(&key.to_le_bytes())
    }
}

/// Family of tabulation functions for `u32` keys (width 4).
#[derive(Clone, Copy, Debug, Default)]
pub struct U32TabulationFamily;

pub struct U32TabulationFn(TabulationFn);

impl HashFn<u32> for U32TabulationFn {
    #[inline]
    fn hash(&self, key: &u32) -> u32 {
        self.0.hash_u32(*key)
    }
}

impl HashFamily<u32> for U32TabulationFamily {
    type Hasher = U32TabulationFn;

    fn sample(&mut self) -> U32TabulationFn {
        U32TabulationFn(TabulationFn::sample(4))
    }
}

/// Family of tabulation functions for `u64` keys (width 8).
#[derive(Clone, Copy, Debug, Default)]
pub struct U64TabulationFamily;

pub struct U64TabulationFn(TabulationFn);

impl HashFn<u64> for U64TabulationFn {
    #[inline]
    fn hash(&self, key: &u64) -> u32 {
        self.0.hash_u64(*key)
    }
}

impl HashFamily<u64> for U64TabulationFamily {
    type Hasher = U64TabulationFn;

    fn sample(&mut self) -> U64TabulationFn {
        U64TabulationFn(TabulationFn::sample(8))
    }
}

/// Family of tabulation functions for byte-sequence keys of a fixed
/// declared width. Every key presented to a sampled function must have
/// exactly that many bytes.
#[derive(Clone, Copy, Debug)]
pub struct ByteTabulationFamily<K> {
    width: usize,
    _keys: PhantomData<fn() -> K>,
}

impl<K> ByteTabulationFamily<K> {
    pub fn new(width: usize) -> ByteTabulationFamily<K> {
        ByteTabulationFamily {
            width,
            _keys: PhantomData,
        }
    }
}

pub struct ByteTabulationFn<K> {
    tab: TabulationFn,
    _keys: PhantomData<fn() -> K>,
}

impl<K: AsRef<[u8]>> HashFn<K> for ByteTabulationFn<K> {
    #[inline]
    fn hash(&self, key: &K) -> u32 {
        self.tab.hash_bytes(key.as_ref())
    }
}

impl<K: AsRef<[u8]>> HashFamily<K> for ByteTabulationFamily<K> {
    type Hasher = ByteTabulationFn<K>;

    fn sample(&mut self) -> ByteTabulationFn<K> {
        ByteTabulationFn {
            tab: TabulationFn::sample(self.width),
            _keys: PhantomData,
        }
    }
}
