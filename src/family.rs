//! Hash-function and hash-family contracts consumed by the tables.

/// One sampled hash function for keys of type `K`. Pure and stateless once
/// sampled: the same key always hashes to the same value.
pub trait HashFn<K: ?Sized> {
    /// Computes the hash value for the given key.
    fn hash(&self, key: &K) -> u32;
}

/// A family of hash functions from which fresh functions can be drawn on
/// demand, arbitrarily many times. Each sample must be independent of all
/// prior samples; the tables rely on this when they discard a pair that
/// proved unworkable and reseed.
///
/// Sampling takes `&mut self` because concrete families consume entropy or
/// advance internal state.
pub trait HashFamily<K: ?Sized> {
    /// The function type this family produces.
    type Hasher: HashFn<K>;

    /// Draws a fresh, independently sampled hash function.
    fn sample(&mut self) -> Self::Hasher;
}
