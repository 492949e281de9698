//! `AdHash` — incremental fingerprint of a key set.
//!
//! Computes `φ(S) = Σ f(k)` over all keys using wrapping arithmetic, so the
//! fingerprint is updated in O(1) on every insert and remove and does not
//! depend on insertion order. Equal key sets always have equal fingerprints;
//! different fingerprints therefore prove that two collections differ.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// First mixing seed (golden ratio constant).
const SEED_1: u64 = 0x9E37_79B9_7F4A_7C15;

/// Second mixing seed (large prime).
const SEED_2: u64 = 0x517C_C1B7_2722_0A95;

/// Computes the 64-bit hash of a value using the standard hasher.
///
/// Uses fixed hasher keys, so the result is stable across collections and
/// threads of the same process.
#[must_use]
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Computes the `AdHash` contribution of a single key.
///
/// `f(k) = (key_hash ⊕ SEED₂) · SEED₁`
///
/// The seed keeps a zero key hash from contributing nothing.
#[must_use]
pub const fn key_adhash(key_hash: u64) -> u64 {
    (key_hash ^ SEED_2).wrapping_mul(SEED_1)
}

/// Returns `φ(S ∪ {k})` given `φ(S)`, for a key `k` not in `S`.
#[must_use]
pub fn with_key<K: Hash + ?Sized>(adhash: u64, key: &K) -> u64 {
    adhash.wrapping_add(key_adhash(hash_one(key)))
}

/// Returns `φ(S \ {k})` given `φ(S)`, for a key `k` in `S`.
#[must_use]
pub fn without_key<K: Hash + ?Sized>(adhash: u64, key: &K) -> u64 {
    adhash.wrapping_sub(key_adhash(hash_one(key)))
}
