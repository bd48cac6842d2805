//! Element hashing.
//!
//! The trie consumes 32-bit hashes. Hashers produce 64 bits, which are folded
//! by XOR-ing the high half into the low half.

use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};

/// Hasher builder used when a set is created without an explicit one.
///
/// Deterministic: equal elements hash equally across sets and processes.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

/// Computes the 32-bit trie hash of a value with the given hasher builder.
#[must_use]
pub fn hash_one<T: Hash + ?Sized, S: BuildHasher>(build: &S, value: &T) -> u32 {
    fold(build.hash_one(value))
}

/// Folds a 64-bit hash into 32 bits.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn fold(hash: u64) -> u32 {
    (hash ^ (hash >> 32)) as u32
}
