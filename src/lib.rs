//! Persistent hash set based on CHAMP.
//!
//! CHAMP (Compressed Hash-Array Mapped Prefix-tree) is a refined HAMT: each
//! branch node consumes a 5-bit fragment of the element's 32-bit hash and
//! stores only its occupied slots, densely, ordered by fragment. Elements
//! whose full hashes collide share a flat collision node.
//!
//! # Key properties
//!
//! - **Persistent**: `insert`/`remove` return a new set; the old one is untouched
//! - **COW structural sharing**: only the path to the changed slot is copied
//! - **Pluggable equivalence**: every operation can take its own [`Equivalence`]
//! - **Exclusive builder**: [`TrieSetBuilder`] grows a private trie in place,
//!   then freezes it into a shareable [`TrieSet`]
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # Example
//!
//! ```
//! use std::hash::{Hash, Hasher};
//!
//! use champ_set::TrieSet;
//!
//! let empty = TrieSet::new();
//! let one = empty.insert("a");
//! let two = one.insert("b");
//!
//! assert!(empty.is_empty());
//! assert_eq!(one.len(), 1);
//! assert!(two.contains(&"a") && two.contains(&"b"));
//!
//! // The same structure queried under a coarser equivalence.
//! #[derive(Clone, PartialEq, Eq)]
//! struct Fact {
//!     id: u32,
//!     note: &'static str,
//! }
//!
//! impl Hash for Fact {
//!     fn hash<H: Hasher>(&self, state: &mut H) {
//!         self.id.hash(state);
//!     }
//! }
//!
//! let same_id = |a: &Fact, b: &Fact| a.id == b.id;
//! let facts = TrieSet::new().insert(Fact { id: 1, note: "x" });
//! let probe = Fact { id: 1, note: "y" };
//! assert!(!facts.contains(&probe));
//! assert!(facts.contains_with(&probe, &same_id));
//! ```
//!
//! # References
//!
//! - Steindorfer & Vinju, 2015 — "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015
//! - Bagwell, 2001 — "Ideal Hash Trees"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod equivalence;
pub mod hash;
pub mod iter;
pub mod validate;

mod array;
mod builder;
mod node;
mod ops;
mod set;

#[cfg(test)]
mod tests;

pub use builder::TrieSetBuilder;
pub use equivalence::{DefaultEquivalence, Equivalence};
pub use set::TrieSet;
pub use validate::InvariantError;
