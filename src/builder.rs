//! Exclusive in-place construction of a CHAMP set.

use std::fmt;
use std::hash::{BuildHasher, Hash};

use crate::TrieSet;
use crate::equivalence::{DefaultEquivalence, Equivalence};
use crate::hash::{self, DefaultHashBuilder};
use crate::node::{BranchNode, Entry};
use crate::ops::contains::contains_in_branch;
use crate::ops::insert::insert_in_place;

/// Builder that grows a private trie in place, then freezes it into a
/// [`TrieSet`].
///
/// The builder owns its root by value and never hands out node references,
/// so no other set can observe its in-place edits. It is not `Clone`;
/// [`build`](Self::build) consumes it. Persistent updates are only available
/// on the frozen set.
pub struct TrieSetBuilder<T, S = DefaultHashBuilder> {
    root: BranchNode<T>,
    hasher: S,
}

impl<T> TrieSetBuilder<T> {
    /// Creates an empty builder with the default hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }
}

impl<T, S> TrieSetBuilder<T, S> {
    /// Creates an empty builder that hashes elements with `hasher`.
    #[must_use]
    pub const fn with_hasher(hasher: S) -> Self {
        Self {
            root: BranchNode::empty(),
            hasher,
        }
    }

    /// Returns the number of elements inserted so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.root.size
    }

    /// Returns `true` if nothing has been inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.size == 0
    }

    /// Freezes the builder into an immutable, shareable set.
    #[must_use]
    pub fn build(self) -> TrieSet<T, S> {
        #[cfg(feature = "tracing")]
        tracing::debug!(len = self.root.size, "builder: frozen into persistent set");
        TrieSet::from_root(self.root, self.hasher)
    }
}

impl<T: Hash + Clone, S: BuildHasher> TrieSetBuilder<T, S> {
    /// Inserts `value` in place. Returns `true` if it was not already present.
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Eq,
    {
        self.insert_with(value, &DefaultEquivalence)
    }

    /// Inserts `value` in place unless an element equivalent under `eq` is
    /// present. Returns `true` if it was added.
    pub fn insert_with<E>(&mut self, value: T, eq: &E) -> bool
    where
        E: Equivalence<T> + ?Sized,
    {
        let hash = hash::hash_one(&self.hasher, &value);
        insert_in_place(&mut self.root, Entry { hash, value }, 0, eq)
    }

    /// Returns `true` if `value` has been inserted.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool
    where
        T: Eq,
    {
        let hash = hash::hash_one(&self.hasher, value);
        contains_in_branch(&self.root, value, hash, 0, &DefaultEquivalence)
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<T, S: Default> Default for TrieSetBuilder<T, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T, S> fmt::Debug for TrieSetBuilder<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieSetBuilder")
            .field("len", &self.root.size)
            .finish_non_exhaustive()
    }
}

impl<T: Hash + Eq + Clone, S: BuildHasher> Extend<T> for TrieSetBuilder<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}
