//! Persistent CHAMP set.

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use crate::builder::TrieSetBuilder;
use crate::equivalence::{DefaultEquivalence, Equivalence};
use crate::hash::{self, DefaultHashBuilder};
use crate::iter::Iter;
use crate::node::{BranchNode, Entry};
use crate::ops::contains::contains_in_branch;
use crate::ops::insert::insert_into_branch;
use crate::ops::remove::remove_from_branch;
use crate::validate::{self, InvariantError};

/// Persistent hash set based on a CHAMP trie.
///
/// Every update returns a new set and leaves the receiver untouched; the two
/// share all nodes the update did not touch. Cloning is O(1). Nodes are
/// reference counted with [`Arc`], so sets may be shared across threads.
///
/// Equivalence is chosen per call: the `*_with` methods take any
/// [`Equivalence`], the plain methods use the element's [`Eq`].
pub struct TrieSet<T, S = DefaultHashBuilder> {
    root: Arc<BranchNode<T>>,
    hasher: S,
}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<T> TrieSet<T> {
    /// Creates an empty set with the default hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }
}

impl<T, S> TrieSet<T, S> {
    /// Creates an empty set that hashes elements with `hasher`.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            root: Arc::new(BranchNode::empty()),
            hasher,
        }
    }

    /// Freezes an exclusively built root into a shareable set.
    pub(super) fn from_root(root: BranchNode<T>, hasher: S) -> Self {
        Self {
            root: Arc::new(root),
            hasher,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.size
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.size == 0
    }

    /// Returns the set's hasher builder.
    #[must_use]
    pub const fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Returns `true` if both sets share the same root node.
    ///
    /// Sharing implies equal contents; the converse does not hold.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }

    /// Returns the number of node levels on the longest root-to-leaf path.
    ///
    /// An empty set has depth 1 (its root); the maximum is 8 (seven branch
    /// levels and a collision node).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Returns an iterator over references to the elements.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root)
    }

    #[cfg(test)]
    pub(super) fn root(&self) -> &BranchNode<T> {
        &self.root
    }
}

// ---------------------------------------------------------------------------
// Read operations — T: Hash
// ---------------------------------------------------------------------------

impl<T: Hash, S: BuildHasher> TrieSet<T, S> {
    /// Returns `true` if the set contains `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool
    where
        T: Eq,
    {
        self.contains_with(value, &DefaultEquivalence)
    }

    /// Returns `true` if the set contains an element equivalent to `value`
    /// under `eq`.
    #[must_use]
    pub fn contains_with<E>(&self, value: &T, eq: &E) -> bool
    where
        E: Equivalence<T> + ?Sized,
    {
        let hash = hash::hash_one(&self.hasher, value);
        contains_in_branch(&self.root, value, hash, 0, eq)
    }

    /// Checks every structural invariant of the trie.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantError`] found.
    pub fn validate(&self) -> Result<(), InvariantError> {
        validate::validate_root(&self.root, &self.hasher).map(|_| ())
    }
}

// ---------------------------------------------------------------------------
// Write operations — T: Hash + Clone, S: Clone
// ---------------------------------------------------------------------------

impl<T: Hash + Clone, S: BuildHasher + Clone> TrieSet<T, S> {
    /// Returns a set that also contains `value`.
    ///
    /// If `value` is already present the result shares this set's root.
    #[must_use]
    pub fn insert(&self, value: T) -> Self
    where
        T: Eq,
    {
        self.insert_with(value, &DefaultEquivalence)
    }

    /// Returns a set that also contains `value`, treating elements equivalent
    /// under `eq` as already present.
    #[must_use]
    pub fn insert_with<E>(&self, value: T, eq: &E) -> Self
    where
        E: Equivalence<T> + ?Sized,
    {
        let hash = hash::hash_one(&self.hasher, &value);
        insert_into_branch(&self.root, Entry { hash, value }, 0, eq)
            .map_or_else(|| self.clone(), |root| Self::from_root(root, self.hasher.clone()))
    }

    /// Returns a set without `value`.
    ///
    /// If `value` is absent the result shares this set's root.
    #[must_use]
    pub fn remove(&self, value: &T) -> Self
    where
        T: Eq,
    {
        self.remove_with(value, &DefaultEquivalence)
    }

    /// Returns a set without the element equivalent to `value` under `eq`.
    #[must_use]
    pub fn remove_with<E>(&self, value: &T, eq: &E) -> Self
    where
        E: Equivalence<T> + ?Sized,
    {
        let hash = hash::hash_one(&self.hasher, value);
        remove_from_branch(&self.root, value, hash, 0, eq)
            .map_or_else(|| self.clone(), |root| Self::from_root(root, self.hasher.clone()))
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<T, S: Clone> Clone for TrieSet<T, S> {
    fn clone(&self) -> Self {
        Self {
            root: Arc::clone(&self.root),
            hasher: self.hasher.clone(),
        }
    }
}

impl<T, S: Default> Default for TrieSet<T, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T: fmt::Debug, S> fmt::Debug for TrieSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Hash + Eq, S: BuildHasher> PartialEq for TrieSet<T, S> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.len() == other.len() && self.iter().all(|value| other.contains(value))
    }
}

impl<T: Hash + Eq, S: BuildHasher> Eq for TrieSet<T, S> {}

impl<T, S> FromIterator<T> for TrieSet<T, S>
where
    T: Hash + Eq + Clone,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut builder = TrieSetBuilder::with_hasher(S::default());
        builder.extend(iter);
        builder.build()
    }
}

impl<'a, T, S> IntoIterator for &'a TrieSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Creates a [`TrieSet`] containing the given elements.
///
/// ```
/// use champ_set::trie_set;
///
/// let set = trie_set![1, 2, 33];
/// assert_eq!(set.len(), 3);
/// assert!(set.contains(&33));
/// ```
#[macro_export]
macro_rules! trie_set {
    () => {
        $crate::TrieSet::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut builder = $crate::TrieSetBuilder::new();
        $(builder.insert($value);)+
        builder.build()
    }};
}
