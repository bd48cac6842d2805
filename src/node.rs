//! CHAMP trie node types and bitmap helpers.

use std::fmt;
use std::sync::Arc;

/// Width of an element hash in bits.
pub const HASH_BITS: u32 = 32;

/// Bits per trie level (5 → 32-way branching).
pub const BITS_PER_LEVEL: u32 = 5;

/// Mask selecting one level's hash fragment.
pub const LEVEL_MASK: u32 = (1 << BITS_PER_LEVEL) - 1;

/// Maximum bit-shift value (depth 7, last level uses 2 bits).
pub const MAX_SHIFT: u32 = 30;

/// Maximum number of branch levels between the root and a collision node.
pub const MAX_DEPTH: usize = HASH_BITS.div_ceil(BITS_PER_LEVEL) as usize;

/// Inline element with its precomputed hash.
#[derive(Clone)]
pub struct Entry<T> {
    /// Precomputed 32-bit hash of the element.
    pub hash: u32,
    /// The element.
    pub value: T,
}

/// Occupant of one branch slot.
#[derive(Clone)]
pub enum Slot<T> {
    /// Element stored inline; its bit is set in `valmap`.
    Value(Entry<T>),
    /// Nested subtree; its bit is clear in `valmap`.
    Node(Arc<Node<T>>),
}

/// CHAMP trie node.
///
/// - [`Branch`](Self::Branch) — bitmap-indexed node consuming one 5-bit fragment
/// - [`Collision`](Self::Collision) — flat bucket for full 32-bit hash collisions
#[derive(Clone)]
pub enum Node<T> {
    /// Bitmap-indexed branch node.
    Branch(BranchNode<T>),
    /// Collision node for elements sharing the same 32-bit hash.
    Collision(CollisionNode<T>),
}

/// 32-way sparse branch node.
///
/// Invariants: `popcount(bitmap) == slots.len()`, `valmap & !bitmap == 0`,
/// and the occupant for bit `i` lives at `popcount(bitmap & (bit(i) - 1))`.
#[derive(Clone)]
pub struct BranchNode<T> {
    /// Bitmap of occupied positions.
    pub bitmap: u32,
    /// Bitmap of positions holding an inline element (subset of `bitmap`).
    pub valmap: u32,
    /// Dense occupants ordered by bit position.
    pub slots: Vec<Slot<T>>,
    /// Number of elements reachable from this node.
    pub size: usize,
}

/// Flat bucket of elements that share one full hash.
///
/// Invariant: `elements.len() >= 2` once reachable from a set.
#[derive(Clone)]
pub struct CollisionNode<T> {
    /// The shared 32-bit hash value.
    pub hash: u32,
    /// Colliding elements in insertion order.
    pub elements: Vec<T>,
}

// ---------------------------------------------------------------------------
// Bitmap helpers
// ---------------------------------------------------------------------------

/// Extracts the 5-bit hash fragment at the given bit-shift depth.
#[inline]
#[must_use]
pub const fn fragment(hash: u32, shift: u32) -> u32 {
    (hash >> shift) & LEVEL_MASK
}

/// Returns the single-bit mask for the given fragment (0..31).
#[inline]
#[must_use]
pub const fn mask(frag: u32) -> u32 {
    1 << frag
}

/// Returns the compact index of `bit` within `bitmap`.
///
/// Counts the number of set bits below `bit`.
#[inline]
#[must_use]
pub const fn index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

// ---------------------------------------------------------------------------
// Node accessors
// ---------------------------------------------------------------------------

impl<T> BranchNode<T> {
    /// Creates the empty branch node used as the root of an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            bitmap: 0,
            valmap: 0,
            slots: Vec::new(),
            size: 0,
        }
    }

    /// Returns the number of occupied slots.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bitmap.count_ones() as usize
    }
}

impl<T> Slot<T> {
    /// Returns `true` if the occupant can sit in any slot along its hash path:
    /// an inline element or a collision node.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        match self {
            Self::Value(_) => true,
            Self::Node(node) => matches!(**node, Node::Collision(_)),
        }
    }
}

impl<T> Node<T> {
    /// Returns the number of elements in this subtree.
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Branch(branch) => branch.size,
            Self::Collision(collision) => collision.elements.len(),
        }
    }

    /// Returns the number of node levels on the longest path through this
    /// subtree, counting this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Branch(branch) => branch.depth(),
            Self::Collision(_) => 1,
        }
    }
}

impl<T> BranchNode<T> {
    /// Returns the number of node levels on the longest path from this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Value(_) => 0,
                Slot::Node(node) => node.depth(),
            })
            .max()
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Manual Debug impls — show layout, not contents.
// ---------------------------------------------------------------------------

impl<T> fmt::Debug for BranchNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branch")
            .field("bitmap", &format_args!("{:#034b}", self.bitmap))
            .field("valmap", &format_args!("{:#034b}", self.valmap))
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Debug for CollisionNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collision")
            .field("hash", &format_args!("{:#010x}", self.hash))
            .field("len", &self.elements.len())
            .finish()
    }
}

impl<T> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Branch(branch) => branch.fmt(f),
            Self::Collision(collision) => collision.fmt(f),
        }
    }
}
