//! Structural invariant checks.
//!
//! [`TrieSet::validate`](crate::TrieSet::validate) walks the whole trie and
//! reports the first violated invariant. Intended for tests and debugging; a
//! set built only through the public API always validates.

use std::hash::{BuildHasher, Hash};

use thiserror::Error;

use crate::hash;
use crate::node::{self, BranchNode, CollisionNode, Node, Slot};

/// A violated structural invariant of the trie.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// `popcount(bitmap)` differs from the number of stored slots.
    #[error("branch at shift {shift} has {slots} slots but bitmap population {bitmap_len}")]
    SlotCountMismatch {
        /// Shift of the offending branch.
        shift: u32,
        /// Number of stored slots.
        slots: usize,
        /// Number of set bits in the bitmap.
        bitmap_len: usize,
    },

    /// `valmap` has a bit that `bitmap` lacks.
    #[error("branch at shift {shift}: valmap {valmap:#034b} is not a subset of bitmap {bitmap:#034b}")]
    ValmapNotSubset {
        /// Shift of the offending branch.
        shift: u32,
        /// The value bitmap.
        valmap: u32,
        /// The occupancy bitmap.
        bitmap: u32,
    },

    /// A slot's kind (inline element or nested node) disagrees with `valmap`.
    #[error("branch at shift {shift}: slot for fragment {fragment} disagrees with valmap")]
    SlotKindMismatch {
        /// Shift of the offending branch.
        shift: u32,
        /// Fragment of the offending slot.
        fragment: u32,
    },

    /// An element or collision node sits on a path its hash does not address.
    #[error("hash {hash:#010x} stored under fragment {fragment} at shift {shift}")]
    MisplacedHash {
        /// Shift of the branch holding the slot.
        shift: u32,
        /// Fragment of the slot.
        fragment: u32,
        /// The misplaced hash.
        hash: u32,
    },

    /// A branch's cached size differs from the number of reachable elements.
    #[error("branch at shift {shift} caches size {cached} but holds {counted} elements")]
    SizeMismatch {
        /// Shift of the offending branch.
        shift: u32,
        /// Cached size.
        cached: usize,
        /// Counted size.
        counted: usize,
    },

    /// A nested node holds no elements.
    #[error("nested node at shift {shift} holds no elements")]
    EmptyNode {
        /// Shift of the empty node.
        shift: u32,
    },

    /// A collision node holds fewer than two elements.
    #[error("collision node at shift {shift} holds {len} elements")]
    UndersizedCollision {
        /// Shift of the collision node.
        shift: u32,
        /// Number of elements.
        len: usize,
    },

    /// A stored hash differs from the element's recomputed hash.
    #[error("stored hash {stored:#010x} differs from recomputed hash {computed:#010x}")]
    StaleHash {
        /// Hash stored in the trie.
        stored: u32,
        /// Hash recomputed with the set's hasher.
        computed: u32,
    },

    /// A branch node sits below the last hash level.
    #[error("branch node at shift {shift} lies below the last hash level")]
    TooDeep {
        /// Shift of the offending branch.
        shift: u32,
    },
}

/// Validates the trie rooted at `root`, returning its element count.
pub(crate) fn validate_root<T, S>(root: &BranchNode<T>, hasher: &S) -> Result<usize, InvariantError>
where
    T: Hash,
    S: BuildHasher,
{
    validate_branch(root, hasher, 0, 0)
}

/// `path` holds the hash bits consumed above `shift`.
fn validate_branch<T, S>(
    branch: &BranchNode<T>,
    hasher: &S,
    shift: u32,
    path: u32,
) -> Result<usize, InvariantError>
where
    T: Hash,
    S: BuildHasher,
{
    if shift > node::MAX_SHIFT {
        return Err(InvariantError::TooDeep { shift });
    }
    if branch.len() != branch.slots.len() {
        return Err(InvariantError::SlotCountMismatch {
            shift,
            slots: branch.slots.len(),
            bitmap_len: branch.len(),
        });
    }
    if branch.valmap & !branch.bitmap != 0 {
        return Err(InvariantError::ValmapNotSubset {
            shift,
            valmap: branch.valmap,
            bitmap: branch.bitmap,
        });
    }

    let mut counted = 0;
    let fragments = (0..32).filter(|frag| branch.bitmap & node::mask(*frag) != 0);
    for (frag, slot) in fragments.zip(&branch.slots) {
        let inline = branch.valmap & node::mask(frag) != 0;
        let child_path = path | (frag << shift);
        match slot {
            Slot::Value(entry) => {
                if !inline {
                    return Err(InvariantError::SlotKindMismatch { shift, fragment: frag });
                }
                check_placement(entry.hash, shift, frag, child_path)?;
                check_hash(&entry.value, entry.hash, hasher)?;
                counted += 1;
            }
            Slot::Node(child) => {
                if inline {
                    return Err(InvariantError::SlotKindMismatch { shift, fragment: frag });
                }
                let next = shift + node::BITS_PER_LEVEL;
                let size = match child.as_ref() {
                    Node::Branch(nested) => validate_branch(nested, hasher, next, child_path)?,
                    Node::Collision(collision) => {
                        check_placement(collision.hash, shift, frag, child_path)?;
                        validate_collision(collision, hasher, next)?
                    }
                };
                if size == 0 {
                    return Err(InvariantError::EmptyNode { shift: next });
                }
                counted += size;
            }
        }
    }

    if counted != branch.size {
        return Err(InvariantError::SizeMismatch {
            shift,
            cached: branch.size,
            counted,
        });
    }
    Ok(counted)
}

fn validate_collision<T, S>(
    collision: &CollisionNode<T>,
    hasher: &S,
    shift: u32,
) -> Result<usize, InvariantError>
where
    T: Hash,
    S: BuildHasher,
{
    let len = collision.elements.len();
    if len < 2 {
        return Err(InvariantError::UndersizedCollision { shift, len });
    }
    for value in &collision.elements {
        check_hash(value, collision.hash, hasher)?;
    }
    Ok(len)
}

/// Checks that `hash` agrees with every fragment consumed down to `shift`.
const fn check_placement(hash: u32, shift: u32, fragment: u32, path: u32) -> Result<(), InvariantError> {
    let consumed = shift + node::BITS_PER_LEVEL;
    let low_bits = if consumed >= node::HASH_BITS {
        u32::MAX
    } else {
        (1 << consumed) - 1
    };
    if hash & low_bits == path {
        Ok(())
    } else {
        Err(InvariantError::MisplacedHash { shift, fragment, hash })
    }
}

fn check_hash<T, S>(value: &T, stored: u32, hasher: &S) -> Result<(), InvariantError>
where
    T: Hash,
    S: BuildHasher,
{
    let computed = hash::hash_one(hasher, value);
    if computed == stored {
        Ok(())
    } else {
        Err(InvariantError::StaleHash { stored, computed })
    }
}
