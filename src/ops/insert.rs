//! Insertion operation — COW path-copy insert and exclusive in-place insert.

use std::sync::Arc;

use crate::array;
use crate::equivalence::Equivalence;
use crate::node::{self, BranchNode, CollisionNode, Entry, Node, Slot};
use crate::ops::merge::{self, Leaf};

/// Inserts `entry` into the subtree rooted at `node` via COW path-copy.
///
/// Returns `None` if an equivalent element is already present; the subtree is
/// then shared unchanged. A returned node holds exactly one more element.
pub fn insert_recursive<T, E>(
    node: &Arc<Node<T>>,
    entry: Entry<T>,
    shift: u32,
    eq: &E,
) -> Option<Node<T>>
where
    T: Clone,
    E: Equivalence<T> + ?Sized,
{
    match node.as_ref() {
        Node::Branch(branch) => insert_into_branch(branch, entry, shift, eq).map(Node::Branch),
        Node::Collision(collision) => insert_into_collision(node, collision, entry, shift, eq),
    }
}

// ---------------------------------------------------------------------------
// Branch node insert
// ---------------------------------------------------------------------------

/// Inserts `entry` into a branch node, returning the path-copied replacement.
pub fn insert_into_branch<T, E>(
    branch: &BranchNode<T>,
    entry: Entry<T>,
    shift: u32,
    eq: &E,
) -> Option<BranchNode<T>>
where
    T: Clone,
    E: Equivalence<T> + ?Sized,
{
    let bit = node::mask(node::fragment(entry.hash, shift));
    let pos = node::index(branch.bitmap, bit);

    if branch.bitmap & bit == 0 {
        // Position empty → add inline element.
        return Some(BranchNode {
            bitmap: branch.bitmap | bit,
            valmap: branch.valmap | bit,
            slots: array::inserted(&branch.slots, pos, Slot::Value(entry)),
            size: branch.size + 1,
        });
    }

    match &branch.slots[pos] {
        Slot::Value(existing) => {
            if eq.equivalent(&existing.value, &entry.value) {
                return None;
            }
            // Different element at same position → push both into a subtree.
            let subtree = merge::merge(
                Leaf::Value(existing.clone()),
                Leaf::Value(entry),
                shift + node::BITS_PER_LEVEL,
                eq,
            );
            Some(BranchNode {
                bitmap: branch.bitmap,
                valmap: branch.valmap & !bit,
                slots: array::replaced(&branch.slots, pos, Slot::Node(Arc::new(subtree))),
                size: branch.size + 1,
            })
        }
        Slot::Node(child) => {
            let new_child = insert_recursive(child, entry, shift + node::BITS_PER_LEVEL, eq)?;
            debug_assert_eq!(new_child.size(), child.size() + 1);
            Some(BranchNode {
                bitmap: branch.bitmap,
                valmap: branch.valmap,
                slots: array::replaced(&branch.slots, pos, Slot::Node(Arc::new(new_child))),
                size: branch.size + 1,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Collision node insert
// ---------------------------------------------------------------------------

/// Inserts `entry` into a collision node.
///
/// A foreign hash can only arrive through a slot shared with the bucket's own
/// hash fragment; the two are merged into a branch at `shift`. Collision nodes
/// are never edited in place.
fn insert_into_collision<T, E>(
    node: &Arc<Node<T>>,
    collision: &CollisionNode<T>,
    entry: Entry<T>,
    shift: u32,
    eq: &E,
) -> Option<Node<T>>
where
    T: Clone,
    E: Equivalence<T> + ?Sized,
{
    if entry.hash != collision.hash {
        let bucket = Leaf::Node {
            hash: collision.hash,
            node: Arc::clone(node),
        };
        return Some(merge::merge(bucket, Leaf::Value(entry), shift, eq));
    }

    if collision.elements.iter().any(|e| eq.equivalent(e, &entry.value)) {
        return None;
    }

    // Element not found → append.
    let len = collision.elements.len();
    Some(Node::Collision(CollisionNode {
        hash: collision.hash,
        elements: array::inserted(&collision.elements, len, entry.value),
    }))
}

// ---------------------------------------------------------------------------
// In-place insert
// ---------------------------------------------------------------------------

/// Inserts `entry` by mutating `branch` and its nested branches directly.
///
/// Returns `true` if the element was added.
///
/// The caller must own the whole subtree exclusively: nested nodes are
/// reached through [`Arc::make_mut`], which only edits in place while the
/// node is not referenced by any other set. Only
/// [`TrieSetBuilder`](crate::TrieSetBuilder) calls this, on a root no
/// published set can reach.
pub fn insert_in_place<T, E>(branch: &mut BranchNode<T>, entry: Entry<T>, shift: u32, eq: &E) -> bool
where
    T: Clone,
    E: Equivalence<T> + ?Sized,
{
    let bit = node::mask(node::fragment(entry.hash, shift));
    let pos = node::index(branch.bitmap, bit);
    let next_shift = shift + node::BITS_PER_LEVEL;

    if branch.bitmap & bit == 0 {
        branch.slots.insert(pos, Slot::Value(entry));
        branch.bitmap |= bit;
        branch.valmap |= bit;
        branch.size += 1;
        return true;
    }

    match &mut branch.slots[pos] {
        Slot::Value(existing) => {
            if eq.equivalent(&existing.value, &entry.value) {
                return false;
            }
            let subtree = merge::merge(Leaf::Value(existing.clone()), Leaf::Value(entry), next_shift, eq);
            branch.slots[pos] = Slot::Node(Arc::new(subtree));
            branch.valmap &= !bit;
        }
        Slot::Node(child) => {
            if let Node::Collision(_) = **child {
                let Some(replacement) = insert_recursive(child, entry, next_shift, eq) else {
                    return false;
                };
                *child = Arc::new(replacement);
            } else {
                let Node::Branch(nested) = Arc::make_mut(child) else {
                    unreachable!("collision nodes are handled above");
                };
                if !insert_in_place(nested, entry, next_shift, eq) {
                    return false;
                }
            }
        }
    }

    branch.size += 1;
    true
}
