//! Removal operation — COW path-copy delete with canonical inlining.

use std::sync::Arc;

use crate::array;
use crate::equivalence::Equivalence;
use crate::node::{self, BranchNode, CollisionNode, Entry, Node, Slot};

/// Outcome of removing an element from a nested node.
pub enum RemoveOutcome<T> {
    /// Element was not found — subtree unchanged.
    NotFound,
    /// Element was removed.
    Removed {
        /// New occupant for the parent slot, or `None` if the subtree is now empty.
        slot: Option<Slot<T>>,
    },
}

/// Removes `value` from a branch node via COW path-copy.
///
/// Returns `None` if the element was not found. The returned branch may be
/// empty; the caller decides whether it survives.
pub fn remove_from_branch<T, E>(
    branch: &BranchNode<T>,
    value: &T,
    hash: u32,
    shift: u32,
    eq: &E,
) -> Option<BranchNode<T>>
where
    T: Clone,
    E: Equivalence<T> + ?Sized,
{
    let bit = node::mask(node::fragment(hash, shift));
    if branch.bitmap & bit == 0 {
        return None;
    }
    let pos = node::index(branch.bitmap, bit);

    match &branch.slots[pos] {
        Slot::Value(existing) => {
            if !eq.equivalent(&existing.value, value) {
                return None;
            }
            Some(BranchNode {
                bitmap: branch.bitmap & !bit,
                valmap: branch.valmap & !bit,
                slots: array::removed(&branch.slots, pos),
                size: branch.size - 1,
            })
        }
        Slot::Node(child) => {
            match remove_recursive(child, value, hash, shift + node::BITS_PER_LEVEL, eq) {
                RemoveOutcome::NotFound => None,
                RemoveOutcome::Removed { slot: None } => {
                    // Child became empty — remove child slot.
                    Some(BranchNode {
                        bitmap: branch.bitmap & !bit,
                        valmap: branch.valmap,
                        slots: array::removed(&branch.slots, pos),
                        size: branch.size - 1,
                    })
                }
                RemoveOutcome::Removed { slot: Some(slot) } => {
                    let valmap = if matches!(slot, Slot::Value(_)) {
                        branch.valmap | bit
                    } else {
                        branch.valmap
                    };
                    Some(BranchNode {
                        bitmap: branch.bitmap,
                        valmap,
                        slots: array::replaced(&branch.slots, pos, slot),
                        size: branch.size - 1,
                    })
                }
            }
        }
    }
}

/// Removes `value` from the nested node `node`, which sits one level below
/// the branch that consumed the fragment at `shift - 5`.
pub fn remove_recursive<T, E>(
    node: &Arc<Node<T>>,
    value: &T,
    hash: u32,
    shift: u32,
    eq: &E,
) -> RemoveOutcome<T>
where
    T: Clone,
    E: Equivalence<T> + ?Sized,
{
    match node.as_ref() {
        Node::Branch(branch) => remove_from_branch(branch, value, hash, shift, eq)
            .map_or(RemoveOutcome::NotFound, |shrunk| RemoveOutcome::Removed {
                slot: collapse(shrunk, shift),
            }),
        Node::Collision(collision) => remove_from_collision(collision, value, eq),
    }
}

/// Canonical form: an empty nested branch disappears, and a nested branch
/// holding a single leaf (element or collision node) is replaced by that leaf.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn collapse<T>(mut branch: BranchNode<T>, shift: u32) -> Option<Slot<T>> {
    if branch.slots.is_empty() {
        return None;
    }
    if branch.slots.len() == 1 && branch.slots[0].is_leaf() {
        #[cfg(feature = "tracing")]
        tracing::trace!(shift, "remove: hoisting single leaf into parent slot");
        return branch.slots.pop();
    }
    Some(Slot::Node(Arc::new(Node::Branch(branch))))
}

// ---------------------------------------------------------------------------
// Collision node remove
// ---------------------------------------------------------------------------

fn remove_from_collision<T, E>(collision: &CollisionNode<T>, value: &T, eq: &E) -> RemoveOutcome<T>
where
    T: Clone,
    E: Equivalence<T> + ?Sized,
{
    let Some(pos) = collision.elements.iter().position(|e| eq.equivalent(e, value)) else {
        return RemoveOutcome::NotFound;
    };

    if collision.elements.len() <= 1 {
        return RemoveOutcome::Removed { slot: None };
    }
    if collision.elements.len() == 2 {
        // Collision with 2 elements → the survivor becomes an inline element.
        let survivor = collision.elements[1 - pos].clone();
        return RemoveOutcome::Removed {
            slot: Some(Slot::Value(Entry {
                hash: collision.hash,
                value: survivor,
            })),
        };
    }

    RemoveOutcome::Removed {
        slot: Some(Slot::Node(Arc::new(Node::Collision(CollisionNode {
            hash: collision.hash,
            elements: array::removed(&collision.elements, pos),
        })))),
    }
}
