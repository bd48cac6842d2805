//! Lookup operation — traverses the trie to find an element.

use crate::equivalence::Equivalence;
use crate::node::{self, BranchNode, Node, Slot};

/// Searches for `value` in the subtree rooted at `node`.
pub fn contains_recursive<T, E>(node: &Node<T>, value: &T, hash: u32, shift: u32, eq: &E) -> bool
where
    E: Equivalence<T> + ?Sized,
{
    match node {
        Node::Branch(branch) => contains_in_branch(branch, value, hash, shift, eq),
        // Linear search through collision elements.
        Node::Collision(collision) => collision.elements.iter().any(|e| eq.equivalent(e, value)),
    }
}

/// Searches for `value` starting at a branch node consuming the fragment at `shift`.
pub fn contains_in_branch<T, E>(
    branch: &BranchNode<T>,
    value: &T,
    hash: u32,
    shift: u32,
    eq: &E,
) -> bool
where
    E: Equivalence<T> + ?Sized,
{
    let bit = node::mask(node::fragment(hash, shift));
    if branch.bitmap & bit == 0 {
        return false;
    }

    match &branch.slots[node::index(branch.bitmap, bit)] {
        Slot::Value(entry) => eq.equivalent(&entry.value, value),
        Slot::Node(child) => {
            contains_recursive(child, value, hash, shift + node::BITS_PER_LEVEL, eq)
        }
    }
}
