//! Iterator types for CHAMP sets.

use std::iter::FusedIterator;
use std::slice;

use crate::node::{self, BranchNode, Node, Slot};

/// Position inside one node's contents.
enum Cursor<'a, T> {
    Slots(slice::Iter<'a, Slot<T>>),
    Elements(slice::Iter<'a, T>),
}

impl<'a, T> Cursor<'a, T> {
    fn over(node: &'a Node<T>) -> Self {
        match node {
            Node::Branch(branch) => Self::Slots(branch.slots.iter()),
            Node::Collision(collision) => Self::Elements(collision.elements.iter()),
        }
    }
}

/// Iterator over references to the elements of a [`TrieSet`](crate::TrieSet).
///
/// Depth-first, in ascending slot order at every level. Keeps an explicit
/// stack of cursors (at most one per trie level) instead of recursing, so the
/// traversal resumes one element at a time.
///
/// The length reported through [`ExactSizeIterator`] is the root's cached
/// size. It matches the number of yielded elements for every trie that passes
/// [`TrieSet::validate`](crate::TrieSet::validate).
pub struct Iter<'a, T> {
    stack: Vec<Cursor<'a, T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    /// Creates an iterator over the subtree rooted at `root`.
    pub(crate) fn new(root: &'a BranchNode<T>) -> Self {
        let mut stack = Vec::with_capacity(node::MAX_DEPTH + 1);
        stack.push(Cursor::Slots(root.slots.iter()));
        Self {
            stack,
            remaining: root.size,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            let descend = match top {
                Cursor::Slots(slots) => match slots.next() {
                    Some(Slot::Value(entry)) => {
                        self.remaining = self.remaining.saturating_sub(1);
                        return Some(&entry.value);
                    }
                    Some(Slot::Node(child)) => Some(Cursor::over(child)),
                    None => None,
                },
                Cursor::Elements(elements) => match elements.next() {
                    Some(value) => {
                        self.remaining = self.remaining.saturating_sub(1);
                        return Some(value);
                    }
                    None => None,
                },
            };

            // Exhausted cursors are popped even if a node turned out empty.
            let Some(cursor) = descend else {
                self.stack.pop();
                continue;
            };
            self.stack.push(cursor);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
