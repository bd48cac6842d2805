//! Merge operation — builds the minimal subtree for two occupants of one slot.

use std::sync::Arc;

use crate::equivalence::Equivalence;
use crate::node::{self, BranchNode, CollisionNode, Entry, Node, Slot};

/// An occupant with a single full hash: an inline element or a collision node.
///
/// Branch nodes are never merged; their contents span many fragments at the
/// level they would be placed on.
pub enum Leaf<T> {
    /// Bare element.
    Value(Entry<T>),
    /// Collision node; `hash` is its shared hash.
    Node {
        /// Shared hash of every element in `node`.
        hash: u32,
        /// The collision node.
        node: Arc<Node<T>>,
    },
}

impl<T> Leaf<T> {
    const fn hash(&self) -> u32 {
        match self {
            Self::Value(entry) => entry.hash,
            Self::Node { hash, .. } => *hash,
        }
    }

    fn size(&self) -> usize {
        match self {
            Self::Value(_) => 1,
            Self::Node { node, .. } => node.size(),
        }
    }

    const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    fn into_slot(self) -> Slot<T> {
        match self {
            Self::Value(entry) => Slot::Value(entry),
            Self::Node { node, .. } => Slot::Node(node),
        }
    }
}

/// Merges two occupants that landed in the same slot of the level above
/// `shift`, returning the node to install in that slot.
///
/// Equal full hashes produce a collision node. Otherwise the result is a
/// branch node at `shift`: two slots ordered by fragment when the fragments
/// differ, or one nested slot when they match.
///
/// The two occupants must not share an element under `eq`.
pub fn merge<T, E>(a: Leaf<T>, b: Leaf<T>, shift: u32, eq: &E) -> Node<T>
where
    T: Clone,
    E: Equivalence<T> + ?Sized,
{
    let (hash_a, hash_b) = (a.hash(), b.hash());
    if hash_a == hash_b {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            hash = %format_args!("{hash_a:#010x}"),
            shift,
            "merge: full hash collision"
        );
        return Node::Collision(collide(a, b, eq));
    }

    debug_assert!(shift <= node::MAX_SHIFT, "distinct hashes must split by shift 30");
    let frag_a = node::fragment(hash_a, shift);
    let frag_b = node::fragment(hash_b, shift);

    if frag_a == frag_b {
        // Same fragment → push both one level down.
        let child = merge(a, b, shift + node::BITS_PER_LEVEL, eq);
        let size = child.size();
        Node::Branch(BranchNode {
            bitmap: node::mask(frag_a),
            valmap: 0,
            slots: vec![Slot::Node(Arc::new(child))],
            size,
        })
    } else {
        let size = a.size() + b.size();
        let ((lo_frag, lo), (hi_frag, hi)) = if frag_a < frag_b {
            ((frag_a, a), (frag_b, b))
        } else {
            ((frag_b, b), (frag_a, a))
        };
        let mut valmap = 0;
        if lo.is_value() {
            valmap |= node::mask(lo_frag);
        }
        if hi.is_value() {
            valmap |= node::mask(hi_frag);
        }
        Node::Branch(BranchNode {
            bitmap: node::mask(lo_frag) | node::mask(hi_frag),
            valmap,
            slots: vec![lo.into_slot(), hi.into_slot()],
            size,
        })
    }
}

/// Combines two occupants with the same full hash into one collision node.
fn collide<T, E>(a: Leaf<T>, b: Leaf<T>, eq: &E) -> CollisionNode<T>
where
    T: Clone,
    E: Equivalence<T> + ?Sized,
{
    match (a, b) {
        (Leaf::Value(first), Leaf::Value(second)) => CollisionNode {
            hash: first.hash,
            elements: vec![first.value, second.value],
        },
        (Leaf::Node { node, .. }, Leaf::Value(entry))
        | (Leaf::Value(entry), Leaf::Node { node, .. }) => {
            let mut bucket = collision_of(&node).clone();
            absorb(&mut bucket, entry.value, eq);
            bucket
        }
        (Leaf::Node { node: first, .. }, Leaf::Node { node: second, .. }) => {
            let mut bucket = collision_of(&first).clone();
            for value in &collision_of(&second).elements {
                absorb(&mut bucket, value.clone(), eq);
            }
            bucket
        }
    }
}

/// Appends `value` unless an equivalent element is already present.
fn absorb<T, E>(bucket: &mut CollisionNode<T>, value: T, eq: &E)
where
    E: Equivalence<T> + ?Sized,
{
    if !bucket.elements.iter().any(|e| eq.equivalent(e, &value)) {
        bucket.elements.push(value);
    }
}

fn collision_of<T>(node: &Node<T>) -> &CollisionNode<T> {
    match node {
        Node::Collision(collision) => collision,
        Node::Branch(_) => unreachable!("merge is only defined for hash-uniform nodes"),
    }
}
