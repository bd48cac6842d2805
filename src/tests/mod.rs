mod array;
mod collision;
mod persistence;

use std::hash::{BuildHasherDefault, Hash, Hasher};

use crate::node::{BranchNode, Node, Slot};

/// Hasher whose output is the last `u32` written, so `h(x) = x` for `u32`.
#[derive(Default)]
pub struct IdentityHasher(u64);

impl Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | u64::from(b);
        }
    }

    fn write_u32(&mut self, n: u32) {
        self.0 = u64::from(n);
    }
}

/// Builder for [`IdentityHasher`].
pub type IdentityState = BuildHasherDefault<IdentityHasher>;

/// A key type with a controllable hash value for testing hash collisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollidingKey {
    pub id: u32,
    pub forced_hash: u32,
}

impl CollidingKey {
    pub const fn new(id: u32, hash: u32) -> Self {
        Self {
            id,
            forced_hash: hash,
        }
    }
}

impl Hash for CollidingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.forced_hash);
    }
}

/// Returns the nested node in `slot`, panicking on an inline element.
pub fn nested<T>(slot: &Slot<T>) -> &Node<T> {
    match slot {
        Slot::Node(node) => node,
        Slot::Value(_) => panic!("expected a nested node"),
    }
}

/// Returns the branch node in `slot`, panicking on anything else.
pub fn nested_branch<T>(slot: &Slot<T>) -> &BranchNode<T> {
    match nested(slot) {
        Node::Branch(branch) => branch,
        Node::Collision(_) => panic!("expected a branch node"),
    }
}

/// Returns the inline element in `slot`, panicking on a nested node.
pub const fn inline<T>(slot: &Slot<T>) -> &T {
    match slot {
        Slot::Value(entry) => &entry.value,
        Slot::Node(_) => panic!("expected an inline element"),
    }
}
