use crate::TrieSet;
use crate::node::Node;

use super::{CollidingKey, IdentityState, nested};

/// Two keys with the same 32-bit hash create a collision node.
#[test]
fn two_colliding_keys() {
    let k1 = CollidingKey::new(1, 0xDEAD_BEEF);
    let k2 = CollidingKey::new(2, 0xDEAD_BEEF);

    let set = TrieSet::new().insert(k1.clone()).insert(k2.clone());

    assert_eq!(set.len(), 2);
    assert!(set.contains(&k1));
    assert!(set.contains(&k2));
    assert!(set.validate().is_ok());
}

/// The collision node lands directly in the root slot; no branch level
/// tries to split the pair.
#[test]
fn collision_is_not_split_by_branches() {
    let k1 = CollidingKey::new(1, 0x0000_0421);
    let k2 = CollidingKey::new(2, 0x0000_0421);

    let set = TrieSet::with_hasher(IdentityState::default())
        .insert(k1.clone())
        .insert(k2.clone());

    let root = set.root();
    assert_eq!(root.bitmap, 1 << 1);
    assert_eq!(root.valmap, 0);
    match nested(&root.slots[0]) {
        Node::Collision(collision) => {
            assert_eq!(collision.hash, 0x0000_0421);
            assert_eq!(collision.elements, vec![k1, k2]);
        }
        Node::Branch(_) => panic!("colliding keys must share a collision node"),
    }
    assert_eq!(set.depth(), 2);
}

/// Three keys with the same hash.
#[test]
fn three_colliding_keys() {
    let keys: Vec<CollidingKey> = (0..3).map(|i| CollidingKey::new(i, 0xCAFE)).collect();

    let mut set = TrieSet::new();
    for k in &keys {
        set = set.insert(k.clone());
    }

    assert_eq!(set.len(), 3);
    for k in &keys {
        assert!(set.contains(k));
    }
}

/// Re-inserting a key already in a collision node is a no-op.
#[test]
fn duplicate_in_collision() {
    let k1 = CollidingKey::new(1, 0xBBBB);
    let k2 = CollidingKey::new(2, 0xBBBB);

    let set = TrieSet::new().insert(k1.clone()).insert(k2);
    let again = set.insert(k1);

    assert_eq!(again.len(), 2);
    assert!(again.ptr_eq(&set));
}

/// Remove from collision node.
#[test]
fn remove_from_collision() {
    let k1 = CollidingKey::new(1, 0xAAAA);
    let k2 = CollidingKey::new(2, 0xAAAA);
    let k3 = CollidingKey::new(3, 0xAAAA);

    let set = TrieSet::new()
        .insert(k1.clone())
        .insert(k2.clone())
        .insert(k3.clone());

    let removed = set.remove(&k2);
    assert_eq!(removed.len(), 2);
    assert!(removed.contains(&k1));
    assert!(!removed.contains(&k2));
    assert!(removed.contains(&k3));
    assert!(removed.validate().is_ok());
}

/// A collision node shrunk to one element becomes an inline element again.
#[test]
fn collision_shrinks_to_inline() {
    let k1 = CollidingKey::new(1, 0x0000_0007);
    let k2 = CollidingKey::new(2, 0x0000_0007);

    let set = TrieSet::with_hasher(IdentityState::default())
        .insert(k1.clone())
        .insert(k2.clone())
        .remove(&k1);

    let root = set.root();
    assert_eq!(root.valmap, 1 << 7, "survivor must be inline");
    assert_eq!(set.depth(), 1);
    assert!(set.contains(&k2));
    assert!(set.validate().is_ok());
}

/// Collision node with remove-all returns to empty.
#[test]
fn collision_remove_all() {
    let k1 = CollidingKey::new(1, 0xCCCC);
    let k2 = CollidingKey::new(2, 0xCCCC);

    let set = TrieSet::new().insert(k1.clone()).insert(k2.clone());
    let set = set.remove(&k1).remove(&k2);
    assert!(set.is_empty());
    assert_eq!(set.iter().count(), 0);
}

/// Mixed: some keys collide, some don't.
#[test]
fn mixed_collisions_and_normal() {
    let collide_a = CollidingKey::new(1, 0xDDDD);
    let collide_b = CollidingKey::new(2, 0xDDDD);
    let normal = CollidingKey::new(3, 0xEEEE);

    let set = TrieSet::new()
        .insert(collide_a.clone())
        .insert(collide_b.clone())
        .insert(normal.clone());

    assert_eq!(set.len(), 3);
    assert!(set.contains(&collide_a));
    assert!(set.contains(&collide_b));
    assert!(set.contains(&normal));
    assert!(set.validate().is_ok());
}

/// A key whose hash shares every fragment but the last with a collision
/// node forces the deepest possible trie.
#[test]
fn collision_at_maximum_depth() {
    let a = CollidingKey::new(1, 0);
    let b = CollidingKey::new(2, 0);
    let c = CollidingKey::new(3, 1 << 30);

    let set = TrieSet::with_hasher(IdentityState::default())
        .insert(a.clone())
        .insert(b.clone())
        .insert(c.clone());

    assert_eq!(set.len(), 3);
    assert_eq!(set.depth(), 8, "seven branch levels and a collision node");
    assert!(set.contains(&a) && set.contains(&b) && set.contains(&c));
    assert!(set.validate().is_ok());

    // Removing the outlier hoists the collision node back to the root slot.
    let collapsed = set.remove(&c);
    assert_eq!(collapsed.depth(), 2);
    assert!(collapsed.validate().is_ok());
}

/// Inserting into a collision node's slot with a different hash splits the
/// bucket and the newcomer into a branch.
#[test]
fn foreign_hash_splits_collision_slot() {
    let a = CollidingKey::new(1, 0x0000_0003);
    let b = CollidingKey::new(2, 0x0000_0003);
    let c = CollidingKey::new(3, 0x0000_0023);

    let set = TrieSet::with_hasher(IdentityState::default())
        .insert(a.clone())
        .insert(b.clone())
        .insert(c.clone());

    assert_eq!(set.len(), 3);
    assert_eq!(set.depth(), 3);
    assert!(set.contains(&a) && set.contains(&b) && set.contains(&c));
    assert!(set.validate().is_ok());
}
