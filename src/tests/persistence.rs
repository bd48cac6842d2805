use std::sync::Arc;

use crate::TrieSet;
use crate::node::Slot;

use super::IdentityState;

/// Inserting into a set leaves every earlier version intact.
#[test]
fn insert_keeps_old_versions() {
    let v0 = TrieSet::new();
    let v1 = v0.insert(1);
    let v2 = v1.insert(2);
    let v3 = v2.insert(3);

    assert!(v0.is_empty());
    assert_eq!(v1.len(), 1);
    assert!(v1.contains(&1) && !v1.contains(&2));
    assert_eq!(v2.len(), 2);
    assert!(!v2.contains(&3));
    assert_eq!(v3.len(), 3);
}

/// Removing from a set leaves the source version intact.
#[test]
fn remove_keeps_old_versions() {
    let full = TrieSet::new().insert("a").insert("b").insert("c");
    let without_b = full.remove(&"b");

    assert_eq!(full.len(), 3);
    assert!(full.contains(&"b"));
    assert_eq!(without_b.len(), 2);
    assert!(!without_b.contains(&"b"));
}

/// Two versions derived from one base diverge independently.
#[test]
fn branching_versions() {
    let base = TrieSet::new().insert(10).insert(20);
    let left = base.insert(30);
    let right = base.remove(&10);

    assert_eq!(base.len(), 2);
    assert!(left.contains(&10) && left.contains(&30));
    assert!(!right.contains(&10) && !right.contains(&30));
    assert!(right.contains(&20));
}

/// Clones share the root; clones outlive their source.
#[test]
fn clone_is_shallow() {
    let original = TrieSet::new().insert(1).insert(2);
    let copy = original.clone();
    assert!(copy.ptr_eq(&original));

    drop(original);
    assert_eq!(copy.len(), 2);
    assert!(copy.contains(&1));
}

/// An insert copies only the path to the changed slot; untouched siblings
/// are shared by pointer.
#[test]
fn untouched_subtrees_are_shared() {
    // 1 and 33 share fragment 1 at the root, forcing a nested node.
    let base = TrieSet::with_hasher(IdentityState::default())
        .insert(1_u32)
        .insert(33)
        .insert(2);
    let next = base.insert(3);

    let Slot::Node(before) = &base.root().slots[0] else {
        panic!("expected a nested node for fragment 1");
    };
    let Slot::Node(after) = &next.root().slots[0] else {
        panic!("expected a nested node for fragment 1");
    };
    assert!(Arc::ptr_eq(before, after), "sibling subtree must be shared");
    assert!(!next.ptr_eq(&base));
}

/// A removal that changes nothing returns a set sharing the root.
#[test]
fn missing_remove_shares_root() {
    let set = TrieSet::with_hasher(IdentityState::default())
        .insert(1_u32)
        .insert(33);
    // 65 shares fragment 1 at the root but lands on an empty fragment below.
    let same = set.remove(&65);
    assert!(same.ptr_eq(&set));
}

/// Sets are `Send + Sync` and can be read from several threads.
#[test]
fn shared_across_threads() {
    let set: TrieSet<u32> = (0..256).collect();
    std::thread::scope(|scope| {
        for offset in 0..4 {
            let set = &set;
            scope.spawn(move || {
                for i in (offset..256).step_by(4) {
                    assert!(set.contains(&i));
                }
            });
        }
    });
}
