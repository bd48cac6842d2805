//! Pluggable element equivalence.
//!
//! Every lookup, insertion and removal takes its equivalence per call, so one
//! trie can be queried under different notions of equality without being
//! rebuilt.
//!
//! An equivalence must be reflexive, symmetric and transitive, and elements it
//! considers equal must hash equally under the set's hasher. Neither property
//! is checked; violating them makes membership answers unreliable.

/// Equivalence relation over elements of type `T`.
///
/// Implemented by [`DefaultEquivalence`] and by any closure
/// `Fn(&T, &T) -> bool`.
pub trait Equivalence<T: ?Sized> {
    /// Returns `true` if `a` and `b` are the same element under this relation.
    fn equivalent(&self, a: &T, b: &T) -> bool;
}

/// Equivalence given by the element's [`Eq`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultEquivalence;

impl<T: Eq + ?Sized> Equivalence<T> for DefaultEquivalence {
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<T: ?Sized, F> Equivalence<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
