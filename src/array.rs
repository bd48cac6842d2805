//! Copy-on-write array editing.
//!
//! Each helper returns a fresh vector and leaves its input untouched, so a
//! node's slot sequence can be reused by every set that still references it.

/// Returns a copy of `items` with `value` inserted before position `at`.
pub fn inserted<T: Clone>(items: &[T], at: usize, value: T) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() + 1);
    out.extend_from_slice(&items[..at]);
    out.push(value);
    out.extend_from_slice(&items[at..]);
    out
}

/// Returns a copy of `items` with position `at` replaced by `value`.
pub fn replaced<T: Clone>(items: &[T], at: usize, value: T) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len());
    out.extend_from_slice(&items[..at]);
    out.push(value);
    out.extend_from_slice(&items[at + 1..]);
    out
}

/// Returns a copy of `items` without position `at`; later items shift down.
pub fn removed<T: Clone>(items: &[T], at: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() - 1);
    out.extend_from_slice(&items[..at]);
    out.extend_from_slice(&items[at + 1..]);
    out
}
