//! Recursive trie operations, one module per operation.

pub mod contains;
pub mod insert;
pub mod merge;
pub mod remove;
