//! Shared utilities: the dense bit set used for value sets and the directed
//! graph layer that control flow graphs are built on.

mod bitset;

pub mod graph;

pub use bitset::{BitSet, BitSetIter};
