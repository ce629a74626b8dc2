//! Node identifier implementation for directed graphs.
//!
//! This module provides the [`NodeId`] type, a strongly-typed identifier for nodes
//! within a directed graph. In a control flow graph every basic block is a node,
//! so `NodeId` doubles as the block handle used throughout the analyses.

use std::fmt;

/// A strongly-typed identifier for nodes within a directed graph.
///
/// `NodeId` wraps a `usize` index, providing type safety to prevent
/// accidental mixing of node indices with value handles or other integers.
/// Node IDs are assigned sequentially starting from 0 when nodes are added to a graph,
/// which makes them suitable as indices into per-block result vectors.
///
/// # Examples
///
/// ```rust,ignore
/// use rivscope::utils::graph::{DirectedGraph, NodeId};
///
/// let mut graph: DirectedGraph<&str> = DirectedGraph::new();
/// let entry: NodeId = graph.add_node("entry");
/// let exit: NodeId = graph.add_node("exit");
///
/// assert_ne!(entry, exit);
/// assert_eq!(entry.index(), 0);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Creates a new `NodeId` from a raw index value.
    ///
    /// This constructor is primarily intended for internal use and testing.
    /// Normal usage should obtain `NodeId` values from
    /// [`DirectedGraph::add_node`](crate::utils::graph::DirectedGraph::add_node)
    /// or from the IR builder.
    #[must_use]
    #[inline]
    pub const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the raw index value of this node identifier.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

impl From<NodeId> for usize {
    #[inline]
    fn from(node: NodeId) -> Self {
        node.0
    }
}
