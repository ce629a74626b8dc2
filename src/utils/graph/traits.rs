//! Trait definitions for graph abstractions.
//!
//! Graph algorithms are written against these traits rather than a concrete
//! graph type, so the same dominator and traversal code serves the raw
//! [`DirectedGraph`](crate::utils::graph::DirectedGraph) and the IR
//! [`Function`](crate::ir::Function) alike.
//!
//! - [`GraphBase`] - Core properties: node count and node iteration
//! - [`Successors`] - Forward edge traversal (outgoing edges)
//! - [`RootedGraph`] - Graphs with a designated entry node (for dominator computation)

use crate::utils::graph::NodeId;

/// Base trait providing core graph properties.
pub trait GraphBase {
    /// Returns the number of nodes in the graph.
    ///
    /// This count includes all nodes that have been added to the graph,
    /// regardless of their connectivity.
    fn node_count(&self) -> usize;

    /// Returns an iterator over all node identifiers in the graph.
    ///
    /// The iteration order is the order in which nodes were added
    /// to the graph (i.e., by ascending `NodeId` index).
    fn node_ids(&self) -> impl Iterator<Item = NodeId>;
}

/// Trait for graphs that support forward edge traversal.
///
/// # Examples
///
/// ```rust,ignore
/// use rivscope::utils::graph::{DirectedGraph, NodeId, Successors};
///
/// let mut graph: DirectedGraph<&str> = DirectedGraph::new();
/// let a = graph.add_node("A");
/// let b = graph.add_node("B");
/// let c = graph.add_node("C");
///
/// graph.add_edge(a, b)?;
/// graph.add_edge(a, c)?;
///
/// let successors: Vec<NodeId> = graph.successors(a).collect();
/// assert_eq!(successors, vec![b, c]);
/// # Ok::<(), rivscope::Error>(())
/// ```
pub trait Successors: GraphBase {
    /// Returns an iterator over the successor nodes of the given node.
    ///
    /// For a directed edge `(u, v)`, node `v` is a successor of `u`.
    ///
    /// # Panics
    ///
    /// May panic if `node` is not a valid node in the graph.
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId>;
}

/// Trait for graphs with a designated entry (root) node.
///
/// A control flow graph's entry is its first basic block; every dominance
/// question is asked relative to it.
pub trait RootedGraph: Successors {
    /// Returns the entry node of the graph.
    fn entry(&self) -> NodeId;
}
