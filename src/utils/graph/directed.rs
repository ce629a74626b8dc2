//! Core directed graph implementation.
//!
//! This module provides [`DirectedGraph`], the adjacency-list graph that backs
//! every function's control flow graph. Nodes carry arbitrary data (basic blocks
//! in practice); edges carry none, since the analyses here only care about
//! which block can follow which.

use crate::{
    utils::graph::{
        node::NodeId,
        traits::{GraphBase, Successors},
    },
    Error, Result,
};

/// A directed graph with typed node data.
///
/// The graph is built incrementally and then treated as immutable for analysis.
/// Both directions of every edge are recorded so that successor and predecessor
/// queries are O(out-degree) and O(in-degree) respectively.
///
/// # Thread Safety
///
/// `DirectedGraph<N>` is [`Send`] and [`Sync`] when `N` is, enabling concurrent
/// read access after construction. Build the graph single-threaded, then share
/// it immutably.
///
/// # Examples
///
/// ```rust,ignore
/// use rivscope::utils::graph::DirectedGraph;
///
/// let mut graph: DirectedGraph<&str> = DirectedGraph::new();
/// let a = graph.add_node("A");
/// let b = graph.add_node("B");
/// let c = graph.add_node("C");
///
/// graph.add_edge(a, b)?;
/// graph.add_edge(b, c)?;
/// graph.add_edge(a, c)?;
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 3);
/// # Ok::<(), rivscope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirectedGraph<N> {
    /// Node data storage
    nodes: Vec<N>,
    /// Outgoing edges per node (adjacency list for successors)
    outgoing: Vec<Vec<NodeId>>,
    /// Incoming edges per node (adjacency list for predecessors)
    incoming: Vec<Vec<NodeId>>,
    /// Total number of edges
    edge_count: usize,
}

impl<N> Default for DirectedGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> DirectedGraph<N> {
    /// Creates a new empty directed graph.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty directed graph with pre-allocated node capacity.
    #[must_use]
    pub fn with_capacity(node_capacity: usize) -> Self {
        DirectedGraph {
            nodes: Vec::with_capacity(node_capacity),
            outgoing: Vec::with_capacity(node_capacity),
            incoming: Vec::with_capacity(node_capacity),
            edge_count: 0,
        }
    }

    /// Adds a new node with the given data and returns its identifier.
    ///
    /// Node identifiers are assigned sequentially starting from 0.
    pub fn add_node(&mut self, data: N) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(data);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    /// Adds a directed edge from `source` to `target`.
    ///
    /// Parallel edges are kept: a conditional branch whose two arms name the
    /// same block produces two edges, mirroring the instruction stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GraphError`] if either `source` or `target` node does not exist
    /// in the graph.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<()> {
        if source.index() >= self.nodes.len() {
            return Err(Error::GraphError(format!(
                "source node {} does not exist in graph with {} nodes",
                source,
                self.nodes.len()
            )));
        }
        if target.index() >= self.nodes.len() {
            return Err(Error::GraphError(format!(
                "target node {} does not exist in graph with {} nodes",
                target,
                self.nodes.len()
            )));
        }

        self.outgoing[source.index()].push(target);
        self.incoming[target.index()].push(source);
        self.edge_count += 1;
        Ok(())
    }

    /// Returns a reference to the data associated with the given node.
    #[must_use]
    pub fn node(&self, node: NodeId) -> Option<&N> {
        self.nodes.get(node.index())
    }

    /// Returns a mutable reference to the data associated with the given node.
    pub fn node_mut(&mut self, node: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(node.index())
    }

    /// Returns an iterator over all nodes and their data, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &N)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, data)| (NodeId::new(i), data))
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if the graph contains no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if the node exists in this graph.
    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// Returns an iterator over the successors of the given node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node in the graph.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing[node.index()].iter().copied()
    }

    /// Returns an iterator over the predecessors of the given node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a valid node in the graph.
    pub fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.incoming[node.index()].iter().copied()
    }
}

impl<N> GraphBase for DirectedGraph<N> {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::new)
    }
}

impl<N> Successors for DirectedGraph<N> {
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.outgoing[node.index()].iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        utils::graph::{directed::DirectedGraph, node::NodeId, traits::GraphBase},
        Error,
    };

    /// Creates a simple linear graph: A -> B -> C
    fn create_linear_graph() -> DirectedGraph<&'static str> {
        let mut graph = DirectedGraph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();
        graph
    }

    #[test]
    fn test_empty_graph() {
        let graph: DirectedGraph<()> = DirectedGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_ids().count(), 0);
    }

    #[test]
    fn test_linear_adjacency() {
        let graph = create_linear_graph();
        let (a, b, c) = (NodeId::new(0), NodeId::new(1), NodeId::new(2));

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.successors(a).collect::<Vec<_>>(), vec![b]);
        assert_eq!(graph.successors(b).collect::<Vec<_>>(), vec![c]);
        assert_eq!(graph.successors(c).count(), 0);
        assert_eq!(graph.predecessors(c).collect::<Vec<_>>(), vec![b]);
        assert_eq!(graph.predecessors(a).count(), 0);
    }

    #[test]
    fn test_node_data_access() {
        let mut graph = create_linear_graph();
        assert_eq!(graph.node(NodeId::new(1)), Some(&"B"));
        assert_eq!(graph.node(NodeId::new(3)), None);

        if let Some(data) = graph.node_mut(NodeId::new(1)) {
            *data = "B'";
        }
        assert_eq!(graph.node(NodeId::new(1)), Some(&"B'"));

        let labels: Vec<_> = graph.nodes().map(|(_, n)| *n).collect();
        assert_eq!(labels, vec!["A", "B'", "C"]);
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut graph: DirectedGraph<()> = DirectedGraph::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, b).unwrap();
        graph.add_edge(a, b).unwrap();

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.successors(a).count(), 2);
    }

    #[test]
    fn test_add_edge_invalid_nodes() {
        let mut graph: DirectedGraph<()> = DirectedGraph::new();
        let a = graph.add_node(());

        let err = graph.add_edge(a, NodeId::new(5)).unwrap_err();
        assert!(matches!(err, Error::GraphError(_)));

        let err = graph.add_edge(NodeId::new(9), a).unwrap_err();
        assert!(matches!(err, Error::GraphError(_)));
        assert_eq!(graph.edge_count(), 0);
    }
}
