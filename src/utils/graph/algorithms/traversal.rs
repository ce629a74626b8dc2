//! Graph traversal algorithms.
//!
//! [`dfs`] walks everything reachable from a start node without recursion.
//! It is how the analyses determine which blocks of a function are live, i.e.
//! which blocks a correct dominator tree must span.

use crate::utils::graph::{NodeId, Successors};

/// Depth-first search iterator over graph nodes.
///
/// This iterator performs an iterative (non-recursive) depth-first traversal
/// starting from a given node. It visits each reachable node exactly once
/// in pre-order (visiting a node before its descendants).
pub struct DfsIterator<'g, G: Successors> {
    graph: &'g G,
    stack: Vec<NodeId>,
    visited: Vec<bool>,
}

impl<'g, G: Successors> DfsIterator<'g, G> {
    fn new(graph: &'g G, start: NodeId) -> Self {
        let node_count = graph.node_count();
        if start.index() >= node_count {
            return DfsIterator {
                graph,
                stack: Vec::new(),
                visited: Vec::new(),
            };
        }

        let mut visited = vec![false; node_count];
        visited[start.index()] = true;

        DfsIterator {
            graph,
            stack: vec![start],
            visited,
        }
    }
}

impl<G: Successors> Iterator for DfsIterator<'_, G> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        // Reverse so that successors are visited in their listed order
        let successors: Vec<NodeId> = self.graph.successors(node).collect();
        for &succ in successors.iter().rev() {
            if !self.visited[succ.index()] {
                self.visited[succ.index()] = true;
                self.stack.push(succ);
            }
        }

        Some(node)
    }
}

/// Returns a depth-first search iterator starting from the given node.
///
/// Nodes not reachable from `start` are never yielded. An out-of-range start
/// node yields nothing.
///
/// # Complexity
///
/// - Time: O(V + E)
/// - Space: O(V) for the visited set and stack
///
/// # Examples
///
/// ```rust,ignore
/// use rivscope::utils::graph::{DirectedGraph, NodeId, algorithms::dfs};
///
/// let mut graph: DirectedGraph<&str> = DirectedGraph::new();
/// let a = graph.add_node("A");
/// let b = graph.add_node("B");
/// let c = graph.add_node("C");
/// graph.add_edge(a, b)?;
/// graph.add_edge(b, c)?;
///
/// let reachable: Vec<NodeId> = dfs(&graph, a).collect();
/// assert_eq!(reachable, vec![a, b, c]);
/// # Ok::<(), rivscope::Error>(())
/// ```
pub fn dfs<G: Successors>(graph: &G, start: NodeId) -> DfsIterator<'_, G> {
    DfsIterator::new(graph, start)
}
