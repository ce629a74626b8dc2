//! Dominator tree computation using the Lengauer-Tarjan algorithm.
//!
//! # Theory
//!
//! A node `d` **dominates** a node `n` if every path from the entry node to `n`
//! must pass through `d`. The **immediate dominator** of `n` (idom(n)) is the
//! unique node that strictly dominates `n` but does not strictly dominate any
//! other dominator of `n`.
//!
//! The dominator tree is formed by making each node's immediate dominator its
//! parent. The entry node is the root (it has no dominator). Nodes that cannot be
//! reached from the entry have no dominators at all and are not part of the tree.
//!
//! # Algorithm
//!
//! This implementation uses the Lengauer-Tarjan algorithm with path compression,
//! achieving O(V α(V)) time complexity where α is the inverse Ackermann function
//! (effectively constant for all practical inputs). Predecessor lists are derived
//! once up front from the successor relation, so only [`Successors`] is required
//! of the input graph.

use crate::utils::graph::{NodeId, RootedGraph, Successors};

/// Placeholder for "no node" in the internal arrays.
const SENTINEL: NodeId = NodeId::new(usize::MAX);

/// Result of dominator tree computation.
///
/// Besides the immediate-dominator relation, the tree keeps an explicit children
/// list per node so that top-down walks (parent before child) cost O(V) overall.
///
/// # Examples
///
/// ```rust,ignore
/// use rivscope::utils::graph::{DirectedGraph, algorithms::compute_dominators};
///
/// // Simple CFG: entry -> a -> b -> exit
/// let mut graph: DirectedGraph<&str> = DirectedGraph::new();
/// let entry = graph.add_node("entry");
/// let a = graph.add_node("a");
/// let b = graph.add_node("b");
/// let exit = graph.add_node("exit");
///
/// graph.add_edge(entry, a)?;
/// graph.add_edge(a, b)?;
/// graph.add_edge(b, exit)?;
///
/// let dom_tree = compute_dominators(&graph, entry);
///
/// assert!(dom_tree.dominates(entry, exit));
/// assert_eq!(dom_tree.immediate_dominator(b), Some(a));
/// assert_eq!(dom_tree.children(a), &[b]);
/// # Ok::<(), rivscope::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DominatorTree {
    /// The entry (root) node of the dominator tree
    entry: NodeId,
    /// Immediate dominator for each node (indexed by node ID); the entry maps to
    /// itself and unreachable nodes map to the sentinel
    idom: Vec<NodeId>,
    /// Dominator-tree children for each node, in ascending node order
    children: Vec<Vec<NodeId>>,
    /// Number of nodes in the graph
    node_count: usize,
}

impl DominatorTree {
    /// Returns the entry (root) node of the dominator tree.
    #[inline]
    #[must_use]
    pub fn entry(&self) -> NodeId {
        self.entry
    }

    /// Returns `true` if the node is reachable from the entry and therefore part
    /// of the tree.
    #[must_use]
    pub fn is_reachable(&self, node: NodeId) -> bool {
        node.index() < self.node_count && self.idom[node.index()] != SENTINEL
    }

    /// Returns the immediate dominator of a node.
    ///
    /// Returns `None` for the entry node and for nodes that are not reachable
    /// from the entry.
    #[must_use]
    pub fn immediate_dominator(&self, node: NodeId) -> Option<NodeId> {
        if node == self.entry || !self.is_reachable(node) {
            None
        } else {
            Some(self.idom[node.index()])
        }
    }

    /// Checks if node `a` dominates node `b`.
    ///
    /// A node dominates itself. The entry node dominates all reachable nodes.
    /// Nothing dominates, and nothing is dominated by, an unreachable node.
    ///
    /// # Complexity
    ///
    /// O(depth) where depth is the depth of `b` in the dominator tree.
    #[must_use]
    pub fn dominates(&self, a: NodeId, b: NodeId) -> bool {
        if !self.is_reachable(a) || !self.is_reachable(b) {
            return false;
        }
        self.dominators(b).any(|d| d == a)
    }

    /// Checks if node `a` strictly dominates node `b`.
    ///
    /// Strict dominance excludes self-dominance: a strictly dominates b iff
    /// a dominates b and a ≠ b.
    #[inline]
    #[must_use]
    pub fn strictly_dominates(&self, a: NodeId, b: NodeId) -> bool {
        a != b && self.dominates(a, b)
    }

    /// Returns an iterator over all dominators of a node, from the node itself
    /// up to (and including) the entry node.
    ///
    /// The iterator is empty for unreachable nodes.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let dominators: Vec<NodeId> = dom_tree.dominators(b).collect();
    /// // b is dominated by b, a, and entry
    /// assert_eq!(dominators, vec![b, a, entry]);
    /// ```
    #[must_use]
    pub fn dominators(&self, node: NodeId) -> DominatorIterator<'_> {
        DominatorIterator {
            tree: self,
            current: self.is_reachable(node).then_some(node),
        }
    }

    /// Returns the children of a node in the dominator tree.
    ///
    /// Children are nodes whose immediate dominator is the given node. The slice
    /// is empty for leaves, unreachable nodes, and out-of-range identifiers.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.children
            .get(node.index())
            .map_or(&[], |children| children.as_slice())
    }

    /// Returns the number of nodes in the underlying graph.
    ///
    /// This includes unreachable nodes that are not part of the tree.
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of nodes spanned by the tree.
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.idom.iter().filter(|&&idom| idom != SENTINEL).count()
    }
}

/// Iterator over dominators of a node, from the node up to the entry.
pub struct DominatorIterator<'a> {
    tree: &'a DominatorTree,
    current: Option<NodeId>,
}

impl Iterator for DominatorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        self.current = if current == self.tree.entry {
            None
        } else {
            Some(self.tree.idom[current.index()])
        };
        Some(current)
    }
}

/// Computes the dominator tree for a graph using the Lengauer-Tarjan algorithm.
///
/// # Arguments
///
/// * `graph` - The graph to analyze
/// * `entry` - The node every path starts from
///
/// # Complexity
///
/// - Time: O(E + V α(V)) where α is the inverse Ackermann function
/// - Space: O(V + E)
///
/// # Examples
///
/// ```rust,ignore
/// use rivscope::utils::graph::{DirectedGraph, algorithms::compute_dominators};
///
/// // Diamond CFG:
/// //      entry
/// //      /   \
/// //     a     b
/// //      \   /
/// //       exit
/// let mut graph: DirectedGraph<&str> = DirectedGraph::new();
/// let entry = graph.add_node("entry");
/// let a = graph.add_node("a");
/// let b = graph.add_node("b");
/// let exit = graph.add_node("exit");
///
/// graph.add_edge(entry, a)?;
/// graph.add_edge(entry, b)?;
/// graph.add_edge(a, exit)?;
/// graph.add_edge(b, exit)?;
///
/// let dom_tree = compute_dominators(&graph, entry);
///
/// // exit's immediate dominator is entry (not a or b)
/// assert_eq!(dom_tree.immediate_dominator(exit), Some(entry));
/// # Ok::<(), rivscope::Error>(())
/// ```
pub fn compute_dominators<G>(graph: &G, entry: NodeId) -> DominatorTree
where
    G: Successors,
{
    let node_count = graph.node_count();

    if node_count == 0 || entry.index() >= node_count {
        return DominatorTree {
            entry,
            idom: vec![SENTINEL; node_count],
            children: vec![Vec::new(); node_count],
            node_count,
        };
    }

    let mut lt = LengauerTarjan::new(graph, entry);
    lt.compute(graph);

    let mut children = vec![Vec::new(); node_count];
    for (index, &idom) in lt.idom.iter().enumerate() {
        if index != entry.index() && idom != SENTINEL {
            children[idom.index()].push(NodeId::new(index));
        }
    }

    DominatorTree {
        entry,
        idom: lt.idom,
        children,
        node_count,
    }
}

/// Convenience function to compute dominators for a [`RootedGraph`].
///
/// This is equivalent to calling `compute_dominators(graph, graph.entry())`.
pub fn compute_dominators_rooted<G>(graph: &G) -> DominatorTree
where
    G: RootedGraph,
{
    compute_dominators(graph, graph.entry())
}

/// Internal state for the Lengauer-Tarjan algorithm.
struct LengauerTarjan {
    /// Entry node
    entry: NodeId,
    /// Predecessor lists, derived from the successor relation
    preds: Vec<Vec<NodeId>>,
    /// DFS number for each node (0 = not visited)
    dfnum: Vec<usize>,
    /// Node with each DFS number (inverse of dfnum)
    vertex: Vec<NodeId>,
    /// Parent in DFS tree
    parent: Vec<NodeId>,
    /// Semidominator (stored as node ID)
    semi: Vec<NodeId>,
    /// Immediate dominator (final result)
    idom: Vec<NodeId>,
    /// Ancestor in the forest for link-eval
    ancestor: Vec<NodeId>,
    /// Best node on path to ancestor (for path compression)
    best: Vec<NodeId>,
    /// Bucket for each node (nodes whose semidominator is this node)
    bucket: Vec<Vec<NodeId>>,
    /// Current DFS counter
    dfs_counter: usize,
}

impl LengauerTarjan {
    fn new<G: Successors>(graph: &G, entry: NodeId) -> Self {
        let n = graph.node_count();

        let mut preds = vec![Vec::new(); n];
        for node in graph.node_ids() {
            for succ in graph.successors(node) {
                preds[succ.index()].push(node);
            }
        }

        Self {
            entry,
            preds,
            dfnum: vec![0; n],
            vertex: vec![SENTINEL; n],
            parent: vec![SENTINEL; n],
            semi: (0..n).map(NodeId::new).collect(),
            idom: vec![SENTINEL; n],
            ancestor: vec![SENTINEL; n],
            best: (0..n).map(NodeId::new).collect(),
            bucket: vec![Vec::new(); n],
            dfs_counter: 0,
        }
    }

    fn compute<G: Successors>(&mut self, graph: &G) {
        // Phase 1: DFS numbering
        self.dfs(graph, self.entry);

        // Process nodes in reverse DFS order (excluding entry)
        for i in (1..self.dfs_counter).rev() {
            let w = self.vertex[i];
            let parent_w = self.parent[w.index()];

            // Phase 2: semi(w) = min over predecessors v of semi(eval(v))
            for pred_idx in 0..self.preds[w.index()].len() {
                let v = self.preds[w.index()][pred_idx];
                if self.dfnum[v.index()] == 0 {
                    // Unreachable from entry
                    continue;
                }
                let u = self.eval(v);
                if self.dfnum[self.semi[u.index()].index()]
                    < self.dfnum[self.semi[w.index()].index()]
                {
                    self.semi[w.index()] = self.semi[u.index()];
                }
            }

            let semi_w = self.semi[w.index()];
            self.bucket[semi_w.index()].push(w);

            self.link(parent_w, w);

            // Phase 3: implicitly compute immediate dominators
            let bucket = std::mem::take(&mut self.bucket[parent_w.index()]);
            for v in bucket {
                let u = self.eval(v);
                if self.semi[u.index()] == self.semi[v.index()] {
                    self.idom[v.index()] = parent_w;
                } else {
                    // Resolved in phase 4
                    self.idom[v.index()] = u;
                }
            }
        }

        // Phase 4: explicitly compute immediate dominators
        for i in 1..self.dfs_counter {
            let w = self.vertex[i];
            if self.idom[w.index()] != self.semi[w.index()] {
                self.idom[w.index()] = self.idom[self.idom[w.index()].index()];
            }
        }

        self.idom[self.entry.index()] = self.entry;
    }

    /// Iterative DFS assigning preorder numbers and the DFS spanning tree.
    fn dfs<G: Successors>(&mut self, graph: &G, start: NodeId) {
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            let idx = node.index();
            if self.dfnum[idx] != 0 {
                continue;
            }

            self.dfs_counter += 1;
            self.dfnum[idx] = self.dfs_counter;
            self.vertex[self.dfs_counter - 1] = node;

            for succ in graph.successors(node) {
                if self.dfnum[succ.index()] == 0 {
                    self.parent[succ.index()] = node;
                    stack.push(succ);
                }
            }
        }
    }

    /// Link v as a child of w in the spanning forest.
    fn link(&mut self, w: NodeId, v: NodeId) {
        self.ancestor[v.index()] = w;
    }

    /// Find the node with minimum semidominator on the path to the forest root.
    fn eval(&mut self, v: NodeId) -> NodeId {
        if self.ancestor[v.index()] == SENTINEL {
            return v;
        }

        self.compress(v);
        self.best[v.index()]
    }

    /// Path compression for the forest, iterative to bound stack depth.
    fn compress(&mut self, v: NodeId) {
        // Collect the path up to (but excluding) the node whose ancestor is a root
        let mut path = Vec::new();
        let mut current = v;
        while self.ancestor[self.ancestor[current.index()].index()] != SENTINEL {
            path.push(current);
            current = self.ancestor[current.index()];
        }

        // Walk back down, compressing from the top
        while let Some(node) = path.pop() {
            let ancestor = self.ancestor[node.index()];
            let best_ancestor = self.best[ancestor.index()];
            let best_node = self.best[node.index()];

            if self.dfnum[self.semi[best_ancestor.index()].index()]
                < self.dfnum[self.semi[best_node.index()].index()]
            {
                self.best[node.index()] = best_ancestor;
            }

            self.ancestor[node.index()] = self.ancestor[ancestor.index()];
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::graph::{
        algorithms::dominators::compute_dominators, DirectedGraph, NodeId,
    };

    #[test]
    fn test_dominator_empty_graph() {
        let graph: DirectedGraph<()> = DirectedGraph::new();
        let dom_tree = compute_dominators(&graph, NodeId::new(0));
        assert_eq!(dom_tree.node_count(), 0);
        assert_eq!(dom_tree.reachable_count(), 0);
        assert!(dom_tree.children(NodeId::new(0)).is_empty());
    }

    #[test]
    fn test_dominator_single_node() {
        let mut graph: DirectedGraph<()> = DirectedGraph::new();
        let entry = graph.add_node(());

        let dom_tree = compute_dominators(&graph, entry);

        assert_eq!(dom_tree.entry(), entry);
        assert_eq!(dom_tree.immediate_dominator(entry), None);
        assert!(dom_tree.dominates(entry, entry));
        assert!(dom_tree.children(entry).is_empty());
        assert_eq!(dom_tree.reachable_count(), 1);
    }

    #[test]
    fn test_dominator_linear_chain() {
        // entry -> a -> b -> c
        let mut graph: DirectedGraph<&str> = DirectedGraph::new();
        let entry = graph.add_node("entry");
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");

        graph.add_edge(entry, a).unwrap();
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();

        let dom_tree = compute_dominators(&graph, entry);

        assert_eq!(dom_tree.immediate_dominator(entry), None);
        assert_eq!(dom_tree.immediate_dominator(a), Some(entry));
        assert_eq!(dom_tree.immediate_dominator(b), Some(a));
        assert_eq!(dom_tree.immediate_dominator(c), Some(b));

        assert!(dom_tree.dominates(entry, c));
        assert!(dom_tree.dominates(a, c));
        assert!(!dom_tree.dominates(c, b));
        assert!(!dom_tree.dominates(b, a));

        assert_eq!(dom_tree.children(entry), &[a]);
        assert_eq!(dom_tree.children(b), &[c]);
    }

    #[test]
    fn test_dominator_diamond() {
        //      entry
        //      /   \
        //     a     b
        //      \   /
        //       exit
        let mut graph: DirectedGraph<&str> = DirectedGraph::new();
        let entry = graph.add_node("entry");
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let exit = graph.add_node("exit");

        graph.add_edge(entry, a).unwrap();
        graph.add_edge(entry, b).unwrap();
        graph.add_edge(a, exit).unwrap();
        graph.add_edge(b, exit).unwrap();

        let dom_tree = compute_dominators(&graph, entry);

        assert_eq!(dom_tree.immediate_dominator(a), Some(entry));
        assert_eq!(dom_tree.immediate_dominator(b), Some(entry));
        assert_eq!(dom_tree.immediate_dominator(exit), Some(entry));

        assert!(!dom_tree.strictly_dominates(a, exit));
        assert!(!dom_tree.strictly_dominates(b, exit));

        assert_eq!(dom_tree.children(entry), &[a, b, exit]);
        assert!(dom_tree.children(a).is_empty());
        assert!(dom_tree.children(b).is_empty());
        assert!(dom_tree.children(exit).is_empty());
    }

    #[test]
    fn test_dominator_if_then_else() {
        //      entry
        //        |
        //       cond
        //      /    \
        //   then    else
        //      \    /
        //       merge
        //        |
        //       exit
        let mut graph: DirectedGraph<&str> = DirectedGraph::new();
        let entry = graph.add_node("entry");
        let cond = graph.add_node("cond");
        let then_b = graph.add_node("then");
        let else_b = graph.add_node("else");
        let merge = graph.add_node("merge");
        let exit = graph.add_node("exit");

        graph.add_edge(entry, cond).unwrap();
        graph.add_edge(cond, then_b).unwrap();
        graph.add_edge(cond, else_b).unwrap();
        graph.add_edge(then_b, merge).unwrap();
        graph.add_edge(else_b, merge).unwrap();
        graph.add_edge(merge, exit).unwrap();

        let dom_tree = compute_dominators(&graph, entry);

        assert_eq!(dom_tree.immediate_dominator(cond), Some(entry));
        assert_eq!(dom_tree.immediate_dominator(then_b), Some(cond));
        assert_eq!(dom_tree.immediate_dominator(else_b), Some(cond));
        assert_eq!(dom_tree.immediate_dominator(merge), Some(cond));
        assert_eq!(dom_tree.immediate_dominator(exit), Some(merge));

        assert!(!dom_tree.strictly_dominates(then_b, merge));
        assert!(!dom_tree.strictly_dominates(else_b, merge));
    }

    #[test]
    fn test_dominator_loop() {
        //      entry
        //        |
        //   +-> header
        //   |    |
        //   +-- body
        //        |
        //       exit
        let mut graph: DirectedGraph<&str> = DirectedGraph::new();
        let entry = graph.add_node("entry");
        let header = graph.add_node("header");
        let body = graph.add_node("body");
        let exit = graph.add_node("exit");

        graph.add_edge(entry, header).unwrap();
        graph.add_edge(header, body).unwrap();
        graph.add_edge(body, header).unwrap();
        graph.add_edge(body, exit).unwrap();

        let dom_tree = compute_dominators(&graph, entry);

        assert!(dom_tree.dominates(header, body));
        assert!(!dom_tree.strictly_dominates(body, header));
        assert_eq!(dom_tree.immediate_dominator(exit), Some(body));
    }

    #[test]
    fn test_dominator_unreachable_node() {
        // entry -> a, dead -> a (dead has no predecessor)
        let mut graph: DirectedGraph<&str> = DirectedGraph::new();
        let entry = graph.add_node("entry");
        let a = graph.add_node("a");
        let dead = graph.add_node("dead");

        graph.add_edge(entry, a).unwrap();
        graph.add_edge(dead, a).unwrap();

        let dom_tree = compute_dominators(&graph, entry);

        assert!(!dom_tree.is_reachable(dead));
        assert_eq!(dom_tree.immediate_dominator(dead), None);
        assert_eq!(dom_tree.immediate_dominator(a), Some(entry));
        assert!(!dom_tree.dominates(entry, dead));
        assert!(!dom_tree.dominates(dead, a));
        assert_eq!(dom_tree.dominators(dead).count(), 0);
        assert_eq!(dom_tree.reachable_count(), 2);
        assert_eq!(dom_tree.children(entry), &[a]);
    }

    #[test]
    fn test_dominator_iterator() {
        let mut graph: DirectedGraph<&str> = DirectedGraph::new();
        let entry = graph.add_node("entry");
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");

        graph.add_edge(entry, a).unwrap();
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, c).unwrap();

        let dom_tree = compute_dominators(&graph, entry);

        let dominators: Vec<NodeId> = dom_tree.dominators(c).collect();
        assert_eq!(dominators, vec![c, b, a, entry]);

        let dominators: Vec<NodeId> = dom_tree.dominators(entry).collect();
        assert_eq!(dominators, vec![entry]);
    }

    #[test]
    fn test_dominator_complex_cfg() {
        //        entry
        //          |
        //          a
        //         / \
        //        b   c
        //        |   |
        //        d   e
        //         \ / \
        //          f   g
        //          |
        //          h
        let mut graph: DirectedGraph<&str> = DirectedGraph::new();
        let entry = graph.add_node("entry");
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        let d = graph.add_node("d");
        let e = graph.add_node("e");
        let f = graph.add_node("f");
        let g = graph.add_node("g");
        let h = graph.add_node("h");

        graph.add_edge(entry, a).unwrap();
        graph.add_edge(a, b).unwrap();
        graph.add_edge(a, c).unwrap();
        graph.add_edge(b, d).unwrap();
        graph.add_edge(c, e).unwrap();
        graph.add_edge(d, f).unwrap();
        graph.add_edge(e, f).unwrap();
        graph.add_edge(e, g).unwrap();
        graph.add_edge(f, h).unwrap();

        let dom_tree = compute_dominators(&graph, entry);

        for node in [b, c, d, e, f, g, h] {
            assert!(dom_tree.dominates(a, node));
        }

        // f is joined from both arms
        assert_eq!(dom_tree.immediate_dominator(f), Some(a));
        assert_eq!(dom_tree.immediate_dominator(g), Some(e));
        assert_eq!(dom_tree.immediate_dominator(h), Some(f));
    }
}
