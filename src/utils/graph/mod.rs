//! Generic directed graph infrastructure for program analysis.
//!
//! This module provides the graph layer underneath the IR: every function's
//! control flow graph is a [`DirectedGraph`] of basic blocks, and dominance is
//! computed over it by the algorithms in [`algorithms`].
//!
//! # Key Components
//!
//! - [`NodeId`] - Strongly-typed node identifier (the block handle)
//! - [`DirectedGraph`] - Adjacency-list directed graph
//! - [`GraphBase`], [`Successors`], [`RootedGraph`] - Traits the algorithms are written against
//! - [`algorithms`] - Depth-first traversal and Lengauer-Tarjan dominators
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use rivscope::utils::graph::{algorithms, DirectedGraph};
//!
//! let mut graph: DirectedGraph<&str> = DirectedGraph::new();
//! let entry = graph.add_node("entry");
//! let a = graph.add_node("A");
//! let b = graph.add_node("B");
//! let exit = graph.add_node("exit");
//!
//! graph.add_edge(entry, a)?;
//! graph.add_edge(entry, b)?;
//! graph.add_edge(a, exit)?;
//! graph.add_edge(b, exit)?;
//!
//! let dominators = algorithms::compute_dominators(&graph, entry);
//! assert!(dominators.dominates(entry, exit));
//! assert_eq!(dominators.immediate_dominator(exit), Some(entry));
//! # Ok::<(), rivscope::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! All types in this module implement [`Send`] and [`Sync`] when their generic
//! parameters do.

mod directed;
mod node;
mod traits;

pub mod algorithms;

pub use directed::DirectedGraph;
pub use node::NodeId;
pub use traits::{GraphBase, RootedGraph, Successors};
