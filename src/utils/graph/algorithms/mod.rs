//! Graph algorithms for program analysis.
//!
//! # Available Algorithms
//!
//! ## Traversal
//!
//! - [`dfs`] - Depth-first search traversal
//!
//! ## Dominator Analysis
//!
//! - [`compute_dominators`] - Compute the dominator tree using Lengauer-Tarjan
//! - [`compute_dominators_rooted`] - Same, for graphs that know their entry
//! - [`DominatorTree`] - Result of dominator computation
//!
//! # Algorithm Selection
//!
//! | Algorithm | Time Complexity | Use Case |
//! |-----------|-----------------|----------|
//! | DFS | O(V + E) | Reachability from the entry block |
//! | Dominators | O(E + V α(V)) | Dominance-driven propagation |

mod dominators;
mod traversal;

pub use dominators::{
    compute_dominators, compute_dominators_rooted, DominatorIterator, DominatorTree,
};
pub use traversal::{dfs, DfsIterator};
