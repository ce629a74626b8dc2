//! Configuration for the reachable-value analysis
//!
//! The defaults reproduce the classic "reachable integer values" behaviour:
//! integers of every width are tracked, globals and parameters seed the entry
//! block, and injected dominator trees are checked against their function
//! before propagation starts.

use strum::{Display, EnumIter};

use crate::ir::TypeClass;

/// Order in which the dominator tree is walked during propagation.
///
/// Both orders visit a parent before any of its children, so the computed sets
/// are identical; only the visitation order recorded in the result differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
pub enum TraversalOrder {
    /// Worklist used as a stack (last pushed, first visited)
    #[default]
    DepthFirst,
    /// Worklist used as a queue (first pushed, first visited)
    BreadthFirst,
}

/// Configuration for [`RivAnalysis`](crate::analysis::RivAnalysis)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RivConfig {
    /// Value type classes the analysis tracks (default: integers of any width)
    pub tracked: TypeClass,

    /// Worklist discipline used while walking the dominator tree
    pub order: TraversalOrder,

    /// Check the dominator tree against the function before propagating
    /// Computed trees always pass; this guards trees injected by the caller
    pub validate_tree: bool,

    /// Seed tracked module globals into the entry block
    pub include_globals: bool,
}

impl Default for RivConfig {
    fn default() -> Self {
        Self {
            tracked: TypeClass::INTEGER,
            order: TraversalOrder::DepthFirst,
            validate_tree: true,
            include_globals: true,
        }
    }
}

impl RivConfig {
    /// Creates a configuration that skips dominator tree validation
    ///
    /// **Warning**: an injected tree that is not rooted at the entry or does not
    /// span the reachable blocks yields meaningless results.
    #[must_use]
    pub fn unchecked() -> Self {
        Self {
            validate_tree: false,
            ..Self::default()
        }
    }

    /// Creates the default configuration with a different set of tracked classes
    #[must_use]
    pub fn with_tracked(tracked: TypeClass) -> Self {
        Self {
            tracked,
            ..Self::default()
        }
    }

    /// Returns a copy of this configuration using the given traversal order
    #[must_use]
    pub fn order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }
}
