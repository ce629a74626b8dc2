//! # rivscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the rivscope library. Import this module to get quick access to everything needed
//! to build IR and run the reachable-value analysis.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all rivscope operations
pub use crate::Error;

/// The result type used throughout rivscope
pub use crate::Result;

// ================================================================================================
// Intermediate Representation
// ================================================================================================

/// Module, functions and their construction
pub use crate::ir::{Block, Function, FunctionBuilder, Module};

/// Instructions and operands
pub use crate::ir::{Instruction, Opcode, Operand};

/// Values, handles and types
pub use crate::ir::{FunctionId, IrType, TypeClass, Value, ValueId, ValueKind};

// ================================================================================================
// Analysis
// ================================================================================================

/// Analysis driver, configuration and report
pub use crate::analysis::{RivAnalysis, RivConfig, RivReport, TraversalOrder};

/// Analysis results
pub use crate::analysis::{ReachableSet, ValueSet};

/// Engine stages and dominator tree interface
pub use crate::analysis::riv::{
    collect_definitions, entry_seed, propagate, validate_tree, DefinitionSet, DominatorTreeView,
    ParentTree,
};

// ================================================================================================
// Graph Infrastructure
// ================================================================================================

/// Block handles and graph traits
pub use crate::utils::graph::{DirectedGraph, GraphBase, NodeId, RootedGraph, Successors};

/// Dominator computation
pub use crate::utils::graph::algorithms::{compute_dominators, DominatorTree};
