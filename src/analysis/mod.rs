//! Program analyses over the [`ir`](crate::ir) representation.
//!
//! # Architecture
//!
//! - [`riv`] - Reachable Integer Values, a dominance-driven availability analysis
//! - [`RivConfig`] - what the analysis tracks and how it walks the tree
//!
//! Analyses consume the IR read-only. Dominator trees come from
//! [`Function::dominators`](crate::ir::Function::dominators), which computes
//! them lazily and caches the result, or from the caller through the
//! [`riv::DominatorTreeView`] interface.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rivscope::analysis::{RivAnalysis, RivConfig};
//!
//! let analysis = RivAnalysis::new(&module, RivConfig::default());
//! for (function, result) in analysis.run_module_parallel()? {
//!     print!("{}", analysis.report(function, &result)?);
//! }
//! # Ok::<(), rivscope::Error>(())
//! ```

mod config;
pub mod riv;

pub use config::{RivConfig, TraversalOrder};
pub use riv::{ReachableSet, RivAnalysis, RivReport, ValueSet};
