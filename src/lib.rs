// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # rivscope
//!
//! Dominance-driven *Reachable Integer Values* analysis over a small SSA IR.
//!
//! For every basic block of a function, `rivscope` computes the set of tracked
//! values (by default: integers of every width) that are guaranteed to be
//! available whenever control reaches that block. The analysis is a single walk
//! down the dominator tree; it is not a fixpoint iteration and needs no lattice
//! or join operator.
//!
//! ## Features
//!
//! - **🌳 Dominance-based** - Lengauer-Tarjan dominator trees, computed lazily and cached per function
//! - **📦 Arena IR** - Values, blocks and functions referenced by small integer handles
//! - **⚡ Bit set value sets** - Union and superset checks over dense value handles
//! - **🔌 Injectable trees** - Run the engine on any tree implementing [`analysis::riv::DominatorTreeView`]
//! - **🧵 Parallel module driver** - Functions analysed independently with `rayon`
//! - **🛡️ Boundary validation** - Malformed IR and inconsistent trees are rejected with typed errors
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rivscope::prelude::*;
//!
//! let mut module = Module::new("demo");
//! module.add_global("limit", IrType::I32, Some(10));
//!
//! let mut fb = module.function("step", &[("n", IrType::I32)]);
//! let n = fb.param(0)?;
//! let entry = fb.block("entry");
//! let exit = fb.block("exit");
//! fb.binary(entry, "next", Opcode::Add, IrType::I32, Operand::Value(n), Operand::Imm(1))?;
//! fb.br(entry, exit)?;
//! fb.ret(exit, None)?;
//! let step = fb.finish()?;
//!
//! let analysis = RivAnalysis::new(&module, RivConfig::default());
//! let result = analysis.run(step)?;
//! print!("{}", analysis.report(step, &result)?);
//! # Ok::<(), rivscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`ir`] - Modules, functions, blocks, instructions and the function builder
//! - [`analysis`] - The RIV analysis and its configuration
//! - [`utils`] - Generic graph infrastructure and bit sets
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Logging
//!
//! The analysis emits [`tracing`](https://docs.rs/tracing) events: a `debug`
//! span per analysed function, `debug` events for seed and block set sizes,
//! `trace` events for each propagation step and a `warn` event when a supplied
//! dominator tree is rejected. No subscriber is installed by the library.

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use rivscope::prelude::*;
///
/// let module = Module::new("empty");
/// let analysis = RivAnalysis::new(&module, RivConfig::default());
/// assert!(analysis.run_module()?.is_empty());
/// # Ok::<(), rivscope::Error>(())
/// ```
pub mod prelude;

/// In-memory SSA intermediate representation.
///
/// # Key Types
///
/// - [`ir::Module`] - Value arena, globals and functions
/// - [`ir::FunctionBuilder`] - Validating construction of functions
/// - [`ir::Function`] - Parameters plus a CFG of [`ir::Block`]s
/// - [`ir::IrType`] / [`ir::TypeClass`] - Types and their tracking classes
pub mod ir;

/// Program analyses.
///
/// See [`analysis::riv`] for the reachable-value analysis.
pub mod analysis;

/// Shared utilities: directed graphs, graph algorithms and bit sets.
pub mod utils;

/// `rivscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `rivscope` Error type
///
/// # Examples
///
/// ```rust,no_run
/// use rivscope::{Error, ir::Module};
///
/// let mut module = Module::new("m");
/// let fb = module.function("f", &[]);
/// match fb.finish() {
///     Ok(id) => println!("built {id}"),
///     Err(Error::Empty) => println!("no blocks"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;
