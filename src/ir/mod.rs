//! A small SSA intermediate representation.
//!
//! The IR is deliberately minimal: it models exactly what a dominance-based
//! value analysis needs to see.
//!
//! - [`Module`] owns a single value arena plus the global variables and functions
//! - [`Function`] owns its basic blocks as the nodes of a control flow graph
//! - [`Instruction`]s are values; each one lives in exactly one [`Block`]
//! - [`IrType`] and [`TypeClass`] decide which values an analysis tracks
//!
//! All cross references are by handle ([`ValueId`], [`FunctionId`], and
//! [`NodeId`](crate::utils::graph::NodeId) for blocks), never by pointer.
//!
//! Functions are created with a [`FunctionBuilder`], which rejects malformed
//! input (unknown operands, missing or duplicate terminators) before a
//! [`Function`] ever exists.

mod builder;
mod function;
mod instruction;
mod module;
mod types;
mod value;

pub use builder::FunctionBuilder;
pub use function::{Block, Function};
pub use instruction::{Instruction, Opcode, Operand};
pub use module::Module;
pub use types::{IrType, TypeClass};
pub use value::{FunctionId, Value, ValueId, ValueKind};
