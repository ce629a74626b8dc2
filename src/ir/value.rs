//! Values and their handles.
//!
//! Every entity that can appear as an operand (a global, a function parameter,
//! or an instruction result) is a [`Value`] stored in the module's value arena
//! and referred to by a [`ValueId`]. Identity is by handle: two values with the
//! same name and type are still distinct values.

use std::fmt;

use crate::{ir::IrType, utils::graph::NodeId};

/// Unique identifier for a value within a [`Module`](crate::ir::Module).
///
/// This is a lightweight handle into the module's value arena. Handles are dense
/// (assigned sequentially from 0), which lets value sets be stored as bit sets
/// sized to the module's value count.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueId(usize);

impl ValueId {
    /// Creates a new value identifier.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying index into the value arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Unique identifier for a function within a [`Module`](crate::ir::Module).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionId(usize);

impl FunctionId {
    /// Creates a new function identifier.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying index into the module's function list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn{}", self.0)
    }
}

/// Where a value comes from, and therefore where it is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A module-level global variable, visible from every block of every function.
    ///
    /// The global itself is a pointer to its storage; `value_type` is the type
    /// of the storage, which is what decides whether the global is tracked.
    Global {
        /// Type of the storage the global names
        value_type: IrType,
        /// Optional constant initializer
        initializer: Option<i64>,
    },
    /// A formal parameter, visible from the function's entry block onward.
    Argument {
        /// The function this parameter belongs to
        function: FunctionId,
        /// Zero-based position in the parameter list
        index: usize,
    },
    /// The result of an instruction, defined in exactly one block.
    Instruction {
        /// The function containing the instruction
        function: FunctionId,
        /// The block containing the instruction
        block: NodeId,
    },
}

/// A value in the module's value arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    /// Handle of this value
    id: ValueId,
    /// Optional source-level name (printed as `%name` or `@name`)
    name: Option<String>,
    /// Type of the value itself
    ty: IrType,
    /// Origin of the value
    kind: ValueKind,
}

impl Value {
    pub(crate) fn new(id: ValueId, name: Option<String>, ty: IrType, kind: ValueKind) -> Self {
        Self { id, name, ty, kind }
    }

    /// Returns the handle of this value.
    #[must_use]
    pub const fn id(&self) -> ValueId {
        self.id
    }

    /// Returns the name of this value, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the type of the value itself.
    ///
    /// For globals this is always [`IrType::Ptr`]; see [`Value::content_type`].
    #[must_use]
    pub const fn ty(&self) -> IrType {
        self.ty
    }

    /// Returns the origin of this value.
    #[must_use]
    pub const fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// Returns the type used when classifying this value for tracking.
    ///
    /// For globals this is the type of the storage they name; for everything
    /// else it is the value's own type.
    #[must_use]
    pub const fn content_type(&self) -> IrType {
        match self.kind {
            ValueKind::Global { value_type, .. } => value_type,
            _ => self.ty,
        }
    }

    /// Returns `true` if this is a global variable.
    #[must_use]
    pub const fn is_global(&self) -> bool {
        matches!(self.kind, ValueKind::Global { .. })
    }

    /// Returns `true` if this is a formal parameter.
    #[must_use]
    pub const fn is_argument(&self) -> bool {
        matches!(self.kind, ValueKind::Argument { .. })
    }

    /// Returns the block defining this value, for instruction results.
    #[must_use]
    pub const fn defining_block(&self) -> Option<NodeId> {
        match self.kind {
            ValueKind::Instruction { block, .. } => Some(block),
            _ => None,
        }
    }

    /// Writes the operand form of the value: `@name` for globals, `%name`
    /// (or `%N` when unnamed) for everything else.
    pub(crate) fn write_ref(&self, f: &mut impl fmt::Write) -> fmt::Result {
        let sigil = if self.is_global() { '@' } else { '%' };
        match &self.name {
            Some(name) => write!(f, "{sigil}{name}"),
            None => write!(f, "{sigil}{}", self.id.index()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_id_formatting() {
        let id = ValueId::new(7);
        assert_eq!(id.index(), 7);
        assert_eq!(format!("{id}"), "v7");
        assert_eq!(format!("{id:?}"), "v7");
    }

    #[test]
    fn test_global_content_type() {
        let global = Value::new(
            ValueId::new(0),
            Some("counter".to_string()),
            IrType::Ptr,
            ValueKind::Global {
                value_type: IrType::I32,
                initializer: Some(0),
            },
        );

        assert!(global.is_global());
        assert_eq!(global.ty(), IrType::Ptr);
        assert_eq!(global.content_type(), IrType::I32);
        assert_eq!(global.defining_block(), None);

        let mut out = String::new();
        global.write_ref(&mut out).unwrap();
        assert_eq!(out, "@counter");
    }

    #[test]
    fn test_instruction_value_ref() {
        let inst = Value::new(
            ValueId::new(4),
            None,
            IrType::BOOL,
            ValueKind::Instruction {
                function: FunctionId::new(0),
                block: NodeId::new(2),
            },
        );

        assert_eq!(inst.content_type(), IrType::BOOL);
        assert_eq!(inst.defining_block(), Some(NodeId::new(2)));

        let mut out = String::new();
        inst.write_ref(&mut out).unwrap();
        assert_eq!(out, "%4");
    }
}
