//! Instructions, opcodes and operands.
//!
//! An instruction is itself a value (its result), so each [`Instruction`]
//! carries the [`ValueId`] under which its result lives in the module's value
//! arena. Instructions that produce nothing are still values, of type `void`,
//! which keeps the "one instruction, one handle" rule uniform.

use strum::{Display, EnumIter, IntoStaticStr};

use crate::{ir::ValueId, utils::graph::NodeId};

/// Operation performed by an instruction.
///
/// The textual form (via [`Display`](std::fmt::Display)) is the lowercase mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Opcode {
    /// Integer addition
    Add,
    /// Integer subtraction
    Sub,
    /// Integer multiplication
    Mul,
    /// Signed integer division
    SDiv,
    /// Unsigned integer division
    UDiv,
    /// Bitwise and
    And,
    /// Bitwise or
    Or,
    /// Bitwise xor
    Xor,
    /// Shift left
    Shl,
    /// Integer comparison, producing `i1`
    ICmp,
    /// Floating point addition
    FAdd,
    /// Floating point multiplication
    FMul,
    /// Zero extension
    ZExt,
    /// Sign extension
    SExt,
    /// Integer truncation
    Trunc,
    /// Signed integer to floating point
    SIToFP,
    /// Floating point to signed integer
    FPToSI,
    /// Stack allocation, producing a pointer
    Alloca,
    /// Load from memory
    Load,
    /// Store to memory
    Store,
    /// Function call
    Call,
    /// SSA merge of incoming values
    Phi,
    /// Conditional selection
    Select,
    /// Unconditional branch
    Br,
    /// Conditional branch
    CondBr,
    /// Return from the function
    Ret,
    /// Marks a point control never reaches
    Unreachable,
}

impl Opcode {
    /// Returns `true` if this opcode ends a basic block.
    #[must_use]
    pub const fn is_terminator(self) -> bool {
        matches!(
            self,
            Opcode::Br | Opcode::CondBr | Opcode::Ret | Opcode::Unreachable
        )
    }
}

/// An instruction operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Another value (global, parameter, or instruction result)
    Value(ValueId),
    /// A basic block, as a branch target
    Block(NodeId),
    /// An integer immediate
    Imm(i64),
}

/// A single instruction within a basic block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// The value this instruction defines
    value: ValueId,
    /// The operation
    opcode: Opcode,
    /// Operands in source order
    operands: Vec<Operand>,
}

impl Instruction {
    pub(crate) fn new(value: ValueId, opcode: Opcode, operands: Vec<Operand>) -> Self {
        Self {
            value,
            opcode,
            operands,
        }
    }

    /// Returns the handle of the value this instruction defines.
    #[must_use]
    pub const fn value(&self) -> ValueId {
        self.value
    }

    /// Returns the opcode.
    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// Returns the operands.
    #[must_use]
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// Returns `true` if this instruction ends its block.
    #[must_use]
    pub const fn is_terminator(&self) -> bool {
        self.opcode.is_terminator()
    }

    /// Returns the branch targets named by this instruction, in operand order.
    pub fn successors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.operands.iter().filter_map(|op| match op {
            Operand::Block(block) => Some(*block),
            _ => None,
        })
    }

    /// Returns the values used by this instruction, in operand order.
    pub fn uses(&self) -> impl Iterator<Item = ValueId> + '_ {
        self.operands.iter().filter_map(|op| match op {
            Operand::Value(value) => Some(*value),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_terminators() {
        let terminators: Vec<Opcode> = Opcode::iter().filter(|op| op.is_terminator()).collect();
        assert_eq!(
            terminators,
            vec![Opcode::Br, Opcode::CondBr, Opcode::Ret, Opcode::Unreachable]
        );
    }

    #[test]
    fn test_opcode_mnemonics() {
        assert_eq!(Opcode::Add.to_string(), "add");
        assert_eq!(Opcode::ICmp.to_string(), "icmp");
        assert_eq!(Opcode::CondBr.to_string(), "condbr");
        let name: &'static str = Opcode::SIToFP.into();
        assert_eq!(name, "sitofp");
    }

    #[test]
    fn test_instruction_operand_views() {
        let inst = Instruction::new(
            ValueId::new(9),
            Opcode::CondBr,
            vec![
                Operand::Value(ValueId::new(3)),
                Operand::Block(NodeId::new(1)),
                Operand::Block(NodeId::new(2)),
            ],
        );

        assert!(inst.is_terminator());
        assert_eq!(inst.value(), ValueId::new(9));
        assert_eq!(
            inst.successors().collect::<Vec<_>>(),
            vec![NodeId::new(1), NodeId::new(2)]
        );
        assert_eq!(inst.uses().collect::<Vec<_>>(), vec![ValueId::new(3)]);
    }
}
