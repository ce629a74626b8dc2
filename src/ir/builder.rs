//! Incremental construction of functions.
//!
//! [`FunctionBuilder`] validates every instruction as it is appended, so a
//! successfully finished [`Function`] is always well formed: every block ends in
//! exactly one terminator, every operand refers to an existing value or block,
//! and the CFG edges agree with the terminators.

use crate::{
    ir::{Block, Function, FunctionId, Instruction, IrType, Module, Opcode, Operand, ValueId, ValueKind},
    utils::graph::{DirectedGraph, NodeId},
    Error, Result,
};

/// Builder for a single function of a [`Module`].
///
/// Obtained from [`Module::function`]. Blocks are created up front with
/// [`FunctionBuilder::block`] (the first one is the entry), then filled with
/// instructions in any order. [`FunctionBuilder::finish`] derives the CFG edges
/// and registers the function with the module.
///
/// Values created through a builder that is dropped without calling `finish`
/// stay in the module's value arena but belong to no function.
#[derive(Debug)]
pub struct FunctionBuilder<'m> {
    module: &'m mut Module,
    id: FunctionId,
    name: String,
    params: Vec<ValueId>,
    blocks: Vec<Block>,
}

impl<'m> FunctionBuilder<'m> {
    pub(crate) fn new(module: &'m mut Module, name: String, params: &[(&str, IrType)]) -> Self {
        let id = module.next_function_id();
        let params = params
            .iter()
            .enumerate()
            .map(|(index, (param_name, ty))| {
                module.push_value(
                    Some((*param_name).to_string()),
                    *ty,
                    ValueKind::Argument {
                        function: id,
                        index,
                    },
                )
            })
            .collect();

        Self {
            module,
            id,
            name,
            params,
            blocks: Vec::new(),
        }
    }

    /// Returns the handle the function will have once finished.
    #[must_use]
    pub const fn id(&self) -> FunctionId {
        self.id
    }

    /// Returns the value of the parameter at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the function has fewer parameters.
    pub fn param(&self, index: usize) -> Result<ValueId> {
        self.params.get(index).copied().ok_or_else(|| {
            malformed_error!(
                "Function '{}' has {} parameters, requested #{}",
                self.name,
                self.params.len(),
                index
            )
        })
    }

    /// Creates a new, empty basic block. The first block created is the entry.
    pub fn block(&mut self, label: impl Into<String>) -> NodeId {
        self.blocks.push(Block::new(label));
        NodeId::new(self.blocks.len() - 1)
    }

    /// Appends an instruction to `block` and returns the value it defines.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownBlock`] if `block` or a block operand does not exist
    /// - [`Error::UnknownValue`] if a value operand does not exist in the module
    /// - [`Error::Malformed`] if `block` already ends in a terminator
    pub fn append(
        &mut self,
        block: NodeId,
        name: Option<&str>,
        opcode: Opcode,
        ty: IrType,
        operands: Vec<Operand>,
    ) -> Result<ValueId> {
        let target = self
            .blocks
            .get(block.index())
            .ok_or(Error::UnknownBlock(block))?;
        if target.terminator().is_some() {
            return Err(malformed_error!(
                "Block '{}' already ends in a terminator, cannot append '{}'",
                target.label(),
                opcode
            ));
        }

        for operand in &operands {
            match *operand {
                Operand::Value(value) if value.index() >= self.module.value_count() => {
                    return Err(Error::UnknownValue(value));
                }
                Operand::Block(succ) if succ.index() >= self.blocks.len() => {
                    return Err(Error::UnknownBlock(succ));
                }
                _ => {}
            }
        }

        let value = self.module.push_value(
            name.map(str::to_string),
            ty,
            ValueKind::Instruction {
                function: self.id,
                block,
            },
        );
        self.blocks[block.index()].push(Instruction::new(value, opcode, operands));
        Ok(value)
    }

    /// Appends a two-operand arithmetic or bitwise instruction.
    ///
    /// # Errors
    ///
    /// See [`FunctionBuilder::append`].
    pub fn binary(
        &mut self,
        block: NodeId,
        name: &str,
        opcode: Opcode,
        ty: IrType,
        lhs: Operand,
        rhs: Operand,
    ) -> Result<ValueId> {
        self.append(block, Some(name), opcode, ty, vec![lhs, rhs])
    }

    /// Appends an integer comparison producing an `i1`.
    ///
    /// # Errors
    ///
    /// See [`FunctionBuilder::append`].
    pub fn icmp(&mut self, block: NodeId, name: &str, lhs: Operand, rhs: Operand) -> Result<ValueId> {
        self.append(block, Some(name), Opcode::ICmp, IrType::BOOL, vec![lhs, rhs])
    }

    /// Terminates `block` with an unconditional branch to `target`.
    ///
    /// # Errors
    ///
    /// See [`FunctionBuilder::append`].
    pub fn br(&mut self, block: NodeId, target: NodeId) -> Result<ValueId> {
        self.append(block, None, Opcode::Br, IrType::Void, vec![Operand::Block(target)])
    }

    /// Terminates `block` with a two-way branch on `cond`.
    ///
    /// # Errors
    ///
    /// See [`FunctionBuilder::append`].
    pub fn cond_br(
        &mut self,
        block: NodeId,
        cond: ValueId,
        then_block: NodeId,
        else_block: NodeId,
    ) -> Result<ValueId> {
        self.append(
            block,
            None,
            Opcode::CondBr,
            IrType::Void,
            vec![
                Operand::Value(cond),
                Operand::Block(then_block),
                Operand::Block(else_block),
            ],
        )
    }

    /// Terminates `block` with a return, optionally carrying a value.
    ///
    /// # Errors
    ///
    /// See [`FunctionBuilder::append`].
    pub fn ret(&mut self, block: NodeId, value: Option<ValueId>) -> Result<ValueId> {
        let operands = value.map(Operand::Value).into_iter().collect();
        self.append(block, None, Opcode::Ret, IrType::Void, operands)
    }

    /// Finishes the function, derives its CFG and adds it to the module.
    ///
    /// # Errors
    ///
    /// - [`Error::Empty`] if no block was created
    /// - [`Error::Malformed`] if a block does not end in a terminator
    pub fn finish(self) -> Result<FunctionId> {
        if self.blocks.is_empty() {
            return Err(Error::Empty);
        }

        let mut edges = Vec::new();
        for (index, block) in self.blocks.iter().enumerate() {
            let Some(terminator) = block.terminator() else {
                return Err(malformed_error!(
                    "Block '{}' of function '{}' has no terminator",
                    block.label(),
                    self.name
                ));
            };
            edges.extend(terminator.successors().map(|succ| (NodeId::new(index), succ)));
        }

        let mut graph = DirectedGraph::with_capacity(self.blocks.len());
        for block in self.blocks {
            graph.add_node(block);
        }
        for (source, target) in edges {
            graph.add_edge(source, target)?;
        }

        let function = Function::new(self.id, self.name, self.params, graph);
        Ok(self.module.push_function(function))
    }
}
