//! Functions and their basic blocks.
//!
//! A [`Function`] owns its basic blocks as the nodes of a [`DirectedGraph`];
//! edges are derived from the block terminators when the function is built.
//! Block 0 is always the entry block.

use std::sync::OnceLock;

use crate::{
    ir::{FunctionId, Instruction, ValueId},
    utils::graph::{
        algorithms::{self, DominatorTree},
        DirectedGraph, GraphBase, NodeId, RootedGraph, Successors,
    },
};

/// A basic block: a label and a straight-line instruction sequence whose last
/// instruction is the terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Block label, used when printing
    label: String,
    /// Instructions in execution order
    instructions: Vec<Instruction>,
}

impl Block {
    pub(crate) fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            instructions: Vec::new(),
        }
    }

    /// Returns the block label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the instructions of this block in execution order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Returns the terminator, if the block has one.
    #[must_use]
    pub fn terminator(&self) -> Option<&Instruction> {
        self.instructions.last().filter(|inst| inst.is_terminator())
    }

    pub(crate) fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }
}

/// A function: parameters plus a control flow graph of basic blocks.
///
/// # Lazy Computation
///
/// The dominator tree is computed on first access and cached, mirroring how a
/// pass manager hands out cached analysis results.
///
/// # Thread Safety
///
/// `Function` is [`Send`] and [`Sync`]; the cached dominator tree uses
/// [`OnceLock`] for thread-safe initialization.
#[derive(Debug)]
pub struct Function {
    /// Handle of this function in its module
    id: FunctionId,
    /// Function name
    name: String,
    /// Formal parameters in declaration order
    params: Vec<ValueId>,
    /// The control flow graph
    graph: DirectedGraph<Block>,
    /// Lazily computed dominator tree
    dominators: OnceLock<DominatorTree>,
}

impl Function {
    pub(crate) fn new(
        id: FunctionId,
        name: String,
        params: Vec<ValueId>,
        graph: DirectedGraph<Block>,
    ) -> Self {
        Self {
            id,
            name,
            params,
            graph,
            dominators: OnceLock::new(),
        }
    }

    /// Returns the handle of this function.
    #[must_use]
    pub const fn id(&self) -> FunctionId {
        self.id
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the formal parameters in declaration order.
    #[must_use]
    pub fn params(&self) -> &[ValueId] {
        &self.params
    }

    /// Returns the entry block.
    #[must_use]
    pub const fn entry(&self) -> NodeId {
        NodeId::new(0)
    }

    /// Returns the number of basic blocks.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns `true` if the block belongs to this function.
    #[must_use]
    pub fn contains_block(&self, block: NodeId) -> bool {
        self.graph.contains_node(block)
    }

    /// Returns the block with the given handle.
    #[must_use]
    pub fn block(&self, block: NodeId) -> Option<&Block> {
        self.graph.node(block)
    }

    /// Returns all blocks with their handles, in creation order.
    pub fn blocks(&self) -> impl Iterator<Item = (NodeId, &Block)> + '_ {
        self.graph.nodes()
    }

    /// Returns the CFG predecessors of a block.
    ///
    /// # Panics
    ///
    /// Panics if `block` does not belong to this function.
    pub fn predecessors(&self, block: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.predecessors(block)
    }

    /// Returns the blocks reachable from the entry, in depth-first pre-order.
    #[must_use]
    pub fn reachable_blocks(&self) -> Vec<NodeId> {
        algorithms::dfs(&self.graph, self.entry()).collect()
    }

    /// Returns the dominator tree, computing it on first access.
    pub fn dominators(&self) -> &DominatorTree {
        self.dominators
            .get_or_init(|| algorithms::compute_dominators(&self.graph, self.entry()))
    }
}

impl GraphBase for Function {
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.graph.node_count()).map(NodeId::new)
    }
}

impl Successors for Function {
    fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> {
        self.graph.successors(node)
    }
}

impl RootedGraph for Function {
    fn entry(&self) -> NodeId {
        NodeId::new(0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ir::{IrType, Module},
        utils::graph::{algorithms::compute_dominators_rooted, NodeId, Successors},
    };

    #[test]
    fn test_function_graph_from_builder() {
        let mut module = Module::new("m");
        let mut fb = module.function("f", &[("n", IrType::I32)]);
        let entry = fb.block("entry");
        let exit = fb.block("exit");
        fb.br(entry, exit).unwrap();
        fb.ret(exit, None).unwrap();
        let id = fb.finish().unwrap();

        let func = module.func(id).unwrap();
        assert_eq!(func.name(), "f");
        assert_eq!(func.block_count(), 2);
        assert_eq!(func.params().len(), 1);
        assert_eq!(func.entry(), entry);
        assert_eq!(func.successors(entry).collect::<Vec<_>>(), vec![exit]);
        assert_eq!(func.predecessors(exit).collect::<Vec<_>>(), vec![entry]);
        assert_eq!(func.block(exit).map(|b| b.label()), Some("exit"));
        assert!(func.block(exit).and_then(|b| b.terminator()).is_some());
        assert!(!func.contains_block(NodeId::new(2)));
    }

    #[test]
    fn test_function_dominators_cached() {
        let mut module = Module::new("m");
        let mut fb = module.function("f", &[]);
        let entry = fb.block("entry");
        let dead = fb.block("dead");
        fb.ret(entry, None).unwrap();
        fb.ret(dead, None).unwrap();
        let id = fb.finish().unwrap();

        let func = module.func(id).unwrap();
        let first = func.dominators() as *const _;
        let second = func.dominators() as *const _;
        assert_eq!(first, second);

        assert!(func.dominators().is_reachable(entry));
        assert!(!func.dominators().is_reachable(dead));
        assert_eq!(func.reachable_blocks(), vec![entry]);

        // The rooted helper agrees with the cached tree
        let fresh = compute_dominators_rooted(func);
        assert_eq!(fresh.reachable_count(), 1);
    }
}
