//! Per-block collection of locally defined values.

use crate::{
    analysis::riv::ValueSet,
    ir::{Function, Module, TypeClass},
    utils::graph::NodeId,
};

/// The values each block defines locally, restricted to the tracked classes.
///
/// A value appears in at most one block's set. Globals and parameters are not
/// defined by any block and never appear here.
#[derive(Debug, Clone)]
pub struct DefinitionSet {
    /// One set per block, indexed by block
    defs: Vec<ValueSet>,
}

impl DefinitionSet {
    /// Returns the values defined in `block`, or `None` for an unknown block.
    #[must_use]
    pub fn get(&self, block: NodeId) -> Option<&ValueSet> {
        self.defs.get(block.index())
    }

    /// Returns the number of blocks covered.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.defs.len()
    }

    /// Iterates over all blocks and their definitions, in block order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ValueSet)> + '_ {
        self.defs
            .iter()
            .enumerate()
            .map(|(index, set)| (NodeId::new(index), set))
    }

    /// Returns the total number of tracked definitions in the function.
    #[must_use]
    pub fn total(&self) -> usize {
        self.defs.iter().map(ValueSet::len).sum()
    }
}

/// Records, for every block of `function`, the instructions whose result type
/// belongs to `tracked`.
///
/// Every block gets an entry, reachable or not. Instructions producing no value
/// (`void`) are never tracked.
#[must_use]
pub fn collect_definitions(module: &Module, function: &Function, tracked: TypeClass) -> DefinitionSet {
    let universe = module.value_count();
    let defs = function
        .blocks()
        .map(|(_, block)| {
            let mut set = ValueSet::new(universe);
            for inst in block.instructions() {
                let is_tracked = module
                    .value(inst.value())
                    .is_some_and(|value| value.content_type().is_tracked(tracked));
                if is_tracked {
                    set.insert(inst.value());
                }
            }
            set
        })
        .collect();

    DefinitionSet { defs }
}
