//! Dominance-driven propagation of reachable values.
//!
//! # Algorithm
//!
//! 1. The root of the dominator tree (the function entry) is seeded with the
//!    tracked globals and parameters. No other block is seeded directly.
//! 2. The tree is walked with an explicit worklist, so a parent is always
//!    resolved before any of its children.
//! 3. For a parent `P` and each child `C`: `RIV[C] ∪= RIV[P] ∪ Defs[P]`.
//!
//! A block never sees its own definitions; they become visible one level down
//! the tree. Because the tree parent strictly dominates the child, no merging
//! across CFG predecessors is needed and a single pass suffices.
//!
//! The engine only relies on the narrow [`DominatorTreeView`] interface, so a
//! tree computed by [`compute_dominators`](crate::utils::graph::algorithms::compute_dominators)
//! and a hand-built [`ParentTree`] are interchangeable.

use std::collections::VecDeque;

use tracing::{trace, warn};

use crate::{
    analysis::{
        riv::{DefinitionSet, ReachableSet, ValueSet},
        RivConfig, TraversalOrder,
    },
    ir::{Function, Module},
    utils::graph::{algorithms::DominatorTree, NodeId},
    Error, Result,
};

/// Read-only view of a dominator tree over the blocks of one function.
pub trait DominatorTreeView {
    /// Returns the root; for a well-formed tree this is the function entry.
    fn root(&self) -> NodeId;

    /// Returns the children of `node`, empty for leaves and unknown nodes.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Returns the parent of `node`, or `None` for the root and unknown nodes.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Returns `true` if `node` is part of the tree.
    fn contains(&self, node: NodeId) -> bool;
}

impl DominatorTreeView for DominatorTree {
    fn root(&self) -> NodeId {
        self.entry()
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        DominatorTree::children(self, node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.immediate_dominator(node)
    }

    fn contains(&self, node: NodeId) -> bool {
        self.is_reachable(node)
    }
}

/// An explicit parent-pointer / children-list tree.
///
/// Used to hand the engine a dominator tree that was not computed from the
/// function, for instance one produced by another tool or built by hand in a
/// test. Nothing here checks dominance; see [`validate_tree`].
///
/// # Examples
///
/// ```rust,ignore
/// use rivscope::{analysis::riv::ParentTree, utils::graph::NodeId};
///
/// let mut tree = ParentTree::new(NodeId::new(0));
/// tree.add_child(NodeId::new(0), NodeId::new(1))?;
/// tree.add_child(NodeId::new(0), NodeId::new(2))?;
/// assert_eq!(tree.len(), 3);
/// # Ok::<(), rivscope::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentTree {
    root: NodeId,
    /// Parent of each node, indexed by node
    parent: Vec<Option<NodeId>>,
    /// Children of each node in insertion order
    children: Vec<Vec<NodeId>>,
    /// Membership flags
    present: Vec<bool>,
}

impl ParentTree {
    /// Creates a tree containing only `root`.
    #[must_use]
    pub fn new(root: NodeId) -> Self {
        let mut tree = Self {
            root,
            parent: Vec::new(),
            children: Vec::new(),
            present: Vec::new(),
        };
        tree.reserve(root);
        tree.present[root.index()] = true;
        tree
    }

    /// Copies the shape of a computed dominator tree.
    #[must_use]
    pub fn from_dominators(tree: &DominatorTree) -> Self {
        let mut copy = Self::new(tree.entry());
        let mut worklist = vec![tree.entry()];
        while let Some(node) = worklist.pop() {
            for &child in DominatorTree::children(tree, node) {
                copy.attach(node, child);
                worklist.push(child);
            }
        }
        copy
    }

    /// Adds `child` below `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDominatorTree`] if `parent` is not yet in the
    /// tree or `child` already is.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !DominatorTreeView::contains(self, parent) {
            return Err(Error::InvalidDominatorTree(format!(
                "parent {parent} of {child} is not part of the tree"
            )));
        }
        if DominatorTreeView::contains(self, child) {
            return Err(Error::InvalidDominatorTree(format!(
                "{child} is already part of the tree"
            )));
        }
        self.attach(parent, child);
        Ok(())
    }

    /// Returns the number of nodes in the tree, root included.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.present.iter().filter(|&&p| p).count()
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.reserve(child);
        self.parent[child.index()] = Some(parent);
        self.present[child.index()] = true;
        self.children[parent.index()].push(child);
    }

    fn reserve(&mut self, node: NodeId) {
        let needed = node.index() + 1;
        if self.present.len() < needed {
            self.parent.resize(needed, None);
            self.children.resize_with(needed, Vec::new);
            self.present.resize(needed, false);
        }
    }
}

impl DominatorTreeView for ParentTree {
    fn root(&self) -> NodeId {
        self.root
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.children
            .get(node.index())
            .map_or(&[], |children| children.as_slice())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent.get(node.index()).copied().flatten()
    }

    fn contains(&self, node: NodeId) -> bool {
        self.present.get(node.index()).copied().unwrap_or(false)
    }
}

/// Builds the seed of the entry block: tracked globals (when enabled) followed
/// by tracked parameters.
///
/// Globals are classified by the type of the storage they name, parameters by
/// their own type.
#[must_use]
pub fn entry_seed(module: &Module, function: &Function, config: &RivConfig) -> ValueSet {
    let mut seed = ValueSet::new(module.value_count());

    if config.include_globals {
        for &global in module.globals() {
            if module
                .value(global)
                .is_some_and(|value| value.content_type().is_tracked(config.tracked))
            {
                seed.insert(global);
            }
        }
    }

    for &param in function.params() {
        if module
            .value(param)
            .is_some_and(|value| value.ty().is_tracked(config.tracked))
        {
            seed.insert(param);
        }
    }

    seed
}

/// Propagates reachable values down `tree`, starting from `seed` at the root.
///
/// Every node reachable from the root of `tree` gets an entry in the result;
/// nothing else does. `order` only changes the visitation order recorded in
/// the result. A node reached twice (possible only with a malformed tree) is
/// expanded once.
///
/// # Panics
///
/// Panics if `defs` and `seed` were built for different modules.
#[must_use]
pub fn propagate<T>(defs: &DefinitionSet, tree: &T, seed: ValueSet, order: TraversalOrder) -> ReachableSet
where
    T: DominatorTreeView + ?Sized,
{
    let universe = seed.universe();
    let root = tree.root();

    let mut result = ReachableSet::new();
    *result.entry(root, universe) = seed;

    let mut worklist = VecDeque::from([root]);
    loop {
        let next = match order {
            TraversalOrder::DepthFirst => worklist.pop_back(),
            TraversalOrder::BreadthFirst => worklist.pop_front(),
        };
        let Some(parent) = next else {
            break;
        };
        if !result.mark_visited(parent) {
            continue;
        }

        // What every child of `parent` inherits. Copied, since the children's
        // entries live in the same container.
        let mut inherited = result
            .get(parent)
            .cloned()
            .unwrap_or_else(|| ValueSet::new(universe));
        if let Some(local) = defs.get(parent) {
            inherited.union_with(local);
        }

        for &child in tree.children(parent) {
            trace!(%parent, %child, inherited = inherited.len(), "propagating");
            result.entry(child, universe).union_with(&inherited);
            worklist.push_back(child);
        }
    }

    result
}

/// Checks that `tree` can drive the analysis of `function`.
///
/// The tree must be rooted at the entry block, contain only blocks of the
/// function, have consistent parent and children links, and span exactly the
/// blocks reachable from the entry. Dominance itself is not re-verified.
///
/// # Errors
///
/// - [`Error::RootMismatch`] if the root is not the function entry
/// - [`Error::UnknownBlock`] if the tree names a block the function lacks
/// - [`Error::InvalidDominatorTree`] for inconsistent links, repeated nodes, or
///   a tree that does not match the reachable part of the CFG
pub fn validate_tree<T>(function: &Function, tree: &T) -> Result<()>
where
    T: DominatorTreeView + ?Sized,
{
    let entry = function.entry();
    let root = tree.root();
    if root != entry {
        return Err(Error::RootMismatch {
            expected: entry,
            found: root,
        });
    }
    if tree.parent(root).is_some() {
        return Err(Error::InvalidDominatorTree(format!(
            "root {root} has a parent"
        )));
    }

    let block_count = function.block_count();
    let mut seen = vec![false; block_count];
    seen[root.index()] = true;

    let mut worklist = vec![root];
    while let Some(node) = worklist.pop() {
        for &child in tree.children(node) {
            if child.index() >= block_count {
                return Err(Error::UnknownBlock(child));
            }
            if child == node || tree.parent(child) != Some(node) {
                return Err(Error::InvalidDominatorTree(format!(
                    "{child} is listed under {node} but its parent is {:?}",
                    tree.parent(child)
                )));
            }
            if std::mem::replace(&mut seen[child.index()], true) {
                return Err(Error::InvalidDominatorTree(format!(
                    "{child} appears more than once"
                )));
            }
            worklist.push(child);
        }
    }

    let reachable = function.reachable_blocks();
    let mut in_cfg = vec![false; block_count];
    for &block in &reachable {
        in_cfg[block.index()] = true;
        if !seen[block.index()] {
            return Err(Error::InvalidDominatorTree(format!(
                "{block} is reachable from the entry but missing from the tree"
            )));
        }
    }
    if let Some(index) = (0..block_count).find(|&i| seen[i] && !in_cfg[i]) {
        return Err(Error::InvalidDominatorTree(format!(
            "{} is in the tree but unreachable from the entry",
            NodeId::new(index)
        )));
    }

    Ok(())
}

/// Runs [`validate_tree`], logging the failure before returning it.
pub(crate) fn check_tree<T>(function: &Function, tree: &T) -> Result<()>
where
    T: DominatorTreeView + ?Sized,
{
    if let Err(error) = validate_tree(function, tree) {
        warn!(function = function.name(), %error, "rejecting dominator tree");
        return Err(error);
    }
    Ok(())
}
