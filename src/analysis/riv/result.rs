//! Value sets and the per-block analysis result.

use std::fmt;

use crate::{ir::ValueId, utils::graph::NodeId, utils::BitSet, Error, Result};

/// A set of values, stored as a bit set over the module's value arena.
///
/// Every set produced for one module shares the same universe (the module's
/// value count), which keeps union and superset checks to a handful of word
/// operations.
#[derive(Clone, PartialEq, Eq)]
pub struct ValueSet {
    bits: BitSet,
}

impl ValueSet {
    /// Creates an empty set able to hold values with an index below `universe`.
    #[must_use]
    pub fn new(universe: usize) -> Self {
        Self {
            bits: BitSet::new(universe),
        }
    }

    /// Returns the size of the universe this set is drawn from.
    #[must_use]
    pub const fn universe(&self) -> usize {
        self.bits.len()
    }

    /// Adds a value, returning `true` if it was not yet present.
    ///
    /// # Panics
    ///
    /// Panics if the value lies outside the universe.
    pub fn insert(&mut self, value: ValueId) -> bool {
        self.bits.insert(value.index())
    }

    /// Returns `true` if the value is a member.
    #[must_use]
    pub fn contains(&self, value: ValueId) -> bool {
        self.bits.contains(value.index())
    }

    /// Adds every member of `other`, returning `true` if this set grew.
    ///
    /// # Panics
    ///
    /// Panics if the two sets have different universes.
    pub fn union_with(&mut self, other: &ValueSet) -> bool {
        self.bits.union_with(&other.bits)
    }

    /// Returns `true` if every member of `other` is also a member of this set.
    #[must_use]
    pub fn is_superset(&self, other: &ValueSet) -> bool {
        self.bits.is_superset(&other.bits)
    }

    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.count()
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the members in ascending handle order.
    pub fn iter(&self) -> impl Iterator<Item = ValueId> + '_ {
        self.bits.iter().map(ValueId::new)
    }
}

impl fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// The analysis result: the set of reachable values for every block the
/// dominator tree walk reached.
///
/// Blocks the walk never reached (dead code, or blocks missing from an injected
/// tree) have no entry at all. They are reported as [`Error::Unreached`] by
/// [`ReachableSet::lookup`] and as `None` by [`ReachableSet::get`], never as an
/// empty set.
///
/// The container is immutable once the analysis returns.
#[derive(Debug, Clone, Default)]
pub struct ReachableSet {
    /// Per-block sets, indexed by block
    sets: Vec<Option<ValueSet>>,
    /// Blocks in the order the walk visited them
    order: Vec<NodeId>,
    /// Visited flags, indexed by block
    visited: Vec<bool>,
}

impl ReachableSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the set of `block`, creating an empty one if needed.
    pub(crate) fn entry(&mut self, block: NodeId, universe: usize) -> &mut ValueSet {
        let index = block.index();
        if index >= self.sets.len() {
            self.sets.resize(index + 1, None);
        }
        self.sets[index].get_or_insert_with(|| ValueSet::new(universe))
    }

    /// Records that `block` has been visited; returns `false` if it already was.
    pub(crate) fn mark_visited(&mut self, block: NodeId) -> bool {
        let index = block.index();
        if index >= self.visited.len() {
            self.visited.resize(index + 1, false);
        }
        if std::mem::replace(&mut self.visited[index], true) {
            return false;
        }
        self.order.push(block);
        true
    }

    /// Returns the reachable values of `block`, or `None` if it was not reached.
    #[must_use]
    pub fn get(&self, block: NodeId) -> Option<&ValueSet> {
        self.sets.get(block.index()).and_then(Option::as_ref)
    }

    /// Returns the reachable values of `block`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unreached`] if the analysis never reached `block`.
    pub fn lookup(&self, block: NodeId) -> Result<&ValueSet> {
        self.get(block).ok_or(Error::Unreached(block))
    }

    /// Returns `true` if the analysis reached `block`.
    #[must_use]
    pub fn is_reached(&self, block: NodeId) -> bool {
        self.get(block).is_some()
    }

    /// Returns `true` if `value` is reachable in `block`.
    ///
    /// Unreached blocks contain nothing.
    #[must_use]
    pub fn contains(&self, block: NodeId, value: ValueId) -> bool {
        self.get(block).is_some_and(|set| set.contains(value))
    }

    /// Iterates over reached blocks and their sets, in visitation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ValueSet)> + '_ {
        self.order
            .iter()
            .filter_map(|&block| self.get(block).map(|set| (block, set)))
    }

    /// Returns the reached blocks in visitation order.
    #[must_use]
    pub fn blocks(&self) -> &[NodeId] {
        &self.order
    }

    /// Returns the number of reached blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no block was reached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if both results reach the same blocks with the same sets,
    /// regardless of visitation order.
    #[must_use]
    pub fn same_content(&self, other: &ReachableSet) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(block, set)| other.get(block) == Some(set))
    }
}
