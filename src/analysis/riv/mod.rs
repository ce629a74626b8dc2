//! Reachable Integer Values (RIV) analysis.
//!
//! For every basic block, the analysis computes the set of tracked values that
//! are guaranteed to be available whenever control reaches the block: the
//! tracked globals and parameters, plus every tracked instruction result
//! defined in a block that dominates it.
//!
//! # Architecture
//!
//! The analysis is a three stage pipeline:
//!
//! - [`collect_definitions`] - per-block sets of locally defined values
//! - [`propagate`] - one walk down the dominator tree, seeded by [`entry_seed`]
//! - [`ReachableSet`] - the immutable per-block result
//!
//! [`RivAnalysis`] ties the stages together for one function or a whole
//! module, and [`RivReport`] renders a result as text.
//!
//! # Dominance, not paths
//!
//! In a diamond `entry -> (left | right) -> join`, a value defined in `left`
//! is *not* reachable in `join`: `left` does not dominate `join`, so some path
//! to `join` skips the definition. Only values from `entry` (the immediate
//! dominator of `join`) and above reach it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rivscope::prelude::*;
//!
//! let analysis = RivAnalysis::new(&module, RivConfig::default());
//! let result = analysis.run(function_id)?;
//!
//! match result.lookup(block) {
//!     Ok(values) => println!("{} values reach {block}", values.len()),
//!     Err(Error::Unreached(_)) => println!("{block} is dead code"),
//!     Err(e) => return Err(e),
//! }
//! # Ok::<(), rivscope::Error>(())
//! ```

mod collector;
mod engine;
mod report;
mod result;

pub use collector::{collect_definitions, DefinitionSet};
pub use engine::{entry_seed, propagate, validate_tree, DominatorTreeView, ParentTree};
pub use report::RivReport;
pub use result::{ReachableSet, ValueSet};

use rayon::prelude::*;
use tracing::{debug, debug_span};

use crate::{
    analysis::RivConfig,
    ir::{Function, FunctionId, Module},
    Result,
};

/// Driver running the analysis over the functions of one module.
///
/// The driver holds no mutable state: every run builds fresh definition and
/// result sets, so runs for different functions are independent and may
/// proceed in parallel.
#[derive(Debug, Clone, Copy)]
pub struct RivAnalysis<'m> {
    module: &'m Module,
    config: RivConfig,
}

impl<'m> RivAnalysis<'m> {
    /// Creates a driver for `module`.
    #[must_use]
    pub fn new(module: &'m Module, config: RivConfig) -> Self {
        Self { module, config }
    }

    /// Returns the analysed module.
    #[must_use]
    pub fn module(&self) -> &'m Module {
        self.module
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &RivConfig {
        &self.config
    }

    /// Analyses one function using its own (cached) dominator tree.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFunction`](crate::Error::UnknownFunction) if the
    /// module has no such function.
    pub fn run(&self, function: FunctionId) -> Result<ReachableSet> {
        let func = self.module.func(function)?;
        self.analyze(func, func.dominators())
    }

    /// Analyses one function using a dominator tree supplied by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFunction`](crate::Error::UnknownFunction) for an
    /// unknown function, and any [`validate_tree`] error when validation is
    /// enabled.
    pub fn run_with_tree<T>(&self, function: FunctionId, tree: &T) -> Result<ReachableSet>
    where
        T: DominatorTreeView + ?Sized,
    {
        let func = self.module.func(function)?;
        self.analyze(func, tree)
    }

    /// Analyses every function of the module, in definition order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn run_module(&self) -> Result<Vec<(FunctionId, ReachableSet)>> {
        self.module
            .functions()
            .iter()
            .map(|func| Ok((func.id(), self.analyze(func, func.dominators())?)))
            .collect()
    }

    /// Analyses every function of the module in parallel.
    ///
    /// Results are returned in definition order and are identical to those of
    /// [`RivAnalysis::run_module`].
    ///
    /// # Errors
    ///
    /// Returns an error if any function fails.
    pub fn run_module_parallel(&self) -> Result<Vec<(FunctionId, ReachableSet)>> {
        self.module
            .functions()
            .par_iter()
            .map(|func| Ok((func.id(), self.analyze(func, func.dominators())?)))
            .collect()
    }

    /// Returns a printable report for a result of this driver.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFunction`](crate::Error::UnknownFunction) if the
    /// module has no such function.
    pub fn report<'a>(&'a self, function: FunctionId, result: &'a ReachableSet) -> Result<RivReport<'a>> {
        let func = self.module.func(function)?;
        Ok(RivReport::new(self.module, func, result))
    }

    fn analyze<T>(&self, func: &Function, tree: &T) -> Result<ReachableSet>
    where
        T: DominatorTreeView + ?Sized,
    {
        let _span = debug_span!("riv", function = func.name()).entered();

        if self.config.validate_tree {
            engine::check_tree(func, tree)?;
        }

        let defs = collect_definitions(self.module, func, self.config.tracked);
        let seed = entry_seed(self.module, func, &self.config);
        debug!(
            blocks = func.block_count(),
            definitions = defs.total(),
            seed = seed.len(),
            "seeded entry block"
        );

        let result = propagate(&defs, tree, seed, self.config.order);
        for (block, values) in result.iter() {
            debug!(%block, values = values.len(), "resolved block");
        }
        debug!(
            reached = result.len(),
            unreached = func.block_count().saturating_sub(result.len()),
            "propagation complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ir::{IrType, Opcode, Operand},
        utils::graph::NodeId,
        Error,
    };

    fn chain_module() -> (Module, FunctionId) {
        let mut module = Module::new("m");
        module.add_global("g", IrType::I32, Some(7));
        let mut fb = module.function("chain", &[("a", IrType::I32)]);
        let a = fb.param(0).unwrap();
        let b0 = fb.block("b0");
        let b1 = fb.block("b1");
        fb.binary(b0, "x", Opcode::Add, IrType::I32, Operand::Value(a), Operand::Imm(1))
            .unwrap();
        fb.br(b0, b1).unwrap();
        fb.ret(b1, None).unwrap();
        let id = fb.finish().unwrap();
        (module, id)
    }

    #[test]
    fn test_run_matches_run_with_tree() {
        let (module, id) = chain_module();
        let analysis = RivAnalysis::new(&module, RivConfig::default());

        let cached = analysis.run(id).unwrap();
        let tree = ParentTree::from_dominators(module.func(id).unwrap().dominators());
        let injected = analysis.run_with_tree(id, &tree).unwrap();

        assert!(cached.same_content(&injected));
        assert_eq!(cached.len(), 2);
    }

    #[test]
    fn test_run_unknown_function() {
        let (module, _) = chain_module();
        let analysis = RivAnalysis::new(&module, RivConfig::default());
        assert!(matches!(
            analysis.run(FunctionId::new(3)),
            Err(Error::UnknownFunction(3))
        ));
    }

    #[test]
    fn test_run_with_bad_tree() {
        let (module, id) = chain_module();
        let bad = ParentTree::new(NodeId::new(1));

        let checked = RivAnalysis::new(&module, RivConfig::default());
        assert!(matches!(
            checked.run_with_tree(id, &bad),
            Err(Error::RootMismatch { .. })
        ));

        // Without validation the engine just walks what it is given
        let unchecked = RivAnalysis::new(&module, RivConfig::unchecked());
        let result = unchecked.run_with_tree(id, &bad).unwrap();
        assert_eq!(result.blocks(), &[NodeId::new(1)]);
    }

    #[test]
    fn test_module_runs_agree() {
        let (mut module, _) = chain_module();
        for name in ["second", "third"] {
            let mut fb = module.function(name, &[("n", IrType::I64)]);
            let entry = fb.block("entry");
            fb.ret(entry, None).unwrap();
            fb.finish().unwrap();
        }

        let analysis = RivAnalysis::new(&module, RivConfig::default());
        let sequential = analysis.run_module().unwrap();
        let parallel = analysis.run_module_parallel().unwrap();

        assert_eq!(sequential.len(), 3);
        assert_eq!(parallel.len(), 3);
        for ((id_s, res_s), (id_p, res_p)) in sequential.iter().zip(&parallel) {
            assert_eq!(id_s, id_p);
            assert!(res_s.same_content(res_p));
        }
    }

    #[test]
    fn test_report_through_driver() {
        let (module, id) = chain_module();
        let analysis = RivAnalysis::new(&module, RivConfig::default());
        let result = analysis.run(id).unwrap();

        let text = analysis.report(id, &result).unwrap().to_string();
        assert!(text.contains("BB %b1"));
        assert!(text.contains("@g = global i32 7"));
        assert!(text.contains("%x = add i32 %a, 1"));
    }
}
