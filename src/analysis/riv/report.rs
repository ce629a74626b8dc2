//! Textual dump of an analysis result.

use std::fmt;

use crate::{
    analysis::riv::ReachableSet,
    ir::{Function, Module},
};

const BANNER: &str = "=================================================";
const RULE: &str = "-------------------------------------------------";

/// Two-column rendering of a [`ReachableSet`].
///
/// Blocks are listed in visitation order, each followed by its reachable values
/// in ascending handle order:
///
/// ```text
/// =================================================
/// rivscope: RIV analysis results
/// =================================================
/// BB id      Reachable Integer Values
/// -------------------------------------------------
/// BB %entry
///              i32 %a
/// BB %exit
///              i32 %a
///              %x = add i32 %a, 1
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RivReport<'a> {
    module: &'a Module,
    function: &'a Function,
    result: &'a ReachableSet,
}

impl<'a> RivReport<'a> {
    /// Creates a report for `result`, computed on `function` of `module`.
    #[must_use]
    pub fn new(module: &'a Module, function: &'a Function, result: &'a ReachableSet) -> Self {
        Self {
            module,
            function,
            result,
        }
    }
}

impl fmt::Display for RivReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BANNER}")?;
        writeln!(f, "rivscope: RIV analysis results")?;
        writeln!(f, "{BANNER}")?;
        writeln!(f, "{:<10} {}", "BB id", "Reachable Integer Values")?;
        writeln!(f, "{RULE}")?;

        for (block, values) in self.result.iter() {
            writeln!(f, "BB {}", self.module.display_block(self.function.id(), block))?;
            for value in values.iter() {
                writeln!(f, "{:<12} {}", "", self.module.display_value(value))?;
            }
        }
        Ok(())
    }
}
