use thiserror::Error;

use crate::{ir::ValueId, utils::graph::NodeId};

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The analysis core itself cannot fail: once a function and its dominator tree have been
/// accepted, propagation always runs to completion. Every variant below is raised at the
/// boundary, either while constructing IR through the builder, while validating an injected
/// dominator tree against its function, or when a caller asks for the result of a block the
/// analysis never reached.
///
/// # Error Categories
///
/// ## IR Construction Errors
/// - [`Error::Empty`] - A function was finished without any basic blocks
/// - [`Error::Malformed`] - Structurally invalid IR (e.g. unterminated block)
/// - [`Error::UnknownBlock`] - A block handle that does not exist in the function
/// - [`Error::UnknownValue`] - A value handle that does not exist in the module
/// - [`Error::UnknownFunction`] - A function index that does not exist in the module
/// - [`Error::GraphError`] - Low-level graph construction failure
///
/// ## Dominator Tree Validation Errors
/// - [`Error::RootMismatch`] - The tree is not rooted at the function entry
/// - [`Error::InvalidDominatorTree`] - The tree does not span the reachable blocks
///
/// ## Query Errors
/// - [`Error::Unreached`] - The block is not covered by the analysis result
///
/// # Examples
///
/// ```rust,ignore
/// use rivscope::{analysis::RivAnalysis, Error};
///
/// match result.lookup(block) {
///     Ok(values) => println!("{} values reach {}", values.len(), block),
///     Err(Error::Unreached(block)) => println!("{block} is dead code"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The IR is damaged and could not be accepted.
    ///
    /// The error includes the source location where the malformation was detected
    /// for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Provided input was empty.
    ///
    /// Raised when a function is finished without a single basic block; such a
    /// function has no entry block to seed.
    #[error("Provided input was empty")]
    Empty,

    /// The block does not exist in the function.
    #[error("Block {0} does not exist in the function")]
    UnknownBlock(NodeId),

    /// The value does not exist in the module.
    #[error("Value {0} does not exist in the module")]
    UnknownValue(ValueId),

    /// The function does not exist in the module.
    #[error("Function #{0} does not exist in the module")]
    UnknownFunction(usize),

    /// The dominator tree is not rooted at the function's entry block.
    ///
    /// Propagation seeds the tree root with parameters and globals, so a tree
    /// rooted anywhere else would attribute the entry seed to the wrong block.
    #[error("Dominator tree is rooted at {found}, but the function entry is {expected}")]
    RootMismatch {
        /// The entry block of the function
        expected: NodeId,
        /// The root reported by the dominator tree
        found: NodeId,
    },

    /// The dominator tree is inconsistent with the function it was supplied for.
    #[error("Invalid dominator tree - {0}")]
    InvalidDominatorTree(String),

    /// The block was never reached by the analysis.
    ///
    /// This is distinct from a block whose reachable set is empty: an unreached
    /// block is dead code that the dominator tree does not span, and no result
    /// exists for it.
    #[error("Block {0} was not reached by the analysis")]
    Unreached(NodeId),

    /// Graph construction error.
    ///
    /// Errors raised by [`crate::utils::graph::DirectedGraph`] when edges refer
    /// to nodes that do not exist.
    #[error("{0}")]
    GraphError(String),
}
