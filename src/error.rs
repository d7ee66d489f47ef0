use thiserror::Error;

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
/// This enum covers all possible error conditions that can occur while building, traversing,
/// validating, and sanitizing mapping trees. Each variant provides specific context about
/// the failure mode to enable appropriate error handling.
///
/// # Error Categories
///
/// ## Malformed Input
/// - [`Error::Malformed`] - Unparseable descriptor or otherwise invalid input data
/// - [`Error::DuplicateKey`] - Duplicate-key insertion into a mapping container
///
/// ## Engine Defects
/// - [`Error::RemovedNode`] - A node staged for removal was acted on again in the same pass
/// - [`Error::InvalidAction`] - A sanitizer returned an action its node category cannot carry
///
/// Missing structural metadata is deliberately *not* an error anywhere in this crate; every
/// component degrades to an explicit "structure unknown" behavior instead.
///
/// # Examples
///
/// ```rust
/// use mapscope::{descriptor::{ParameterIndexer, Staticness}, Error};
///
/// let mut indexer = ParameterIndexer::new();
/// match indexer.indexes("(I", Staticness::Static) {
///     Err(Error::Malformed { message, .. }) => eprintln!("bad descriptor: {}", message),
///     _ => unreachable!("descriptor has no closing parenthesis"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The input data is damaged and could not be parsed.
    ///
    /// This error indicates that a descriptor or another piece of input data does not
    /// conform to the expected format. The error includes the source location where the
    /// malformation was detected for debugging purposes.
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

    /// An insertion would have overwritten an existing entry.
    ///
    /// Identifying keys are unique within their container: package and class names
    /// within a tree, field names and method name+descriptor pairs within a class,
    /// slot indices within a method. Inserting a duplicate is never silently dropped.
    ///
    /// The associated value is the offending key, rendered as a qualified path.
    #[error("Duplicate key insertion - {0}")]
    DuplicateKey(String),

    /// A node that was already staged for removal in the current pass was acted on again.
    ///
    /// This indicates an engine defect (or a sanitizer returning two actions for the
    /// same node) and must not be suppressed.
    #[error("Node was already removed in this pass - {0}")]
    RemovedNode(String),

    /// A sanitizer returned an action that is not valid for the visited node category.
    ///
    /// For example, `Rekey` applies to methods only; returning it from a package hook
    /// is a defect in the sanitizer, not in the input data.
    #[error("Action '{action}' is not valid for node - {node}")]
    InvalidAction {
        /// Name of the offending action variant
        action: &'static str,
        /// Qualified path of the node the action was returned for
        node: String,
    },
}
