use crate::tree::ParameterMapping;

/// Verdict a [`crate::sanitize::Sanitizer`] returns for a package, class, field or
/// method node.
///
/// `Adopt` and `Rekey` are valid for methods only; the engine rejects them anywhere
/// else with [`crate::Error::InvalidAction`]. All removals are staged and applied
/// once the whole sibling group has been offered, so a pass observes a stable set
/// of siblings regardless of what it decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the node untouched and descend into its children.
    Keep,
    /// Leave the node untouched but do not descend into its children.
    Skip,
    /// Replace the node's documentation in place.
    Edit {
        /// New documentation lines (may be empty to strip docs).
        docs: Vec<String>,
        /// When true, do not descend into the node's children afterwards.
        skip: bool,
    },
    /// Replace a method's documentation and entire parameter set in one step.
    ///
    /// The engine does not descend into the freshly written parameters.
    Adopt {
        /// New documentation lines.
        docs: Vec<String>,
        /// Replacement parameter set, keyed by each mapping's slot index.
        params: Vec<ParameterMapping>,
    },
    /// Re-home a method under a new name+descriptor key within the same class.
    ///
    /// Applied with the sibling batch; a collision with an existing key fails the
    /// run with [`crate::Error::DuplicateKey`].
    Rekey {
        /// New official method name.
        name: String,
        /// New method descriptor.
        descriptor: String,
    },
    /// Delete the node (staged until the sibling group completes).
    Remove,
}

impl Action {
    /// Variant name used in [`crate::Error::InvalidAction`] diagnostics.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Action::Keep => "Keep",
            Action::Skip => "Skip",
            Action::Edit { .. } => "Edit",
            Action::Adopt { .. } => "Adopt",
            Action::Rekey { .. } => "Rekey",
            Action::Remove => "Remove",
        }
    }
}

/// Verdict a sanitizer returns for a single parameter slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamAction {
    /// Leave the slot untouched.
    Keep,
    /// Replace the slot's name and documentation.
    Edit {
        /// New parameter name, or `None` to clear it.
        name: Option<String>,
        /// New single-line documentation, or `None` to clear it.
        doc: Option<String>,
    },
    /// Delete the slot (staged until all of the method's slots have been offered).
    Remove,
}
