use crate::sanitize::{Action, ParamAction};
use crate::structure::{ClassStructure, FieldStructure, MethodStructure};
use crate::traverse::VisitKinds;
use crate::tree::{ClassMapping, FieldMapping, MethodMapping, PackageMapping, ParameterMapping};
use crate::Result;

/// A single cleanup rule driven over the mapping tree by
/// [`crate::sanitize::SanitizeEngine`].
///
/// The engine walks the tree once per pass, offering each node of the kinds named
/// by [`Sanitizer::kinds`] together with its structural metadata where the oracle
/// has a matching entry. Hooks return an [`Action`] (or [`ParamAction`] for slots)
/// describing what to do with the node; every hook defaults to keeping the node, so
/// implementations only override what they care about.
///
/// Multi-pass rules communicate through [`Sanitizer::begin_pass`] and
/// [`Sanitizer::end_pass`]: returning `true` from `end_pass` asks the engine to walk
/// the tree again with the same sanitizer, subject to the engine's revisit budget.
pub trait Sanitizer {
    /// Stable name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Which node kinds this sanitizer wants to be offered.
    fn kinds(&self) -> VisitKinds;

    /// Called before each pass over the tree.
    ///
    /// `has_structure` reports whether a structural oracle is available for this
    /// run. Returning `false` declines the pass; the engine then moves on to the
    /// next sanitizer without walking the tree.
    fn begin_pass(&mut self, has_structure: bool) -> bool {
        let _ = has_structure;
        true
    }

    /// Called after each completed pass. Returning `true` requests a revisit.
    fn end_pass(&mut self) -> bool {
        false
    }

    /// Offers a package node.
    fn package(&mut self, package: &PackageMapping) -> Result<Action> {
        let _ = package;
        Ok(Action::Keep)
    }

    /// Offers a class node, with its structural entry when the oracle knows it.
    fn class(
        &mut self,
        class: &ClassMapping,
        structure: Option<&ClassStructure>,
    ) -> Result<Action> {
        let _ = (class, structure);
        Ok(Action::Keep)
    }

    /// Offers a field node.
    fn field(
        &mut self,
        class: &ClassMapping,
        field: &FieldMapping,
        structure: Option<&FieldStructure>,
    ) -> Result<Action> {
        let _ = (class, field, structure);
        Ok(Action::Keep)
    }

    /// Offers a method node.
    fn method(
        &mut self,
        class: &ClassMapping,
        method: &MethodMapping,
        structure: Option<&MethodStructure>,
    ) -> Result<Action> {
        let _ = (class, method, structure);
        Ok(Action::Keep)
    }

    /// Offers a parameter slot of the enclosing method.
    fn parameter(
        &mut self,
        method: &MethodMapping,
        param: &ParameterMapping,
        structure: Option<&MethodStructure>,
    ) -> Result<ParamAction> {
        let _ = (method, param, structure);
        Ok(ParamAction::Keep)
    }
}
