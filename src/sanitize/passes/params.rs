use crate::descriptor::{ParameterIndexer, Staticness};
use crate::sanitize::{ParamAction, Sanitizer};
use crate::structure::MethodStructure;
use crate::traverse::VisitKinds;
use crate::tree::{MethodMapping, ParameterMapping};
use crate::Result;

/// Drops parameter mappings that cannot correspond to a real parameter slot,
/// along with slots that carry no annotation at all.
///
/// The set of legal slots is computed from the method's descriptor via
/// [`ParameterIndexer`]; when the structural oracle does not know the method its
/// staticness is [`Staticness::Unknown`] and the union of both interpretations
/// is accepted. Completely empty slots are removed regardless of validity so
/// they cannot keep an otherwise dead method alive.
#[derive(Debug, Default)]
pub struct InvalidParameterRemover {
    indexer: ParameterIndexer,
}

impl InvalidParameterRemover {
    /// Creates a remover with an empty descriptor cache.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Sanitizer for InvalidParameterRemover {
    fn name(&self) -> &'static str {
        "invalid-parameter-remover"
    }

    fn kinds(&self) -> VisitKinds {
        VisitKinds::CLASSES | VisitKinds::METHODS | VisitKinds::PARAMETERS
    }

    fn parameter(
        &mut self,
        method: &MethodMapping,
        param: &ParameterMapping,
        structure: Option<&MethodStructure>,
    ) -> Result<ParamAction> {
        if param.is_empty() {
            return Ok(ParamAction::Remove);
        }
        let staticness = match structure {
            Some(s) if s.is_static() => Staticness::Static,
            Some(_) => Staticness::Instance,
            None => Staticness::Unknown,
        };
        let valid = self.indexer.indexes(&method.descriptor, staticness)?;
        if valid.contains(&param.index) {
            Ok(ParamAction::Keep)
        } else {
            Ok(ParamAction::Remove)
        }
    }
}
