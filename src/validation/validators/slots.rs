use crate::{
    descriptor::{ParameterIndexer, Staticness},
    structure::MethodStructure,
    traverse::VisitKinds,
    tree::{ClassMapping, MethodMapping, ParameterMapping},
    validation::{engine::Validator, issues::IssueSink},
    Result,
};

/// Flags parameter entries sitting on slots their method's descriptor cannot assign.
///
/// With structure available the check uses the method's real staticness. Without it
/// the indexer unions both assumptions, so only slots impossible either way are
/// flagged; a missing oracle never produces false positives.
#[derive(Debug, Default)]
pub struct ParameterSlotValidator {
    indexer: ParameterIndexer,
}

impl ParameterSlotValidator {
    /// Creates the validator with a fresh memo table.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Validator for ParameterSlotValidator {
    fn name(&self) -> &'static str {
        "parameter-slots"
    }

    fn kinds(&self) -> VisitKinds {
        VisitKinds::CLASSES | VisitKinds::METHODS | VisitKinds::PARAMETERS
    }

    fn check_parameter(
        &mut self,
        _class: &ClassMapping,
        method: &MethodMapping,
        param: &ParameterMapping,
        structure: Option<&MethodStructure>,
        issues: &mut IssueSink<'_>,
    ) -> Result<()> {
        let staticness = match structure {
            Some(m) if m.is_static() => Staticness::Static,
            Some(_) => Staticness::Instance,
            None => Staticness::Unknown,
        };

        let valid = self.indexer.indexes(&method.descriptor, staticness)?;
        if !valid.contains(&param.index) {
            issues.error(format!(
                "slot {} cannot exist for descriptor {} ({} method)",
                param.index,
                method.descriptor,
                staticness.to_string().to_lowercase()
            ));
        }
        Ok(())
    }
}
