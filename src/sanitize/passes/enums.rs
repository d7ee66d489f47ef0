use crate::sanitize::{Action, ParamAction, Sanitizer};
use crate::structure::{ClassAccessFlags, ClassStructure, FieldStructure, MethodStructure};
use crate::traverse::VisitKinds;
use crate::tree::{ClassMapping, FieldMapping, MethodMapping, ParameterMapping};
use crate::Result;

/// Deletes annotations on the machinery `javac` generates for every enum.
///
/// Inside classes whose structural metadata carries the `ENUM` flag this removes
/// mappings for the `values()` and `valueOf(String)` methods, the `$VALUES` and
/// `ENUM$VALUES` backing fields, and the synthetic leading constructor
/// parameters: every enum constructor receives a name in slot 1 and an ordinal
/// in slot 2 before the declared parameters start. Non-enum classes are skipped
/// entirely, and without a structural oracle the pass is declined.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumMachineryRemover;

const BACKING_FIELDS: [&str; 2] = ["$VALUES", "ENUM$VALUES"];

impl EnumMachineryRemover {
    fn is_machinery_method(method: &MethodMapping) -> bool {
        match method.name.as_str() {
            "values" => method.descriptor.starts_with("()"),
            "valueOf" => method.descriptor.starts_with("(Ljava/lang/String;)"),
            _ => false,
        }
    }
}

impl Sanitizer for EnumMachineryRemover {
    fn name(&self) -> &'static str {
        "enum-machinery-remover"
    }

    fn kinds(&self) -> VisitKinds {
        VisitKinds::CLASSES | VisitKinds::FIELDS | VisitKinds::METHODS | VisitKinds::PARAMETERS
    }

    fn begin_pass(&mut self, has_structure: bool) -> bool {
        has_structure
    }

    fn class(
        &mut self,
        _class: &ClassMapping,
        structure: Option<&ClassStructure>,
    ) -> Result<Action> {
        match structure {
            Some(s) if s.access.contains(ClassAccessFlags::ENUM) => Ok(Action::Keep),
            _ => Ok(Action::Skip),
        }
    }

    fn field(
        &mut self,
        _class: &ClassMapping,
        field: &FieldMapping,
        _structure: Option<&FieldStructure>,
    ) -> Result<Action> {
        if BACKING_FIELDS.contains(&field.name.as_str()) {
            Ok(Action::Remove)
        } else {
            Ok(Action::Keep)
        }
    }

    fn method(
        &mut self,
        _class: &ClassMapping,
        method: &MethodMapping,
        _structure: Option<&MethodStructure>,
    ) -> Result<Action> {
        if Self::is_machinery_method(method) {
            Ok(Action::Remove)
        } else {
            Ok(Action::Keep)
        }
    }

    fn parameter(
        &mut self,
        method: &MethodMapping,
        param: &ParameterMapping,
        _structure: Option<&MethodStructure>,
    ) -> Result<ParamAction> {
        // Constructor slots 1 and 2 hold the implicit name and ordinal.
        if method.name == "<init>" && (param.index == 1 || param.index == 2) {
            Ok(ParamAction::Remove)
        } else {
            Ok(ParamAction::Keep)
        }
    }
}
