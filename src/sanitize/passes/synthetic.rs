use crate::sanitize::{Action, Sanitizer};
use crate::structure::{ClassAccessFlags, ClassStructure, FieldAccessFlags, FieldStructure, MethodStructure};
use crate::traverse::VisitKinds;
use crate::tree::{ClassMapping, FieldMapping, MethodMapping};
use crate::Result;

/// Removes mapping nodes for compiler-generated members that annotators should
/// never name.
///
/// A class, field or method whose structural metadata carries the `SYNTHETIC`
/// (or, for methods, `BRIDGE`) flag is deleted from the tree, with two method
/// exceptions: lambda bodies keep their mappings because their parameter names
/// are genuinely human-meaningful, and bouncers are left for [`super::BouncerMover`]
/// to handle. Without a structural oracle the pass declines entirely, and nodes
/// the oracle does not cover are kept untouched; absence of evidence is not
/// treated as synthetic.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntheticStripper;

impl Sanitizer for SyntheticStripper {
    fn name(&self) -> &'static str {
        "synthetic-stripper"
    }

    fn kinds(&self) -> VisitKinds {
        VisitKinds::CLASSES | VisitKinds::FIELDS | VisitKinds::METHODS
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
            Some(s) if s.access.contains(ClassAccessFlags::SYNTHETIC) => {
                Ok(Action::Remove)
            }
            _ => Ok(Action::Keep),
        }
    }

    fn field(
        &mut self,
        _class: &ClassMapping,
        _field: &FieldMapping,
        structure: Option<&FieldStructure>,
    ) -> Result<Action> {
        match structure {
            Some(s) if s.access.contains(FieldAccessFlags::SYNTHETIC) => {
                Ok(Action::Remove)
            }
            _ => Ok(Action::Keep),
        }
    }

    fn method(
        &mut self,
        _class: &ClassMapping,
        _method: &MethodMapping,
        structure: Option<&MethodStructure>,
    ) -> Result<Action> {
        match structure {
            Some(s) if s.is_synthetic() && !s.is_lambda && s.bouncer_target.is_none() => {
                Ok(Action::Remove)
            }
            _ => Ok(Action::Keep),
        }
    }
}
