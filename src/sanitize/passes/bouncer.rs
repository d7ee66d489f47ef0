use std::collections::{HashMap, HashSet};

use crate::sanitize::{Action, Sanitizer};
use crate::structure::{MemberRef, MethodStructure};
use crate::traverse::VisitKinds;
use crate::tree::{ClassMapping, MethodMapping, ParameterMapping};
use crate::Result;

/// Moves annotations off compiler-generated bouncer methods and onto the real
/// members they delegate to, then deletes or re-homes the bouncers.
///
/// A bouncer is a method whose structural metadata names a `bouncer_target`, the
/// member it trivially forwards to. Annotators sometimes attach docs and
/// parameter names to the bouncer because that is the symbol they saw; this
/// sanitizer rescues those annotations before synthetic stripping or empty-leaf
/// pruning can discard them. It works in phases, one tree pass each:
///
/// 1. **Collect**: record every annotated bouncer, keyed by its target reference.
/// 2. **Apply**: when a method's own reference matches a recorded target, copy
///    the bouncer's docs (if the target has none) and parameters (if the target
///    has none and the bouncer has some) onto it, and mark the bouncer consumed.
/// 3. **Replace and delete**: delete consumed bouncers; a bouncer whose target
///    has no mapping node at all is instead rekeyed to the target's
///    name+descriptor so its annotations survive under the real member's key.
/// 4. **End**: clear the scratch state and decline the pass.
///
/// Without a structural oracle there is no way to recognize a bouncer, so every
/// pass is declined.
#[derive(Debug, Default)]
pub struct BouncerMover {
    phase: Phase,
    /// Recorded bouncers, keyed by the target they forward to.
    targets: HashMap<MemberRef, Recorded>,
    /// Bouncers whose annotations were copied onto a real target.
    consumed: HashSet<MemberRef>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Phase {
    #[default]
    Collect,
    Apply,
    ReplaceAndDelete,
    End,
}

#[derive(Debug)]
struct Recorded {
    bouncer: MemberRef,
    docs: Vec<String>,
    params: Vec<ParameterMapping>,
}

impl BouncerMover {
    /// Creates a mover at the start of its phase cycle.
    pub fn new() -> Self {
        Self::default()
    }

    fn own_ref(class: &ClassMapping, method: &MethodMapping) -> MemberRef {
        MemberRef::new(
            class.name.clone(),
            method.name.clone(),
            method.descriptor.clone(),
        )
    }
}

impl Sanitizer for BouncerMover {
    fn name(&self) -> &'static str {
        "bouncer-mover"
    }

    fn kinds(&self) -> VisitKinds {
        VisitKinds::CLASSES | VisitKinds::METHODS
    }

    fn begin_pass(&mut self, has_structure: bool) -> bool {
        if !has_structure {
            return false;
        }
        if self.phase == Phase::End {
            self.targets.clear();
            self.consumed.clear();
            self.phase = Phase::Collect;
            return false;
        }
        true
    }

    fn end_pass(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Collect => Phase::Apply,
            Phase::Apply => Phase::ReplaceAndDelete,
            Phase::ReplaceAndDelete => Phase::End,
            Phase::End => Phase::End,
        };
        true
    }

    fn method(
        &mut self,
        class: &ClassMapping,
        method: &MethodMapping,
        structure: Option<&MethodStructure>,
    ) -> Result<Action> {
        match self.phase {
            Phase::Collect => {
                if let Some(target) = structure.and_then(|m| m.bouncer_target.as_ref()) {
                    self.targets.insert(
                        target.clone(),
                        Recorded {
                            bouncer: Self::own_ref(class, method),
                            docs: method.docs.clone(),
                            params: method.params().cloned().collect(),
                        },
                    );
                }
                Ok(Action::Keep)
            }
            Phase::Apply => {
                let own = Self::own_ref(class, method);
                match self.targets.remove(&own) {
                    Some(recorded) => {
                        self.consumed.insert(recorded.bouncer);
                        let docs = if method.docs.is_empty() {
                            recorded.docs
                        } else {
                            method.docs.clone()
                        };
                        let params = if method.params().next().is_none() {
                            recorded.params
                        } else {
                            method.params().cloned().collect()
                        };
                        Ok(Action::Adopt { docs, params })
                    }
                    None => Ok(Action::Keep),
                }
            }
            Phase::ReplaceAndDelete => {
                let Some(target) = structure.and_then(|m| m.bouncer_target.as_ref()) else {
                    return Ok(Action::Keep);
                };
                let own = Self::own_ref(class, method);
                if self.consumed.remove(&own) {
                    return Ok(Action::Remove);
                }
                if target.owner == class.name && self.targets.remove(target).is_some() {
                    // Target has no mapping node of its own: re-home the
                    // annotations under the real member's key.
                    return Ok(Action::Rekey {
                        name: target.name.clone(),
                        descriptor: target.descriptor.clone(),
                    });
                }
                Ok(Action::Keep)
            }
            // begin_pass declines End before the tree is walked.
            Phase::End => Ok(Action::Keep),
        }
    }
}
