use std::collections::BTreeSet;

use crate::sanitize::passes::{
    BouncerMover, EnumMachineryRemover, InvalidParameterRemover, SyntheticStripper,
};
use crate::sanitize::{Action, ParamAction, Sanitizer};
use crate::structure::{ClassStructure, JarStructure, MethodStructure, StructureIndex};
use crate::traverse::VisitKinds;
use crate::tree::{ClassMapping, MappingTree, MemberKey, MethodMapping};
use crate::{Error, Result};

/// Default number of times a sanitizer may ask to revisit the tree after its
/// first pass.
pub const DEFAULT_REVISIT_BUDGET: usize = 5;

/// Drives an ordered list of [`Sanitizer`]s over a mapping tree, mutating it in
/// place.
///
/// Each sanitizer runs to completion (all of its passes) before the next one
/// starts. Within a pass the engine offers every node of the kinds the sanitizer
/// asked for, in deterministic tree order, then applies staged removals one
/// sibling group at a time so a sanitizer never observes a half-deleted group.
/// After a class or method has been fully processed the engine prunes it if it
/// carries no annotation worth keeping; methods are pruned before their class is
/// checked, so a class whose last annotation lived on a pruned method disappears
/// in the same pass.
pub struct SanitizeEngine {
    sanitizers: Vec<Box<dyn Sanitizer>>,
    revisit_budget: usize,
}

impl SanitizeEngine {
    /// Creates an engine with no sanitizers registered.
    pub fn new() -> Self {
        Self {
            sanitizers: Vec::new(),
            revisit_budget: DEFAULT_REVISIT_BUDGET,
        }
    }

    /// Creates an engine with the standard cleanup library registered, in its
    /// canonical order: bouncer mover, synthetic stripper, enum machinery
    /// remover, invalid parameter remover.
    ///
    /// The bouncer mover runs first so that annotations rescued from compiler
    /// bridges are in place before the synthetic stripper deletes the bridges'
    /// siblings and before empty-leaf pruning could eat an annotated bouncer.
    pub fn standard() -> Self {
        let mut engine = Self::new();
        engine.register(Box::new(BouncerMover::new()));
        engine.register(Box::new(SyntheticStripper));
        engine.register(Box::new(EnumMachineryRemover));
        engine.register(Box::new(InvalidParameterRemover::new()));
        engine
    }

    /// Overrides the revisit budget, builder style.
    ///
    /// Multi-pass sanitizers carry phase state across the passes of one cycle
    /// and reset it only once the cycle completes. A budget smaller than a
    /// registered sanitizer's cycle (the [`BouncerMover`] asks for three
    /// revisits) truncates that cycle mid-phase, and such an engine must not
    /// be reused for a second [`run`](Self::run).
    #[must_use]
    pub fn with_budget(mut self, revisits: usize) -> Self {
        self.revisit_budget = revisits;
        self
    }

    /// Appends a sanitizer to the run order.
    pub fn register(&mut self, sanitizer: Box<dyn Sanitizer>) {
        self.sanitizers.push(sanitizer);
    }

    /// Runs every registered sanitizer over `tree`.
    ///
    /// A missing `structure` oracle is not an error: structure-dependent
    /// sanitizers decline their passes and the rest degrade to their
    /// metadata-free behavior.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidAction`] if a sanitizer returns a verdict the
    /// node kind does not support, [`Error::DuplicateKey`] if a rekey collides
    /// with an existing method, or any error a sanitizer hook itself raises. The
    /// tree may be partially sanitized when an error is returned.
    pub fn run(&mut self, tree: &mut MappingTree, structure: Option<&JarStructure>) -> Result<()> {
        let index = structure.map(StructureIndex::build);
        for sanitizer in &mut self.sanitizers {
            let mut revisits = 0;
            loop {
                if !sanitizer.begin_pass(index.is_some()) {
                    break;
                }
                run_pass(sanitizer.as_mut(), tree, index.as_ref())?;
                if !sanitizer.end_pass() || revisits >= self.revisit_budget {
                    break;
                }
                revisits += 1;
            }
        }
        Ok(())
    }
}

impl Default for SanitizeEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Removal keys staged while a sibling group is still being offered.
struct Batch<K: Ord>(BTreeSet<K>);

impl<K: Ord> Batch<K> {
    fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Stages a key; false if it was already staged.
    fn stage(&mut self, key: K) -> bool {
        self.0.insert(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.0.contains(key)
    }

    fn drain(self) -> impl Iterator<Item = K> {
        self.0.into_iter()
    }
}

fn run_pass(
    sanitizer: &mut dyn Sanitizer,
    tree: &mut MappingTree,
    index: Option<&StructureIndex<'_>>,
) -> Result<()> {
    let kinds = sanitizer.kinds();

    if kinds.contains(VisitKinds::PACKAGES) {
        let names: Vec<String> = tree.packages().map(|p| p.name.clone()).collect();
        let mut removals = Batch::new();
        for name in &names {
            let action = match tree.package(name) {
                Some(package) => sanitizer.package(package)?,
                None => continue,
            };
            match action {
                Action::Keep | Action::Skip => {}
                Action::Edit { docs, .. } => {
                    if let Some(package) = tree.package_mut(name) {
                        package.docs = docs;
                    }
                }
                Action::Remove => {
                    if !removals.stage(name.clone()) {
                        return Err(Error::RemovedNode(name.clone()));
                    }
                }
                other => {
                    return Err(Error::InvalidAction {
                        action: other.name(),
                        node: name.clone(),
                    })
                }
            }
        }
        for name in removals.drain() {
            tree.remove_package(&name);
        }
    }

    if !kinds.contains(VisitKinds::CLASSES) {
        return Ok(());
    }

    let names: Vec<String> = tree.classes().map(|c| c.name.clone()).collect();
    let mut removals = Batch::new();
    for name in &names {
        let structure = index.and_then(|i| i.class(name));
        let action = match tree.class(name) {
            Some(class) => sanitizer.class(class, structure)?,
            None => continue,
        };

        let mut descend = true;
        match action {
            Action::Keep => {}
            Action::Skip => descend = false,
            Action::Edit { docs, skip } => {
                if let Some(class) = tree.class_mut(name) {
                    class.docs = docs;
                }
                descend = !skip;
            }
            Action::Remove => {
                if !removals.stage(name.clone()) {
                    return Err(Error::RemovedNode(name.clone()));
                }
                descend = false;
            }
            other => {
                return Err(Error::InvalidAction {
                    action: other.name(),
                    node: name.clone(),
                })
            }
        }

        if descend {
            if let Some(class) = tree.class_mut(name) {
                run_members(sanitizer, kinds, class, structure)?;
            }
        }

        if !removals.contains(name) {
            if let Some(class) = tree.class(name) {
                if class.is_empty() && !removals.stage(name.clone()) {
                    return Err(Error::RemovedNode(name.clone()));
                }
            }
        }
    }
    for name in removals.drain() {
        tree.remove_class(&name);
    }
    Ok(())
}

fn run_members(
    sanitizer: &mut dyn Sanitizer,
    kinds: VisitKinds,
    class: &mut ClassMapping,
    structure: Option<&ClassStructure>,
) -> Result<()> {
    if kinds.contains(VisitKinds::FIELDS) {
        let names: Vec<String> = class.fields().map(|f| f.name.clone()).collect();
        let mut removals = Batch::new();
        for name in &names {
            let field_structure = structure.and_then(|c| c.field(name));
            let action = match class.field(name) {
                Some(field) => sanitizer.field(class, field, field_structure)?,
                None => continue,
            };
            match action {
                Action::Keep | Action::Skip => {}
                Action::Edit { docs, .. } => {
                    if let Some(field) = class.field_mut(name) {
                        field.docs = docs;
                    }
                }
                Action::Remove => {
                    if !removals.stage(name.clone()) {
                        return Err(Error::RemovedNode(format!("{}.{}", class.name, name)));
                    }
                }
                other => {
                    return Err(Error::InvalidAction {
                        action: other.name(),
                        node: format!("{}.{}", class.name, name),
                    })
                }
            }
        }
        for name in removals.drain() {
            class.remove_field(&name);
        }
    }

    if !kinds.contains(VisitKinds::METHODS) {
        return Ok(());
    }

    let keys: Vec<MemberKey> = class.methods().map(|m| m.key()).collect();
    let mut removals: Batch<MemberKey> = Batch::new();
    let mut rekeys: Vec<(MemberKey, MemberKey)> = Vec::new();
    for key in &keys {
        let method_structure = structure.and_then(|c| c.method(&key.name, &key.descriptor));
        let action = match class.method(&key.name, &key.descriptor) {
            Some(method) => sanitizer.method(class, method, method_structure)?,
            None => continue,
        };

        let mut descend = true;
        let mut prune_candidate = true;
        match action {
            Action::Keep => {}
            Action::Skip => descend = false,
            Action::Edit { docs, skip } => {
                if let Some(method) = class.method_mut(key) {
                    method.docs = docs;
                }
                descend = !skip;
            }
            Action::Adopt { docs, params } => {
                if let Some(method) = class.method_mut(key) {
                    method.docs = docs;
                    method.set_params(params);
                }
                descend = false;
            }
            Action::Rekey { name, descriptor } => {
                rekeys.push((key.clone(), MemberKey::new(name, descriptor)));
                descend = false;
                prune_candidate = false;
            }
            Action::Remove => {
                if !removals.stage(key.clone()) {
                    return Err(Error::RemovedNode(format!("{}.{}", class.name, key)));
                }
                descend = false;
                prune_candidate = false;
            }
        }

        if descend && kinds.contains(VisitKinds::PARAMETERS) {
            if let Some(method) = class.method_mut(key) {
                run_params(sanitizer, method, method_structure)?;
            }
        }

        if prune_candidate {
            if let Some(method) = class.method(&key.name, &key.descriptor) {
                if method.is_empty() && !removals.stage(key.clone()) {
                    return Err(Error::RemovedNode(format!("{}.{}", class.name, key)));
                }
            }
        }
    }
    for key in removals.drain() {
        class.remove_method(&key);
    }
    for (old, new) in rekeys {
        let Some(mut method) = class.remove_method(&old) else {
            return Err(Error::RemovedNode(format!("{}.{}", class.name, old)));
        };
        method.name = new.name;
        method.descriptor = new.descriptor;
        class.add_method(method)?;
    }
    Ok(())
}

fn run_params(
    sanitizer: &mut dyn Sanitizer,
    method: &mut MethodMapping,
    structure: Option<&MethodStructure>,
) -> Result<()> {
    let indices: Vec<u8> = method.params().map(|p| p.index).collect();
    let mut removals = Batch::new();
    for index in indices {
        let action = match method.param(index) {
            Some(param) => sanitizer.parameter(method, param, structure)?,
            None => continue,
        };
        match action {
            ParamAction::Keep => {}
            ParamAction::Edit { name, doc } => {
                if let Some(param) = method.param_mut(index) {
                    param.name = name;
                    param.doc = doc;
                }
            }
            ParamAction::Remove => {
                if !removals.stage(index) {
                    return Err(Error::RemovedNode(format!(
                        "{}{}[{index}]",
                        method.name, method.descriptor
                    )));
                }
            }
        }
    }
    for index in removals.drain() {
        method.remove_param(index);
    }
    Ok(())
}
