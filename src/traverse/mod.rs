//! Generic depth-first traversal over a mapping tree.
//!
//! The traversal engine walks a [`MappingTree`] in tree order, resolving structure
//! data for every class/field/method it passes and handing each node to a pluggable
//! [`TreeVisitor`]. The visitor controls what it sees in two ways:
//!
//! - **Per-category opt-out**: [`TreeVisitor::kinds`] declares which node categories
//!   the visitor wants at all. Categories enclose each other: fields and methods are
//!   reachable only through classes, parameters only through methods. Packages are
//!   independent of classes.
//! - **Subtree pruning**: the class and method hooks return a [`VisitFlow`]; `Prune`
//!   skips that node's members without affecting its siblings.
//!
//! The engine builds a [`StructureIndex`] once per traversal and resolves structure
//! by exact official-name match; a miss is handed to the visitor as `None`, never
//! reported as an error.
//!
//! Traversal is strictly sequential and depth-first. Visitors carry mutable per-run
//! state, so there is no sibling parallelism.
//!
//! # Examples
//!
//! ```rust
//! use mapscope::traverse::{traverse, TreeVisitor, VisitKinds};
//! use mapscope::tree::{ClassMapping, MappingTree};
//!
//! struct ClassCounter(usize);
//!
//! impl TreeVisitor for ClassCounter {
//!     fn kinds(&self) -> VisitKinds {
//!         VisitKinds::CLASSES
//!     }
//!
//!     fn visit_class(
//!         &mut self,
//!         _class: &ClassMapping,
//!         _structure: Option<&mapscope::structure::ClassStructure>,
//!     ) -> mapscope::Result<mapscope::traverse::VisitFlow> {
//!         self.0 += 1;
//!         Ok(mapscope::traverse::VisitFlow::Prune)
//!     }
//! }
//!
//! let mut tree = MappingTree::new();
//! tree.class_entry("a/A");
//! tree.class_entry("a/B");
//!
//! let mut counter = ClassCounter(0);
//! traverse(&mut counter, &tree, None)?;
//! assert_eq!(counter.0, 2);
//! # Ok::<(), mapscope::Error>(())
//! ```

use bitflags::bitflags;

use crate::{
    structure::{ClassStructure, FieldStructure, JarStructure, MethodStructure, StructureIndex},
    tree::{ClassMapping, FieldMapping, MappingTree, MethodMapping, PackageMapping},
    Result,
};

bitflags! {
    /// Node categories a visitor opts into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct VisitKinds: u8 {
        /// Package nodes.
        const PACKAGES = 0x01;
        /// Class nodes. Declining this makes everything below classes unreachable.
        const CLASSES = 0x02;
        /// Field nodes. Reachable only if CLASSES is accepted.
        const FIELDS = 0x04;
        /// Method nodes. Reachable only if CLASSES is accepted.
        const METHODS = 0x08;
        /// Parameter nodes. Reachable only if METHODS is accepted.
        const PARAMETERS = 0x10;
    }
}

/// Continuation decision of a class or method hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitFlow {
    /// Visit the node's members.
    Descend,
    /// Skip the node's members; siblings are unaffected.
    Prune,
}

/// A read-only visitor over a mapping tree.
///
/// Every hook has a no-op default, so visitors implement only what they care about.
/// Hooks return `Result` so that hard failures (e.g. a malformed descriptor met
/// while analyzing a node) propagate and abort the traversal outright.
pub trait TreeVisitor {
    /// Node categories this visitor wants to see.
    fn kinds(&self) -> VisitKinds {
        VisitKinds::all()
    }

    /// Called once before anything else. Returning `false` aborts the traversal
    /// before any node is visited.
    fn visit_tree(&mut self, _tree: &MappingTree) -> Result<bool> {
        Ok(true)
    }

    /// Called once per package, in tree order.
    fn visit_package(&mut self, _package: &PackageMapping) -> Result<()> {
        Ok(())
    }

    /// Called once after the last package, if PACKAGES was accepted.
    fn finish_packages(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called once per class, in tree order.
    fn visit_class(
        &mut self,
        _class: &ClassMapping,
        _structure: Option<&ClassStructure>,
    ) -> Result<VisitFlow> {
        Ok(VisitFlow::Descend)
    }

    /// Called after a class's members have been visited (or pruned).
    fn finish_class(&mut self, _class: &ClassMapping) -> Result<()> {
        Ok(())
    }

    /// Called once per field of a descended class.
    fn visit_field(
        &mut self,
        _class: &ClassMapping,
        _field: &FieldMapping,
        _structure: Option<&FieldStructure>,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once per method of a descended class.
    fn visit_method(
        &mut self,
        _class: &ClassMapping,
        _method: &MethodMapping,
        _structure: Option<&MethodStructure>,
    ) -> Result<VisitFlow> {
        Ok(VisitFlow::Descend)
    }

    /// Called after a method's parameters have been visited (or pruned).
    fn finish_method(&mut self, _class: &ClassMapping, _method: &MethodMapping) -> Result<()> {
        Ok(())
    }

    /// Called once per parameter of a descended method. The method's structure is
    /// passed along since parameters have no structure entries of their own.
    fn visit_parameter(
        &mut self,
        _class: &ClassMapping,
        _method: &MethodMapping,
        _param: &crate::tree::ParameterMapping,
        _structure: Option<&MethodStructure>,
    ) -> Result<()> {
        Ok(())
    }
}

/// Runs `visitor` over `tree`, resolving structure data from `structure` when given.
///
/// # Errors
///
/// Propagates the first error returned by any visitor hook.
pub fn traverse(
    visitor: &mut dyn TreeVisitor,
    tree: &MappingTree,
    structure: Option<&JarStructure>,
) -> Result<()> {
    if !visitor.visit_tree(tree)? {
        return Ok(());
    }

    let kinds = visitor.kinds();

    if kinds.contains(VisitKinds::PACKAGES) {
        for package in tree.packages() {
            visitor.visit_package(package)?;
        }
        visitor.finish_packages()?;
    }

    if !kinds.contains(VisitKinds::CLASSES) {
        return Ok(());
    }

    // One index per traversal, reused for every lookup.
    let index = structure.map(StructureIndex::build);

    for class in tree.classes() {
        let class_structure = index.as_ref().and_then(|i| i.class(&class.name));

        if visitor.visit_class(class, class_structure)? == VisitFlow::Descend {
            if kinds.contains(VisitKinds::FIELDS) {
                for field in class.fields() {
                    let field_structure = class_structure.and_then(|c| c.field(&field.name));
                    visitor.visit_field(class, field, field_structure)?;
                }
            }

            if kinds.contains(VisitKinds::METHODS) {
                for method in class.methods() {
                    let method_structure =
                        class_structure.and_then(|c| c.method(&method.name, &method.descriptor));

                    if visitor.visit_method(class, method, method_structure)? == VisitFlow::Descend
                        && kinds.contains(VisitKinds::PARAMETERS)
                    {
                        for param in method.params() {
                            visitor.visit_parameter(class, method, param, method_structure)?;
                        }
                    }
                    visitor.finish_method(class, method)?;
                }
            }
        }
        visitor.finish_class(class)?;
    }

    Ok(())
}
