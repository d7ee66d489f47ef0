use crate::{
    structure::{ClassStructure, FieldStructure, JarStructure, MethodStructure},
    traverse::{traverse, TreeVisitor, VisitFlow, VisitKinds},
    tree::{ClassMapping, FieldMapping, MappingTree, MemberKey, MethodMapping, PackageMapping,
        ParameterMapping},
    validation::{
        issues::{ClassIssues, IssueSink, MethodIssues, ResultTree},
        validators::{DocValidator, NamingValidator, ParameterSlotValidator},
    },
    Result,
};

/// A read-only convention check over mapping annotations.
///
/// Hooks report findings into the supplied [`IssueSink`] and never mutate the tree.
/// The class and method hooks gate descent exactly like traversal hooks do: a
/// [`VisitFlow::Prune`] excludes this validator (and only this validator) from the
/// subtree.
pub trait Validator {
    /// Unique name, used to tag every issue this validator reports.
    fn name(&self) -> &'static str;

    /// Node categories this validator wants to see.
    fn kinds(&self) -> VisitKinds {
        VisitKinds::all()
    }

    /// Checks a package node.
    fn check_package(
        &mut self,
        _package: &PackageMapping,
        _issues: &mut IssueSink<'_>,
    ) -> Result<()> {
        Ok(())
    }

    /// Checks a class node and decides whether to look at its members.
    fn check_class(
        &mut self,
        _class: &ClassMapping,
        _structure: Option<&ClassStructure>,
        _issues: &mut IssueSink<'_>,
    ) -> Result<VisitFlow> {
        Ok(VisitFlow::Descend)
    }

    /// Checks a field node.
    fn check_field(
        &mut self,
        _class: &ClassMapping,
        _field: &FieldMapping,
        _structure: Option<&FieldStructure>,
        _issues: &mut IssueSink<'_>,
    ) -> Result<()> {
        Ok(())
    }

    /// Checks a method node and decides whether to look at its parameters.
    fn check_method(
        &mut self,
        _class: &ClassMapping,
        _method: &MethodMapping,
        _structure: Option<&MethodStructure>,
        _issues: &mut IssueSink<'_>,
    ) -> Result<VisitFlow> {
        Ok(VisitFlow::Descend)
    }

    /// Checks a parameter node. The owning method's structure is passed along for
    /// staticness and descriptor context.
    fn check_parameter(
        &mut self,
        _class: &ClassMapping,
        _method: &MethodMapping,
        _param: &ParameterMapping,
        _structure: Option<&MethodStructure>,
        _issues: &mut IssueSink<'_>,
    ) -> Result<()> {
        Ok(())
    }
}

/// Runs a set of validators over a mapping tree in a single traversal.
///
/// All validators share one depth-first pass; no node is revisited. Issues from all
/// active validators merge per node in registration order. A validator that opts out
/// of a category, or prunes a class/method, drops out of that subtree without
/// affecting the others.
///
/// # Examples
///
/// ```rust
/// use mapscope::validation::ValidationEngine;
/// use mapscope::tree::MappingTree;
///
/// let mut tree = MappingTree::new();
/// tree.class_entry("a/B")
///     .method_entry("run", "(I)V")
///     .param_entry(1)
///     .name = Some("9bad".to_string());
///
/// let report = ValidationEngine::standard().run(&tree, None)?;
/// assert!(report.has_errors());
/// # Ok::<(), mapscope::Error>(())
/// ```
#[derive(Default)]
pub struct ValidationEngine {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidationEngine {
    /// Creates an engine with no validators registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine preloaded with the built-in validator library.
    pub fn standard() -> Self {
        let mut engine = Self::new();
        engine.register(Box::new(NamingValidator::new()));
        engine.register(Box::new(DocValidator::new()));
        engine.register(Box::new(ParameterSlotValidator::new()));
        engine
    }

    /// Registers a validator. Registration order fixes the issue merge order.
    pub fn register(&mut self, validator: Box<dyn Validator>) {
        self.validators.push(validator);
    }

    /// Validates `tree`, resolving structure data from `structure` when given.
    ///
    /// The run is deterministic for fixed inputs. Validation findings come back as
    /// data in the [`ResultTree`]; only hard failures (malformed descriptors met by
    /// a validator) surface as `Err`.
    ///
    /// # Errors
    ///
    /// Propagates the first hard failure reported by a validator hook.
    pub fn run(
        &mut self,
        tree: &MappingTree,
        structure: Option<&JarStructure>,
    ) -> Result<ResultTree> {
        let kinds: Vec<VisitKinds> = self.validators.iter().map(|v| v.kinds()).collect();
        let count = self.validators.len();

        let mut driver = Driver {
            validators: &mut self.validators,
            kinds,
            class_active: vec![false; count],
            method_active: vec![false; count],
            out: ResultTree::new(),
            current_class: None,
            current_method: None,
        };

        traverse(&mut driver, tree, structure)?;
        Ok(driver.out)
    }
}

/// The engine's traversal driver: one visitor multiplexing all validators.
struct Driver<'a> {
    validators: &'a mut Vec<Box<dyn Validator>>,
    kinds: Vec<VisitKinds>,
    /// Which validators are still active inside the current class subtree.
    class_active: Vec<bool>,
    /// Which validators are still active inside the current method subtree.
    method_active: Vec<bool>,
    out: ResultTree,
    current_class: Option<ClassIssues>,
    current_method: Option<(MemberKey, MethodIssues)>,
}

impl TreeVisitor for Driver<'_> {
    fn kinds(&self) -> VisitKinds {
        self.kinds
            .iter()
            .fold(VisitKinds::empty(), |acc, k| acc | *k)
    }

    fn visit_package(&mut self, package: &PackageMapping) -> Result<()> {
        let mut issues = Vec::new();
        for (i, validator) in self.validators.iter_mut().enumerate() {
            if self.kinds[i].contains(VisitKinds::PACKAGES) {
                let name = validator.name();
                validator.check_package(package, &mut IssueSink::new(name, &mut issues))?;
            }
        }
        if !issues.is_empty() {
            self.out
                .packages
                .entry(package.name.clone())
                .or_default()
                .extend(issues);
        }
        Ok(())
    }

    fn visit_class(
        &mut self,
        class: &ClassMapping,
        structure: Option<&ClassStructure>,
    ) -> Result<VisitFlow> {
        let mut issues = Vec::new();
        for (i, validator) in self.validators.iter_mut().enumerate() {
            if self.kinds[i].contains(VisitKinds::CLASSES) {
                let name = validator.name();
                let flow =
                    validator.check_class(class, structure, &mut IssueSink::new(name, &mut issues))?;
                self.class_active[i] = flow == VisitFlow::Descend;
            } else {
                self.class_active[i] = false;
            }
        }

        self.current_class = Some(ClassIssues {
            issues,
            ..ClassIssues::default()
        });

        // Descend only if some still-active validator wants members.
        let wants_members = self
            .class_active
            .iter()
            .zip(&self.kinds)
            .any(|(active, kinds)| {
                *active && kinds.intersects(VisitKinds::FIELDS | VisitKinds::METHODS)
            });
        Ok(if wants_members {
            VisitFlow::Descend
        } else {
            VisitFlow::Prune
        })
    }

    fn finish_class(&mut self, class: &ClassMapping) -> Result<()> {
        if let Some(collected) = self.current_class.take() {
            if !collected.is_empty() {
                self.out.classes.insert(class.name.clone(), collected);
            }
        }
        Ok(())
    }

    fn visit_field(
        &mut self,
        class: &ClassMapping,
        field: &FieldMapping,
        structure: Option<&FieldStructure>,
    ) -> Result<()> {
        let mut issues = Vec::new();
        for (i, validator) in self.validators.iter_mut().enumerate() {
            if self.class_active[i] && self.kinds[i].contains(VisitKinds::FIELDS) {
                let name = validator.name();
                validator.check_field(class, field, structure, &mut IssueSink::new(name, &mut issues))?;
            }
        }
        if !issues.is_empty() {
            if let Some(current) = self.current_class.as_mut() {
                current.fields.insert(field.name.clone(), issues);
            }
        }
        Ok(())
    }

    fn visit_method(
        &mut self,
        class: &ClassMapping,
        method: &MethodMapping,
        structure: Option<&MethodStructure>,
    ) -> Result<VisitFlow> {
        let mut issues = Vec::new();
        for (i, validator) in self.validators.iter_mut().enumerate() {
            if self.class_active[i] && self.kinds[i].contains(VisitKinds::METHODS) {
                let name = validator.name();
                let flow = validator.check_method(
                    class,
                    method,
                    structure,
                    &mut IssueSink::new(name, &mut issues),
                )?;
                self.method_active[i] = flow == VisitFlow::Descend;
            } else {
                self.method_active[i] = false;
            }
        }

        self.current_method = Some((
            method.key(),
            MethodIssues {
                issues,
                ..MethodIssues::default()
            },
        ));

        let wants_params = self
            .method_active
            .iter()
            .zip(&self.kinds)
            .any(|(active, kinds)| *active && kinds.contains(VisitKinds::PARAMETERS));
        Ok(if wants_params {
            VisitFlow::Descend
        } else {
            VisitFlow::Prune
        })
    }

    fn finish_method(&mut self, _class: &ClassMapping, _method: &MethodMapping) -> Result<()> {
        if let Some((key, collected)) = self.current_method.take() {
            if !collected.is_empty() {
                if let Some(current) = self.current_class.as_mut() {
                    current.methods.insert(key, collected);
                }
            }
        }
        Ok(())
    }

    fn visit_parameter(
        &mut self,
        class: &ClassMapping,
        method: &MethodMapping,
        param: &ParameterMapping,
        structure: Option<&MethodStructure>,
    ) -> Result<()> {
        let mut issues = Vec::new();
        for (i, validator) in self.validators.iter_mut().enumerate() {
            if self.method_active[i] && self.kinds[i].contains(VisitKinds::PARAMETERS) {
                let name = validator.name();
                validator.check_parameter(
                    class,
                    method,
                    param,
                    structure,
                    &mut IssueSink::new(name, &mut issues),
                )?;
            }
        }
        if !issues.is_empty() {
            if let Some((_, current)) = self.current_method.as_mut() {
                current.params.insert(param.index, issues);
            }
        }
        Ok(())
    }
}
