use std::collections::BTreeMap;
use std::fmt;

use crate::Result;

/// Identifying key of a method within its class: official name plus descriptor.
///
/// Two methods of the same class may share a name but never a name+descriptor pair.
/// The `Ord` implementation sorts by name first, then descriptor, which fixes the
/// iteration order of [`ClassMapping::methods`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberKey {
    /// Official method name.
    pub name: String,
    /// JVM method descriptor, e.g. `(ILjava/lang/String;)V`.
    pub descriptor: String,
}

impl MemberKey {
    /// Creates a key from name and descriptor.
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.descriptor)
    }
}

/// Mapping annotations attached to a package.
///
/// Packages carry documentation only; they have no children in the mapping tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageMapping {
    /// Official package path, `/`-separated (`com/example/util`).
    pub name: String,
    /// Documentation lines.
    pub docs: Vec<String>,
}

impl PackageMapping {
    /// Creates an empty package mapping.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: Vec::new(),
        }
    }

    /// Attaches documentation lines, builder style.
    #[must_use]
    pub fn with_docs(mut self, docs: Vec<String>) -> Self {
        self.docs = docs;
        self
    }
}

/// Mapping annotations attached to a class.
///
/// The class name is the full official path including `$`-joined nesting segments.
/// Fields are unique by name, methods by name+descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassMapping {
    /// Official class name (`com/example/Outer$Inner`).
    pub name: String,
    /// Documentation lines.
    pub docs: Vec<String>,
    fields: BTreeMap<String, FieldMapping>,
    methods: BTreeMap<MemberKey, MethodMapping>,
}

impl ClassMapping {
    /// Creates an empty class mapping.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: Vec::new(),
            fields: BTreeMap::new(),
            methods: BTreeMap::new(),
        }
    }

    /// Iterates the fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldMapping> {
        self.fields.values()
    }

    /// Iterates the methods in key order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodMapping> {
        self.methods.values()
    }

    /// Looks up a field by official name.
    pub fn field(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.get(name)
    }

    /// Looks up a field by official name, mutably.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldMapping> {
        self.fields.get_mut(name)
    }

    /// Looks up a method by official name and descriptor.
    pub fn method(&self, name: &str, descriptor: &str) -> Option<&MethodMapping> {
        self.methods.get(&MemberKey::new(name, descriptor))
    }

    /// Looks up a method by key, mutably.
    pub fn method_mut(&mut self, key: &MemberKey) -> Option<&mut MethodMapping> {
        self.methods.get_mut(key)
    }

    /// Returns the field mapping for `name`, creating an empty one if absent.
    pub fn field_entry(&mut self, name: &str) -> &mut FieldMapping {
        self.fields
            .entry(name.to_owned())
            .or_insert_with(|| FieldMapping::new(name, ""))
    }

    /// Returns the method mapping for `name`+`descriptor`, creating an empty one if absent.
    pub fn method_entry(&mut self, name: &str, descriptor: &str) -> &mut MethodMapping {
        self.methods
            .entry(MemberKey::new(name, descriptor))
            .or_insert_with(|| MethodMapping::new(name, descriptor))
    }

    /// Inserts a field mapping, failing on a duplicate name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DuplicateKey`] if a field of that name already exists.
    pub fn add_field(&mut self, field: FieldMapping) -> Result<()> {
        if self.fields.contains_key(&field.name) {
            return Err(crate::Error::DuplicateKey(format!(
                "{}.{}",
                self.name, field.name
            )));
        }
        self.fields.insert(field.name.clone(), field);
        Ok(())
    }

    /// Inserts a method mapping, failing on a duplicate name+descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DuplicateKey`] if a method with that key already exists.
    pub fn add_method(&mut self, method: MethodMapping) -> Result<()> {
        let key = method.key();
        if self.methods.contains_key(&key) {
            return Err(crate::Error::DuplicateKey(format!("{}.{}", self.name, key)));
        }
        self.methods.insert(key, method);
        Ok(())
    }

    /// Removes a field mapping, returning it if present.
    pub fn remove_field(&mut self, name: &str) -> Option<FieldMapping> {
        self.fields.remove(name)
    }

    /// Removes a method mapping, returning it if present.
    pub fn remove_method(&mut self, key: &MemberKey) -> Option<MethodMapping> {
        self.methods.remove(key)
    }

    /// True if the class carries no documentation and no non-empty member.
    ///
    /// The check looks exactly one level down: a field counts as non-empty if it has
    /// documentation, a method if [`MethodMapping::is_empty`] is false.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
            && self.fields.values().all(|f| f.docs.is_empty())
            && self.methods.values().all(MethodMapping::is_empty)
    }
}

/// Mapping annotations attached to a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldMapping {
    /// Official field name.
    pub name: String,
    /// JVM field descriptor, e.g. `Ljava/lang/String;`.
    pub descriptor: String,
    /// Documentation lines.
    pub docs: Vec<String>,
}

impl FieldMapping {
    /// Creates an empty field mapping.
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            docs: Vec::new(),
        }
    }

    /// Attaches documentation lines, builder style.
    #[must_use]
    pub fn with_docs(mut self, docs: Vec<String>) -> Self {
        self.docs = docs;
        self
    }
}

/// Mapping annotations attached to a method.
///
/// Parameters are unique by slot index. Slot indices refer to the method's
/// local-variable table: instance methods reserve slot 0 for the receiver, and wide
/// primitives (`long`, `double`) consume two consecutive slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodMapping {
    /// Official method name.
    pub name: String,
    /// JVM method descriptor.
    pub descriptor: String,
    /// Documentation lines.
    pub docs: Vec<String>,
    params: BTreeMap<u8, ParameterMapping>,
}

impl MethodMapping {
    /// Creates an empty method mapping.
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            docs: Vec::new(),
            params: BTreeMap::new(),
        }
    }

    /// Attaches documentation lines, builder style.
    #[must_use]
    pub fn with_docs(mut self, docs: Vec<String>) -> Self {
        self.docs = docs;
        self
    }

    /// The identifying key of this method within its class.
    pub fn key(&self) -> MemberKey {
        MemberKey::new(self.name.clone(), self.descriptor.clone())
    }

    /// Iterates the parameters in slot order.
    pub fn params(&self) -> impl Iterator<Item = &ParameterMapping> {
        self.params.values()
    }

    /// Looks up a parameter by slot index.
    pub fn param(&self, index: u8) -> Option<&ParameterMapping> {
        self.params.get(&index)
    }

    /// Looks up a parameter by slot index, mutably.
    pub fn param_mut(&mut self, index: u8) -> Option<&mut ParameterMapping> {
        self.params.get_mut(&index)
    }

    /// Returns the parameter mapping for `index`, creating an empty one if absent.
    pub fn param_entry(&mut self, index: u8) -> &mut ParameterMapping {
        self.params
            .entry(index)
            .or_insert_with(|| ParameterMapping::new(index))
    }

    /// Inserts a parameter mapping, failing on a duplicate slot index.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DuplicateKey`] if a parameter at that slot already exists.
    pub fn add_param(&mut self, param: ParameterMapping) -> Result<()> {
        if self.params.contains_key(&param.index) {
            return Err(crate::Error::DuplicateKey(format!(
                "{}{}[{}]",
                self.name, self.descriptor, param.index
            )));
        }
        self.params.insert(param.index, param);
        Ok(())
    }

    /// Removes a parameter mapping, returning it if present.
    pub fn remove_param(&mut self, index: u8) -> Option<ParameterMapping> {
        self.params.remove(&index)
    }

    /// Replaces the entire parameter set.
    pub fn set_params(&mut self, params: impl IntoIterator<Item = ParameterMapping>) {
        self.params = params.into_iter().map(|p| (p.index, p)).collect();
    }

    /// True if the method carries no documentation and no non-empty parameter.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty() && self.params.values().all(ParameterMapping::is_empty)
    }
}

/// Mapping annotations attached to a single parameter slot.
///
/// Unlike the other node types, a parameter carries at most a single documentation
/// string rather than a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterMapping {
    /// Slot index in the method's local-variable table (0-255).
    pub index: u8,
    /// Official parameter name, if one has been contributed.
    pub name: Option<String>,
    /// Single-line documentation, if contributed.
    pub doc: Option<String>,
}

impl ParameterMapping {
    /// Creates an empty parameter mapping for a slot.
    pub fn new(index: u8) -> Self {
        Self {
            index,
            name: None,
            doc: None,
        }
    }

    /// Attaches a name, builder style.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches documentation, builder style.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// True if the slot carries neither a name nor documentation.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.doc.is_none()
    }
}

/// Root container of a mapping tree.
///
/// Holds two independent namespaces: packages (documentation carriers) and classes.
/// Both are sorted by official name. Deep structural equality and hashing make trees
/// directly comparable, which the sanitization idempotence guarantees rely on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MappingTree {
    packages: BTreeMap<String, PackageMapping>,
    classes: BTreeMap<String, ClassMapping>,
}

impl MappingTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates the packages in name order.
    pub fn packages(&self) -> impl Iterator<Item = &PackageMapping> {
        self.packages.values()
    }

    /// Iterates the classes in name order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassMapping> {
        self.classes.values()
    }

    /// Looks up a package by official path.
    pub fn package(&self, name: &str) -> Option<&PackageMapping> {
        self.packages.get(name)
    }

    /// Looks up a package by official path, mutably.
    pub fn package_mut(&mut self, name: &str) -> Option<&mut PackageMapping> {
        self.packages.get_mut(name)
    }

    /// Looks up a class by official name.
    pub fn class(&self, name: &str) -> Option<&ClassMapping> {
        self.classes.get(name)
    }

    /// Looks up a class by official name, mutably.
    pub fn class_mut(&mut self, name: &str) -> Option<&mut ClassMapping> {
        self.classes.get_mut(name)
    }

    /// Returns the package mapping for `name`, creating an empty one if absent.
    pub fn package_entry(&mut self, name: &str) -> &mut PackageMapping {
        self.packages
            .entry(name.to_owned())
            .or_insert_with(|| PackageMapping::new(name))
    }

    /// Returns the class mapping for `name`, creating an empty one if absent.
    pub fn class_entry(&mut self, name: &str) -> &mut ClassMapping {
        self.classes
            .entry(name.to_owned())
            .or_insert_with(|| ClassMapping::new(name))
    }

    /// Inserts a package mapping, failing on a duplicate path.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DuplicateKey`] if a package of that path already exists.
    pub fn add_package(&mut self, package: PackageMapping) -> Result<()> {
        if self.packages.contains_key(&package.name) {
            return Err(crate::Error::DuplicateKey(package.name));
        }
        self.packages.insert(package.name.clone(), package);
        Ok(())
    }

    /// Inserts a class mapping, failing on a duplicate name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DuplicateKey`] if a class of that name already exists.
    pub fn add_class(&mut self, class: ClassMapping) -> Result<()> {
        if self.classes.contains_key(&class.name) {
            return Err(crate::Error::DuplicateKey(class.name));
        }
        self.classes.insert(class.name.clone(), class);
        Ok(())
    }

    /// Removes a package mapping, returning it if present.
    pub fn remove_package(&mut self, name: &str) -> Option<PackageMapping> {
        self.packages.remove(name)
    }

    /// Removes a class mapping, returning it if present.
    pub fn remove_class(&mut self, name: &str) -> Option<ClassMapping> {
        self.classes.remove(name)
    }

    /// True if the tree holds no packages and no classes at all.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_apis_create_on_demand() {
        let mut tree = MappingTree::new();
        tree.class_entry("a/B").method_entry("run", "()V");

        let class = tree.class("a/B").unwrap();
        assert!(class.method("run", "()V").is_some());
        assert!(class.method("run", "(I)V").is_none());
    }

    #[test]
    fn duplicate_insertions_fail() {
        let mut tree = MappingTree::new();
        tree.add_class(ClassMapping::new("a/B")).unwrap();
        assert!(matches!(
            tree.add_class(ClassMapping::new("a/B")),
            Err(crate::Error::DuplicateKey(_))
        ));

        let class = tree.class_mut("a/B").unwrap();
        class.add_method(MethodMapping::new("run", "()V")).unwrap();
        assert!(matches!(
            class.add_method(MethodMapping::new("run", "()V")),
            Err(crate::Error::DuplicateKey(_))
        ));
        // Same name, different descriptor is a distinct key.
        class.add_method(MethodMapping::new("run", "(I)V")).unwrap();
    }

    #[test]
    fn structural_equality_ignores_insertion_order() {
        let mut a = MappingTree::new();
        a.class_entry("x/A");
        a.class_entry("x/B");

        let mut b = MappingTree::new();
        b.class_entry("x/B");
        b.class_entry("x/A");

        assert_eq!(a, b);
    }

    #[test]
    fn emptiness_looks_one_level_down() {
        let mut class = ClassMapping::new("a/B");
        assert!(class.is_empty());

        let method = class.method_entry("run", "()V");
        assert!(method.is_empty());
        method.param_entry(0);
        assert!(method.is_empty());
        method.param_entry(0).name = Some("self".to_string());
        assert!(!method.is_empty());
        assert!(!class.is_empty());
    }
}
