use std::collections::HashMap;

use crate::structure::{ClassStructure, JarStructure};

/// Name-keyed lookup table over a [`JarStructure`].
///
/// Flattens nested inner classes recursively into a single `name -> ClassStructure`
/// map, so the traversal engines resolve any class in one exact-match lookup. Built
/// once per traversal and reused for every node.
///
/// Duplicate class names keep the first occurrence; the supplier is untrusted and a
/// duplicate is treated as noise rather than an error, consistent with the rule that
/// structure problems degrade to "no structure".
#[derive(Debug)]
pub struct StructureIndex<'a> {
    classes: HashMap<&'a str, &'a ClassStructure>,
}

impl<'a> StructureIndex<'a> {
    /// Builds the index by walking the structure tree, inner classes included.
    pub fn build(structure: &'a JarStructure) -> Self {
        let mut classes = HashMap::new();
        for class in &structure.classes {
            Self::collect(class, &mut classes);
        }
        Self { classes }
    }

    fn collect(class: &'a ClassStructure, into: &mut HashMap<&'a str, &'a ClassStructure>) {
        into.entry(class.name.as_str()).or_insert(class);
        for inner in &class.inner_classes {
            Self::collect(inner, into);
        }
    }

    /// Looks up a class by exact official name. A miss means "no structure".
    pub fn class(&self, name: &str) -> Option<&'a ClassStructure> {
        self.classes.get(name).copied()
    }

    /// Number of classes known to the index.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True if the index holds no classes at all.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_nested_classes() {
        let structure = JarStructure::new().with_class(
            ClassStructure::new("a/Outer")
                .with_inner(ClassStructure::new("a/Outer$Inner").with_inner(
                    ClassStructure::new("a/Outer$Inner$Leaf"),
                )),
        );

        let index = StructureIndex::build(&structure);
        assert_eq!(index.len(), 3);
        assert!(index.class("a/Outer").is_some());
        assert!(index.class("a/Outer$Inner").is_some());
        assert!(index.class("a/Outer$Inner$Leaf").is_some());
        assert!(index.class("a/Other").is_none());
    }

    #[test]
    fn lookup_is_exact_match() {
        let structure = JarStructure::new().with_class(ClassStructure::new("a/Outer"));
        let index = StructureIndex::build(&structure);
        assert!(index.class("a/outer").is_none());
        assert!(index.class("a/Outer$").is_none());
    }
}
