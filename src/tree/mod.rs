//! The mapping tree data model.
//!
//! This module contains the hierarchical data model for mapping annotations: packages,
//! classes, fields, methods, and parameters, each identified by its stable official
//! (de-obfuscated) name and carrying the human-authored annotation payload
//! (documentation lines, parameter names).
//!
//! # Architecture
//!
//! A [`MappingTree`] owns two independent top-level namespaces: packages and classes.
//! Nested classes are not nested in the tree; a class name carries its full nesting as
//! `$`-joined segments (`com/example/Outer$Inner`), mirroring the class-file view.
//!
//! All containers are ordered maps keyed by the identifying key of their entries, so
//! iteration order is stable and sorted. Equality and hashing are deep and structural.
//!
//! There is no separate snapshot/builder type pair: a `&MappingTree` *is* the read-only
//! snapshot, a `&mut MappingTree` is the buildable variant. Sanitizers always operate
//! on a working copy (`Clone`) or a tree built incrementally.
//!
//! # Key Types
//!
//! - [`MappingTree`] - Root container for packages and classes
//! - [`PackageMapping`], [`ClassMapping`], [`FieldMapping`], [`MethodMapping`],
//!   [`ParameterMapping`] - The node types
//! - [`MemberKey`] - The (name, descriptor) pair identifying a method within a class
//!
//! # Examples
//!
//! ```rust
//! use mapscope::tree::MappingTree;
//!
//! let mut tree = MappingTree::new();
//! let class = tree.class_entry("com/example/Widget");
//! class.docs.push("A widget.".to_string());
//!
//! let method = class.method_entry("resize", "(II)V");
//! method.param_entry(1).name = Some("width".to_string());
//! method.param_entry(2).name = Some("height".to_string());
//!
//! assert_eq!(tree.classes().count(), 1);
//! ```

mod nodes;

pub use nodes::{
    ClassMapping, FieldMapping, MappingTree, MemberKey, MethodMapping, PackageMapping,
    ParameterMapping,
};
