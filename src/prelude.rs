//! # mapscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! and traits from the mapscope library. Import it to get quick access to the
//! essential pieces for working with mapping trees.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all mapscope operations
pub use crate::Error;

/// The result type used throughout mapscope
pub use crate::Result;

// ================================================================================================
// Mapping Tree
// ================================================================================================

/// Root container and its node types
pub use crate::tree::{
    ClassMapping, FieldMapping, MappingTree, MemberKey, MethodMapping, PackageMapping,
    ParameterMapping,
};

// ================================================================================================
// Structural Oracle
// ================================================================================================

/// Structure description types and their access flags
pub use crate::structure::{
    ClassAccessFlags, ClassStructure, FieldAccessFlags, FieldStructure, JarStructure, MemberRef,
    MethodAccessFlags, MethodStructure, StructureIndex,
};

// ================================================================================================
// Descriptor Indexing
// ================================================================================================

/// Parameter slot computation from method descriptors
pub use crate::descriptor::{ParameterIndexer, Staticness};

// ================================================================================================
// Traversal
// ================================================================================================

/// Visitor-driven traversal over a tree joined with its structure
pub use crate::traverse::{traverse, TreeVisitor, VisitFlow, VisitKinds};

// ================================================================================================
// Validation
// ================================================================================================

/// Validation engine, validator trait and issue reporting
pub use crate::validation::{
    Issue, IssueSink, ResultTree, Severity, ValidationEngine, Validator,
};

/// The standard validators
pub use crate::validation::validators::{DocValidator, NamingValidator, ParameterSlotValidator};

// ================================================================================================
// Sanitization
// ================================================================================================

/// Sanitization engine, sanitizer trait and per-node verdicts
pub use crate::sanitize::{Action, ParamAction, SanitizeEngine, Sanitizer};

/// The standard cleanup passes
pub use crate::sanitize::passes::{
    BouncerMover, EnumMachineryRemover, InvalidParameterRemover, SyntheticStripper,
};
