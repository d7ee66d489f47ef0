//! Externally supplied structural metadata for the mapped program.
//!
//! The mapping tree records what humans contributed; this module records what the
//! compiler actually produced. A [`JarStructure`] describes, per class, the JVM access
//! flags, the record flag, per-member flags and descriptors, lambda markers, optional
//! bouncer targets, and nested inner classes. The structure tree is resolved once per
//! invocation and held read-only; it is never mutated by any engine.
//!
//! Structure data is *optional everywhere*. The supplier may be missing entirely,
//! cover only part of the program, or disagree with the mapping tree by name. A
//! lookup miss means "no structure", never an error; components that cannot act
//! without it decline instead of failing.
//!
//! # Key Types
//!
//! - [`JarStructure`] - Root of the supplied structure tree
//! - [`ClassStructure`], [`FieldStructure`], [`MethodStructure`] - Per-member data
//! - [`ClassAccessFlags`], [`FieldAccessFlags`], [`MethodAccessFlags`] - JVM `ACC_*` sets
//! - [`MemberRef`] - Fully qualified member reference (`owner#name#descriptor`)
//! - [`StructureIndex`] - Name-keyed lookup table flattened over nested classes

mod index;
mod types;

pub use index::StructureIndex;
pub use types::{
    ClassAccessFlags, ClassStructure, FieldAccessFlags, FieldStructure, JarStructure,
    MemberRef, MethodAccessFlags, MethodStructure,
};
