// Copyright 2025 The mapscope contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]
#![deny(unsafe_code)]

//! # mapscope
//!
//! A framework for curating the human-authored annotation layer of a
//! de-obfuscated JVM program: documentation and parameter names attached to
//! packages, classes, fields, methods and parameter slots, validated and
//! sanitized against an optional structural-metadata oracle extracted from the
//! program's class files.
//!
//! ## Features
//!
//! - **Mapping tree** - An ordered, deeply comparable model of every annotation
//!   a mapping project carries, with create-if-absent and fallible insertion APIs
//! - **Structural oracle** - A side-loaded description of the classes that really
//!   exist, flattened so inner classes resolve by their full `$`-joined name
//! - **Descriptor indexing** - Memoized computation of the legal parameter slots
//!   of any JVM method descriptor, for static, instance or unknown methods
//! - **Validation** - Read-only checks that report naming, documentation and
//!   parameter-slot problems as a sparse result tree, never touching the input
//! - **Sanitization** - Destructive cleanup passes that strip compiler-generated
//!   noise and rescue annotations stranded on bouncer methods
//!
//! Everything degrades gracefully when no structural oracle is available:
//! structure-dependent checks stand down instead of guessing.
//!
//! ## Quick Start
//!
//! ```rust
//! use mapscope::prelude::*;
//!
//! let mut tree = MappingTree::new();
//! let class = tree.class_entry("com/example/Greeter");
//! class.docs = vec!["Says hello.".into()];
//! class.method_entry("greet", "(Ljava/lang/String;)V").docs = vec!["Greets someone.".into()];
//!
//! // Validate without structural metadata: structure checks degrade.
//! let report = ValidationEngine::standard().run(&tree, None)?;
//! assert!(!report.has_errors());
//!
//! // Sanitize in place. With no oracle, structure-driven passes stand down.
//! SanitizeEngine::standard().run(&mut tree, None)?;
//! assert!(tree.class("com/example/Greeter").is_some());
//! # Ok::<(), mapscope::Error>(())
//! ```

#[macro_use]
pub(crate) mod error;

/// Common types and traits, re-exported for glob import.
///
/// ```rust
/// use mapscope::prelude::*;
///
/// let mut indexer = ParameterIndexer::new();
/// let slots = indexer.indexes("(I)V", Staticness::Static)?;
/// assert!(slots.contains(&0));
/// # Ok::<(), mapscope::Error>(())
/// ```
pub mod prelude;

/// The mapping tree: annotation containers for packages, classes, fields,
/// methods and parameter slots.
///
/// # Key Types
///
/// - [`tree::MappingTree`] - Root container, packages and classes side by side
/// - [`tree::ClassMapping`] - Class docs plus its field and method mappings
/// - [`tree::MemberKey`] - Name+descriptor key identifying a method
///
/// All containers iterate in sorted official-name order, and the whole tree
/// supports deep structural equality.
pub mod tree;

/// The structural oracle: what members actually exist in the program.
///
/// # Key Types
///
/// - [`structure::JarStructure`] - Description of all classes of the program
/// - [`structure::StructureIndex`] - Borrowing lookup table with inner classes
///   flattened to their full `$`-joined names
/// - [`structure::MemberRef`] - Owner+name+descriptor reference to a member
pub mod structure;

/// Parameter-slot computation from JVM method descriptors.
///
/// [`descriptor::ParameterIndexer`] memoizes, per instance, the set of legal
/// local-variable slots implied by a descriptor and the method's staticness.
pub mod descriptor;

/// Read-only traversal of a mapping tree joined with its structural metadata.
///
/// [`traverse::TreeVisitor`] receives each node the visitor opted into via
/// [`traverse::VisitKinds`], along with the matching structure entry when the
/// oracle knows the node.
pub mod traverse;

/// Validation: non-destructive checks reported as a sparse result tree.
///
/// # Key Types
///
/// - [`validation::ValidationEngine`] - Runs registered [`validation::Validator`]s
///   over a tree in a single traversal
/// - [`validation::ResultTree`] - Issues grouped by the node that raised them;
///   clean branches are never materialized
/// - [`validation::validators`] - The standard checks: naming, documentation
///   hygiene, parameter-slot validity
pub mod validation;

/// Sanitization: destructive cleanup passes over a mapping tree.
///
/// # Key Types
///
/// - [`sanitize::SanitizeEngine`] - Drives [`sanitize::Sanitizer`]s pass by pass
/// - [`sanitize::Action`] / [`sanitize::ParamAction`] - Per-node verdicts
/// - [`sanitize::passes`] - The standard library: bouncer rescue, synthetic
///   stripping, enum machinery removal, invalid parameter removal
pub mod sanitize;

/// Result type for all fallible mapscope operations.
pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;
