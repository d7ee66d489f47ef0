//! Validation of mapping annotations.
//!
//! The validation engine runs a set of read-only [`Validator`]s over a mapping tree
//! in a single depth-first pass and produces a [`ResultTree`]: a tree of findings
//! mirroring the shape and sort order of the input, materializing only branches
//! that actually produced an issue.
//!
//! # Architecture
//!
//! The engine is itself a traversal visitor (see [`crate::traverse`]) multiplexing
//! all registered validators. Per node it calls every still-active validator in
//! registration order and merges their findings. A validator drops out of a subtree
//! by category opt-out or by pruning a class/method; the other validators are
//! unaffected and the tree is never walked twice.
//!
//! Findings are data, never errors: a validation run only fails outright on hard
//! failures such as a malformed descriptor.
//!
//! # Key Types
//!
//! - [`ValidationEngine`] - Registration and the single-pass driver
//! - [`Validator`] - The capability trait for checks
//! - [`ResultTree`], [`Issue`], [`Severity`] - The output side
//! - Built-in library: [`validators::NamingValidator`], [`validators::DocValidator`],
//!   [`validators::ParameterSlotValidator`]

pub(crate) mod engine;
mod issues;
pub mod validators;

pub use engine::{ValidationEngine, Validator};
pub use issues::{ClassIssues, Issue, IssueRef, IssueSink, MethodIssues, ResultTree, Severity};
