//! Destructive cleanup of a mapping tree.
//!
//! Validation reports problems; sanitization fixes them by rewriting the tree in
//! place. The module is built around three pieces:
//!
//! # Architecture
//!
//! - [`Sanitizer`] is a cleanup rule. It is offered nodes one at a time and
//!   answers with an [`Action`] (or [`ParamAction`] for parameter slots).
//! - [`SanitizeEngine`] owns an ordered list of sanitizers and drives each one
//!   over the tree, pass by pass, applying verdicts with deterministic batch
//!   semantics and pruning leaves that end up empty.
//! - [`passes`] holds the standard library: bouncer rescue, synthetic member
//!   stripping, enum machinery removal and invalid parameter removal.
//!
//! # Examples
//!
//! ```rust
//! use mapscope::sanitize::SanitizeEngine;
//! use mapscope::tree::MappingTree;
//!
//! let mut tree = MappingTree::new();
//! tree.class_entry("com/example/Widget").docs = vec!["A widget.".into()];
//!
//! // Without a structural oracle, structure-dependent passes stand down.
//! SanitizeEngine::standard().run(&mut tree, None)?;
//! assert!(tree.class("com/example/Widget").is_some());
//! # Ok::<(), mapscope::Error>(())
//! ```

mod action;
mod engine;
mod pass;
pub mod passes;

pub use action::{Action, ParamAction};
pub use engine::{SanitizeEngine, DEFAULT_REVISIT_BUDGET};
pub use pass::Sanitizer;
