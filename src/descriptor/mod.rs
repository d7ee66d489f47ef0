//! JVM method-descriptor analysis.
//!
//! A method descriptor encodes the parameter and return types of a method as a
//! compact string, e.g. `(ILjava/lang/String;[J)V`. This module computes which
//! local-variable slots a descriptor can possibly assign to parameters, which is
//! what lets the sanitizers and validators tell a real parameter entry from an
//! orphaned one.
//!
//! # Key Types
//!
//! - [`ParameterIndexer`] - Memoizing calculator of structurally possible slot sets
//! - [`Staticness`] - Whether slot 0 is a parameter or the implicit receiver
//!
//! # Examples
//!
//! ```rust
//! use mapscope::descriptor::{ParameterIndexer, Staticness};
//!
//! let mut indexer = ParameterIndexer::new();
//! // double at slots 0-1, long at 2-3, int at 4; the wide high slots are unindexed.
//! let slots = indexer.indexes("(DJI)V", Staticness::Static)?;
//! assert_eq!(slots.iter().copied().collect::<Vec<_>>(), vec![0, 2, 4]);
//! # Ok::<(), mapscope::Error>(())
//! ```

mod indexer;

pub use indexer::{ParameterIndexer, Staticness};
