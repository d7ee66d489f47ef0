//! The standard cleanup library.
//!
//! Each pass is an independent [`crate::sanitize::Sanitizer`]; the canonical
//! run order lives in [`crate::sanitize::SanitizeEngine::standard`].

mod bouncer;
mod enums;
mod params;
mod synthetic;

pub use bouncer::BouncerMover;
pub use enums::EnumMachineryRemover;
pub use params::InvalidParameterRemover;
pub use synthetic::SyntheticStripper;
