//! The built-in validator library.
//!
//! Convention checks over contributed annotations:
//!
//! - [`NamingValidator`] - parameter names are valid, non-reserved, lowerCamelCase
//!   Java identifiers
//! - [`DocValidator`] - documentation hygiene (no tabs, no trailing whitespace, no
//!   blank edge lines, no empty parameter docs)
//! - [`ParameterSlotValidator`] - parameter entries sit on structurally possible
//!   slots of their method's descriptor

mod docs;
mod naming;
mod slots;

pub use docs::DocValidator;
pub use naming::NamingValidator;
pub use slots::ParameterSlotValidator;
