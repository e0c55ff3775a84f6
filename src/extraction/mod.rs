//! Flow extraction module.
//!
//! Produces flow records for the classifier from decoded packets or from
//! JSON flow exports.

pub mod flows;
pub mod records;
pub mod values;

pub use flows::*;
pub use records::*;
pub use values::*;
