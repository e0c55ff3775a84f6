//! Pipeline orchestration module.
//!
//! Cost analysis pipeline that coordinates:
//! - Flow classification
//! - Cost calculation
//! - Report aggregation

pub mod analysis;
pub mod context;

pub use analysis::*;
pub use context::*;
