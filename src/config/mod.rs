//! Cost model configuration.
//!
//! Everything the classifier and aggregator consult lives here:
//! - Per-category rate table
//! - Internal and cloud address prefixes
//! - Peak window and surcharge
//! - Ranking sizes and recommendation thresholds
//!
//! Configuration is an immutable value passed by reference into every
//! computation. There is no process-wide config state.

pub mod cost;
pub mod policy;

pub use cost::*;
pub use policy::*;
