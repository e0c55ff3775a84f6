//! Flow classification module.
//!
//! Maps each flow to a traffic category and a monetary cost:
//! - Direction/category from source and destination prefixes
//! - Peak flag from the hour of day
//! - Cost from category rate, binary GB volume and peak surcharge

pub mod cost;
pub mod traffic;

pub use cost::*;
pub use traffic::*;
