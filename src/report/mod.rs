//! Report aggregation module.
//!
//! Reduces classified flows into a cost report:
//! - Summary totals and monthly projection
//! - Breakdown by traffic category
//! - Top flows and top sources by cost
//! - Peak/off-peak split
//! - Rule-based recommendations and estimated savings
//! - JSON and plain-text rendering

pub mod aggregator;
pub mod recommendations;
pub mod render;

pub use aggregator::*;
pub use recommendations::*;
pub use render::*;
