//! Data models.
//!
//! Flow records flowing into the classifier and the report structure
//! produced by the aggregator.

pub mod flow;
pub mod report;

pub use flow::*;
pub use report::*;
