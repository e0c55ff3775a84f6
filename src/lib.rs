//! FlowSpend Core - Network flow classification and cost analysis
//!
//! This crate turns network flows into a monetary cost report. The
//! implementation prioritizes:
//!
//! 1. **Determinism** - Classification and costing are pure functions of
//!    the flow and an immutable [`CostConfig`]
//! 2. **Logging** - Every decision point logged with run context
//! 3. **Total functions** - Malformed or missing input is defaulted, never
//!    fatal, inside the core
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `extraction` - Packet-to-flow aggregation and JSON flow records
//! - `scaling` - Synthetic volume scaling and hour assignment
//! - `classification` - Traffic category and per-flow cost rules
//! - `report` - Aggregation into totals, rankings and recommendations
//! - `pipeline` - End-to-end cost analysis runs
//! - `config` - Rate tables, address prefixes and peak window
//! - `logging` - Structured logging with run context

pub mod classification;
pub mod config;
pub mod error;
pub mod extraction;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod scaling;

#[cfg(feature = "python")]
mod bindings;

pub use classification::{calculate_cost, classify_flow, classify_flows, classify_traffic, is_peak_hour};
pub use config::{CostConfig, PeakWindow, RecommendationPolicy};
pub use error::{FlowSpendError, Result};
pub use models::{ClassifiedFlow, FlowRecord, Report, TrafficCategory};
pub use pipeline::run_cost_analysis;
pub use report::build_report;

/// Initialize the crate logger.
///
/// Safe to call repeatedly; only the first call installs the logger.
pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .try_init();
}
