//! End-to-end cost analysis.
//!
//! Coordinates one run:
//! 1. Classify and cost every flow
//! 2. Aggregate into a report
//! 3. Log run boundaries with the run id

use crate::classification::cost::classify_flows;
use crate::config::CostConfig;
use crate::models::{FlowRecord, Report};
use crate::report::aggregator::build_report_with_context;

use super::context::RunContext;

/// Classify a batch of flows and build its cost report.
pub fn run_cost_analysis(config: &CostConfig, records: Vec<FlowRecord>) -> Report {
    run_cost_analysis_with_context(config, records, &RunContext::new())
}

/// Same as [`run_cost_analysis`] under a caller-supplied context.
pub fn run_cost_analysis_with_context(
    config: &CostConfig,
    records: Vec<FlowRecord>,
    ctx: &RunContext,
) -> Report {
    let log_ctx = ctx.log_context();

    log::info!(
        "{} RUN_START flows={} currency={}",
        log_ctx,
        records.len(),
        config.currency
    );

    let flows = classify_flows(config, records, &log_ctx);
    let report = build_report_with_context(config, &flows, ctx);

    log::info!(
        "{} RUN_COMPLETE flows={} total_cost={:.4} monthly_projection={:.2} elapsed_ms={}",
        log_ctx,
        report.summary.total_flows,
        report.summary.total_cost,
        report.summary.monthly_projection,
        ctx.elapsed_ms()
    );

    report
}
