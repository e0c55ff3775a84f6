//! Report aggregation.
//!
//! Turns classified flows into a [`Report`]. Empty input is a valid batch
//! and produces a zero-valued report.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;

use crate::classification::cost::{round_to, COST_DECIMALS};
use crate::config::CostConfig;
use crate::models::{
    CategoryBreakdown, ClassifiedFlow, FlowCostEntry, Report, ReportMetadata, ReportSummary,
    SourceCostEntry, TrafficCategory,
};
use crate::pipeline::context::RunContext;

use super::recommendations::{estimate_savings, generate_recommendations, CostTotals};

/// The input batch is treated as one hour of traffic; a month is 30 days.
pub const HOURS_PER_MONTH: f64 = 24.0 * 30.0;

/// Decimal places kept on percentages.
pub const PERCENT_DECIMALS: i32 = 2;

/// Floor for the average cost-per-GB divisor. Approximation: batches under
/// 1 GB report total cost as their average.
const MIN_GB_DIVISOR: f64 = 1.0;

/// `part / total * 100`, or 0 when total is not positive.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

/// Build a report under a fresh run context.
pub fn build_report(config: &CostConfig, flows: &[ClassifiedFlow]) -> Report {
    build_report_with_context(config, flows, &RunContext::new())
}

/// Build a report for a batch of classified flows.
pub fn build_report_with_context(
    config: &CostConfig,
    flows: &[ClassifiedFlow],
    ctx: &RunContext,
) -> Report {
    let log_ctx = ctx.log_context();

    log::debug!("{} REPORT_BUILD_START flows={}", log_ctx, flows.len());

    let total_cost: f64 = flows.iter().map(|f| f.cost).sum();
    let total_gb: f64 = flows.iter().map(|f| f.volume_gb).sum();
    let (peak_cost, off_peak_cost) = peak_split(flows);

    let summary = ReportSummary {
        total_flows: flows.len(),
        total_data_gb: round_to(total_gb, COST_DECIMALS),
        total_cost: round_to(total_cost, COST_DECIMALS),
        average_cost_per_gb: round_to(total_cost / total_gb.max(MIN_GB_DIVISOR), COST_DECIMALS),
        monthly_projection: round_to(total_cost * HOURS_PER_MONTH, COST_DECIMALS),
        peak_traffic_cost: round_to(peak_cost, COST_DECIMALS),
        peak_traffic_percentage: round_to(percentage(peak_cost, total_cost), PERCENT_DECIMALS),
        off_peak_cost: round_to(off_peak_cost, COST_DECIMALS),
    };

    let totals = CostTotals {
        total_cost,
        peak_cost,
    };
    let recommendations = generate_recommendations(config, flows, totals, &log_ctx);
    let estimated_savings = estimate_savings(&recommendations, total_cost);

    let report = Report {
        metadata: ReportMetadata {
            report_id: ctx.run_id.clone(),
            currency: config.currency.clone(),
            unit: "per GB".to_string(),
            generated_at: Utc::now(),
            peak_hours: config.peak_window.describe(),
            peak_surcharge_percent: round_to(config.surcharge_percent(), PERCENT_DECIMALS),
        },
        summary,
        breakdown: breakdown_by_category(flows),
        top_expensive_flows: top_expensive_flows(flows, config.top_flows),
        top_costly_sources: top_costly_sources(flows, config.top_sources),
        recommendations,
        estimated_savings,
    };

    crate::log_info!(
        log_ctx,
        "REPORT_BUILT",
        flows = report.summary.total_flows,
        total_cost = report.summary.total_cost,
        recommendations = report.recommendations.len(),
    );

    report
}

/// Sum peak and off-peak cost.
pub fn peak_split(flows: &[ClassifiedFlow]) -> (f64, f64) {
    flows.iter().fold((0.0, 0.0), |(peak, off_peak), f| {
        if f.is_peak {
            (peak + f.cost, off_peak)
        } else {
            (peak, off_peak + f.cost)
        }
    })
}

/// Group volume, cost and count by traffic category.
pub fn breakdown_by_category(
    flows: &[ClassifiedFlow],
) -> BTreeMap<TrafficCategory, CategoryBreakdown> {
    let mut breakdown: BTreeMap<TrafficCategory, CategoryBreakdown> = BTreeMap::new();

    for flow in flows {
        let entry = breakdown.entry(flow.category).or_default();
        entry.total_gb += flow.volume_gb;
        entry.total_cost += flow.cost;
        entry.flow_count += 1;
    }

    for entry in breakdown.values_mut() {
        entry.total_gb = round_to(entry.total_gb, COST_DECIMALS);
        entry.total_cost = round_to(entry.total_cost, COST_DECIMALS);
    }

    breakdown
}

/// The `limit` most expensive flows, highest cost first.
///
/// Ties keep input order.
pub fn top_expensive_flows(flows: &[ClassifiedFlow], limit: usize) -> Vec<FlowCostEntry> {
    let mut ranked: Vec<&ClassifiedFlow> = flows.iter().collect();
    // sort_by is stable, so equal costs stay in input order
    ranked.sort_by(|a, b| b.cost.total_cmp(&a.cost));

    ranked
        .into_iter()
        .take(limit)
        .map(|f| FlowCostEntry {
            src_ip: f.record.source.clone(),
            dst_ip: f.record.destination.clone(),
            traffic_type: f.category,
            total_gb: round_to(f.volume_gb, COST_DECIMALS),
            cost: f.cost,
        })
        .collect()
}

/// The `limit` source addresses with the highest summed cost.
///
/// Ties keep first-appearance order.
pub fn top_costly_sources(flows: &[ClassifiedFlow], limit: usize) -> Vec<SourceCostEntry> {
    let mut sources: Vec<SourceCostEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for flow in flows {
        let source = flow.record.source.as_str();
        let slot = *index.entry(source).or_insert_with(|| {
            sources.push(SourceCostEntry {
                src_ip: source.to_string(),
                total_cost: 0.0,
                total_gb: 0.0,
                flow_count: 0,
            });
            sources.len() - 1
        });

        let entry = &mut sources[slot];
        entry.total_cost += flow.cost;
        entry.total_gb += flow.volume_gb;
        entry.flow_count += 1;
    }

    sources.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));
    sources.truncate(limit);

    for entry in &mut sources {
        entry.total_cost = round_to(entry.total_cost, COST_DECIMALS);
        entry.total_gb = round_to(entry.total_gb, COST_DECIMALS);
    }

    sources
}
