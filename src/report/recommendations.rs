//! Cost optimization recommendations.
//!
//! A fixed rule list evaluated against report totals. Conditional rules come
//! first, in a stable order, followed by the two general rules that are
//! always emitted.

use crate::classification::cost::{round_to, COST_DECIMALS};
use crate::config::CostConfig;
use crate::logging::structured::LogContext;
use crate::models::{ClassifiedFlow, Priority, Recommendation, SavingsEstimate, TrafficCategory};

use super::aggregator::{percentage, HOURS_PER_MONTH, PERCENT_DECIMALS};

/// Totals the rules are evaluated against.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostTotals {
    pub total_cost: f64,
    pub peak_cost: f64,
}

fn recommendation(
    id: &str,
    title: &str,
    description: String,
    suggestion: String,
    savings: f64,
    priority: Priority,
) -> Recommendation {
    Recommendation {
        id: id.to_string(),
        title: title.to_string(),
        description,
        suggestion,
        potential_savings: round_to(savings, COST_DECIMALS),
        priority,
    }
}

/// Generate recommendations for a batch of classified flows.
///
/// # Rules
/// 1. Cloud egress cost above threshold -> CLOUD_EGRESS_OPT (HIGH)
/// 2. Peak cost above share of total -> PEAK_HOUR_OPT (MEDIUM)
/// 3. Too many large flows -> LARGE_FLOW_OPT (MEDIUM)
/// 4. Always -> TRAFFIC_MONITORING, BANDWIDTH_UPGRADE (LOW)
pub fn generate_recommendations(
    config: &CostConfig,
    flows: &[ClassifiedFlow],
    totals: CostTotals,
    ctx: &LogContext,
) -> Vec<Recommendation> {
    let policy = &config.recommendations;
    let mut recommendations = Vec::new();

    let cloud_cost: f64 = flows
        .iter()
        .filter(|f| f.category == TrafficCategory::CloudEgress)
        .map(|f| f.cost)
        .sum();

    if cloud_cost > policy.cloud_egress_threshold {
        let share = percentage(cloud_cost, totals.total_cost);
        crate::log_debug!(ctx, "RECOMMENDATION_MATCHED", id = "CLOUD_EGRESS_OPT", cloud_cost = cloud_cost);
        recommendations.push(recommendation(
            "CLOUD_EGRESS_OPT",
            "Cloud Egress Optimization",
            format!("Cloud egress traffic accounts for {:.1}% of total cost", share),
            "Use CDN for static content, schedule backups during off-peak hours".to_string(),
            cloud_cost * policy.cloud_egress_savings,
            Priority::High,
        ));
    }

    if totals.peak_cost > totals.total_cost * policy.peak_share_threshold {
        let share = percentage(totals.peak_cost, totals.total_cost);
        let window = &config.peak_window;
        crate::log_debug!(ctx, "RECOMMENDATION_MATCHED", id = "PEAK_HOUR_OPT", peak_share = share);
        recommendations.push(recommendation(
            "PEAK_HOUR_OPT",
            "Peak Hour Traffic Management",
            format!("{:.1}% of traffic cost occurs during peak hours", share),
            format!(
                "Schedule large transfers for off-peak hours ({:02}:00 - {:02}:00)",
                window.end_hour % 24,
                window.start_hour
            ),
            totals.peak_cost * policy.peak_savings,
            Priority::Medium,
        ));
    }

    let large_flows: Vec<&ClassifiedFlow> = flows
        .iter()
        .filter(|f| f.volume_gb > policy.large_flow_gb)
        .collect();

    if large_flows.len() > policy.large_flow_min_count {
        let large_cost: f64 = large_flows.iter().map(|f| f.cost).sum();
        crate::log_debug!(ctx, "RECOMMENDATION_MATCHED", id = "LARGE_FLOW_OPT", large_flows = large_flows.len());
        recommendations.push(recommendation(
            "LARGE_FLOW_OPT",
            "Large Flow Optimization",
            format!(
                "{} large flows detected (>{} GB each)",
                large_flows.len(),
                policy.large_flow_gb
            ),
            "Implement traffic shaping or compression for large transfers".to_string(),
            large_cost * policy.large_flow_savings,
            Priority::Medium,
        ));
    }

    recommendations.push(recommendation(
        "TRAFFIC_MONITORING",
        "Continuous Traffic Monitoring",
        "Regular monitoring can identify new cost patterns".to_string(),
        "Set up daily cost alerts and weekly reports".to_string(),
        totals.total_cost * policy.monitoring_savings,
        Priority::Low,
    ));
    recommendations.push(recommendation(
        "BANDWIDTH_UPGRADE",
        "Consider Bandwidth Upgrade",
        "High utilization during peak may indicate need for more bandwidth".to_string(),
        "Analyze if upgrading bandwidth plan reduces overall cost".to_string(),
        totals.total_cost * policy.bandwidth_review_savings,
        Priority::Low,
    ));

    recommendations
}

/// Sum recommendation savings and project them over a month.
pub fn estimate_savings(recommendations: &[Recommendation], total_cost: f64) -> SavingsEstimate {
    let immediate: f64 = recommendations.iter().map(|r| r.potential_savings).sum();

    SavingsEstimate {
        immediate_savings: round_to(immediate, COST_DECIMALS),
        monthly_savings: round_to(immediate * HOURS_PER_MONTH, COST_DECIMALS),
        savings_percentage: round_to(percentage(immediate, total_cost), PERCENT_DECIMALS),
    }
}
