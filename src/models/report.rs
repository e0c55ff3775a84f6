//! Cost report structure.
//!
//! Built once per run by the aggregator and handed to renderers read-only.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::flow::TrafficCategory;

/// Full cost analysis report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub breakdown: BTreeMap<TrafficCategory, CategoryBreakdown>,
    pub top_expensive_flows: Vec<FlowCostEntry>,
    pub top_costly_sources: Vec<SourceCostEntry>,
    pub recommendations: Vec<Recommendation>,
    pub estimated_savings: SavingsEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub report_id: String,
    pub currency: String,
    pub unit: String,
    pub generated_at: DateTime<Utc>,
    pub peak_hours: String,
    /// Peak surcharge as a percentage (1.5x -> 50.0).
    pub peak_surcharge_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_flows: usize,
    pub total_data_gb: f64,
    pub total_cost: f64,
    pub average_cost_per_gb: f64,
    pub monthly_projection: f64,
    pub peak_traffic_cost: f64,
    pub peak_traffic_percentage: f64,
    pub off_peak_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub total_gb: f64,
    pub total_cost: f64,
    pub flow_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowCostEntry {
    pub src_ip: String,
    pub dst_ip: String,
    pub traffic_type: TrafficCategory,
    pub total_gb: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCostEntry {
    pub src_ip: String,
    pub total_cost: f64,
    pub total_gb: f64,
    pub flow_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

/// One cost optimization suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub suggestion: String,
    pub potential_savings: f64,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsEstimate {
    pub immediate_savings: f64,
    pub monthly_savings: f64,
    pub savings_percentage: f64,
}
