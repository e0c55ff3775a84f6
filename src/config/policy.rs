//! Recommendation thresholds and savings ratios.

use serde::{Deserialize, Serialize};

use crate::error::{FlowSpendError, Result};

/// Thresholds for the rule-based recommendations.
///
/// Ratios are fractions (0.3 = 30%). Savings are fixed heuristics, not
/// forecasts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationPolicy {
    /// Cloud egress cost above which CDN/off-peak advice is emitted.
    pub cloud_egress_threshold: f64,
    pub cloud_egress_savings: f64,
    /// Share of total cost spent at peak above which scheduling advice is emitted.
    pub peak_share_threshold: f64,
    pub peak_savings: f64,
    /// Flows strictly larger than this many GB count as large.
    pub large_flow_gb: f64,
    /// Large-flow advice needs strictly more large flows than this.
    pub large_flow_min_count: usize,
    pub large_flow_savings: f64,
    pub monitoring_savings: f64,
    pub bandwidth_review_savings: f64,
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self {
            cloud_egress_threshold: 100.0,
            cloud_egress_savings: 0.30,
            peak_share_threshold: 0.60,
            peak_savings: 0.40,
            large_flow_gb: 0.5,
            large_flow_min_count: 3,
            large_flow_savings: 0.20,
            monitoring_savings: 0.15,
            bandwidth_review_savings: 0.25,
        }
    }
}

impl RecommendationPolicy {
    pub fn validate(&self) -> Result<()> {
        let ratios = [
            ("cloud_egress_savings", self.cloud_egress_savings),
            ("peak_share_threshold", self.peak_share_threshold),
            ("peak_savings", self.peak_savings),
            ("large_flow_savings", self.large_flow_savings),
            ("monitoring_savings", self.monitoring_savings),
            ("bandwidth_review_savings", self.bandwidth_review_savings),
        ];

        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(FlowSpendError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if !self.cloud_egress_threshold.is_finite() || self.cloud_egress_threshold < 0.0 {
            return Err(FlowSpendError::InvalidConfig(format!(
                "cloud_egress_threshold must be a non-negative amount, got {}",
                self.cloud_egress_threshold
            )));
        }

        if !self.large_flow_gb.is_finite() || self.large_flow_gb < 0.0 {
            return Err(FlowSpendError::InvalidConfig(format!(
                "large_flow_gb must be a non-negative volume, got {}",
                self.large_flow_gb
            )));
        }

        Ok(())
    }
}
