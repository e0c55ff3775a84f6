//! Rate tables, address prefixes and the peak window.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FlowSpendError, Result};
use crate::models::TrafficCategory;

use super::policy::RecommendationPolicy;

/// Rate applied when neither the category nor OTHER has a table entry.
pub const FALLBACK_RATE: f64 = 10.0;

/// Peak window over a 24-hour clock, `[start_hour, end_hour)`.
///
/// A window with `start_hour > end_hour` wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakWindow {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl Default for PeakWindow {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 23,
        }
    }
}

impl PeakWindow {
    pub fn contains(&self, hour: u8) -> bool {
        if hour >= 24 {
            return false;
        }
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }

    /// Human readable window, e.g. "09:00 - 23:00".
    pub fn describe(&self) -> String {
        format!("{:02}:00 - {:02}:00", self.start_hour, self.end_hour)
    }

    fn validate(&self) -> Result<()> {
        if self.start_hour > 23 || self.end_hour > 24 {
            return Err(FlowSpendError::InvalidConfig(format!(
                "peak window {} is outside a 24-hour clock",
                self.describe()
            )));
        }
        if self.start_hour == self.end_hour {
            return Err(FlowSpendError::InvalidConfig(format!(
                "peak window {} is empty",
                self.describe()
            )));
        }
        Ok(())
    }
}

/// Immutable cost model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Currency code reported alongside every amount.
    pub currency: String,
    /// Currency units per binary GB, by category.
    pub rates: BTreeMap<TrafficCategory, f64>,
    pub internal_prefixes: Vec<String>,
    pub cloud_prefixes: Vec<String>,
    pub peak_window: PeakWindow,
    /// Multiplier applied to peak-hour costs (1.5 = +50%).
    pub peak_surcharge: f64,
    pub top_flows: usize,
    pub top_sources: usize,
    pub recommendations: RecommendationPolicy,
}

impl Default for CostConfig {
    fn default() -> Self {
        let rates = BTreeMap::from([
            (TrafficCategory::CloudEgress, 85.0),
            (TrafficCategory::InternetEgress, 75.0),
            (TrafficCategory::InternetIngress, 15.0),
            (TrafficCategory::Internal, 0.0),
            (TrafficCategory::Other, 10.0),
        ]);

        let mut internal_prefixes = vec!["192.168.".to_string(), "10.".to_string()];
        internal_prefixes.extend((16..=31).map(|octet| format!("172.{}.", octet)));

        let cloud_prefixes = [
            "20.", "13.", "52.", "54.", // Azure, AWS
            "35.", "34.", "8.8.", // Google Cloud
            "23.", "45.", "51.", // Netflix, Dropbox
        ]
        .iter()
        .map(|p| p.to_string())
        .collect();

        Self {
            currency: "NRS".to_string(),
            rates,
            internal_prefixes,
            cloud_prefixes,
            peak_window: PeakWindow::default(),
            peak_surcharge: 1.5,
            top_flows: 10,
            top_sources: 5,
            recommendations: RecommendationPolicy::default(),
        }
    }
}

impl CostConfig {
    /// Parse a configuration from JSON and validate it.
    ///
    /// Omitted fields take their defaults. A `rates` object replaces the
    /// whole default table.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CostConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rate for a category, falling back to the OTHER rate.
    pub fn rate_for(&self, category: TrafficCategory) -> f64 {
        self.rates
            .get(&category)
            .or_else(|| self.rates.get(&TrafficCategory::Other))
            .copied()
            .unwrap_or(FALLBACK_RATE)
    }

    /// Surcharge expressed as a percentage (1.5 -> 50.0).
    pub fn surcharge_percent(&self) -> f64 {
        (self.peak_surcharge - 1.0) * 100.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            return Err(FlowSpendError::InvalidConfig(
                "currency must not be empty".to_string(),
            ));
        }

        for (category, rate) in &self.rates {
            if !rate.is_finite() || *rate < 0.0 {
                return Err(FlowSpendError::InvalidConfig(format!(
                    "rate for {} must be a non-negative amount, got {}",
                    category, rate
                )));
            }
        }

        if !self.peak_surcharge.is_finite() || self.peak_surcharge < 1.0 {
            return Err(FlowSpendError::InvalidConfig(format!(
                "peak_surcharge must be at least 1.0, got {}",
                self.peak_surcharge
            )));
        }

        self.peak_window.validate()?;

        if self.top_flows == 0 || self.top_sources == 0 {
            return Err(FlowSpendError::InvalidConfig(
                "top_flows and top_sources must be at least 1".to_string(),
            ));
        }

        let mut prefixes = self.internal_prefixes.iter().chain(&self.cloud_prefixes);
        if prefixes.any(|p| p.is_empty()) {
            return Err(FlowSpendError::InvalidConfig(
                "address prefixes must not be empty strings".to_string(),
            ));
        }

        self.recommendations.validate()
    }
}
