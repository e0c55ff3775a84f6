//! Per-flow cost calculation.

use crate::config::CostConfig;
use crate::logging::structured::LogContext;
use crate::models::{bytes_to_gb, ClassifiedFlow, FlowRecord, TrafficCategory};

use super::traffic::classify_traffic;

/// Decimal places kept on every monetary amount.
pub const COST_DECIMALS: i32 = 4;

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Whether an hour of day falls in the configured peak window.
///
/// Flows without an hour are off-peak.
pub fn is_peak_hour(config: &CostConfig, hour: Option<u8>) -> bool {
    hour.map(|h| config.peak_window.contains(h)).unwrap_or(false)
}

/// Cost of moving `total_bytes` of `category` traffic.
///
/// `bytes / 2^30 * rate`, times the peak surcharge when `is_peak`, rounded
/// to 4 decimals. Never negative.
pub fn calculate_cost(
    config: &CostConfig,
    category: TrafficCategory,
    total_bytes: u64,
    is_peak: bool,
) -> f64 {
    if total_bytes == 0 {
        return 0.0;
    }

    let mut cost = bytes_to_gb(total_bytes) * config.rate_for(category);
    if is_peak {
        cost *= config.peak_surcharge;
    }

    round_to(cost.max(0.0), COST_DECIMALS)
}

/// Classify and cost a single flow.
pub fn classify_flow(config: &CostConfig, record: FlowRecord) -> ClassifiedFlow {
    let category = classify_traffic(config, &record.source, &record.destination);
    let is_peak = is_peak_hour(config, record.hour);
    let cost = calculate_cost(config, category, record.total_bytes, is_peak);
    let volume_gb = record.volume_gb();

    ClassifiedFlow {
        record,
        category,
        is_peak,
        volume_gb,
        cost,
    }
}

/// Classify and cost a batch of flows, preserving input order.
pub fn classify_flows(
    config: &CostConfig,
    records: Vec<FlowRecord>,
    ctx: &LogContext,
) -> Vec<ClassifiedFlow> {
    log::debug!("{} CLASSIFY_START flows={}", ctx, records.len());

    let flows: Vec<ClassifiedFlow> = records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            if record.hour.map(|h| h >= 24).unwrap_or(false) {
                crate::log_warn!(
                    ctx.with_flow(idx),
                    "HOUR_OUT_OF_RANGE",
                    hour = record.hour,
                );
            }

            let flow = classify_flow(config, record);

            log::debug!(
                "{} FLOW_CLASSIFIED category={} peak={} gb={:.4} cost={:.4}",
                ctx.with_flow(idx),
                flow.category,
                flow.is_peak,
                flow.volume_gb,
                flow.cost
            );

            flow
        })
        .collect();

    log::debug!("{} CLASSIFY_COMPLETE flows={}", ctx, flows.len());

    flows
}

#[cfg(test)]
mod tests {
    use super::*;

    const GB: u64 = 1 << 30;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 4), 1.2346);
        assert_eq!(round_to(77.272727, 2), 77.27);
        assert_eq!(round_to(0.0, 4), 0.0);
    }

    #[test]
    fn test_cost_per_category() {
        let config = CostConfig::default();
        assert_eq!(calculate_cost(&config, TrafficCategory::CloudEgress, GB, false), 85.0);
        assert_eq!(calculate_cost(&config, TrafficCategory::InternetEgress, GB, false), 75.0);
        assert_eq!(calculate_cost(&config, TrafficCategory::InternetIngress, GB, false), 15.0);
        assert_eq!(calculate_cost(&config, TrafficCategory::Other, GB, false), 10.0);
        assert_eq!(calculate_cost(&config, TrafficCategory::Internal, 5 * GB, true), 0.0);
    }

    #[test]
    fn test_peak_surcharge() {
        let config = CostConfig::default();
        assert_eq!(calculate_cost(&config, TrafficCategory::CloudEgress, 2 * GB, true), 255.0);
    }

    #[test]
    fn test_zero_bytes_cost_nothing() {
        let config = CostConfig::default();
        assert_eq!(calculate_cost(&config, TrafficCategory::CloudEgress, 0, true), 0.0);
    }

    #[test]
    fn test_cost_rounded_to_four_places() {
        let config = CostConfig::default();
        // 1000 bytes of egress is far below 1e-4 currency units
        assert_eq!(calculate_cost(&config, TrafficCategory::InternetEgress, 1000, false), 0.0001);
        assert_eq!(calculate_cost(&config, TrafficCategory::InternetEgress, 100, false), 0.0);
    }

    #[test]
    fn test_is_peak_hour() {
        let config = CostConfig::default();
        assert!(is_peak_hour(&config, Some(14)));
        assert!(!is_peak_hour(&config, Some(3)));
        assert!(!is_peak_hour(&config, Some(23)));
        assert!(!is_peak_hour(&config, None));
        assert!(!is_peak_hour(&config, Some(99)));
    }

    #[test]
    fn test_classify_flow() {
        let config = CostConfig::default();
        let flow = classify_flow(&config, FlowRecord::new("10.0.0.1", "52.1.1.1", GB).with_hour(10));
        assert_eq!(flow.category, TrafficCategory::CloudEgress);
        assert!(flow.is_peak);
        assert_eq!(flow.volume_gb, 1.0);
        assert_eq!(flow.cost, 127.5);
    }

    #[test]
    fn test_classify_flows_preserves_order() {
        let config = CostConfig::default();
        let ctx = LogContext::new("test-run");
        let records = vec![
            FlowRecord::new("10.0.0.1", "10.0.0.2", GB),
            FlowRecord::new("8.8.4.4", "10.0.0.2", GB),
            FlowRecord::new("10.0.0.1", "1.1.1.1", GB).with_hour(30),
        ];

        let flows = classify_flows(&config, records, &ctx);
        let categories: Vec<_> = flows.iter().map(|f| f.category).collect();
        assert_eq!(
            categories,
            vec![
                TrafficCategory::Internal,
                TrafficCategory::InternetIngress,
                TrafficCategory::InternetEgress,
            ]
        );
        assert!(!flows[2].is_peak);
    }
}
