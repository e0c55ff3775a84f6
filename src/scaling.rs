//! Synthetic traffic scaling.
//!
//! Lab captures are tiny. Scaling multiplies every flow's volume up to
//! enterprise levels and boosts a seeded random sample of flows so the
//! report has a realistic heavy tail. Also assigns synthetic hours to flows
//! captured without a timestamp.

use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::logging::structured::LogContext;
use crate::models::{bytes_to_gb, FlowRecord};

/// Hour given to even-indexed flows without an hour (2 PM, peak).
pub const SYNTHETIC_PEAK_HOUR: u8 = 14;
/// Hour given to odd-indexed flows without an hour (3 AM, off-peak).
pub const SYNTHETIC_OFF_PEAK_HOUR: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleOptions {
    /// Multiplier applied to every flow.
    pub factor: u64,
    /// How many flows get the extra boost.
    pub boost_count: usize,
    pub boost_multiplier: u64,
    /// Seed for picking boosted flows. Same seed, same picks.
    pub seed: u64,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            factor: 1_000_000,
            boost_count: 10,
            boost_multiplier: 10,
            seed: 42,
        }
    }
}

/// Volumes before and after scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleSummary {
    pub original_bytes: u64,
    pub scaled_bytes: u64,
    pub original_gb: f64,
    pub scaled_gb: f64,
    /// Indices of the boosted flows, ascending.
    pub boosted: Vec<usize>,
}

fn total_bytes(flows: &[FlowRecord]) -> u64 {
    flows
        .iter()
        .fold(0u64, |acc, f| acc.saturating_add(f.total_bytes))
}

/// Scale flow volumes in place.
///
/// Byte counts saturate at `u64::MAX`. Per-flow throughput is rescaled
/// along with the volume.
pub fn scale_flows(flows: &mut [FlowRecord], options: &ScaleOptions, ctx: &LogContext) -> ScaleSummary {
    let original_bytes = total_bytes(flows);

    for flow in flows.iter_mut() {
        scale_flow(flow, options.factor);
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let amount = options.boost_count.min(flows.len());
    let mut boosted: Vec<usize> = sample(&mut rng, flows.len(), amount).into_vec();
    boosted.sort_unstable();

    for &idx in &boosted {
        scale_flow(&mut flows[idx], options.boost_multiplier);
    }

    let scaled_bytes = total_bytes(flows);

    crate::log_info!(
        ctx,
        "FLOWS_SCALED",
        factor = options.factor,
        boosted = boosted.len(),
        original_bytes = original_bytes,
        scaled_bytes = scaled_bytes,
    );

    ScaleSummary {
        original_bytes,
        scaled_bytes,
        original_gb: bytes_to_gb(original_bytes),
        scaled_gb: bytes_to_gb(scaled_bytes),
        boosted,
    }
}

fn scale_flow(flow: &mut FlowRecord, factor: u64) {
    flow.total_bytes = flow.total_bytes.saturating_mul(factor);
    if let Some(rate) = flow.bytes_per_sec.as_mut() {
        *rate *= factor as f64;
    }
}

/// Give flows without an hour an alternating peak/off-peak hour.
///
/// Even positions get 14:00, odd positions 03:00. Flows that already carry
/// an hour are left alone. Returns how many flows were assigned.
pub fn assign_synthetic_hours(flows: &mut [FlowRecord]) -> usize {
    let mut assigned = 0;
    for (idx, flow) in flows.iter_mut().enumerate() {
        if flow.hour.is_none() {
            flow.hour = Some(if idx % 2 == 0 {
                SYNTHETIC_PEAK_HOUR
            } else {
                SYNTHETIC_OFF_PEAK_HOUR
            });
            assigned += 1;
        }
    }
    assigned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flows(n: usize) -> Vec<FlowRecord> {
        (0..n)
            .map(|i| FlowRecord::new("10.0.0.1", &format!("93.184.0.{}", i), 1000))
            .collect()
    }

    #[test]
    fn test_scale_without_boost() {
        let mut data = flows(3);
        let options = ScaleOptions {
            boost_count: 0,
            ..Default::default()
        };
        let summary = scale_flows(&mut data, &options, &LogContext::new("test-run"));

        assert!(data.iter().all(|f| f.total_bytes == 1_000_000_000));
        assert_eq!(summary.original_bytes, 3000);
        assert_eq!(summary.scaled_bytes, 3_000_000_000);
        assert!(summary.boosted.is_empty());
    }

    #[test]
    fn test_boost_count_capped_by_flow_count() {
        let mut data = flows(4);
        let summary = scale_flows(&mut data, &ScaleOptions::default(), &LogContext::new("test-run"));

        assert_eq!(summary.boosted, vec![0, 1, 2, 3]);
        assert!(data.iter().all(|f| f.total_bytes == 10_000_000_000));
    }

    #[test]
    fn test_boost_is_seeded() {
        let options = ScaleOptions {
            boost_count: 5,
            ..Default::default()
        };
        let ctx = LogContext::new("test-run");

        let mut a = flows(50);
        let mut b = flows(50);
        let first = scale_flows(&mut a, &options, &ctx);
        let second = scale_flows(&mut b, &options, &ctx);

        assert_eq!(first.boosted, second.boosted);
        assert_eq!(first.boosted.len(), 5);
        assert_eq!(a, b);

        let boosted = a.iter().filter(|f| f.total_bytes == 10_000_000_000).count();
        assert_eq!(boosted, 5);
    }

    #[test]
    fn test_scale_saturates() {
        let mut data = vec![FlowRecord::new("10.0.0.1", "8.8.8.8", u64::MAX / 2)];
        let options = ScaleOptions {
            boost_count: 0,
            ..Default::default()
        };
        scale_flows(&mut data, &options, &LogContext::new("test-run"));
        assert_eq!(data[0].total_bytes, u64::MAX);
    }

    #[test]
    fn test_assign_synthetic_hours() {
        let mut data = flows(4);
        data[1].hour = Some(20);

        let assigned = assign_synthetic_hours(&mut data);
        assert_eq!(assigned, 3);
        let hours: Vec<_> = data.iter().map(|f| f.hour).collect();
        assert_eq!(hours, vec![Some(14), Some(20), Some(14), Some(3)]);
    }
}
