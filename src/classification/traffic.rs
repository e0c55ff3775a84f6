//! Traffic category decision logic.

use crate::config::CostConfig;
use crate::models::TrafficCategory;

/// Whether `address` starts with any of `prefixes`.
///
/// Plain string prefix match, not subnet-aware: "10." matches "10.1.2.3"
/// and also "10.foo".
pub fn matches_prefix(address: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|p| address.starts_with(p.as_str()))
}

/// Determine the traffic category of a flow.
///
/// # Decision Order
/// 1. Internal source and internal destination -> Internal
/// 2. Internal source, cloud destination -> CloudEgress
/// 3. Internal source, any other destination -> InternetEgress
/// 4. External source, internal destination -> InternetIngress
/// 5. Otherwise -> Other
///
/// First match wins. Addresses that match no prefix (empty or malformed
/// strings included) end up as Other.
pub fn classify_traffic(config: &CostConfig, source: &str, destination: &str) -> TrafficCategory {
    let src_internal = matches_prefix(source, &config.internal_prefixes);
    let dst_internal = matches_prefix(destination, &config.internal_prefixes);

    if src_internal && dst_internal {
        return TrafficCategory::Internal;
    }

    if src_internal {
        if matches_prefix(destination, &config.cloud_prefixes) {
            return TrafficCategory::CloudEgress;
        }
        return TrafficCategory::InternetEgress;
    }

    if dst_internal {
        return TrafficCategory::InternetIngress;
    }

    TrafficCategory::Other
}
