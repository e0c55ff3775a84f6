//! Flow records and their classified form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bytes in one binary gigabyte (2^30).
pub const BYTES_PER_GB: f64 = (1u64 << 30) as f64;

/// Convert a byte count to binary gigabytes.
pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

/// Traffic category assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrafficCategory {
    Internal,
    CloudEgress,
    InternetEgress,
    InternetIngress,
    Other,
}

impl TrafficCategory {
    pub const ALL: [TrafficCategory; 5] = [
        TrafficCategory::Internal,
        TrafficCategory::CloudEgress,
        TrafficCategory::InternetEgress,
        TrafficCategory::InternetIngress,
        TrafficCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficCategory::Internal => "INTERNAL",
            TrafficCategory::CloudEgress => "CLOUD_EGRESS",
            TrafficCategory::InternetEgress => "INTERNET_EGRESS",
            TrafficCategory::InternetIngress => "INTERNET_INGRESS",
            TrafficCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for TrafficCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport protocol of a flow's 5-tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportProtocol {
    Tcp,
    Udp,
}

impl TransportProtocol {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "TCP" => Some(TransportProtocol::Tcp),
            "UDP" => Some(TransportProtocol::Udp),
            _ => None,
        }
    }
}

/// One flow as produced by packet aggregation or parsed from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    #[serde(rename = "src_ip", alias = "source")]
    pub source: String,
    #[serde(rename = "dst_ip", alias = "destination")]
    pub destination: String,
    pub total_bytes: u64,
    /// Hour of day (0-23) the flow was observed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u8>,

    // 5-tuple and timing detail, carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<TransportProtocol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_per_sec: Option<f64>,
}

impl FlowRecord {
    pub fn new(source: &str, destination: &str, total_bytes: u64) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            total_bytes,
            hour: None,
            src_port: None,
            dst_port: None,
            protocol: None,
            packet_count: None,
            duration_sec: None,
            bytes_per_sec: None,
        }
    }

    pub fn with_hour(mut self, hour: u8) -> Self {
        self.hour = Some(hour);
        self
    }

    pub fn volume_gb(&self) -> f64 {
        bytes_to_gb(self.total_bytes)
    }
}

/// A flow enriched with its category, peak flag and cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedFlow {
    #[serde(flatten)]
    pub record: FlowRecord,
    #[serde(rename = "traffic_type")]
    pub category: TrafficCategory,
    pub is_peak: bool,
    #[serde(rename = "total_gb")]
    pub volume_gb: f64,
    pub cost: f64,
}
