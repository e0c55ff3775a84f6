//! Packet-to-flow aggregation.
//!
//! Groups decoded packet summaries into flows keyed by their 5-tuple.
//! Reading capture files is left to the caller; this works on packets that
//! have already been decoded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classification::cost::round_to;
use crate::logging::structured::LogContext;
use crate::models::{FlowRecord, TransportProtocol};

/// Durations shorter than this are clamped when computing throughput.
const MIN_DURATION_SECS: f64 = 0.1;

/// One decoded IP packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketRecord {
    pub source: String,
    pub destination: String,
    pub src_port: u16,
    pub dst_port: u16,
    /// `None` for anything other than TCP or UDP.
    pub protocol: Option<TransportProtocol>,
    /// Capture timestamp in seconds.
    pub timestamp: f64,
    /// Frame length in bytes.
    pub length: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FlowKey {
    source: String,
    destination: String,
    src_port: u16,
    dst_port: u16,
    protocol: TransportProtocol,
}

#[derive(Debug)]
struct FlowStats {
    key: FlowKey,
    start_time: f64,
    end_time: f64,
    total_bytes: u64,
    packet_count: u64,
}

impl FlowStats {
    fn into_record(self) -> FlowRecord {
        let duration = round_to(self.end_time - self.start_time, 2);
        let bytes_per_sec = round_to(
            self.total_bytes as f64 / duration.max(MIN_DURATION_SECS),
            2,
        );

        let mut record = FlowRecord::new(&self.key.source, &self.key.destination, self.total_bytes);
        record.src_port = Some(self.key.src_port);
        record.dst_port = Some(self.key.dst_port);
        record.protocol = Some(self.key.protocol);
        record.packet_count = Some(self.packet_count);
        record.duration_sec = Some(duration);
        record.bytes_per_sec = Some(bytes_per_sec);
        record
    }
}

/// Aggregate packets into flows, in first-seen order.
///
/// Packets that are neither TCP nor UDP are skipped. Flow direction is
/// kept: A->B and B->A are separate flows.
pub fn aggregate_packets(packets: &[PacketRecord], ctx: &LogContext) -> Vec<FlowRecord> {
    let mut flows: Vec<FlowStats> = Vec::new();
    let mut index: HashMap<FlowKey, usize> = HashMap::new();
    let mut skipped = 0usize;

    for packet in packets {
        let protocol = match packet.protocol {
            Some(p) => p,
            None => {
                skipped += 1;
                continue;
            }
        };

        let key = FlowKey {
            source: packet.source.clone(),
            destination: packet.destination.clone(),
            src_port: packet.src_port,
            dst_port: packet.dst_port,
            protocol,
        };

        match index.get(&key) {
            Some(&slot) => {
                let flow = &mut flows[slot];
                flow.start_time = flow.start_time.min(packet.timestamp);
                flow.end_time = flow.end_time.max(packet.timestamp);
                flow.total_bytes = flow.total_bytes.saturating_add(packet.length);
                flow.packet_count += 1;
            }
            None => {
                index.insert(key.clone(), flows.len());
                flows.push(FlowStats {
                    key,
                    start_time: packet.timestamp,
                    end_time: packet.timestamp,
                    total_bytes: packet.length,
                    packet_count: 1,
                });
            }
        }
    }

    crate::log_info!(
        ctx,
        "FLOWS_EXTRACTED",
        packets = packets.len(),
        flows = flows.len(),
        skipped = skipped,
    );

    flows.into_iter().map(FlowStats::into_record).collect()
}
