//! Flow record parsing from JSON exports.
//!
//! Accepts the flow table layout produced by capture tooling: an array of
//! objects with `src_ip`/`dst_ip` (or `source`/`destination`), `total_bytes`
//! and optional `hour`, ports, protocol and timing fields.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::error::{FlowSpendError, Result};
use crate::logging::structured::LogContext;
use crate::models::{FlowRecord, TransportProtocol};

use super::values::{lookup_field, value_to_bytes, value_to_float, value_to_int, value_to_string};

lazy_static! {
    /// Dotted-quad IPv4 address, octet range checked separately
    static ref DOTTED_QUAD: Regex =
        Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$").unwrap();
}

/// Whether `address` is a dotted-quad IPv4 address with octets <= 255.
pub fn is_dotted_quad(address: &str) -> bool {
    DOTTED_QUAD
        .captures(address)
        .map(|caps| {
            caps.iter()
                .skip(1)
                .flatten()
                .all(|octet| octet.as_str().parse::<u16>().map(|v| v <= 255).unwrap_or(false))
        })
        .unwrap_or(false)
}

/// Parse a JSON array of flow records.
///
/// Addresses are required; everything else is defaulted. Non-numeric byte
/// counts become zero and out-of-range hours are dropped, both with a
/// warning. Addresses that are not dotted-quad are kept as-is.
pub fn parse_flow_records(json: &str, ctx: &LogContext) -> Result<Vec<FlowRecord>> {
    let value: Value = serde_json::from_str(json)?;

    let items = value.as_array().ok_or_else(|| FlowSpendError::InvalidRecord {
        index: 0,
        reason: "expected a JSON array of flow records".to_string(),
    })?;

    let records = items
        .iter()
        .enumerate()
        .map(|(idx, item)| parse_flow_record(idx, item, &ctx.with_flow(idx)))
        .collect::<Result<Vec<_>>>()?;

    log::info!("{} FLOW_RECORDS_PARSED count={}", ctx, records.len());

    Ok(records)
}

fn parse_flow_record(index: usize, item: &Value, ctx: &LogContext) -> Result<FlowRecord> {
    if !item.is_object() {
        return Err(FlowSpendError::InvalidRecord {
            index,
            reason: "record is not a JSON object".to_string(),
        });
    }

    let source = required_address(index, item, &["src_ip", "source"])?;
    let destination = required_address(index, item, &["dst_ip", "destination"])?;

    for address in [&source, &destination] {
        if !is_dotted_quad(address) {
            crate::log_warn!(ctx, "ADDRESS_NOT_DOTTED_QUAD", address = address);
        }
    }

    let total_bytes = match lookup_field(item, &["total_bytes", "bytes"]) {
        Some(v) => value_to_bytes(v).unwrap_or_else(|| {
            crate::log_warn!(ctx, "BYTES_COERCED", raw = v.to_string(), bytes = 0);
            0
        }),
        None => {
            crate::log_warn!(ctx, "BYTES_MISSING", bytes = 0);
            0
        }
    };

    let hour = lookup_field(item, &["hour"])
        .and_then(value_to_int)
        .and_then(|h| match u8::try_from(h) {
            Ok(h) if h < 24 => Some(h),
            _ => {
                crate::log_warn!(ctx, "HOUR_DROPPED", hour = h);
                None
            }
        });

    let port = |names: &[&str]| {
        lookup_field(item, names)
            .and_then(value_to_int)
            .and_then(|p| u16::try_from(p).ok())
    };

    let protocol = lookup_field(item, &["protocol", "proto"])
        .and_then(value_to_string)
        .and_then(|p| TransportProtocol::parse(&p));

    let packet_count = lookup_field(item, &["packet_count", "packets"])
        .and_then(value_to_int)
        .and_then(|c| u64::try_from(c).ok());

    Ok(FlowRecord {
        source,
        destination,
        total_bytes,
        hour,
        src_port: port(&["src_port", "sport"]),
        dst_port: port(&["dst_port", "dport"]),
        protocol,
        packet_count,
        duration_sec: lookup_field(item, &["duration_sec"]).and_then(value_to_float),
        bytes_per_sec: lookup_field(item, &["bytes_per_sec"]).and_then(value_to_float),
    })
}

fn required_address(index: usize, item: &Value, names: &[&str]) -> Result<String> {
    lookup_field(item, names)
        .and_then(value_to_string)
        .ok_or_else(|| FlowSpendError::InvalidRecord {
            index,
            reason: format!("missing address field {}", names.join("/")),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> LogContext {
        LogContext::new("test-run")
    }

    #[test]
    fn test_is_dotted_quad() {
        assert!(is_dotted_quad("192.168.1.10"));
        assert!(is_dotted_quad("0.0.0.0"));
        assert!(!is_dotted_quad("256.1.1.1"));
        assert!(!is_dotted_quad("10.0.0"));
        assert!(!is_dotted_quad("fe80::1"));
        assert!(!is_dotted_quad(""));
    }

    #[test]
    fn test_parse_full_record() {
        let json = r#"[{
            "src_ip": "192.168.1.10", "dst_ip": "52.95.110.1",
            "src_port": 51234, "dst_port": 443, "protocol": "TCP",
            "duration_sec": 12.5, "total_bytes": 2048, "packet_count": 4,
            "bytes_per_sec": 163.84, "hour": 14
        }]"#;

        let records = parse_flow_records(json, &ctx()).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.source, "192.168.1.10");
        assert_eq!(r.destination, "52.95.110.1");
        assert_eq!(r.total_bytes, 2048);
        assert_eq!(r.hour, Some(14));
        assert_eq!(r.src_port, Some(51234));
        assert_eq!(r.dst_port, Some(443));
        assert_eq!(r.protocol, Some(TransportProtocol::Tcp));
        assert_eq!(r.packet_count, Some(4));
        assert_eq!(r.duration_sec, Some(12.5));
    }

    #[test]
    fn test_parse_lenient_fields() {
        let json = r#"[
            {"source": "10.0.0.1", "destination": "8.8.8.8", "total_bytes": "4096"},
            {"src_ip": "10.0.0.1", "dst_ip": "8.8.8.8", "total_bytes": "n/a", "hour": 42},
            {"src_ip": "10.0.0.1", "dst_ip": "not-an-ip"}
        ]"#;

        let records = parse_flow_records(json, &ctx()).unwrap();
        assert_eq!(records[0].total_bytes, 4096);
        assert_eq!(records[1].total_bytes, 0);
        assert_eq!(records[1].hour, None);
        assert_eq!(records[2].total_bytes, 0);
        assert_eq!(records[2].destination, "not-an-ip");
    }

    #[test]
    fn test_missing_address_is_error() {
        let json = r#"[{"src_ip": "10.0.0.1", "dst_ip": "8.8.8.8", "total_bytes": 1},
                       {"src_ip": "10.0.0.1", "total_bytes": 1}]"#;

        match parse_flow_records(json, &ctx()) {
            Err(FlowSpendError::InvalidRecord { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("dst_ip"));
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_non_array_and_bad_json() {
        assert!(matches!(
            parse_flow_records(r#"{"src_ip": "10.0.0.1"}"#, &ctx()),
            Err(FlowSpendError::InvalidRecord { .. })
        ));
        assert!(matches!(
            parse_flow_records("[{", &ctx()),
            Err(FlowSpendError::JsonParse(_))
        ));
        assert!(parse_flow_records("[]", &ctx()).unwrap().is_empty());
    }
}
