//! End-to-end tests: packets or JSON flows in, cost report out.

use flowspend_core::extraction::flows::{aggregate_packets, PacketRecord};
use flowspend_core::extraction::records::parse_flow_records;
use flowspend_core::logging::LogContext;
use flowspend_core::models::{Priority, TransportProtocol};
use flowspend_core::pipeline::{run_cost_analysis_with_context, RunContext};
use flowspend_core::scaling::{assign_synthetic_hours, scale_flows, ScaleOptions};
use flowspend_core::{run_cost_analysis, CostConfig, TrafficCategory};

const GB: u64 = 1 << 30;

#[test]
fn test_json_flows_to_report() {
    let json = format!(
        r#"[
            {{"src_ip": "192.168.1.10", "dst_ip": "52.95.110.1", "total_bytes": {}, "hour": 14}},
            {{"src_ip": "192.168.1.10", "dst_ip": "10.0.0.5", "total_bytes": {}, "hour": 3}},
            {{"src_ip": "10.0.0.7", "dst_ip": "93.184.216.34", "total_bytes": "{}"}}
        ]"#,
        2 * GB,
        5 * GB,
        GB
    );

    let ctx = RunContext::new();
    let records = parse_flow_records(&json, &ctx.log_context()).unwrap();
    let report = run_cost_analysis_with_context(&CostConfig::default(), records, &ctx);

    assert_eq!(report.metadata.report_id, ctx.run_id);
    assert_eq!(report.summary.total_cost, 330.0);
    assert_eq!(report.summary.total_data_gb, 8.0);
    assert_eq!(report.summary.peak_traffic_percentage, 77.27);
    assert_eq!(report.breakdown.len(), 3);
    assert_eq!(report.top_expensive_flows[0].traffic_type, TrafficCategory::CloudEgress);
    assert_eq!(report.top_costly_sources[0].src_ip, "192.168.1.10");
    assert_eq!(report.top_costly_sources[0].total_cost, 255.0);
    assert_eq!(report.recommendations[0].priority, Priority::High);
}

#[test]
fn test_packets_scaled_and_costed() {
    let tcp = Some(TransportProtocol::Tcp);
    let packet = |src: &str, dst: &str, ts: f64, len: u64| PacketRecord {
        source: src.to_string(),
        destination: dst.to_string(),
        src_port: 40000,
        dst_port: 443,
        protocol: tcp,
        timestamp: ts,
        length: len,
    };

    let packets = vec![
        packet("10.0.0.1", "52.1.1.1", 0.0, 1500),
        packet("10.0.0.1", "52.1.1.1", 1.0, 1500),
        packet("93.184.216.34", "10.0.0.1", 1.5, 1000),
        packet("10.0.0.1", "10.0.0.2", 2.0, 500),
    ];

    let log_ctx = LogContext::new("test-run");
    let mut flows = aggregate_packets(&packets, &log_ctx);
    assert_eq!(flows.len(), 3);

    let options = ScaleOptions {
        boost_count: 0,
        ..Default::default()
    };
    let summary = scale_flows(&mut flows, &options, &log_ctx);
    assert_eq!(summary.scaled_bytes, 4_500_000_000);

    assert_eq!(assign_synthetic_hours(&mut flows), 3);

    let config = CostConfig::default();
    let report = run_cost_analysis(&config, flows);

    // 3e9 bytes cloud egress at 14:00, 1e9 bytes ingress at 03:00, internal at 14:00
    let cloud_gb = 3_000_000_000f64 / GB as f64;
    let ingress_gb = 1_000_000_000f64 / GB as f64;
    let expected = cloud_gb * 85.0 * 1.5 + ingress_gb * 15.0;
    assert!((report.summary.total_cost - expected).abs() < 1e-3);

    assert_eq!(report.breakdown[&TrafficCategory::CloudEgress].flow_count, 1);
    assert_eq!(report.breakdown[&TrafficCategory::InternetIngress].flow_count, 1);
    assert_eq!(report.breakdown[&TrafficCategory::Internal].total_cost, 0.0);
    assert!(report.summary.peak_traffic_percentage > 90.0);
}

#[test]
fn test_custom_config_changes_costs() {
    let config = CostConfig::from_json(
        r#"{
            "currency": "USD",
            "rates": {"CLOUD_EGRESS": 0.09, "INTERNET_EGRESS": 0.05, "OTHER": 0.0},
            "peak_surcharge": 1.0,
            "top_flows": 1
        }"#,
    )
    .unwrap();

    let records = parse_flow_records(
        &format!(
            r#"[{{"src_ip": "10.0.0.1", "dst_ip": "52.1.1.1", "total_bytes": {gb}, "hour": 12}},
                {{"src_ip": "10.0.0.1", "dst_ip": "1.1.1.1", "total_bytes": {gb}}}]"#,
            gb = 100 * GB
        ),
        &LogContext::new("test-run"),
    )
    .unwrap();

    let report = run_cost_analysis(&config, records);
    assert_eq!(report.metadata.currency, "USD");
    assert_eq!(report.metadata.peak_surcharge_percent, 0.0);
    assert_eq!(report.summary.total_cost, 14.0);
    assert_eq!(report.top_expensive_flows.len(), 1);
    assert_eq!(report.top_expensive_flows[0].cost, 9.0);
    assert!(report.executive_summary().contains("Total Cost: $14.00"));
}

#[test]
fn test_empty_batch() {
    let report = run_cost_analysis(&CostConfig::default(), Vec::new());

    assert_eq!(report.summary.total_flows, 0);
    assert_eq!(report.summary.total_cost, 0.0);
    assert!(report.breakdown.is_empty());
    assert!(report.top_expensive_flows.is_empty());
    assert!(report.top_costly_sources.is_empty());
    let ids: Vec<&str> = report.recommendations.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["TRAFFIC_MONITORING", "BANDWIDTH_UPGRADE"]);
    assert_eq!(report.estimated_savings.immediate_savings, 0.0);
}
