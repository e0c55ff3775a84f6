//! Python bindings.
//!
//! Exposes report generation to the Python tooling around the capture
//! pipeline. JSON strings cross the boundary in both directions.

use anyhow::Context;
use pyo3::prelude::*;

use crate::config::CostConfig;
use crate::extraction::records::parse_flow_records;
use crate::pipeline::analysis::run_cost_analysis_with_context;
use crate::pipeline::context::RunContext;
use crate::{classify_traffic, init_logger};

/// Generate a cost report from a JSON array of flow records.
///
/// # Arguments
/// * `flows_json` - JSON array of flow records (`src_ip`, `dst_ip`, `total_bytes`, `hour`)
/// * `config_json` - Optional JSON cost configuration; defaults apply when omitted
///
/// # Returns
/// The report as pretty-printed JSON
#[pyfunction]
#[pyo3(signature = (flows_json, config_json=None))]
fn generate_cost_report(flows_json: &str, config_json: Option<&str>) -> anyhow::Result<String> {
    init_logger();

    let config = match config_json {
        Some(json) => CostConfig::from_json(json).context("loading cost configuration")?,
        None => CostConfig::default(),
    };

    let ctx = RunContext::new();
    let records =
        parse_flow_records(flows_json, &ctx.log_context()).context("parsing flow records")?;

    let report = run_cost_analysis_with_context(&config, records, &ctx);
    Ok(report.to_json()?)
}

/// Classify a single source/destination pair under the default config.
#[pyfunction]
fn classify(source: &str, destination: &str) -> String {
    classify_traffic(&CostConfig::default(), source, destination)
        .as_str()
        .to_string()
}

/// Python module definition
#[pymodule]
fn flowspend_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(generate_cost_report, m)?)?;
    m.add_function(wrap_pyfunction!(classify, m)?)?;
    Ok(())
}
