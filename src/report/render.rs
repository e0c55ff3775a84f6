//! Report rendering.
//!
//! JSON for dashboards and a plain-text executive summary for humans.

use crate::error::Result;
use crate::models::Report;

/// Number of recommendations listed in the executive summary.
const SUMMARY_RECOMMENDATIONS: usize = 3;

/// Format an amount with its currency code.
pub fn format_currency(amount: f64, currency: &str) -> String {
    match currency {
        "USD" => format!("${:.2}", amount),
        "EUR" => format!("€{:.2}", amount),
        "GBP" => format!("£{:.2}", amount),
        _ => format!("{} {:.2}", currency, amount),
    }
}

impl Report {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text executive summary with the top recommendations.
    pub fn executive_summary(&self) -> String {
        let currency = self.metadata.currency.as_str();
        let summary = &self.summary;
        let rule = "=".repeat(60);

        let mut out = String::new();
        out.push_str(&format!("{}\nEXECUTIVE SUMMARY: NETWORK COST ANALYSIS\n{}\n\n", rule, rule));
        out.push_str(&format!(
            "Report Date: {}\n",
            self.metadata.generated_at.format("%Y-%m-%d %H:%M")
        ));
        out.push_str(&format!("Report ID: {}\n", self.metadata.report_id));
        out.push_str(&format!("Flows Analyzed: {}\n", summary.total_flows));
        out.push_str(&format!("Total Data: {:.2} GB\n", summary.total_data_gb));
        out.push_str(&format!(
            "Total Cost: {}\n",
            format_currency(summary.total_cost, currency)
        ));
        out.push_str(&format!(
            "Monthly Projection: {}\n",
            format_currency(summary.monthly_projection, currency)
        ));
        out.push_str(&format!(
            "Peak Traffic: {:.2}% of total cost ({})\n",
            summary.peak_traffic_percentage, self.metadata.peak_hours
        ));
        out.push_str(&format!(
            "Potential Savings: {}/month\n\n",
            format_currency(self.estimated_savings.monthly_savings, currency)
        ));

        out.push_str("TOP RECOMMENDATIONS:\n");
        out.push_str(&format!("{}\n", "-".repeat(40)));
        for rec in self.recommendations.iter().take(SUMMARY_RECOMMENDATIONS) {
            out.push_str(&format!("* [{}] {}\n", rec.priority.as_str(), rec.title));
            out.push_str(&format!("  {}\n", rec.suggestion));
            out.push_str(&format!(
                "  Savings: {}\n\n",
                format_currency(rec.potential_savings, currency)
            ));
        }

        out
    }
}
