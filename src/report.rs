use anyhow::Result;

use crate::drift::DriftReport;
use crate::output::csv::drift_to_csv;
use crate::output::json::render_json;
use crate::output::table::render_drift_table;
use crate::output::OutputFormat;

/// Receives the result of a successful comparison for display.
pub trait DriftReporter {
    fn report(&self, report: &DriftReport) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutReporter {
    pub format: OutputFormat,
}

impl StdoutReporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl DriftReporter for StdoutReporter {
    fn report(&self, report: &DriftReport) -> Result<()> {
        println!("{}", render_report(report, self.format)?);
        Ok(())
    }
}

pub fn render_report(report: &DriftReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Csv => drift_to_csv(report),
        OutputFormat::Table => {
            if report.additions.is_empty() && report.removals.is_empty() {
                return Ok(format!("No drift detected for {}.", report.name));
            }
            Ok(format!(
                "Drift for {}: {} new, {} missing\n{}",
                report.name,
                report.additions.len(),
                report.removals.len(),
                render_drift_table(report)
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::render_report;
    use crate::drift::{DriftField, DriftReport};
    use crate::output::OutputFormat;

    fn report(additions: usize) -> DriftReport {
        DriftReport {
            name: "check".to_string(),
            properties: vec!["n.id".to_string()],
            additions: (0..additions)
                .map(|i| vec![DriftField::Value(format!("i-{i}"))])
                .collect(),
            removals: Vec::new(),
            detected_at: Utc::now(),
        }
    }

    #[test]
    fn empty_table_report_says_no_drift() {
        let rendered = render_report(&report(0), OutputFormat::Table).expect("render");
        assert_eq!(rendered, "No drift detected for check.");
    }

    #[test]
    fn table_report_has_summary_line() {
        let rendered = render_report(&report(2), OutputFormat::Table).expect("render");
        assert!(rendered.starts_with("Drift for check: 2 new, 0 missing"));
    }

    #[test]
    fn json_report_carries_metadata() {
        let rendered = render_report(&report(1), OutputFormat::Json).expect("render");
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("parse");
        assert_eq!(parsed["name"], "check");
        assert_eq!(parsed["additions"][0][0], "i-0");
    }
}
