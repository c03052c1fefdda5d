use anyhow::Result;

use crate::drift::{DriftReport, DriftRow};
use crate::output::change_marker;

pub fn drift_to_csv(report: &DriftReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    let mut header = vec!["change".to_string()];
    header.extend(report.properties.iter().cloned());
    writer.write_record(&header)?;

    for (addition, rows) in [(true, &report.additions), (false, &report.removals)] {
        for row in rows {
            writer.write_record(csv_record(addition, row))?;
        }
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

fn csv_record(addition: bool, row: &DriftRow) -> Vec<String> {
    let mut record = vec![change_marker(addition).to_string()];
    record.extend(row.iter().map(|field| field.joined()));
    record
}
