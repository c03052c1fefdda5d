use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::drift::{DriftField, DriftReport, DriftRow};
use crate::output::change_marker;

pub fn render_drift_table(report: &DriftReport) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    let mut header = vec!["Change".to_string()];
    header.extend(report.properties.iter().cloned());
    table.set_header(header);

    for row in &report.additions {
        table.add_row(drift_row(true, row));
    }
    for row in &report.removals {
        table.add_row(drift_row(false, row));
    }
    table.to_string()
}

fn drift_row(addition: bool, row: &DriftRow) -> Row {
    let marker = Cell::new(change_marker(addition));
    let marker = if addition {
        marker.fg(Color::Green)
    } else {
        marker.fg(Color::Red)
    };
    let mut cells = vec![marker];
    cells.extend(row.iter().map(|field| Cell::new(field_text(field))));
    Row::from(cells)
}

// Multi-value fields are listed one part per line.
fn field_text(field: &DriftField) -> String {
    match field {
        DriftField::Value(v) => v.clone(),
        DriftField::Parts(parts) => parts.join("\n"),
    }
}
