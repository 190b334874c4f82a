//! Terminal and JSON rendering of view reports.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use scdb_model::{
    ContingencyTable, CorrelationMatrix, FrequencyTable, Panel, PanelContent, TopValues,
    ViewReport,
};

/// Placeholder printed for panels with nothing to show.
pub const NO_DATA: &str = "no data";

/// Placeholder for coefficients that cannot be computed.
pub const NOT_AVAILABLE: &str = "n/a";

/// Serializes any report value as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize output")
}

/// Renders one view: heading, applied filters, metrics, then each panel.
pub fn render_report(report: &ViewReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", report.title);
    if report.selection.is_empty() {
        let _ = writeln!(out, "Filters: none");
    } else {
        let filters: Vec<String> = report
            .selection
            .iter()
            .map(|(column, values)| {
                let values: Vec<&str> = values.iter().map(String::as_str).collect();
                format!("{column} in [{}]", values.join(", "))
            })
            .collect();
        let _ = writeln!(out, "Filters: {}", filters.join("; "));
    }
    let _ = writeln!(out, "Rows: {}", report.row_count);

    if !report.metrics.is_empty() {
        let mut table = styled_table();
        table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
        for metric in &report.metrics {
            table.add_row(vec![Cell::new(&metric.label), Cell::new(metric.value)]);
        }
        align_column(&mut table, 1, CellAlignment::Right);
        let _ = writeln!(out, "{table}");
    }

    for panel in &report.panels {
        let _ = writeln!(out);
        out.push_str(&render_panel(panel));
    }
    out
}

/// Renders several views separated by blank lines.
pub fn render_reports(reports: &[ViewReport]) -> String {
    reports
        .iter()
        .map(render_report)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_panel(panel: &Panel) -> String {
    let mut out = format!("{}\n", panel.title);
    if panel.content.is_empty() {
        let _ = writeln!(out, "  ({NO_DATA})");
        return out;
    }
    let table = match &panel.content {
        PanelContent::Frequency(table) => frequency_table(table),
        PanelContent::Contingency(table) => contingency_table(table),
        PanelContent::Correlation(matrix) => correlation_table(matrix),
        PanelContent::TopValues(top) => top_values_table(top),
    };
    let _ = writeln!(out, "{table}");
    out
}

/// Lists the values each filter flag accepts.
pub fn render_options(rows: usize, options: &BTreeMap<String, Vec<String>>) -> String {
    let mut table = styled_table();
    table.set_header(vec![header_cell("Column"), header_cell("Values")]);
    for (column, values) in options {
        let values = if values.is_empty() {
            dim_cell(NO_DATA)
        } else {
            Cell::new(values.join(", "))
        };
        table.add_row(vec![Cell::new(column).add_attribute(Attribute::Bold), values]);
    }
    format!("Rows: {rows}\n{table}\n")
}

fn frequency_table(table: &FrequencyTable) -> Table {
    let total = table.total();
    let mut out = styled_table();
    out.set_header(vec![
        header_cell(&table.column),
        header_cell("Cases"),
        header_cell("Share"),
    ]);
    for entry in &table.entries {
        out.add_row(vec![
            Cell::new(&entry.label),
            Cell::new(entry.count),
            Cell::new(share(entry.count, total)),
        ]);
    }
    align_column(&mut out, 1, CellAlignment::Right);
    align_column(&mut out, 2, CellAlignment::Right);
    out
}

fn contingency_table(table: &ContingencyTable) -> Table {
    let mut out = styled_table();
    let mut header = vec![header_cell(&format!(
        "{} \\ {}",
        table.row_column, table.column_column
    ))];
    header.extend(table.column_labels.iter().map(|label| header_cell(label)));
    header.push(header_cell("Total"));
    out.set_header(header);

    for (idx, label) in table.row_labels.iter().enumerate() {
        let mut row = vec![Cell::new(label).add_attribute(Attribute::Bold)];
        row.extend(table.cells[idx].iter().map(|count| count_cell(*count)));
        row.push(Cell::new(table.row_total(idx)).add_attribute(Attribute::Bold));
        out.add_row(row);
    }

    let mut totals = vec![Cell::new("Total").fg(Color::Cyan).add_attribute(Attribute::Bold)];
    totals.extend(
        (0..table.column_labels.len())
            .map(|idx| Cell::new(table.column_total(idx)).add_attribute(Attribute::Bold)),
    );
    totals.push(Cell::new(table.total()).add_attribute(Attribute::Bold));
    out.add_row(totals);

    for idx in 1..=table.column_labels.len() + 1 {
        align_column(&mut out, idx, CellAlignment::Right);
    }
    out
}

fn correlation_table(matrix: &CorrelationMatrix) -> Table {
    let mut out = styled_table();
    let mut header = vec![header_cell("")];
    header.extend(matrix.columns.iter().map(|name| header_cell(name)));
    out.set_header(header);
    for (name, values) in matrix.columns.iter().zip(&matrix.values) {
        let mut row = vec![Cell::new(name).add_attribute(Attribute::Bold)];
        row.extend(values.iter().map(|value| coefficient_cell(*value)));
        out.add_row(row);
    }
    for idx in 1..=matrix.columns.len() {
        align_column(&mut out, idx, CellAlignment::Right);
    }
    out
}

fn top_values_table(top: &TopValues) -> Table {
    let mut out = styled_table();
    out.set_header(vec![header_cell(&top.column), header_cell("Cases")]);
    for entry in &top.entries {
        out.add_row(vec![Cell::new(&entry.short_label), Cell::new(entry.count)]);
    }
    align_column(&mut out, 1, CellAlignment::Right);
    out
}

/// Percentage of `total`, one decimal place.
pub fn share(count: u64, total: u64) -> String {
    if total == 0 {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}

pub fn format_coefficient(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.3}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn coefficient_cell(value: Option<f64>) -> Cell {
    match value {
        Some(_) => Cell::new(format_coefficient(value)),
        None => dim_cell(NOT_AVAILABLE),
    }
}

fn count_cell(count: u64) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_handles_zero_total() {
        assert_eq!(share(0, 0), "n/a");
        assert_eq!(share(1, 3), "33.3%");
        assert_eq!(share(60, 100), "60.0%");
    }

    #[test]
    fn coefficients_print_three_places() {
        assert_eq!(format_coefficient(Some(1.0)), "1.000");
        assert_eq!(format_coefficient(Some(-0.12345)), "-0.123");
        assert_eq!(format_coefficient(None), "n/a");
    }
}
