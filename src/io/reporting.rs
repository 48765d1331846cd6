// src/io/reporting.rs

use crate::error::SimResult;
use crate::simulation::table::{ProjectionTable, RowLabel, TableRow};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

pub const DEFAULT_EXPORT_FILE: &str = "csi_profitability_results.csv";

const HEADERS: [&str; 4] = ["Year", "Service Customers", "Repeat Purchases", "Total Profit"];

/// One exported line. Field names double as the CSV header.
#[derive(Debug, Serialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Service Customers")]
    service_customers: String,
    #[serde(rename = "Repeat Purchases")]
    repeat_purchases: String,
    #[serde(rename = "Total Profit")]
    total_profit: String,
}

impl From<&TableRow> for CsvRow {
    fn from(row: &TableRow) -> Self {
        let [year, service_customers, repeat_purchases, total_profit] = display_cells(row);
        Self {
            year,
            service_customers,
            repeat_purchases,
            total_profit,
        }
    }
}

/// Formats an integer with comma-grouped thousands, e.g. `1234567` -> `1,234,567`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Money is shown as a whole number, rounded half away from zero.
pub fn format_amount(value: f64) -> String {
    group_thousands(value.round() as i64)
}

fn format_count(value: u64) -> String {
    group_thousands(i64::try_from(value).unwrap_or(i64::MAX))
}

fn display_cells(row: &TableRow) -> [String; 4] {
    let label = match row.label {
        RowLabel::Total => "Total".to_string(),
        RowLabel::Year(year) => year.to_string(),
    };
    [
        label,
        format_count(row.service_customers),
        format_count(row.repeat_purchases),
        format_amount(row.total_profit),
    ]
}

/// Renders the table as a right-aligned text grid, totals row first.
pub fn render_table(table: &ProjectionTable) -> String {
    let cells: Vec<[String; 4]> = table.rows().map(|row| display_cells(&row)).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:>width$}"))
        .collect();
    out.push_str(&padded.join("  "));
    out.push('\n');
}

/// Writes the table as CSV with a header row. Values carry the same
/// thousands grouping as the display, so grouped cells are quoted.
pub fn write_csv<W: Write>(writer: W, table: &ProjectionTable) -> SimResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for row in table.rows() {
        wtr.serialize(CsvRow::from(&row))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the table to a CSV file at `file_path`.
pub fn export_csv<P: AsRef<Path>>(file_path: P, table: &ProjectionTable) -> SimResult<()> {
    let path = file_path.as_ref();
    let file = std::fs::File::create(path)?;
    write_csv(file, table)?;

    log::info!(
        "Exported {} rows to '{}'",
        table.records.len() + 1,
        path.display()
    );
    Ok(())
}
