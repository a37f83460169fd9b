//! CLI command implementations.

pub mod check;
pub mod init_config;
pub mod populate;
pub mod validate;

use std::collections::BTreeSet;

use colored::Colorize;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width};
use shelfmap::{ReconciliationReport, RecordSet, Value};

/// Keys listed per mismatch direction before the rest are summarized.
const KEY_SAMPLE: usize = 5;

/// Print reconciliation findings, or a note that the keys are unselected.
pub(crate) fn print_reconciliation(report: Option<&ReconciliationReport>) {
    println!("{}", "Reconciliation:".yellow().bold());
    match report {
        None => println!(
            "  {}",
            "Match fields not selected; skipping key comparison".dimmed()
        ),
        Some(report) => {
            println!("{}", reconciliation_table(report));
            for message in report.messages() {
                println!("  {} {}", "⚠".yellow(), message);
            }
        }
    }
    println!();
}

/// Print a record set as a table, one column per populated field.
pub(crate) fn print_table(records: &RecordSet) {
    if records.column_count() == 0 {
        println!("  {}", "(no populated fields)".dimmed());
        return;
    }
    println!("{}", preview_table(records));
}

fn reconciliation_table(report: &ReconciliationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Identifier records"),
        header_cell("Descriptive records"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);

    let rows_match = report.row_count_mismatch().is_none();
    table.add_row(vec![
        Cell::new("Rows"),
        count_cell(report.identifier_rows, rows_match),
        count_cell(report.descriptive_rows, rows_match),
    ]);
    table.add_row(vec![
        Cell::new("Keys missing from the other side"),
        keys_cell(&report.missing_from_descriptive),
        keys_cell(&report.missing_from_identifiers),
    ]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

fn preview_table(records: &RecordSet) -> Table {
    let mut table = Table::new();
    table.set_header(records.column_names().into_iter().map(header_cell));
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(200);
    table.set_constraints(
        (0..records.column_count()).map(|_| ColumnConstraint::UpperBoundary(Width::Fixed(40))),
    );

    for row in records.rows() {
        table.add_row(row.iter().map(value_cell));
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::new("-").add_attribute(Attribute::Dim),
        other => Cell::new(other.to_cell_string()),
    }
}

fn count_cell(count: usize, matches: bool) -> Cell {
    let cell = Cell::new(count);
    if matches {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::Yellow).add_attribute(Attribute::Bold)
    }
}

fn keys_cell(keys: &BTreeSet<String>) -> Cell {
    if keys.is_empty() {
        return Cell::new("none").fg(Color::Green);
    }
    let listed: Vec<&str> = keys.iter().take(KEY_SAMPLE).map(String::as_str).collect();
    let more = keys.len().saturating_sub(KEY_SAMPLE);
    let suffix = if more > 0 { format!(" (+{} more)", more) } else { String::new() };
    Cell::new(format!("{}{}", listed.join(", "), suffix)).fg(Color::Yellow)
}
