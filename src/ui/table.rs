//! Plain-text table rendering for the batch list, batch detail and history.
//!
//! Cells are padded on their plain text first and styled afterwards, so
//! ANSI codes never disturb column alignment.

use console::style;

use crate::model::{Batch, HistoryAction, HistoryRecord};
use crate::views::{BatchRow, Details, format_timestamp};

const GAP: &str = "  ";

pub const BATCH_HEADERS: [&str; 12] = [
    "Batch No.",
    "Shed No.",
    "Age",
    "Opening Count",
    "Mortality",
    "Culls",
    "Closing Count",
    "Table",
    "Jumbo",
    "CR",
    "Total Eggs",
    "Date",
];
const TOTAL_EGGS_COL: usize = 10;

pub const HISTORY_HEADERS: [&str; 5] = ["Batch", "Action", "Changed By", "Changed At", "Details"];
const ACTION_COL: usize = 1;

fn grid(
    headers: &[&str],
    rows: &[Vec<String>],
    paint: impl Fn(usize, usize, String) -> String,
) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(col, h)| style(format!("{:<w$}", h, w = widths[col])).bold().to_string())
        .collect();
    out.push_str(header_line.join(GAP).trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join(GAP));
    out.push('\n');

    for (row_idx, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| paint(row_idx, col, format!("{:<w$}", cell, w = widths[col])))
            .collect();
        out.push_str(cells.join(GAP).trim_end());
        out.push('\n');
    }
    out
}

pub fn batch_cells(batch: &Batch, total_eggs: u64) -> Vec<String> {
    vec![
        batch.batch_no.clone(),
        batch.shed_no.to_string(),
        batch.age.label(),
        batch.opening_count.to_string(),
        batch.mortality.to_string(),
        batch.culls.to_string(),
        batch.closing_count.to_string(),
        batch.table.to_string(),
        batch.jumbo.to_string(),
        batch.cr.to_string(),
        total_eggs.to_string(),
        batch.date.format("%Y-%m-%d").to_string(),
    ]
}

/// The batch management table.
pub fn render_batch_table(rows: &[BatchRow<'_>]) -> String {
    if rows.is_empty() {
        return "No batches found.\n".to_string();
    }
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| batch_cells(r.batch, r.total_eggs))
        .collect();
    grid(&BATCH_HEADERS, &cells, |_, col, cell| {
        if col == TOTAL_EGGS_COL {
            style(cell).cyan().bold().to_string()
        } else {
            cell
        }
    })
}

/// Key/value detail for a single batch, including the derived figures.
pub fn render_batch_detail(batch: &Batch) -> String {
    let rows = [
        ("Batch No.", batch.batch_no.clone()),
        ("Shed No.", batch.shed_no.to_string()),
        ("Age", format!("{} ({})", batch.age.label(), batch.age)),
        ("Date", batch.date.format("%Y-%m-%d").to_string()),
        ("Opening Count", batch.opening_count.to_string()),
        ("Mortality", batch.mortality.to_string()),
        ("Culls", batch.culls.to_string()),
        ("Closing Count", batch.closing_count.to_string()),
        (
            "Calculated Closing",
            batch.calculated_closing_count().to_string(),
        ),
        ("Table", batch.table.to_string()),
        ("Jumbo", batch.jumbo.to_string()),
        ("CR", batch.cr.to_string()),
        ("Total Eggs", batch.total_eggs().to_string()),
        ("HD %", format!("{:.2}", batch.hen_day_percent())),
    ];
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(k, v)| format!("{}  {}\n", style(format!("{:<w$}", k, w = width)).dim(), v))
        .collect()
}

/// Colour for an action badge.
pub fn paint_action(action: &HistoryAction, text: String) -> String {
    match action {
        HistoryAction::Create => style(text).green().to_string(),
        HistoryAction::Update => style(text).blue().to_string(),
        HistoryAction::Delete => style(text).red().to_string(),
        HistoryAction::Other(_) => style(text).dim().to_string(),
    }
}

fn details_text(record: &HistoryRecord) -> String {
    match Details::of(record) {
        Details::Change { previous, new } => format!("Previous: {}  New: {}", previous, new),
        Details::Info(info) => info,
    }
}

/// The audit log table.
pub fn render_history_table(records: &[&HistoryRecord]) -> String {
    if records.is_empty() {
        return "No history records found.\n".to_string();
    }
    let cells: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.batch.clone(),
                r.action.to_string(),
                r.actor().to_string(),
                format_timestamp(&r.changed_at),
                details_text(r),
            ]
        })
        .collect();
    grid(&HISTORY_HEADERS, &cells, |row, col, cell| {
        if col == ACTION_COL {
            paint_action(&records[row].action, cell)
        } else {
            cell
        }
    })
}
