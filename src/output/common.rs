//! Common utilities for output formatters

use chrono::{DateTime, Utc};
use comfy_table::{presets::ASCII_MARKDOWN, Table};

use crate::config::defaults;

/// Escape a value for CSV output
/// Handles commas, quotes, and newlines according to RFC 4180
pub fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Escape a value for a Markdown table cell
pub fn escape_markdown(value: &str) -> String {
    value
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}

/// Render an OU path with a leading separator (`/` for the top level)
pub fn format_ou_path(path: &[String], separator: &str) -> String {
    format!("{}{}", separator, path.join(separator))
}

/// Render a timestamp in report format, empty when unknown
pub fn format_timestamp(timestamp: Option<&DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.format(defaults::REPORT_TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// Build a Markdown table; `_None_` when there are no rows
pub fn markdown_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return "_None_".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_MARKDOWN)
        .set_header(headers.to_vec());
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| escape_markdown(cell)).collect();
        table.add_row(cells);
    }
    table.to_string()
}
