//! Output formatting module
//!
//! Handles the account export formats (CSV, JSON, YAML, table), the
//! Markdown inventory report, and writing reports to disk.

mod common;
mod csv;
mod json;
mod markdown;
mod table;
mod writer;

use serde::Serialize;

use crate::aws::AccountRecord;
use crate::cli::{AccountSortField, OutputFormat};
use crate::error::Result;

pub use self::common::{
    escape_csv, escape_markdown, format_ou_path, format_timestamp, markdown_table,
};
pub use self::csv::CsvFormatter;
pub use self::json::{JsonFormatter, YamlFormatter};
pub use self::markdown::{render_inventory_report, ReportContext};
pub use self::table::TableFormatter;
pub use self::writer::{emit_report, report_file_name, write_atomic, ReportTarget};

/// Trait for account formatters
pub trait Formatter {
    /// Render the rows into a complete document
    fn format(&self, accounts: &[AccountRow]) -> Result<String>;
}

/// Flattened account data for output
///
/// Field order is the column order of every format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountRow {
    pub name: String,
    pub id: String,
    pub ou_path: String,
    pub ou_id: String,
    pub email: String,
    pub status: String,
    pub joined_method: String,
    pub joined_timestamp: String,
}

impl AccountRow {
    /// Create a row, rendering the OU path with `separator`
    pub fn new(record: &AccountRecord, separator: &str) -> Self {
        let account = &record.account;
        Self {
            name: account.name.clone(),
            id: account.id.clone(),
            ou_path: format_ou_path(&record.ou_path, separator),
            ou_id: record.parent_id.clone(),
            email: account.email.clone(),
            status: account.status.to_string(),
            joined_method: account.joined_method.to_string(),
            joined_timestamp: format_timestamp(account.joined_timestamp.as_ref()),
        }
    }
}

/// Flatten and sort account records
pub fn account_rows(
    records: &[AccountRecord],
    separator: &str,
    sort: AccountSortField,
) -> Vec<AccountRow> {
    let mut rows: Vec<AccountRow> = records
        .iter()
        .map(|record| AccountRow::new(record, separator))
        .collect();
    sort_rows(&mut rows, sort);
    rows
}

/// Sort rows; `Path` keeps traversal order
fn sort_rows(rows: &mut [AccountRow], field: AccountSortField) {
    match field {
        AccountSortField::Path => {}
        AccountSortField::Name => rows.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.ou_path.cmp(&b.ou_path))
        }),
    }
}

/// Render account rows in the requested format
pub fn render_accounts(rows: &[AccountRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Csv => CsvFormatter.format(rows),
        OutputFormat::Json => JsonFormatter.format(rows),
        OutputFormat::Yaml => YamlFormatter.format(rows),
        OutputFormat::Table => TableFormatter.format(rows),
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::row;
    use super::*;
    use crate::aws::{Account, AccountStatus, JoinedMethod};
    use chrono::TimeZone;

    fn record(name: &str, path: &[&str]) -> AccountRecord {
        AccountRecord {
            account: Account {
                id: format!("id-{}", name),
                arn: String::new(),
                name: name.to_string(),
                email: format!("{}@example.com", name),
                status: AccountStatus::Suspended,
                joined_method: JoinedMethod::Invited,
                joined_timestamp: Some(chrono::Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap()),
            },
            parent_id: "ou-parent".to_string(),
            ou_path: path.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_account_row_creation() {
        let row = AccountRow::new(&record("prod", &["Engineering", "Platform"]), "/");

        assert_eq!(row.name, "prod");
        assert_eq!(row.id, "id-prod");
        assert_eq!(row.ou_path, "/Engineering/Platform");
        assert_eq!(row.ou_id, "ou-parent");
        assert_eq!(row.status, "SUSPENDED");
        assert_eq!(row.joined_method, "INVITED");
        assert_eq!(row.joined_timestamp, "2021/06/01 12:00:00");
    }

    #[test]
    fn test_account_rows_keep_tree_order() {
        let records = vec![record("zeta", &[]), record("alpha", &["Eng"])];
        let rows = account_rows(&records, "/", AccountSortField::Path);

        assert_eq!(rows[0].name, "zeta");
        assert_eq!(rows[1].name, "alpha");
    }

    #[test]
    fn test_sort_by_name_then_path() {
        let mut rows = vec![
            row("beta", "1", "/"),
            row("alpha", "2", "/Z"),
            row("alpha", "3", "/A"),
        ];
        sort_rows(&mut rows, AccountSortField::Name);

        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[test]
    fn test_render_accounts_dispatch() {
        let rows = vec![row("a", "1", "/")];
        assert!(render_accounts(&rows, OutputFormat::Csv)
            .unwrap()
            .starts_with("Name,Id,"));
        assert!(render_accounts(&rows, OutputFormat::Json)
            .unwrap()
            .trim_start()
            .starts_with('['));
        assert!(render_accounts(&rows, OutputFormat::Yaml)
            .unwrap()
            .contains("Name: a"));
        assert!(render_accounts(&rows, OutputFormat::Table)
            .unwrap()
            .contains("Total: 1"));
    }
}
