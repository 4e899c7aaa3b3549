//! Table output formatter

use comfy_table::{presets::NOTHING, Table};

use super::{AccountRow, Formatter};
use crate::error::Result;

/// Formatter for terminal table output
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format(&self, accounts: &[AccountRow]) -> Result<String> {
        let mut table = Table::new();
        table.load_preset(NOTHING).set_header(vec![
            "Name",
            "Account ID",
            "OU Path",
            "OU ID",
            "Email",
            "Status",
            "Joined Method",
            "Joined",
        ]);

        for row in accounts {
            table.add_row(vec![
                &row.name,
                &row.id,
                &row.ou_path,
                &row.ou_id,
                &row.email,
                &row.status,
                &row.joined_method,
                &row.joined_timestamp,
            ]);
        }

        Ok(format!("{}\n\nTotal: {}\n", table, accounts.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::row;

    #[test]
    fn test_table_formatter_empty() {
        let out = TableFormatter.format(&[]).unwrap();
        assert!(out.contains("Account ID"));
        assert!(out.contains("Total: 0"));
    }

    #[test]
    fn test_table_formatter_with_data() {
        let out = TableFormatter
            .format(&[row("shared", "123456789012", "/Infra")])
            .unwrap();

        assert!(out.contains("shared"));
        assert!(out.contains("123456789012"));
        assert!(out.contains("/Infra"));
        assert!(out.contains("Total: 1"));
    }
}
