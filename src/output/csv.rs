//! CSV output formatter

use super::common::escape_csv;
use super::{AccountRow, Formatter};
use crate::error::Result;

/// Column header, same order as `AccountRow`
pub const HEADER: &str = "Name,Id,OuPath,OuId,Email,Status,JoinedMethod,JoinedTimestamp";

/// Formatter for CSV output
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, accounts: &[AccountRow]) -> Result<String> {
        let mut out = String::with_capacity(HEADER.len() + 1 + accounts.len() * 96);
        out.push_str(HEADER);
        out.push('\n');

        for row in accounts {
            let cells = [
                &row.name,
                &row.id,
                &row.ou_path,
                &row.ou_id,
                &row.email,
                &row.status,
                &row.joined_method,
                &row.joined_timestamp,
            ];
            let line = cells
                .iter()
                .map(|cell| escape_csv(cell))
                .collect::<Vec<_>>()
                .join(",");
            out.push_str(&line);
            out.push('\n');
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::row;

    #[test]
    fn test_csv_header_only_when_empty() {
        let csv = CsvFormatter.format(&[]).unwrap();
        assert_eq!(csv, format!("{}\n", HEADER));
    }

    #[test]
    fn test_csv_rows() {
        let csv = CsvFormatter
            .format(&[row("A1", "111", "/"), row("A2", "222", "/Engineering")])
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "A1,111,/,ou-1,A1@example.com,ACTIVE,CREATED,2024/01/02 03:04:05"
        );
        assert!(lines[2].starts_with("A2,222,/Engineering,"));
    }

    #[test]
    fn test_csv_escapes_cells() {
        let csv = CsvFormatter
            .format(&[row("Sales, EMEA", "333", "/Biz \"Ops\"")])
            .unwrap();
        let line = csv.lines().nth(1).unwrap();

        let quoted = "\"Sales, EMEA\",333,\"/Biz \"\"Ops\"\"\",";
        assert!(line.starts_with(quoted));
    }
}
