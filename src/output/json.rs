//! JSON and YAML output formatters

use super::{AccountRow, Formatter};
use crate::error::Result;

/// Formatter for JSON output
pub struct JsonFormatter;

/// Formatter for YAML output
pub struct YamlFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, accounts: &[AccountRow]) -> Result<String> {
        let mut json = serde_json::to_string_pretty(accounts)?;
        json.push('\n');
        Ok(json)
    }
}

impl Formatter for YamlFormatter {
    fn format(&self, accounts: &[AccountRow]) -> Result<String> {
        Ok(serde_yml::to_string(accounts)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::row;

    #[test]
    fn test_json_uses_column_names() {
        let json = JsonFormatter.format(&[row("A1", "111", "/Eng")]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["Name"], "A1");
        assert_eq!(parsed[0]["Id"], "111");
        assert_eq!(parsed[0]["OuPath"], "/Eng");
        assert_eq!(parsed[0]["JoinedTimestamp"], "2024/01/02 03:04:05");
    }

    #[test]
    fn test_json_empty_array() {
        let json = JsonFormatter.format(&[]).unwrap();
        assert_eq!(json.trim(), "[]");
    }

    #[test]
    fn test_yaml_output() {
        let yaml = YamlFormatter.format(&[row("A1", "111", "/")]).unwrap();
        let parsed: serde_json::Value = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(parsed[0]["Email"], "A1@example.com");
        assert_eq!(parsed[0]["OuId"], "ou-1");
    }
}
