//! Sort enums for CLI commands

use clap::ValueEnum;

/// Sort field options for accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum AccountSortField {
    /// Keep tree order: each OU's accounts before its child OUs (default)
    #[default]
    Path,
    /// Sort by account name, then OU path
    Name,
}

impl std::fmt::Display for AccountSortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountSortField::Path => write!(f, "path"),
            AccountSortField::Name => write!(f, "name"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_sort_field_display() {
        assert_eq!(AccountSortField::Path.to_string(), "path");
        assert_eq!(AccountSortField::Name.to_string(), "name");
    }

    #[test]
    fn test_account_sort_field_default() {
        assert_eq!(AccountSortField::default(), AccountSortField::Path);
    }
}
