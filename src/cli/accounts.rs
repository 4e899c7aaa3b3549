//! Accounts command arguments

use clap::Parser;

use super::common::OutputFormat;
use super::enums::AccountSortField;
use crate::config::defaults;

/// Arguments for 'accounts' command
#[derive(Parser, Debug)]
pub struct AccountsArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Sort accounts by field
    #[arg(short, long, value_enum, default_value_t = AccountSortField::Path)]
    pub sort: AccountSortField,

    /// Separator placed between OU names in the path column
    #[arg(long, default_value = defaults::PATH_SEPARATOR)]
    pub separator: String,

    /// Start traversal at this root or OU ID instead of the organization root
    #[arg(long, value_name = "ID")]
    pub root_id: Option<String>,
}
