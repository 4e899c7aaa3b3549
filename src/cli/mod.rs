//! CLI argument parsing

mod accounts;
mod common;
mod enums;
mod identity_center;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::defaults;

pub use accounts::AccountsArgs;
pub use common::OutputFormat;
pub use enums::AccountSortField;
pub use identity_center::IdentityCenterArgs;

/// AWS organization inventory CLI
#[derive(Parser, Debug)]
#[command(name = "org-inventory")]
#[command(version)]
#[command(
    about = "Inventory AWS Organizations accounts and IAM Identity Center assignments",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// AWS region for Identity Center and STS (Organizations always uses us-east-1)
    #[arg(long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Profile in the shared credentials file
    #[arg(long, global = true, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Send every request to this endpoint instead of the AWS service endpoints
    #[arg(long, global = true, env = "AWS_ENDPOINT_URL", value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Directory reports are written to
    #[arg(short = 'd', long, global = true, default_value = defaults::OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Print the report to stdout instead of writing a file
    #[arg(long, global = true, default_value_t = false)]
    pub stdout: bool,

    /// Batch mode: no spinners or interactive output
    #[arg(long, global = true, default_value_t = false)]
    pub batch: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export every organization account with its OU path
    #[command(visible_alias = "accts")]
    Accounts(AccountsArgs),

    /// Write the IAM Identity Center inventory report (Markdown)
    #[command(visible_alias = "sso")]
    IdentityCenter(IdentityCenterArgs),
}
