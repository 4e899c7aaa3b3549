//! org-inventory - Inventory AWS Organizations and IAM Identity Center
//!
//! A CLI that walks the organization's OU tree and exports every account
//! with its OU path, and writes a Markdown report of Identity Center
//! principals, permission sets and account assignments.
//!
//! # Features
//!
//! - Iterative OU tree traversal with full path reconstruction
//! - Account export as CSV, JSON, YAML or an aligned table
//! - Identity Center inventory with group memberships and deduplicated assignments
//! - Requests signed with SigV4 from env or shared-file credentials
//! - Automatic `NextToken` pagination handling
//!
//! # Example
//!
//! ```bash
//! # Export accounts as CSV into ./output
//! org-inventory accounts
//!
//! # Sort by name and print JSON to stdout
//! org-inventory accounts -f json -s name --stdout
//!
//! # Identity Center report for a specific instance
//! org-inventory identity-center --instance-arn arn:aws:sso:::instance/ssoins-1234
//! ```

pub mod aws;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod ui;

pub use aws::{
    run_accounts_command, run_identity_center_command, Account, AccountRecord, Assignment,
    AwsClient, AwsConfig, CredentialResolver, IdentityInventory, OrganizationInventory,
};
pub use cli::{AccountSortField, AccountsArgs, Cli, Command, IdentityCenterArgs, OutputFormat};
pub use error::{InventoryError, Result};
pub use output::{account_rows, render_accounts, render_inventory_report, AccountRow};
