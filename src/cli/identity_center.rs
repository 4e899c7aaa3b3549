//! Identity Center command arguments

use clap::Parser;

/// Arguments for 'identity-center' command
#[derive(Parser, Debug)]
pub struct IdentityCenterArgs {
    /// IAM Identity Center instance ARN (default: first instance)
    #[arg(long, value_name = "ARN")]
    pub instance_arn: Option<String>,
}
