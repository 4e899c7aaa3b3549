//! org-inventory - Main entry point

use clap::Parser;
use log::{debug, info};

use org_inventory::aws::resolve_region;
use org_inventory::{
    run_accounts_command, run_identity_center_command, AwsClient, AwsConfig, Cli, Command,
    CredentialResolver,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting org-inventory v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: region={:?}, profile={:?}, endpoint_url={:?}, output_dir={}, stdout={}",
        cli.region,
        cli.profile,
        cli.endpoint_url,
        cli.output_dir.display(),
        cli.stdout
    );

    let region = resolve_region(cli.region.as_deref());
    let credentials = CredentialResolver::new(cli.profile.as_deref()).resolve()?;

    let config = AwsConfig::new(region, credentials)
        .with_endpoint_url(cli.endpoint_url.clone());
    let client = AwsClient::new(config);
    info!("Using region {}", client.region());

    match &cli.command {
        Command::Accounts(args) => run_accounts_command(&client, &cli, args).await?,
        Command::IdentityCenter(args) => run_identity_center_command(&client, &cli, args).await?,
    }

    Ok(())
}
