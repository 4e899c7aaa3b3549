//! Identity Center inventory command handler

use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use log::{debug, info};

use crate::aws::organizations::{OrganizationTreeCollector, OrganizationsApi, TreeOptions};
use crate::aws::{AwsClient, CallerIdentity};
use crate::cli::{Cli, IdentityCenterArgs};
use crate::config::defaults;
use crate::error::Result;
use crate::output::{emit_report, render_inventory_report, ReportContext, ReportTarget};
use crate::ui::{clear_spinner, create_spinner, finish_spinner, set_spinner_message};

use super::api::IdentityCenterApi;
use super::collector::{select_instance, IdentityAssignmentCollector};

/// Run the Identity Center inventory command
///
/// Resolves the calling account, collects the organization tree and the
/// Identity Center data, then writes a single Markdown report.
pub async fn run_identity_center_command(
    client: &AwsClient,
    cli: &Cli,
    args: &IdentityCenterArgs,
) -> Result<()> {
    let spinner = create_spinner("Resolving caller identity...", cli.batch);
    let generated_at = Utc::now();

    let result: Result<String> = async {
        let caller = client.get_caller_identity().await?;
        debug!("Running as {} in account {}", caller.arn, caller.account);
        build_inventory_report(
            client,
            client,
            &caller,
            args.instance_arn.as_deref(),
            &generated_at,
            spinner.as_ref(),
        )
        .await
    }
    .await;

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            clear_spinner(spinner);
            return Err(e);
        }
    };
    finish_spinner(spinner, "Inventory collected");

    let target = ReportTarget::new(cli.stdout, &cli.output_dir);
    if let Some(path) = emit_report(&target, "inventory", "md", &report, &generated_at)? {
        println!("Wrote inventory report to {}", path.display());
    }

    Ok(())
}

/// Collect everything the report needs and render it
pub async fn build_inventory_report<O, I>(
    orgs: &O,
    sso: &I,
    caller: &CallerIdentity,
    instance_arn: Option<&str>,
    generated_at: &DateTime<Utc>,
    spinner: Option<&ProgressBar>,
) -> Result<String>
where
    O: OrganizationsApi + ?Sized,
    I: IdentityCenterApi + ?Sized,
{
    set_spinner_message(spinner, "Collecting organization accounts...");
    let tree = OrganizationTreeCollector::new(orgs, TreeOptions::default())
        .collect()
        .await?;

    let account_name = match tree.account_by_id(&caller.account) {
        Some(record) => record.account.name.clone(),
        None => {
            debug!(
                "Account {} not below the root, describing it",
                caller.account
            );
            orgs.describe_account(&caller.account).await?.name
        }
    };

    set_spinner_message(spinner, "Collecting Identity Center assignments...");
    let instance = select_instance(sso.list_instances().await?, instance_arn)?;
    info!("Using Identity Center instance {}", instance.instance_arn);

    let inventory = IdentityAssignmentCollector::new(sso, instance)
        .collect(&tree.accounts)
        .await?;

    let context = ReportContext {
        generated_at: *generated_at,
        account_id: caller.account.clone(),
        account_name,
        path_separator: defaults::PATH_SEPARATOR.to_string(),
    };

    let report = render_inventory_report(&context, &tree.accounts, &inventory);
    Ok(report)
}
