//! Markdown inventory report

use chrono::{DateTime, Utc};

use super::common::{escape_markdown, format_ou_path, format_timestamp, markdown_table};
use crate::aws::{AccountRecord, IdentityInventory};

/// Run details printed at the top of the report
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub generated_at: DateTime<Utc>,
    pub account_id: String,
    pub account_name: String,
    pub path_separator: String,
}

/// Render the Identity Center inventory as a Markdown document
///
/// Rows of every section are sorted by their visible columns so two runs
/// over the same data produce the same document.
pub fn render_inventory_report(
    context: &ReportContext,
    accounts: &[AccountRecord],
    inventory: &IdentityInventory,
) -> String {
    let mut sections = Vec::with_capacity(7);

    sections.push(format!(
        "# AWS IAM Identity Center Inventory\n\n\
         - Retrieved at: {}\n\
         - Executed Account: {} ({})",
        format_timestamp(Some(&context.generated_at)),
        escape_markdown(&context.account_name),
        context.account_id
    ));

    sections.push(format!(
        "## IAM Identity Center Information\n\n\
         - Instance ARN: {}\n\
         - Identity Store ID: {}",
        inventory.instance.instance_arn, inventory.instance.identity_store_id
    ));

    sections.push(section(
        "AWS Accounts",
        &["Account Name", "Account ID", "OU Path"],
        accounts
            .iter()
            .map(|record| {
                vec![
                    record.account.name.clone(),
                    record.account.id.clone(),
                    format_ou_path(&record.ou_path, &context.path_separator),
                ]
            })
            .collect(),
    ));

    sections.push(section(
        "Principals",
        &[
            "Principal Type",
            "Display Name",
            "User Name",
            "Description",
            "Principal ID",
        ],
        inventory
            .principals
            .iter()
            .map(|p| {
                vec![
                    p.kind.to_string(),
                    p.display_name.clone(),
                    p.user_name.clone().unwrap_or_default(),
                    p.description.clone().unwrap_or_default(),
                    p.id.clone(),
                ]
            })
            .collect(),
    ));

    sections.push(section(
        "Permission Sets",
        &["Permission Set Name", "Description", "Permission Set ARN"],
        inventory
            .permission_sets
            .iter()
            .map(|ps| {
                vec![
                    ps.name.clone(),
                    ps.description.clone().unwrap_or_default(),
                    ps.arn.clone(),
                ]
            })
            .collect(),
    ));

    sections.push(section(
        "Assignments",
        &[
            "Account Name",
            "Principal Type",
            "Principal Name",
            "Permission Set Name",
        ],
        inventory
            .assignments
            .iter()
            .map(|a| {
                vec![
                    a.account_name.clone(),
                    a.principal_kind.to_string(),
                    a.principal_name.clone(),
                    a.permission_set_name.clone(),
                ]
            })
            .collect(),
    ));

    sections.push(section(
        "Group Memberships",
        &["Group Name", "User Name"],
        inventory
            .memberships
            .iter()
            .map(|m| vec![m.group_name.clone(), m.user_name.clone()])
            .collect(),
    ));

    let mut report = sections.join("\n\n");
    report.push('\n');
    report
}

fn section(title: &str, headers: &[&str], mut rows: Vec<Vec<String>>) -> String {
    rows.sort();
    format!("## {}\n\n{}", title, markdown_table(headers, rows))
}
