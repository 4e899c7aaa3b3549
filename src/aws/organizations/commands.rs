//! Accounts command handler

use chrono::Utc;
use log::debug;

use crate::cli::{AccountsArgs, Cli, OutputFormat};
use crate::error::Result;
use crate::output::{account_rows, emit_report, render_accounts, ReportTarget};
use crate::ui::{clear_spinner, create_spinner, finish_spinner};

use super::api::OrganizationsApi;
use super::collector::{OrganizationTreeCollector, TreeOptions};

/// Run the accounts export command
///
/// Nothing is written unless the whole tree was collected.
pub async fn run_accounts_command<A>(api: &A, cli: &Cli, args: &AccountsArgs) -> Result<()>
where
    A: OrganizationsApi + ?Sized,
{
    debug!(
        "Exporting accounts: format={}, sort={:?}, root_id={:?}",
        args.format, args.sort, args.root_id
    );

    let spinner = create_spinner("Collecting organization accounts...", cli.batch);

    let options = TreeOptions {
        root_id: args.root_id.clone(),
    };
    let inventory = match OrganizationTreeCollector::new(api, options).collect().await {
        Ok(inventory) => inventory,
        Err(e) => {
            clear_spinner(spinner);
            return Err(e);
        }
    };

    finish_spinner(
        spinner,
        &format!("Collected {} accounts", inventory.accounts.len()),
    );

    let rows = account_rows(&inventory.accounts, &args.separator, args.sort);
    let content = render_accounts(&rows, args.format)?;

    // The aligned table is meant for a terminal, never for a file
    let target = if args.format == OutputFormat::Table {
        ReportTarget::Stdout
    } else {
        ReportTarget::new(cli.stdout, &cli.output_dir)
    };

    if let Some(path) = emit_report(
        &target,
        "accounts",
        args.format.extension(),
        &content,
        &Utc::now(),
    )? {
        println!("Wrote {} accounts to {}", rows.len(), path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::organizations::fake::FakeOrganization;
    use crate::cli::Command;
    use crate::error::InventoryError;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn parse(dir: &TempDir, extra: &[&str]) -> (Cli, AccountsArgs) {
        let out = dir.path().to_string_lossy().to_string();
        let mut argv = vec!["org-inventory", "--batch", "-d", out.as_str(), "accounts"];
        argv.extend_from_slice(extra);
        let mut cli = Cli::parse_from(argv);
        let args = match std::mem::replace(
            &mut cli.command,
            Command::Accounts(AccountsArgs::parse_from(["accounts"])),
        ) {
            Command::Accounts(args) => args,
            other => panic!("Expected accounts command, got {:?}", other),
        };
        (cli, args)
    }

    fn written_files(dir: &TempDir) -> Vec<PathBuf> {
        fs::read_dir(dir.path())
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default()
    }

    fn org() -> FakeOrganization {
        FakeOrganization::new("r-1")
            .with_account("r-1", "111111111111", "A1")
            .with_unit("r-1", "ou-eng", "Engineering")
            .with_account("ou-eng", "222222222222", "A2")
    }

    #[tokio::test]
    async fn test_writes_csv_report() {
        let dir = TempDir::new().unwrap();
        let (cli, args) = parse(&dir, &[]);

        run_accounts_command(&org(), &cli, &args).await.unwrap();

        let files = written_files(&dir);
        assert_eq!(files.len(), 1);
        let name = files[0].file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("accounts_"));
        assert!(name.ends_with(".csv"));

        let content = fs::read_to_string(&files[0]).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("A1,111111111111,/,r-1,"));
        assert!(lines[2].starts_with("A2,222222222222,/Engineering,ou-eng,"));
    }

    #[tokio::test]
    async fn test_json_with_custom_separator() {
        let dir = TempDir::new().unwrap();
        let org = org()
            .with_unit("ou-eng", "ou-plat", "Platform")
            .with_account("ou-plat", "333333333333", "A3");
        let (cli, args) = parse(&dir, &["-f", "json", "--separator", " > "]);

        run_accounts_command(&org, &cli, &args).await.unwrap();

        let files = written_files(&dir);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].extension().unwrap(), "json");
        let content = fs::read_to_string(&files[0]).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 3);
        assert_eq!(rows[2]["OuPath"], " > Engineering > Platform");
    }

    #[tokio::test]
    async fn test_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let (cli, args) = parse(&dir, &[]);
        let org = org().failing_at("ou-eng");

        let result = run_accounts_command(&org, &cli, &args).await;

        assert!(matches!(result, Err(InventoryError::Api { .. })));
        assert!(written_files(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_table_goes_to_stdout() {
        let dir = TempDir::new().unwrap();
        let (cli, args) = parse(&dir, &["-f", "table"]);

        run_accounts_command(&org(), &cli, &args).await.unwrap();

        assert!(written_files(&dir).is_empty());
    }

    #[tokio::test]
    async fn test_root_id_limits_traversal() {
        let dir = TempDir::new().unwrap();
        let (cli, args) = parse(&dir, &["--root-id", "ou-eng"]);
        let org = org();

        run_accounts_command(&org, &cli, &args).await.unwrap();

        assert!(!org.call_log().contains(&"ListRoots".to_string()));
        let content = fs::read_to_string(&written_files(&dir)[0]).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("A2,222222222222,/,ou-eng,"));
    }
}
